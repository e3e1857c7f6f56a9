//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod env_secret_store;
mod graphhopper_adapter;

pub use env_secret_store::EnvSecretStore;
pub use graphhopper_adapter::GraphHopperAdapter;
