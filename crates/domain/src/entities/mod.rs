//! Domain entities - Results with a lifecycle of one calculation

mod emission_report;

pub use emission_report::{EmissionReport, RouteMeasurement};
