//! Emission calculation service
//!
//! Runs the geocode → geocode → route → estimate pipeline and owns the
//! observable [`CalculationState`]. Every invocation takes a ticket; only the
//! holder of the latest ticket may write state, so a slow earlier request can
//! never overwrite the outcome of a later one.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use domain::{EmissionReport, GeoPoint, RouteMeasurement, RouteQuery, ShipmentRequest};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use super::calculation::{CalculationFailure, CalculationState, LocationSide, PipelineStage};
use crate::ports::{GeocodingError, GeocodingPort, RoutingError, RoutingPort};

/// Default per-stage timeout in seconds
const DEFAULT_STAGE_TIMEOUT_SECS: u64 = 10;

/// Configuration for the emission service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionServiceConfig {
    /// Upper bound for each network stage
    #[serde(default = "default_stage_timeout", with = "duration_secs")]
    pub stage_timeout: Duration,
}

const fn default_stage_timeout() -> Duration {
    Duration::from_secs(DEFAULT_STAGE_TIMEOUT_SECS)
}

impl Default for EmissionServiceConfig {
    fn default() -> Self {
        Self {
            stage_timeout: default_stage_timeout(),
        }
    }
}

impl EmissionServiceConfig {
    /// Config with the given per-stage timeout in seconds
    #[must_use]
    pub const fn with_timeout_secs(secs: u64) -> Self {
        Self {
            stage_timeout: Duration::from_secs(secs),
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// Orchestrates geocoding, routing and the emission formula
pub struct EmissionService {
    geocoder: Arc<dyn GeocodingPort>,
    router: Arc<dyn RoutingPort>,
    config: EmissionServiceConfig,
    latest_ticket: AtomicU64,
    state: RwLock<CalculationState>,
}

impl fmt::Debug for EmissionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmissionService")
            .field("config", &self.config)
            .field("latest_ticket", &self.latest_ticket.load(Ordering::SeqCst))
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl EmissionService {
    /// Create a service with default configuration
    #[must_use]
    pub fn new(geocoder: Arc<dyn GeocodingPort>, router: Arc<dyn RoutingPort>) -> Self {
        Self {
            geocoder,
            router,
            config: EmissionServiceConfig::default(),
            latest_ticket: AtomicU64::new(0),
            state: RwLock::new(CalculationState::Idle),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: EmissionServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &EmissionServiceConfig {
        &self.config
    }

    /// Snapshot of the observable state
    #[must_use]
    pub fn state(&self) -> CalculationState {
        self.state.read().clone()
    }

    /// Ticket handed to the most recent invocation (0 before the first)
    #[must_use]
    pub fn latest_ticket(&self) -> u64 {
        self.latest_ticket.load(Ordering::SeqCst)
    }

    /// Calculate emissions for a shipment
    ///
    /// Invalid input returns the state to `Idle` without any network call.
    /// Otherwise the state moves to `Calculating` and then to `Succeeded` or
    /// `Failed`, unless a newer invocation (or [`cancel`](Self::cancel))
    /// arrived meanwhile, in which case this returns
    /// [`CalculationFailure::Superseded`] and leaves the state untouched.
    #[instrument(
        skip(self, request),
        fields(
            source = %request.route.source,
            destination = %request.route.destination,
            mode = %request.mode
        )
    )]
    pub async fn calculate(
        &self,
        request: &ShipmentRequest,
    ) -> Result<EmissionReport, CalculationFailure> {
        let ticket = self.next_ticket();

        if let Err(e) = request.validate() {
            warn!(ticket, error = %e, "Rejected shipment request");
            self.commit(ticket, CalculationState::Idle);
            return Err(CalculationFailure::Validation {
                message: e.to_string(),
            });
        }

        if !self.commit(ticket, CalculationState::Calculating { ticket }) {
            return Err(CalculationFailure::Superseded { ticket });
        }
        debug!(ticket, "Calculation started");

        let outcome = self
            .measure(Some(ticket), &request.route)
            .await
            .map(|route| EmissionReport::new(route, request.weight_kg, request.transport_mode()));

        match outcome {
            Ok(report) => {
                let next = CalculationState::Succeeded {
                    ticket,
                    report: Box::new(report.clone()),
                };
                if self.commit(ticket, next) {
                    info!(
                        ticket,
                        distance_km = report.distance_km(),
                        kg_co2 = report.kg_co2(),
                        "Calculation succeeded"
                    );
                    Ok(report)
                } else {
                    debug!(ticket, "Discarding result of superseded calculation");
                    Err(CalculationFailure::Superseded { ticket })
                }
            },
            Err(failure @ CalculationFailure::Superseded { .. }) => {
                debug!(ticket, "Calculation superseded mid-flight");
                Err(failure)
            },
            Err(failure) => {
                let next = CalculationState::Failed {
                    ticket,
                    failure: failure.clone(),
                };
                if self.commit(ticket, next) {
                    warn!(ticket, error = %failure, "Calculation failed");
                    Err(failure)
                } else {
                    debug!(ticket, "Discarding failure of superseded calculation");
                    Err(CalculationFailure::Superseded { ticket })
                }
            },
        }
    }

    /// Resolve both places and the road distance without touching state
    #[instrument(skip(self, query), fields(source = %query.source, destination = %query.destination))]
    pub async fn measure_route(
        &self,
        query: &RouteQuery,
    ) -> Result<RouteMeasurement, CalculationFailure> {
        query
            .validate()
            .map_err(|e| CalculationFailure::Validation {
                message: e.to_string(),
            })?;
        self.measure(None, query).await
    }

    /// Abandon any in-flight calculation and return to `Idle`
    ///
    /// Returns true if a calculation was in flight.
    pub fn cancel(&self) -> bool {
        let mut state = self.state.write();
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let was_calculating = state.is_calculating();
        *state = CalculationState::Idle;
        drop(state);
        if was_calculating {
            info!(ticket, "Calculation cancelled");
        }
        was_calculating
    }

    fn next_ticket(&self) -> u64 {
        self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Write `next` if `ticket` is still the latest; returns whether it did
    fn commit(&self, ticket: u64, next: CalculationState) -> bool {
        let mut state = self.state.write();
        if self.latest_ticket.load(Ordering::SeqCst) != ticket {
            return false;
        }
        *state = next;
        true
    }

    fn ensure_current(&self, ticket: Option<u64>) -> Result<(), CalculationFailure> {
        match ticket {
            Some(ticket) if self.latest_ticket.load(Ordering::SeqCst) != ticket => {
                Err(CalculationFailure::Superseded { ticket })
            },
            _ => Ok(()),
        }
    }

    async fn measure(
        &self,
        ticket: Option<u64>,
        query: &RouteQuery,
    ) -> Result<RouteMeasurement, CalculationFailure> {
        let origin = self.geocode(LocationSide::Source, &query.source).await?;
        self.ensure_current(ticket)?;

        let destination = self
            .geocode(LocationSide::Destination, &query.destination)
            .await?;
        self.ensure_current(ticket)?;

        let distance = self.route(query, &origin, &destination).await?;
        self.ensure_current(ticket)?;

        Ok(RouteMeasurement {
            query: query.clone(),
            origin,
            destination,
            distance,
        })
    }

    async fn geocode(&self, side: LocationSide, place: &str) -> Result<GeoPoint, CalculationFailure> {
        let place = place.trim();
        let stage = side.geocode_stage();

        match timeout(self.config.stage_timeout, self.geocoder.resolve(place)).await {
            Ok(Ok(point)) => {
                debug!(%side, place, %point, "Resolved location");
                Ok(point)
            },
            Ok(Err(GeocodingError::NotFound(_))) => Err(CalculationFailure::NotFound {
                side,
                place: place.to_string(),
            }),
            Ok(Err(GeocodingError::Transport(message))) => {
                Err(CalculationFailure::Transport { stage, message })
            },
            Err(_) => Err(self.timed_out(stage)),
        }
    }

    async fn route(
        &self,
        query: &RouteQuery,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<domain::Distance, CalculationFailure> {
        match timeout(self.config.stage_timeout, self.router.route(origin, destination)).await {
            Ok(Ok(distance)) => {
                debug!(%distance, "Routed");
                Ok(distance)
            },
            Ok(Err(RoutingError::NoRoute)) => Err(CalculationFailure::NoRoute {
                from: query.source.trim().to_string(),
                to: query.destination.trim().to_string(),
            }),
            Ok(Err(RoutingError::Transport(message))) => Err(CalculationFailure::Transport {
                stage: PipelineStage::Route,
                message,
            }),
            Err(_) => Err(self.timed_out(PipelineStage::Route)),
        }
    }

    fn timed_out(&self, stage: PipelineStage) -> CalculationFailure {
        warn!(%stage, timeout = ?self.config.stage_timeout, "Stage timed out");
        CalculationFailure::Transport {
            stage,
            message: format!("timed out after {:?}", self.config.stage_timeout),
        }
    }
}
