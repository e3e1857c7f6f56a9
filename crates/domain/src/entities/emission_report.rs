//! Emission calculation results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::emissions::EmissionEstimate;
use crate::value_objects::{Distance, GeoPoint, RouteQuery, TransportMode};

/// Both endpoints resolved and the road distance between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMeasurement {
    /// The places as entered
    #[serde(flatten)]
    pub query: RouteQuery,
    /// Resolved source coordinates
    #[serde(rename = "source_point")]
    pub origin: GeoPoint,
    /// Resolved destination coordinates
    #[serde(rename = "destination_point")]
    pub destination: GeoPoint,
    /// Road distance from the router
    pub distance: Distance,
}

impl RouteMeasurement {
    /// Straight-line distance between the resolved endpoints in kilometers
    #[must_use]
    pub fn great_circle_km(&self) -> f64 {
        self.origin.great_circle_km(&self.destination)
    }
}

/// Successful outcome of an emission calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionReport {
    /// Resolved route
    pub route: RouteMeasurement,
    /// Cargo weight in kilograms
    pub weight_kg: f64,
    /// Mode whose factor was applied (after truck fallback)
    pub mode: TransportMode,
    /// Estimated emissions
    pub emissions: EmissionEstimate,
    /// When the calculation finished
    pub calculated_at: DateTime<Utc>,
}

impl EmissionReport {
    /// Build a report from a measured route
    #[must_use]
    pub fn new(route: RouteMeasurement, weight_kg: f64, mode: TransportMode) -> Self {
        let emissions = EmissionEstimate::compute(weight_kg, route.distance, mode);
        Self {
            route,
            weight_kg,
            mode,
            emissions,
            calculated_at: Utc::now(),
        }
    }

    /// Routed distance in kilometers
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.route.distance.km()
    }

    /// Estimated kilograms of CO₂
    #[must_use]
    pub const fn kg_co2(&self) -> f64 {
        self.emissions.kg_co2()
    }

    /// Format as a compact one-line summary
    #[must_use]
    pub fn format_summary(&self) -> String {
        format!(
            "{} {} → {}: {} by {}, {} kg cargo = {}",
            self.mode.emoji(),
            self.route.query.source,
            self.route.query.destination,
            self.route.distance,
            self.mode.label(),
            self.weight_kg,
            self.emissions
        )
    }
}

impl fmt::Display for EmissionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route() -> RouteMeasurement {
        RouteMeasurement {
            query: RouteQuery::new("New York, USA", "Los Angeles, USA"),
            origin: GeoPoint::new(40.7128, -74.006).expect("valid"),
            destination: GeoPoint::new(34.0522, -118.2437).expect("valid"),
            distance: Distance::from_meters(3_940_000.0).expect("valid"),
        }
    }

    #[test]
    fn report_computes_emissions() {
        let report = EmissionReport::new(sample_route(), 100.0, TransportMode::Truck);
        assert!((report.distance_km() - 3940.0).abs() < f64::EPSILON);
        assert!((report.kg_co2() - 39_400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_mentions_places_and_result() {
        let report = EmissionReport::new(sample_route(), 100.0, TransportMode::Truck);
        let summary = report.format_summary();
        assert!(summary.contains("New York, USA"));
        assert!(summary.contains("3940.00 km"));
        assert!(summary.contains("39400.00 kg CO₂"));
    }

    #[test]
    fn great_circle_is_shorter_than_road() {
        let route = sample_route();
        assert!(route.great_circle_km() < route.distance.km());
    }

    #[test]
    fn report_serializes_flat_route() {
        let report = EmissionReport::new(sample_route(), 100.0, TransportMode::Ship);
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["route"]["source"], "New York, USA");
        assert_eq!(json["mode"], "ship");
        assert_eq!(json["emissions"], 7880.0);
    }

    #[test]
    fn report_json_keeps_place_names_and_points_apart() {
        let report = EmissionReport::new(sample_route(), 100.0, TransportMode::Truck);
        let text = serde_json::to_string(&report).expect("serialize");
        assert_eq!(text.matches("\"destination\"").count(), 1);

        let json: serde_json::Value = serde_json::from_str(&text).expect("parse");
        assert_eq!(json["route"]["destination"], "Los Angeles, USA");
        assert_eq!(json["route"]["destination_point"]["latitude"], 34.0522);
        assert_eq!(json["route"]["source_point"]["longitude"], -74.006);

        let parsed: EmissionReport = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(parsed, report);
        assert_eq!(parsed.route.query.destination, "Los Angeles, USA");
    }
}
