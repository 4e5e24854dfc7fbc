//! Data transfer objects for web requests and responses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{CandidateSpec, Catalog, DEFAULT_WALK_MINS, StopCode};
use crate::planner::{BestOption, RouteOptions, TripPlan, VehicleEstimate};

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Boarding stop choices, at most one per line code
    pub candidates: Vec<CandidateRequest>,

    /// Optional destination stop choices
    #[serde(default)]
    pub destinations: Vec<CandidateRequest>,
}

/// One stop choice on one line.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateRequest {
    /// Line code (e.g., "15")
    pub line_code: String,

    /// Direction the choice applies to
    pub direction: String,

    /// Provider stop code
    #[serde(alias = "target_station_code")]
    pub target_stop_code: String,

    /// Walking time in minutes
    pub walking_time: Option<u32>,
}

impl CandidateRequest {
    /// Validate into a catalog candidate.
    pub fn to_spec(&self) -> Result<CandidateSpec, String> {
        let stop = StopCode::parse(&self.target_stop_code)
            .map_err(|e| format!("line {}: {e}", self.line_code))?;

        Ok(CandidateSpec::new(
            self.direction.clone(),
            stop,
            self.walking_time.unwrap_or(DEFAULT_WALK_MINS),
        ))
    }
}

/// Key candidates by line code; a later entry for the same line replaces an
/// earlier one.
pub fn candidate_map(
    requests: &[CandidateRequest],
) -> Result<HashMap<String, CandidateSpec>, String> {
    requests
        .iter()
        .map(|r| -> Result<_, String> { Ok((r.line_code.trim().to_string(), r.to_spec()?)) })
        .collect()
}

/// Response from trip planning.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    /// When the plan was computed (RFC 3339)
    pub planned_at: String,

    /// Time spent planning in milliseconds
    pub execution_ms: u64,

    /// One entry per line with a boarding stop
    pub options: Vec<RouteResult>,

    /// Best feasible option, if any
    pub best_option: Option<BestResult>,
}

impl PlanResponse {
    /// Build a response from a plan.
    pub fn from_plan(plan: &TripPlan, execution_ms: u64) -> Self {
        Self {
            planned_at: plan.planned_at.to_rfc3339(),
            execution_ms,
            options: plan.routes.iter().map(RouteResult::from_route).collect(),
            best_option: plan.best().as_ref().map(BestResult::from_option),
        }
    }
}

/// Upcoming vehicles for one line.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Human-readable label
    pub label: String,

    /// Line code
    pub line_code: String,

    /// Line direction
    pub direction: String,

    /// Estimated minutes between adjacent stops
    pub travel_time_estimate: f64,

    /// Vehicles in discovery order
    pub vehicles: Vec<VehicleResult>,
}

impl RouteResult {
    /// Convert from planner output.
    pub fn from_route(route: &RouteOptions) -> Self {
        Self {
            label: route.label.clone(),
            line_code: route.line_code.to_string(),
            direction: route.direction.clone(),
            travel_time_estimate: route.travel_time_estimate,
            vehicles: route.vehicles.iter().map(VehicleResult::from_estimate).collect(),
        }
    }
}

/// One vehicle, as seen by the rider.
#[derive(Debug, Serialize)]
pub struct VehicleResult {
    /// Estimated minutes until arrival at the boarding stop
    pub arrival: f64,

    /// Whether the rider can make it
    pub feasible: bool,

    /// Walking time to the boarding stop
    pub walk_time: u32,

    /// Minutes waiting at the stop (feasible vehicles only)
    pub wait_at_stop: Option<f64>,

    /// Countdown read at the source stop
    pub raw_wait: u32,

    /// Index of the source stop
    pub station_idx: usize,

    /// Minutes per stop used
    pub travel_time_estimate: f64,

    /// In-vehicle minutes to the destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_travel_time: Option<f64>,

    /// Walking time from the destination stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_walk_time: Option<u32>,

    /// Arrival + leg + destination walk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
}

impl VehicleResult {
    /// Convert from a planner estimate.
    pub fn from_estimate(estimate: &VehicleEstimate) -> Self {
        let leg = estimate.destination;
        Self {
            arrival: estimate.arrival_at_boarding,
            feasible: estimate.feasible,
            walk_time: estimate.walk_time,
            wait_at_stop: estimate.wait_at_stop,
            raw_wait: estimate.raw_countdown,
            station_idx: estimate.source_stop_index,
            travel_time_estimate: estimate.travel_time_estimate,
            leg_travel_time: leg.map(|l| l.leg_travel_time),
            destination_walk_time: leg.map(|l| l.destination_walk_time),
            total_time: leg.map(|l| l.total_time),
        }
    }
}

/// The recommended vehicle.
#[derive(Debug, Serialize)]
pub struct BestResult {
    /// Label of its route
    pub label: String,

    /// Line code
    pub line_code: String,

    /// Line direction
    pub direction: String,

    /// Position within the route's vehicles
    pub vehicle_index: usize,

    /// The vehicle
    pub vehicle: VehicleResult,
}

impl BestResult {
    /// Convert from a ranked option.
    pub fn from_option(option: &BestOption) -> Self {
        Self {
            label: option.label.clone(),
            line_code: option.line_code.to_string(),
            direction: option.direction.clone(),
            vehicle_index: option.vehicle_index,
            vehicle: VehicleResult::from_estimate(&option.vehicle),
        }
    }
}

/// Catalog summary.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

/// One line in the catalog summary.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub code: String,
    pub name: String,
    pub direction: String,
    pub stops: Vec<StopResult>,
}

/// One stop in the catalog summary.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub index: usize,
    pub code: String,
    pub name: String,
}

impl LinesResponse {
    /// Summarise the whole catalog.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let lines = catalog
            .lines()
            .iter()
            .map(|line| LineResult {
                code: line.code.to_string(),
                name: line.name.clone(),
                direction: line.direction.clone(),
                stops: line
                    .stops()
                    .iter()
                    .map(|s| StopResult {
                        index: s.index,
                        code: s.code.to_string(),
                        name: s.name.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self { lines }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
