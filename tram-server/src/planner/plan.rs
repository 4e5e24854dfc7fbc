//! Trip planning across all lines with a boarding stop.

use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{ActiveLine, Catalog, Line, LineCode, TripConfig};
use crate::poll::Poller;
use crate::signal::SignalSource;

use super::config::PlannerConfig;
use super::evaluate::{VehicleEstimate, evaluate};
use super::infer::{estimate_travel_time, segment};
use super::rank::{BestOption, best_option, rank_options};

/// Upcoming vehicles for one line, as seen from the rider's boarding stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOptions {
    /// Human-readable key, e.g. `"Piazza Castello (Duomo - Rozzano [15], Direction A)"`.
    pub label: String,

    /// Line code.
    pub line_code: LineCode,

    /// Line direction.
    pub direction: String,

    /// Minutes per stop used for every vehicle on this line.
    pub travel_time_estimate: f64,

    /// Inferred vehicles, in discovery order (nearest source stop first).
    pub vehicles: Vec<VehicleEstimate>,
}

/// Result of one planning pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    /// When the readings behind this plan were requested.
    pub planned_at: DateTime<Utc>,

    /// One entry per line with a boarding stop, in catalog order.
    pub routes: Vec<RouteOptions>,
}

impl TripPlan {
    /// Look up a route by its label.
    pub fn get(&self, label: &str) -> Option<&RouteOptions> {
        self.routes.iter().find(|r| r.label == label)
    }

    /// Look up a route by line code and direction.
    pub fn route(&self, line_code: &LineCode, direction: &str) -> Option<&RouteOptions> {
        self.routes
            .iter()
            .find(|r| &r.line_code == line_code && r.direction == direction)
    }

    /// The best feasible option across all routes.
    pub fn best(&self) -> Option<BestOption> {
        best_option(&self.routes)
    }

    /// All feasible options, best first.
    pub fn ranked(&self) -> Vec<BestOption> {
        rank_options(&self.routes)
    }

    /// Route labels, in catalog order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.label.as_str())
    }

    /// Returns true if no line had a boarding stop.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Combines the catalog, live readings and inference into trip options.
pub struct Planner<'a, S> {
    catalog: &'a Catalog,
    poller: &'a Poller<S>,
    config: &'a PlannerConfig,
}

impl<'a, S: SignalSource> Planner<'a, S> {
    /// Create a new planner.
    pub fn new(catalog: &'a Catalog, poller: &'a Poller<S>, config: &'a PlannerConfig) -> Self {
        Self {
            catalog,
            poller,
            config,
        }
    }

    /// Poll every active line and evaluate its upcoming vehicles.
    ///
    /// Lines are polled concurrently. Each call polls afresh, apart from
    /// readings still held by the poller's short-lived cache.
    pub async fn plan(&self, trip: &TripConfig) -> TripPlan {
        let start = Instant::now();
        let planned_at = Utc::now();

        let pending = trip.active_lines().iter().filter_map(|active| {
            let line = active.line(self.catalog)?;
            Some(self.plan_line(line, active))
        });
        let routes = join_all(pending).await;

        info!(
            routes = routes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "planned trip"
        );

        TripPlan { planned_at, routes }
    }

    /// Plan and return only the best option.
    pub async fn best(&self, trip: &TripConfig) -> Option<BestOption> {
        self.plan(trip).await.best()
    }

    async fn plan_line(&self, line: &Line, active: &ActiveLine) -> RouteOptions {
        let boarding = &active.boarding;
        let upstream = line.stops_upstream_of(boarding.stop_index);
        let readings = self.poller.fetch_batch(&upstream, &line.code).await;

        let travel_time = estimate_travel_time(&readings, self.config.floor());
        let vehicles: Vec<VehicleEstimate> = segment(&readings, boarding.stop_index, self.config)
            .iter()
            .map(|v| evaluate(v, boarding, active.destination.as_ref(), travel_time))
            .collect();

        debug!(
            line = %line.code,
            direction = %line.direction,
            travel_time,
            vehicles = vehicles.len(),
            "evaluated line"
        );

        RouteOptions {
            label: route_label(line, active),
            line_code: line.code.clone(),
            direction: line.direction.clone(),
            travel_time_estimate: travel_time,
            vehicles,
        }
    }
}

/// `"{boarding} -> {destination} ({line name} [{line code}], Direction {dir})"`,
/// or without the destination part when none is set.
///
/// The catalog keeps (code, direction) unique, so the code keeps labels apart
/// even when two lines share a name and stop names.
pub fn route_label(line: &Line, active: &ActiveLine) -> String {
    let boarding = line
        .stop(active.boarding.stop_index)
        .map(|s| s.name.as_str())
        .unwrap_or("Unknown");

    let destination = active
        .destination
        .and_then(|d| line.stop(d.stop_index))
        .map(|s| s.name.as_str());

    match destination {
        Some(dest) => format!(
            "{boarding} -> {dest} ({} [{}], Direction {})",
            line.name, line.code, line.direction
        ),
        None => format!(
            "{boarding} ({} [{}], Direction {})",
            line.name, line.code, line.direction
        ),
    }
}
