//! Arrival inference and trip planning.
//!
//! This module answers: "given the countdowns along each line right now,
//! which vehicle should I walk to, and when will I get where I'm going?"
//!
//! For each line with a boarding stop the planner polls the stops from the
//! boarding stop back to the line origin, splits that run of countdowns into
//! distinct vehicles, estimates minutes per stop, and evaluates every
//! vehicle against the rider's walk. Options are then ranked across lines.

mod config;
mod evaluate;
mod infer;
mod plan;
mod rank;


pub use config::PlannerConfig;
pub use evaluate::{DestinationLeg, VehicleEstimate, evaluate};
pub use infer::{InferredVehicle, estimate_travel_time, segment};
pub use plan::{Planner, RouteOptions, TripPlan, route_label};
pub use rank::{BestOption, best_option, rank_options};
