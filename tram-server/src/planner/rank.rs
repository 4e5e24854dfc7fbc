//! Option ranking across lines.
//!
//! Only feasible vehicles are candidates. Each is scored by
//! [`VehicleEstimate::rank_key`]; equal scores keep catalog order, then
//! discovery order within a line.

use serde::Serialize;

use crate::catalog::LineCode;

use super::evaluate::VehicleEstimate;
use super::plan::RouteOptions;

/// A feasible vehicle, together with the route it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestOption {
    /// Label of the route.
    pub label: String,

    /// Line the vehicle runs on.
    pub line_code: LineCode,

    /// Direction of that line.
    pub direction: String,

    /// Position of the vehicle in its route's discovery order.
    pub vehicle_index: usize,

    /// The vehicle's estimate.
    pub vehicle: VehicleEstimate,
}

/// Every feasible option across all routes, best first.
pub fn rank_options(routes: &[RouteOptions]) -> Vec<BestOption> {
    let mut options: Vec<BestOption> = routes
        .iter()
        .flat_map(|route| {
            route
                .vehicles
                .iter()
                .enumerate()
                .filter(|(_, v)| v.feasible)
                .map(|(vehicle_index, v)| BestOption {
                    label: route.label.clone(),
                    line_code: route.line_code.clone(),
                    direction: route.direction.clone(),
                    vehicle_index,
                    vehicle: v.clone(),
                })
        })
        .collect();

    // sort_by is stable, so ties stay in catalog then discovery order
    options.sort_by(|a, b| a.vehicle.rank_key().total_cmp(&b.vehicle.rank_key()));
    options
}

/// The single best feasible option, if any.
pub fn best_option(routes: &[RouteOptions]) -> Option<BestOption> {
    let mut best: Option<(&RouteOptions, usize, &VehicleEstimate)> = None;

    for route in routes {
        for (index, vehicle) in route.vehicles.iter().enumerate() {
            if !vehicle.feasible {
                continue;
            }
            let better = match best {
                Some((_, _, current)) => vehicle.rank_key() < current.rank_key(),
                None => true,
            };
            if better {
                best = Some((route, index, vehicle));
            }
        }
    }

    best.map(|(route, vehicle_index, vehicle)| BestOption {
        label: route.label.clone(),
        line_code: route.line_code.clone(),
        direction: route.direction.clone(),
        vehicle_index,
        vehicle: vehicle.clone(),
    })
}
