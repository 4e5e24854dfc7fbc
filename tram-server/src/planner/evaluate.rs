//! Per-vehicle trip evaluation.

use serde::Serialize;

use crate::catalog::MarkedStop;

use super::infer::InferredVehicle;

/// The in-vehicle part of a trip to a destination stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DestinationLeg {
    /// Minutes from boarding to destination stop.
    pub leg_travel_time: f64,

    /// Minutes walking from the destination stop.
    pub destination_walk_time: u32,

    /// Arrival at boarding + leg + destination walk.
    pub total_time: f64,
}

/// Timing and feasibility of one inferred vehicle for the rider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleEstimate {
    /// Countdown read at the source stop.
    pub raw_countdown: u32,

    /// Index of the stop where the vehicle was seen.
    pub source_stop_index: usize,

    /// Estimated minutes until the vehicle reaches the boarding stop.
    pub arrival_at_boarding: f64,

    /// Whether the rider can walk to the stop before the vehicle arrives.
    pub feasible: bool,

    /// Minutes walking to the boarding stop.
    pub walk_time: u32,

    /// Minutes spent waiting at the stop; only present when feasible.
    pub wait_at_stop: Option<f64>,

    /// Minutes per stop used for the estimate.
    pub travel_time_estimate: f64,

    /// Present when the line has a destination stop.
    pub destination: Option<DestinationLeg>,
}

impl VehicleEstimate {
    /// The value options are compared by: total trip time when there is a
    /// destination, arrival at the boarding stop otherwise.
    pub fn rank_key(&self) -> f64 {
        match &self.destination {
            Some(leg) => leg.total_time,
            None => self.arrival_at_boarding,
        }
    }
}

/// Evaluate one vehicle against the rider's boarding and destination choice.
pub fn evaluate(
    vehicle: &InferredVehicle,
    boarding: &MarkedStop,
    destination: Option<&MarkedStop>,
    travel_time: f64,
) -> VehicleEstimate {
    let stops_away = vehicle.stops_away(boarding.stop_index);
    let arrival = f64::from(vehicle.raw_countdown) + stops_away as f64 * travel_time;

    let walk = f64::from(boarding.walk_time);
    let feasible = arrival >= walk;
    let wait_at_stop = feasible.then(|| arrival - walk);

    let destination = destination.map(|dest| {
        let hops = dest.stop_index.saturating_sub(boarding.stop_index);
        let leg_travel_time = hops as f64 * travel_time;
        DestinationLeg {
            leg_travel_time,
            destination_walk_time: dest.walk_time,
            total_time: arrival + leg_travel_time + f64::from(dest.walk_time),
        }
    });

    VehicleEstimate {
        raw_countdown: vehicle.raw_countdown,
        source_stop_index: vehicle.source_stop_index,
        arrival_at_boarding: arrival,
        feasible,
        walk_time: boarding.walk_time,
        wait_at_stop,
        travel_time_estimate: travel_time,
        destination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(raw: u32, source: usize) -> InferredVehicle {
        InferredVehicle {
            raw_countdown: raw,
            source_stop_index: source,
        }
    }

    fn marked(stop_index: usize, walk_time: u32) -> MarkedStop {
        MarkedStop {
            stop_index,
            walk_time,
        }
    }

    #[test]
    fn vehicle_at_boarding_stop() {
        let e = evaluate(&vehicle(8, 4), &marked(4, 4), None, 2.5);

        assert_eq!(e.arrival_at_boarding, 8.0);
        assert!(e.feasible);
        assert_eq!(e.wait_at_stop, Some(4.0));
        assert_eq!(e.walk_time, 4);
        assert!(e.destination.is_none());
        assert_eq!(e.rank_key(), 8.0);
    }

    #[test]
    fn upstream_vehicle_adds_travel() {
        let e = evaluate(&vehicle(9, 1), &marked(4, 4), None, 2.5);

        assert_eq!(e.arrival_at_boarding, 16.5);
        assert_eq!(e.wait_at_stop, Some(12.5));
        assert_eq!(e.travel_time_estimate, 2.5);
    }

    #[test]
    fn too_close_is_infeasible() {
        let e = evaluate(&vehicle(3, 2), &marked(2, 5), None, 2.0);

        assert!(!e.feasible);
        assert_eq!(e.wait_at_stop, None);
    }

    #[test]
    fn exact_walk_is_feasible_with_zero_wait() {
        let e = evaluate(&vehicle(5, 2), &marked(2, 5), None, 2.0);

        assert!(e.feasible);
        assert_eq!(e.wait_at_stop, Some(0.0));
    }

    #[test]
    fn unavailable_vehicle_needs_zero_walk() {
        assert!(evaluate(&vehicle(0, 3), &marked(3, 0), None, 2.0).feasible);
        assert!(!evaluate(&vehicle(0, 3), &marked(3, 1), None, 2.0).feasible);
    }

    #[test]
    fn destination_leg() {
        // Destination 5 stops downstream at 3 min/stop.
        let e = evaluate(&vehicle(6, 10), &marked(10, 2), Some(&marked(15, 4)), 3.0);

        let leg = e.destination.unwrap();
        assert_eq!(leg.leg_travel_time, 15.0);
        assert_eq!(leg.destination_walk_time, 4);
        assert_eq!(leg.total_time, 6.0 + 15.0 + 4.0);
        assert_eq!(e.rank_key(), 25.0);
    }

    #[test]
    fn destination_at_boarding_stop() {
        let e = evaluate(&vehicle(6, 10), &marked(10, 2), Some(&marked(10, 1)), 3.0);

        let leg = e.destination.unwrap();
        assert_eq!(leg.leg_travel_time, 0.0);
        assert_eq!(leg.total_time, 7.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Arrival never decreases as the raw countdown grows
        #[test]
        fn arrival_monotone_in_countdown(
            raw in 0u32..100,
            bump in 0u32..100,
            boarding in 0usize..30,
            back in 0usize..30,
            travel in 2.0f64..6.0,
        ) {
            let source = boarding.saturating_sub(back);
            let stop = MarkedStop { stop_index: boarding, walk_time: 5 };

            let lower = evaluate(&InferredVehicle { raw_countdown: raw, source_stop_index: source }, &stop, None, travel);
            let higher = evaluate(&InferredVehicle { raw_countdown: raw + bump, source_stop_index: source }, &stop, None, travel);

            prop_assert!(higher.arrival_at_boarding >= lower.arrival_at_boarding);
        }

        /// feasible ⇔ arrival ≥ walk, and wait is present exactly when feasible
        #[test]
        fn feasibility_and_wait(
            raw in 0u32..60,
            boarding in 0usize..20,
            back in 0usize..20,
            walk in 0u32..30,
            travel in 2.0f64..6.0,
        ) {
            let source = boarding.saturating_sub(back);
            let e = evaluate(
                &InferredVehicle { raw_countdown: raw, source_stop_index: source },
                &MarkedStop { stop_index: boarding, walk_time: walk },
                None,
                travel,
            );

            prop_assert_eq!(e.feasible, e.arrival_at_boarding >= f64::from(walk));
            match e.wait_at_stop {
                Some(wait) => {
                    prop_assert!(e.feasible);
                    prop_assert_eq!(wait, e.arrival_at_boarding - f64::from(walk));
                }
                None => prop_assert!(!e.feasible),
            }
        }
    }
}
