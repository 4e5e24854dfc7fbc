//! Vehicle inference from a run of countdowns.
//!
//! Readings are ordered from the rider's stop back towards the line origin.
//! The provider only reports "next vehicle" per stop, so a single vehicle
//! approaching shows up as countdowns that shrink as we move towards the
//! rider; a jump back up means a stop upstream is already counting down to a
//! later vehicle.

use serde::Serialize;

use crate::signal::Countdown;

use super::config::PlannerConfig;

/// A distinct upcoming vehicle reconstructed from the readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InferredVehicle {
    /// Countdown read at the stop where this vehicle was first seen.
    pub raw_countdown: u32,

    /// Index on the line of that stop.
    pub source_stop_index: usize,
}

impl InferredVehicle {
    /// Number of stops between the source stop and the boarding stop.
    pub fn stops_away(&self, boarding_index: usize) -> usize {
        boarding_index.saturating_sub(self.source_stop_index)
    }
}

/// Split readings into distinct vehicles.
///
/// `readings[0]` is the boarding stop and always yields the first vehicle.
/// Position `i` starts a new vehicle when its value exceeds the value at
/// `i - 1` by more than `new_vehicle_threshold`. Collection stops after
/// `vehicles_per_line` vehicles. Unavailable readings count as 0.
pub fn segment(
    readings: &[Countdown],
    boarding_index: usize,
    config: &PlannerConfig,
) -> Vec<InferredVehicle> {
    let limit = config.vehicles_per_line.max(1);
    let mut vehicles = Vec::with_capacity(limit);

    let Some(first) = readings.first() else {
        return vehicles;
    };

    vehicles.push(InferredVehicle {
        raw_countdown: first.numeric(),
        source_stop_index: boarding_index,
    });

    for (offset, pair) in readings.windows(2).enumerate() {
        if vehicles.len() >= limit {
            break;
        }

        let offset = offset + 1;
        if offset > boarding_index {
            break;
        }

        let (previous, current) = (pair[0].numeric(), pair[1].numeric());
        if current > previous.saturating_add(config.new_vehicle_threshold) {
            vehicles.push(InferredVehicle {
                raw_countdown: current,
                source_stop_index: boarding_index - offset,
            });
        }
    }

    vehicles
}

/// Estimate minutes per stop from the vehicle nearest the rider.
///
/// Follows consecutive readings from position 0 while they do not increase,
/// averaging the drops. With no such pairs, or a non-positive average, the
/// floor is used; the result is never below the floor.
pub fn estimate_travel_time(readings: &[Countdown], floor: f64) -> f64 {
    let drops: Vec<u32> = readings
        .windows(2)
        .map(|pair| (pair[0].numeric(), pair[1].numeric()))
        .take_while(|(current, next)| next <= current)
        .map(|(current, next)| current - next)
        .collect();

    if drops.is_empty() {
        return floor;
    }

    let average = drops.iter().map(|&d| f64::from(d)).sum::<f64>() / drops.len() as f64;

    if average > floor { average } else { floor }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn reading() -> impl Strategy<Value = Countdown> {
        prop_oneof![
            1 => Just(Countdown::Unavailable),
            4 => (0u32..60).prop_map(Countdown::Minutes),
        ]
    }

    proptest! {
        /// 1 ≤ vehicles ≤ N, and source indices strictly decrease
        #[test]
        fn vehicle_count_and_order(
            r in prop::collection::vec(reading(), 1..25),
            n in 1usize..5,
            threshold in 0u32..3,
        ) {
            let boarding = r.len() - 1;
            let config = PlannerConfig::default()
                .with_vehicles_per_line(n)
                .with_new_vehicle_threshold(threshold);
            let vehicles = segment(&r, boarding, &config);

            prop_assert!(!vehicles.is_empty());
            prop_assert!(vehicles.len() <= n);
            prop_assert_eq!(vehicles[0].source_stop_index, boarding);
            for pair in vehicles.windows(2) {
                prop_assert!(pair[1].source_stop_index < pair[0].source_stop_index);
            }
        }

        /// The estimate is finite and never below the floor
        #[test]
        fn travel_time_respects_floor(
            r in prop::collection::vec(reading(), 0..25),
            floor in 0.5f64..5.0,
        ) {
            let estimate = estimate_travel_time(&r, floor);
            prop_assert!(estimate.is_finite());
            prop_assert!(estimate >= floor);
        }
    }
}
