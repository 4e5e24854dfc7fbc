//! Planner configuration.

/// Configuration parameters for vehicle inference and planning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Maximum number of distinct vehicles to infer per line.
    pub vehicles_per_line: usize,

    /// How much larger (minutes) an upstream countdown must be than the one
    /// just downstream of it before it is taken to be a different vehicle.
    /// Zero means any increase starts a new vehicle.
    pub new_vehicle_threshold: u32,

    /// Lower bound on the estimated travel time between adjacent stops
    /// (minutes). Used as-is when the data gives no usable estimate.
    pub travel_time_floor_mins: f64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        vehicles_per_line: usize,
        new_vehicle_threshold: u32,
        travel_time_floor_mins: f64,
    ) -> Self {
        Self {
            vehicles_per_line,
            new_vehicle_threshold,
            travel_time_floor_mins,
        }
    }

    /// Set the number of vehicles to infer per line.
    pub fn with_vehicles_per_line(mut self, n: usize) -> Self {
        self.vehicles_per_line = n;
        self
    }

    /// Set the new-vehicle noise threshold.
    pub fn with_new_vehicle_threshold(mut self, minutes: u32) -> Self {
        self.new_vehicle_threshold = minutes;
        self
    }

    /// Set the travel time floor.
    pub fn with_travel_time_floor(mut self, minutes: f64) -> Self {
        self.travel_time_floor_mins = minutes;
        self
    }

    /// Travel time floor, guarded against nonsense values.
    pub(super) fn floor(&self) -> f64 {
        if self.travel_time_floor_mins.is_finite() && self.travel_time_floor_mins > 0.0 {
            self.travel_time_floor_mins
        } else {
            DEFAULT_FLOOR_MINS
        }
    }
}

const DEFAULT_FLOOR_MINS: f64 = 2.0;

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            vehicles_per_line: 3,
            new_vehicle_threshold: 0,
            travel_time_floor_mins: DEFAULT_FLOOR_MINS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.vehicles_per_line, 3);
        assert_eq!(config.new_vehicle_threshold, 0);
        assert_eq!(config.travel_time_floor_mins, 2.0);
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(2, 1, 3.5);

        assert_eq!(config.vehicles_per_line, 2);
        assert_eq!(config.new_vehicle_threshold, 1);
        assert_eq!(config.floor(), 3.5);
    }

    #[test]
    fn builder() {
        let config = PlannerConfig::default()
            .with_vehicles_per_line(2)
            .with_new_vehicle_threshold(1)
            .with_travel_time_floor(2.5);
        assert_eq!(config, PlannerConfig::new(2, 1, 2.5));
    }

    #[test]
    fn bad_floor_falls_back() {
        assert_eq!(PlannerConfig::default().with_travel_time_floor(-1.0).floor(), 2.0);
        assert_eq!(PlannerConfig::default().with_travel_time_floor(f64::NAN).floor(), 2.0);
    }
}
