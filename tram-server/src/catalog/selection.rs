//! Per-request boarding and destination selection.
//!
//! A rider names, per line code, the stop they want to board at (and
//! optionally the stop they want to get off at) together with walking times.
//! The selection is resolved against the shared catalog into a [`TripConfig`]
//! that is passed to the planner; the catalog itself is never modified.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use super::error::CatalogError;
use super::line::{Catalog, Line, Stop};
use super::StopCode;

/// Walking time assumed when a candidate does not give one (minutes).
pub const DEFAULT_WALK_MINS: u32 = 7;

fn default_walk() -> u32 {
    DEFAULT_WALK_MINS
}

/// A rider's choice of stop on one line code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CandidateSpec {
    /// Direction the candidate applies to; other directions are ignored.
    pub direction: String,

    /// Code of the stop to mark.
    #[serde(alias = "target_station_code")]
    pub target_stop_code: StopCode,

    /// Walking time in minutes (to the boarding stop, or from the destination stop).
    #[serde(default = "default_walk")]
    pub walking_time: u32,
}

impl CandidateSpec {
    /// Create a candidate.
    pub fn new(direction: impl Into<String>, target_stop_code: StopCode, walking_time: u32) -> Self {
        Self {
            direction: direction.into(),
            target_stop_code,
            walking_time,
        }
    }
}

/// A stop marked as boarding or destination, with its walking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedStop {
    /// Index of the stop on its line.
    pub stop_index: usize,

    /// Walking time in minutes.
    pub walk_time: u32,
}

/// A line with a boarding stop, and optionally a destination stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLine {
    /// Position of the line in the catalog.
    pub line_index: usize,

    /// Where the rider gets on.
    pub boarding: MarkedStop,

    /// Where the rider gets off, if configured.
    pub destination: Option<MarkedStop>,
}

impl ActiveLine {
    /// Resolve the line this selection refers to.
    pub fn line<'c>(&self, catalog: &'c Catalog) -> Option<&'c Line> {
        catalog.line(self.line_index)
    }

    /// Resolve the boarding stop.
    pub fn boarding_stop<'c>(&self, catalog: &'c Catalog) -> Option<&'c Stop> {
        self.line(catalog)?.stop(self.boarding.stop_index)
    }

    /// Resolve the destination stop, if any.
    pub fn destination_stop<'c>(&self, catalog: &'c Catalog) -> Option<&'c Stop> {
        let destination = self.destination?;
        self.line(catalog)?.stop(destination.stop_index)
    }
}

/// The boarding/destination selection for one planning request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripConfig {
    active: Vec<ActiveLine>,
}

impl TripConfig {
    /// Resolve candidate maps (keyed by line code) against the catalog.
    ///
    /// For each catalog line whose code has a candidate with a matching
    /// direction, the first stop with the target code is marked. Lines with no
    /// boarding stop are left out. A destination before the boarding stop is
    /// rejected.
    pub fn from_candidates(
        catalog: &Catalog,
        boarding: &HashMap<String, CandidateSpec>,
        destination: &HashMap<String, CandidateSpec>,
    ) -> Result<Self, CatalogError> {
        let mut active = Vec::new();

        for (line_index, line) in catalog.lines().iter().enumerate() {
            let Some(board) = mark(line, boarding.get(line.code.as_str())) else {
                continue;
            };
            let dest = mark(line, destination.get(line.code.as_str()));

            if let Some(dest) = dest
                && dest.stop_index < board.stop_index
            {
                return Err(CatalogError::InvertedTrip {
                    line: line.code.clone(),
                    boarding: board.stop_index,
                    destination: dest.stop_index,
                });
            }

            active.push(ActiveLine {
                line_index,
                boarding: board,
                destination: dest,
            });
        }

        Ok(Self { active })
    }

    /// Lines with a boarding stop, in catalog order.
    pub fn active_lines(&self) -> &[ActiveLine] {
        &self.active
    }

    /// Returns true if no line has a boarding stop.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

fn mark(line: &Line, candidate: Option<&CandidateSpec>) -> Option<MarkedStop> {
    let candidate = candidate?;
    if candidate.direction != line.direction {
        return None;
    }

    match line.find_stop(&candidate.target_stop_code) {
        Some(stop) => Some(MarkedStop {
            stop_index: stop.index,
            walk_time: candidate.walking_time,
        }),
        None => {
            debug!(
                line = %line.code,
                direction = %line.direction,
                stop = %candidate.target_stop_code,
                "candidate stop not on line"
            );
            None
        }
    }
}
