//! Lines, stops and the catalog that holds them.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use super::error::CatalogError;
use super::load::CatalogDocument;
use super::{LineCode, StopCode};

/// A stop on one line direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    /// Human-readable stop name.
    pub name: String,

    /// Provider stop code.
    pub code: StopCode,

    /// 0-based position along the line, ascending in the direction of travel.
    pub index: usize,
}

/// One line running in one direction.
///
/// Stops are ordered by index and the indices are exactly `0..stops.len()`,
/// so `stops[i].index == i` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line description, e.g. "Duomo - Rozzano".
    pub name: String,

    /// Provider line code.
    pub code: LineCode,

    /// Direction identifier as reported by the provider ("0" or "1").
    pub direction: String,

    stops: Vec<Stop>,
}

impl Line {
    /// Build a line, sorting stops by index and checking they are gap-free.
    pub fn new(
        name: impl Into<String>,
        code: LineCode,
        direction: impl Into<String>,
        mut stops: Vec<Stop>,
    ) -> Result<Self, CatalogError> {
        let direction = direction.into();

        if stops.is_empty() {
            return Err(CatalogError::EmptyLine {
                line: code,
                direction,
            });
        }

        stops.sort_by_key(|s| s.index);

        for (expected, stop) in stops.iter().enumerate() {
            if stop.index != expected {
                return Err(CatalogError::IndexGap {
                    line: code,
                    direction,
                    expected,
                    found: stop.index,
                });
            }
        }

        Ok(Self {
            name: name.into(),
            code,
            direction,
            stops,
        })
    }

    /// Stops in direction of travel.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Get a stop by index.
    pub fn stop(&self, index: usize) -> Option<&Stop> {
        self.stops.get(index)
    }

    /// Find the first stop with the given code.
    pub fn find_stop(&self, code: &StopCode) -> Option<&Stop> {
        self.stops.iter().find(|s| &s.code == code)
    }

    /// Stops from `index` back to the line's origin, nearest first.
    ///
    /// This is the order in which countdowns are read for vehicle inference.
    pub fn stops_upstream_of(&self, index: usize) -> Vec<&Stop> {
        let end = index.min(self.stops.len().saturating_sub(1));
        self.stops[..=end].iter().rev().collect()
    }
}

/// The static set of lines the planner knows about.
///
/// Loaded once and shared read-only between requests. Per-request boarding
/// and destination choices live in [`TripConfig`](super::TripConfig).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    lines: Vec<Line>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate (line, direction) pairs.
    pub fn new(lines: Vec<Line>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for line in &lines {
            if !seen.insert((line.code.clone(), line.direction.clone())) {
                return Err(CatalogError::DuplicateLine {
                    line: line.code.clone(),
                    direction: line.direction.clone(),
                });
            }
        }

        Ok(Self { lines })
    }

    /// Parse a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        document.into_catalog()
    }

    /// Load a catalog document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), lines = catalog.len(), "loaded line catalog");
        Ok(catalog)
    }

    /// All lines in catalog order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Get a line by position.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Number of line directions.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the catalog has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
