//! On-disk catalog document.
//!
//! The document is produced by a separate tool from the provider's journey
//! patterns:
//!
//! ```json
//! {"lines": [{"line": {"code": "15", "description": "Duomo - Rozzano"},
//!             "direction": "0",
//!             "stations": [{"index": 0, "name": "Duomo", "code": "15371"}]}]}
//! ```

use serde::Deserialize;

use super::error::CatalogError;
use super::line::{Catalog, Line, Stop};
use super::{LineCode, StopCode};

#[derive(Debug, Deserialize)]
pub(super) struct CatalogDocument {
    #[serde(default)]
    lines: Vec<LineDocument>,
}

#[derive(Debug, Deserialize)]
struct LineDocument {
    line: LineInfo,

    #[serde(default)]
    direction: String,

    #[serde(default, alias = "stops")]
    stations: Vec<StopDocument>,
}

#[derive(Debug, Deserialize)]
struct LineInfo {
    code: String,

    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct StopDocument {
    index: usize,

    #[serde(default = "unknown_name")]
    name: String,

    code: String,
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

impl CatalogDocument {
    pub(super) fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let lines = self
            .lines
            .into_iter()
            .map(LineDocument::into_line)
            .collect::<Result<Vec<_>, _>>()?;

        Catalog::new(lines)
    }
}

impl LineDocument {
    fn into_line(self) -> Result<Line, CatalogError> {
        let code = LineCode::parse(&self.line.code)?;

        let stops = self
            .stations
            .into_iter()
            .map(|s| -> Result<Stop, CatalogError> {
                Ok(Stop {
                    name: s.name.trim().to_string(),
                    code: StopCode::parse(&s.code)?,
                    index: s.index,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Line::new(self.line.description, code, self.direction, stops)
    }
}
