//! Provider line-summary DTOs.
//!
//! These map the JSON returned by the per-stop `linesummary` endpoint. The
//! provider omits fields freely, so almost everything is optional.

use serde::Deserialize;

/// Response from `GET /tpl/stops/{code}/linesummary`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineSummary {
    /// The stop this summary describes.
    pub stop_point: Option<StopPoint>,

    /// Lines currently serving the stop.
    #[serde(default)]
    pub lines: Vec<LineWait>,
}

/// Stop metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopPoint {
    /// Stop code.
    pub code: Option<String>,

    /// Human-readable stop name.
    pub description: Option<String>,
}

/// One line at the stop, with its free-text wait message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineWait {
    /// Line identification. Entries without one never match a lookup.
    #[serde(default)]
    pub line: Option<LineRef>,

    /// Direction the line runs in at this stop.
    pub direction: Option<String>,

    /// Free-text countdown, e.g. "4 min", "in arrivo", "updating".
    pub wait_message: Option<String>,

    /// Provider journey pattern id.
    pub journey_pattern_id: Option<String>,
}

/// Line identification inside a summary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineRef {
    /// Line code, e.g. "15".
    pub line_code: Option<String>,

    /// Line description.
    pub line_description: Option<String>,

    /// 0 for tram.
    pub transport_mode: Option<i32>,

    /// Whether the line is suburban.
    pub suburban: Option<bool>,
}

impl LineSummary {
    /// Find the wait entry for a line code, skipping entries with no code.
    pub fn line(&self, line_code: &str) -> Option<&LineWait> {
        self.lines
            .iter()
            .find(|l| l.line_code() == Some(line_code))
    }
}

impl LineWait {
    /// The line code of this entry, if the provider sent one.
    pub fn line_code(&self) -> Option<&str> {
        self.line.as_ref()?.line_code.as_deref()
    }
}
