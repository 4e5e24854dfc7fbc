//! Live countdown signal.
//!
//! The provider exposes, per stop, a list of the lines serving it with a
//! free-text wait message ("4 min", "in arrivo", "updating"). This module
//! turns that into a [`Countdown`] for one (stop, line) pair.
//!
//! Key characteristics of the signal:
//! - Each stop is polled independently, so readings along a line are not a
//!   consistent snapshot
//! - "No estimate" is an ordinary answer, not a failure
//! - The provider gives no vehicle identity, only the next arrival per line

mod client;
mod error;
mod mock;
mod parse;
mod types;

use std::future::Future;

use serde::Serialize;

use crate::catalog::{LineCode, StopCode};

pub use client::{LiveSignalClient, SignalClientConfig};
pub use error::SignalError;
pub use mock::MockSignalSource;
pub use parse::parse_wait_message;
pub use types::{LineRef, LineSummary, LineWait, StopPoint};

/// One poll result: minutes until the next vehicle, or no estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Countdown {
    /// The provider reported this many minutes.
    Minutes(u32),
    /// Signal absent, unparsable, or explicitly not yet known.
    Unavailable,
}

impl Countdown {
    /// The value used for segmentation; unavailable counts as 0.
    pub fn numeric(self) -> u32 {
        match self {
            Countdown::Minutes(m) => m,
            Countdown::Unavailable => 0,
        }
    }

    /// Minutes, if the reading carried any.
    pub fn minutes(self) -> Option<u32> {
        match self {
            Countdown::Minutes(m) => Some(m),
            Countdown::Unavailable => None,
        }
    }

    /// Returns true if there is no estimate.
    pub fn is_unavailable(self) -> bool {
        matches!(self, Countdown::Unavailable)
    }
}

/// Source of live countdowns.
///
/// This abstraction allows the poller and planner to be tested with scripted
/// data.
pub trait SignalSource: Send + Sync {
    /// Fetch the current countdown for `line` at `stop`.
    fn fetch(
        &self,
        stop: &StopCode,
        line: &LineCode,
    ) -> impl Future<Output = Result<Countdown, SignalError>> + Send;
}

/// The signal source selected at startup.
#[derive(Debug, Clone)]
pub enum SignalBackend {
    /// Real provider over HTTP.
    Live(LiveSignalClient),
    /// Canned summaries loaded from disk.
    Mock(MockSignalSource),
}

impl SignalSource for SignalBackend {
    async fn fetch(&self, stop: &StopCode, line: &LineCode) -> Result<Countdown, SignalError> {
        match self {
            SignalBackend::Live(client) => client.fetch(stop, line).await,
            SignalBackend::Mock(mock) => mock.fetch(stop, line).await,
        }
    }
}
