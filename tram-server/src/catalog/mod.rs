//! Line and stop catalog.
//!
//! The catalog is the static description of every line direction and its
//! ordered stops. It is validated once at load time: stop indices must be
//! gap-free so that "number of stops between A and B" is plain subtraction.
//! Riders' boarding and destination choices are resolved per request into a
//! [`TripConfig`] rather than written onto the shared catalog.

mod code;
mod error;
mod line;
mod load;
mod selection;

pub use code::{InvalidCode, LineCode, StopCode};
pub use error::CatalogError;
pub use line::{Catalog, Line, Stop};
pub use selection::{ActiveLine, CandidateSpec, DEFAULT_WALK_MINS, MarkedStop, TripConfig};
