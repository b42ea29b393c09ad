// Engine module - session grouping and metric derivation
// Sits between caller-supplied frames (types) and whatever consumes the tables

pub mod accumulator;
pub mod computer;
pub mod config;
pub mod error;
pub mod reader;
pub mod rounding;

pub use accumulator::SessionAccumulator;
pub use computer::SessionMetricsComputer;
pub use config::{ColumnNames, MetricsConfig};
pub use error::{Error, Result};
pub use rounding::{MAX_DECIMALS, RoundingRule, round_to};

use cartpulse_types::{Frame, SessionMetricsTable};

// Façade API - callers that don't need configuration use this

/// Per-session metrics for `user_id` with the default configuration
/// (standard column names, two decimals, half-to-even rounding)
pub fn compute_session_metrics(frame: &Frame, user_id: i64) -> Result<SessionMetricsTable> {
    SessionMetricsComputer::default().compute(frame, user_id)
}
