pub mod domain;
pub mod error;
pub mod frame;
pub mod interaction;
pub mod metrics;
pub mod timestamp;

pub use domain::*;
pub use error::{Error, Result};
pub use frame::{Column, ColumnType, Frame};
pub use interaction::InteractionRecord;
pub use metrics::{SessionMetrics, SessionMetricsTable};
pub use timestamp::{
    ParsedTimestamp, coerce_timestamps, parse_timestamp, parse_timestamp_detailed,
};
