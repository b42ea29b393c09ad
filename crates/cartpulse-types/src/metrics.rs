//! Output table of the session metrics computation.
//!
//! The table's columns are fixed: `user_id`, `session_id`,
//! `total_session_time`, `cart_addition_ratio`, in that order and with those
//! types. An empty table still reports the full schema.

use serde::{Deserialize, Serialize};

use crate::{Column, ColumnType, Frame, Result, SessionId, UserId};

pub const USER_ID: &str = "user_id";
pub const SESSION_ID: &str = "session_id";
pub const TOTAL_SESSION_TIME: &str = "total_session_time";
pub const CART_ADDITION_RATIO: &str = "cart_addition_ratio";

/// Metrics for one session of one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub user_id: UserId,
    pub session_id: SessionId,
    /// Seconds between first and last interaction
    pub total_session_time: f64,
    /// Percentage of interactions that added to cart
    pub cart_addition_ratio: f64,
}

/// Per-session metrics for a user, ordered by (user_id, session_id)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionMetricsTable {
    rows: Vec<SessionMetrics>,
}

impl SessionMetricsTable {
    pub const COLUMNS: [(&'static str, ColumnType); 4] = [
        (USER_ID, ColumnType::Int),
        (SESSION_ID, ColumnType::Int),
        (TOTAL_SESSION_TIME, ColumnType::Float),
        (CART_ADDITION_RATIO, ColumnType::Float),
    ];

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from rows, ordering them by (user_id, session_id)
    pub fn from_rows(mut rows: Vec<SessionMetrics>) -> Self {
        rows.sort_by_key(|r| (r.user_id, r.session_id));
        Self { rows }
    }

    pub fn rows(&self) -> &[SessionMetrics] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SessionMetrics> {
        self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SessionMetrics> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        Self::COLUMNS.iter().map(|(name, _)| *name).collect()
    }

    pub fn schema(&self) -> Vec<(String, ColumnType)> {
        Self::COLUMNS
            .iter()
            .map(|(name, ty)| (name.to_string(), *ty))
            .collect()
    }

    /// Render as a [`Frame`] with the four fixed columns
    pub fn to_frame(&self) -> Result<Frame> {
        Frame::new()
            .with_column(
                USER_ID,
                Column::Int(self.rows.iter().map(|r| r.user_id.get()).collect()),
            )?
            .with_column(
                SESSION_ID,
                Column::Int(self.rows.iter().map(|r| r.session_id.get()).collect()),
            )?
            .with_column(
                TOTAL_SESSION_TIME,
                Column::Float(self.rows.iter().map(|r| r.total_session_time).collect()),
            )?
            .with_column(
                CART_ADDITION_RATIO,
                Column::Float(self.rows.iter().map(|r| r.cart_addition_ratio).collect()),
            )
    }
}

impl<'a> IntoIterator for &'a SessionMetricsTable {
    type Item = &'a SessionMetrics;
    type IntoIter = std::slice::Iter<'a, SessionMetrics>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
