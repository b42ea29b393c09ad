use std::collections::BTreeMap;

use cartpulse_types::{
    Frame, InteractionRecord, SessionId, SessionMetrics, SessionMetricsTable, UserId,
};

use crate::accumulator::SessionAccumulator;
use crate::config::MetricsConfig;
use crate::reader::{int_column, read_interactions};
use crate::{Error, Result};

/// Computes per-session metrics for one user at a time.
///
/// The computer holds only its configuration, so one instance can serve any
/// number of callers. Input frames and record slices are borrowed and never
/// modified.
#[derive(Debug, Clone, Default)]
pub struct SessionMetricsComputer {
    config: MetricsConfig,
}

impl SessionMetricsComputer {
    pub fn new(config: MetricsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Metrics for every session of `user_id` found in `frame`.
    ///
    /// A user with no rows yields an empty table. Only the user id column is
    /// read in that case; the remaining interaction columns are required as
    /// soon as at least one row matches.
    pub fn compute(&self, frame: &Frame, user_id: i64) -> Result<SessionMetricsTable> {
        let user_id = UserId::new(user_id);
        let names = &self.config.columns;

        tracing::debug!(
            user_id = %user_id,
            rows = frame.row_count(),
            "computing session metrics"
        );

        let mask: Vec<bool> = int_column(frame, &names.user_id)?
            .iter()
            .map(|&id| id == user_id.get())
            .collect();

        // frame row of each subset row
        let positions: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(row, &keep)| keep.then_some(row))
            .collect();

        if positions.is_empty() {
            tracing::debug!(user_id = %user_id, "no interactions for user");
            return Ok(SessionMetricsTable::empty());
        }

        let subset = frame.filter(&mask)?;
        let records = read_interactions(&subset, names).map_err(|err| match err {
            Error::Schema(schema) => {
                Error::Schema(schema.map_row(|row| positions.get(row).copied().unwrap_or(row)))
            }
            other => other,
        })?;

        Ok(self.aggregate(records.iter()))
    }

    /// Same as [`compute`](Self::compute) for callers already holding records
    pub fn compute_records(
        &self,
        records: &[InteractionRecord],
        user_id: i64,
    ) -> SessionMetricsTable {
        let user_id = UserId::new(user_id);

        tracing::debug!(
            user_id = %user_id,
            rows = records.len(),
            "computing session metrics from records"
        );

        self.aggregate(records.iter().filter(|r| r.user_id == user_id))
    }

    fn aggregate<'a>(
        &self,
        records: impl Iterator<Item = &'a InteractionRecord>,
    ) -> SessionMetricsTable {
        let mut sessions: BTreeMap<(UserId, SessionId), SessionAccumulator> = BTreeMap::new();

        for record in records {
            sessions
                .entry((record.user_id, record.session_id))
                .and_modify(|acc| acc.observe(record))
                .or_insert_with(|| SessionAccumulator::new(record));
        }

        let rows: Vec<SessionMetrics> = sessions
            .into_iter()
            .map(|((user_id, session_id), acc)| SessionMetrics {
                user_id,
                session_id,
                total_session_time: self.config.round(acc.duration_seconds()),
                cart_addition_ratio: self.config.round(acc.cart_addition_ratio()),
            })
            .collect();

        tracing::debug!(sessions = rows.len(), "session metrics computed");

        SessionMetricsTable::from_rows(rows)
    }
}
