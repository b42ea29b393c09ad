//! Fixtures for interaction log generation.
//!
//! Rows are described by offsets from a fixed base time so tests read as
//! "5 seconds later" instead of spelling out date-times.

use anyhow::Result;
use cartpulse_types::{Column, Frame, InteractionRecord, PartNumber};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

#[derive(Debug, Clone)]
struct Row {
    user_id: i64,
    session_id: i64,
    at: NaiveDateTime,
    partnumber: i64,
    add_to_cart: i64,
}

/// Builder for interaction datasets.
#[derive(Debug, Clone, Default)]
pub struct InteractionLog {
    rows: Vec<Row>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 2024-05-20 09:00:00, the time all offsets are relative to.
    pub fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 20)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .expect("valid base time")
    }

    /// Add an interaction `offset_secs` seconds after the base time.
    pub fn push(
        self,
        user_id: i64,
        session_id: i64,
        offset_secs: i64,
        partnumber: i64,
        add_to_cart: i64,
    ) -> Self {
        let at = Self::base_time() + TimeDelta::seconds(offset_secs);
        self.push_at(user_id, session_id, at, partnumber, add_to_cart)
    }

    /// Add an interaction at an explicit time.
    pub fn push_at(
        mut self,
        user_id: i64,
        session_id: i64,
        at: NaiveDateTime,
        partnumber: i64,
        add_to_cart: i64,
    ) -> Self {
        self.rows.push(Row {
            user_id,
            session_id,
            at,
            partnumber,
            add_to_cart,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> Vec<InteractionRecord> {
        self.rows
            .iter()
            .map(|r| {
                InteractionRecord::new(
                    r.user_id,
                    r.session_id,
                    r.at,
                    PartNumber::Numeric(r.partnumber),
                    r.add_to_cart,
                )
            })
            .collect()
    }

    /// Frame with an already-typed timestamp column.
    pub fn to_frame(&self) -> Result<Frame> {
        let timestamps = Column::Timestamp(self.rows.iter().map(|r| r.at).collect());
        self.frame_with_timestamps(timestamps)
    }

    /// Frame whose timestamps are text, as they arrive from a raw export.
    pub fn to_text_frame(&self) -> Result<Frame> {
        let timestamps = Column::Text(
            self.rows
                .iter()
                .map(|r| r.at.format("%Y-%m-%d %H:%M:%S%.f").to_string())
                .collect(),
        );
        self.frame_with_timestamps(timestamps)
    }

    fn frame_with_timestamps(&self, timestamps: Column) -> Result<Frame> {
        let frame = Frame::new()
            .with_column("user_id", self.ints(|r| r.user_id))?
            .with_column("session_id", self.ints(|r| r.session_id))?
            .with_column("timestamp_local", timestamps)?
            .with_column("partnumber", self.ints(|r| r.partnumber))?
            .with_column("add_to_cart", self.ints(|r| r.add_to_cart))?;
        Ok(frame)
    }

    fn ints(&self, field: impl Fn(&Row) -> i64) -> Column {
        Column::Int(self.rows.iter().map(field).collect())
    }
}
