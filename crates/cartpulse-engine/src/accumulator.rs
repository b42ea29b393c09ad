use cartpulse_types::InteractionRecord;
use chrono::{NaiveDateTime, TimeDelta};

/// Running aggregates for one (user, session) group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionAccumulator {
    pub min_timestamp: NaiveDateTime,
    pub max_timestamp: NaiveDateTime,
    pub interaction_count: usize,
    pub cart_sum: i64,
}

impl SessionAccumulator {
    /// Start a group from its first interaction
    pub fn new(first: &InteractionRecord) -> Self {
        Self {
            min_timestamp: first.timestamp_local,
            max_timestamp: first.timestamp_local,
            interaction_count: 1,
            cart_sum: first.add_to_cart,
        }
    }

    pub fn observe(&mut self, record: &InteractionRecord) {
        self.min_timestamp = self.min_timestamp.min(record.timestamp_local);
        self.max_timestamp = self.max_timestamp.max(record.timestamp_local);
        self.interaction_count += 1;
        self.cart_sum += record.add_to_cart;
    }

    pub fn duration(&self) -> TimeDelta {
        self.max_timestamp - self.min_timestamp
    }

    /// Unrounded session length in seconds
    pub fn duration_seconds(&self) -> f64 {
        // max >= min, so the conversion only fails for overflow
        self.duration()
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Unrounded cart-addition percentage
    pub fn cart_addition_ratio(&self) -> f64 {
        // interaction_count >= 1 by construction
        (self.cart_sum as f64 / self.interaction_count as f64) * 100.0
    }
}
