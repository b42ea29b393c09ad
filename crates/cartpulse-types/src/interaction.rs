use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{PartNumber, SessionId, UserId};

/// One recorded shop interaction (a product view, a cart addition, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub timestamp_local: NaiveDateTime,
    pub partnumber: PartNumber,
    /// 0/1 flag; anything else is outside the input contract
    pub add_to_cart: i64,
}

impl InteractionRecord {
    pub fn new(
        user_id: i64,
        session_id: i64,
        timestamp_local: NaiveDateTime,
        partnumber: PartNumber,
        add_to_cart: i64,
    ) -> Self {
        Self {
            user_id: UserId::new(user_id),
            session_id: SessionId::new(session_id),
            timestamp_local,
            partnumber,
            add_to_cart,
        }
    }
}
