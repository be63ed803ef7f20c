//! Pitch sequence number allocation
//!
//! Both numbers come from reading the current maximum out of persisted
//! history and adding one. The read and the later insert are separate store
//! calls, so two sessions writing concurrently can allocate the same number;
//! the store contract has no transactions to close that gap. Advisory
//! counters, not serializable ones.

use serde_json::Value;

use crate::store::{tables, Filter, Order, Query, RecordStore, StoreError};

/// The two sequence numbers assigned to a recorded pitch: `pitch_no` is
/// global across all pitches ever stored, `pitch_of_ab` counts within one
/// at-bat starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchNumbers {
    pub pitch_no: i64,
    pub pitch_of_ab: i64,
}

/// Next global pitch number: 1 + max `PitchNo` over all pitches, 1 if none.
pub async fn next_global_number(store: &dyn RecordStore) -> Result<i64, StoreError> {
    let rows = store
        .select(
            tables::PITCHES,
            Query::new().order_by(Order::desc("PitchNo")).limit(1),
        )
        .await?;
    let last = rows
        .first()
        .and_then(|r| r.get("PitchNo"))
        .and_then(Value::as_i64)
        .unwrap_or(0);
    Ok(last + 1)
}

/// Next pitch number within an at-bat: 1 + max `PitchOfAB` among pitches of
/// that at-bat, 1 for a fresh at-bat regardless of global history.
pub async fn next_in_atbat_number(
    store: &dyn RecordStore,
    atbat_id: i64,
) -> Result<i64, StoreError> {
    let rows = store
        .select(
            tables::PITCHES,
            Query::new()
                .filter(Filter::eq("AtBatID", atbat_id))
                .order_by(Order::desc("PitchOfAB"))
                .limit(1),
        )
        .await?;
    let last = rows
        .first()
        .and_then(|r| r.get("PitchOfAB"))
        .and_then(Value::as_i64)
        .unwrap_or(0);
    Ok(last + 1)
}

pub async fn next_pitch_numbers(
    store: &dyn RecordStore,
    atbat_id: i64,
) -> Result<PitchNumbers, StoreError> {
    Ok(PitchNumbers {
        pitch_no: next_global_number(store).await?,
        pitch_of_ab: next_in_atbat_number(store, atbat_id).await?,
    })
}
