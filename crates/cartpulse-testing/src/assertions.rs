//! Custom assertions for session metrics tables.
//!
//! Provides high-level assertions that make tests more readable:
//! - Fixed output schema
//! - Row ordering and ownership
//! - Value ranges

use anyhow::{Context, Result};
use cartpulse_types::{ColumnType, SessionMetricsTable};

const EXPECTED_SCHEMA: [(&str, ColumnType); 4] = [
    ("user_id", ColumnType::Int),
    ("session_id", ColumnType::Int),
    ("total_session_time", ColumnType::Float),
    ("cart_addition_ratio", ColumnType::Float),
];

/// Assert that the table, rendered as a frame, has exactly the four output
/// columns in order with their fixed types.
pub fn assert_metrics_schema(table: &SessionMetricsTable) -> Result<()> {
    let frame = table.to_frame().context("Failed to render table as frame")?;
    let schema = frame.schema();

    if schema.len() != EXPECTED_SCHEMA.len() {
        anyhow::bail!("Expected {} columns, got {:?}", EXPECTED_SCHEMA.len(), schema);
    }

    for (i, ((name, ty), (expected_name, expected_ty))) in
        schema.iter().zip(EXPECTED_SCHEMA.iter()).enumerate()
    {
        if name != expected_name || ty != expected_ty {
            anyhow::bail!(
                "Column {} is {}:{} but expected {}:{}",
                i,
                name,
                ty,
                expected_name,
                expected_ty
            );
        }
    }

    if frame.row_count() != table.len() {
        anyhow::bail!(
            "Frame has {} rows but table has {}",
            frame.row_count(),
            table.len()
        );
    }

    Ok(())
}

/// Assert that rows are strictly ascending by (user_id, session_id).
pub fn assert_sorted_unique(table: &SessionMetricsTable) -> Result<()> {
    for (i, pair) in table.rows().windows(2).enumerate() {
        let prev = (pair[0].user_id, pair[0].session_id);
        let next = (pair[1].user_id, pair[1].session_id);
        if prev >= next {
            anyhow::bail!("Rows {} and {} out of order: {:?} then {:?}", i, i + 1, prev, next);
        }
    }
    Ok(())
}

/// Assert that every row belongs to the given user.
pub fn assert_single_user(table: &SessionMetricsTable, user_id: i64) -> Result<()> {
    for (i, row) in table.iter().enumerate() {
        if row.user_id.get() != user_id {
            anyhow::bail!("Row {} belongs to user {} but expected {}", i, row.user_id, user_id);
        }
    }
    Ok(())
}

/// Assert that both metrics are within their valid ranges for 0/1 flags.
pub fn assert_metric_ranges(table: &SessionMetricsTable) -> Result<()> {
    for (i, row) in table.iter().enumerate() {
        if row.total_session_time < 0.0 {
            anyhow::bail!("Row {} has negative session time {}", i, row.total_session_time);
        }
        if !(0.0..=100.0).contains(&row.cart_addition_ratio) {
            anyhow::bail!(
                "Row {} has cart_addition_ratio {} outside [0, 100]",
                i,
                row.cart_addition_ratio
            );
        }
    }
    Ok(())
}

/// Assert the values of one row as (user_id, session_id, time, ratio).
pub fn assert_row(
    table: &SessionMetricsTable,
    index: usize,
    expected: (i64, i64, f64, f64),
) -> Result<()> {
    let row = table
        .rows()
        .get(index)
        .with_context(|| format!("Table has no row {} (len {})", index, table.len()))?;

    let actual = (
        row.user_id.get(),
        row.session_id.get(),
        row.total_session_time,
        row.cart_addition_ratio,
    );

    if actual != expected {
        anyhow::bail!("Row {} is {:?} but expected {:?}", index, actual, expected);
    }

    Ok(())
}
