//! Reading interaction records out of a [`Frame`].

use cartpulse_types::{
    Column, Error as SchemaError, Frame, InteractionRecord, PartNumber, coerce_timestamps,
};

use crate::Result;
use crate::config::ColumnNames;

/// Integer column by name, or a schema error
pub fn int_column<'a>(frame: &'a Frame, name: &str) -> Result<&'a [i64]> {
    let column = frame.require(name)?;
    column.as_ints().ok_or_else(|| {
        SchemaError::ColumnType {
            column: name.to_string(),
            expected: "int",
            found: column.column_type(),
        }
        .into()
    })
}

fn cart_flags(name: &str, column: &Column) -> Result<Vec<i64>> {
    match column {
        Column::Int(values) => Ok(values.clone()),
        Column::Bool(values) => Ok(values.iter().map(|&b| i64::from(b)).collect()),
        other => Err(SchemaError::ColumnType {
            column: name.to_string(),
            expected: "int or bool",
            found: other.column_type(),
        }
        .into()),
    }
}

fn part_numbers(column: &Column) -> Vec<PartNumber> {
    match column {
        Column::Int(values) => values.iter().map(|&n| PartNumber::Numeric(n)).collect(),
        Column::Text(values) => values.iter().cloned().map(PartNumber::Code).collect(),
        Column::Float(values) => values
            .iter()
            .map(|v| PartNumber::Code(v.to_string()))
            .collect(),
        Column::Bool(values) => values
            .iter()
            .map(|v| PartNumber::Code(v.to_string()))
            .collect(),
        Column::Timestamp(values) => values
            .iter()
            .map(|v| PartNumber::Code(v.to_string()))
            .collect(),
    }
}

/// Convert every row of `frame` into an [`InteractionRecord`].
///
/// All five interaction columns must be present. Timestamps are coerced;
/// a text cell that does not parse fails the whole read.
pub fn read_interactions(frame: &Frame, names: &ColumnNames) -> Result<Vec<InteractionRecord>> {
    let user_ids = int_column(frame, &names.user_id)?;
    let session_ids = int_column(frame, &names.session_id)?;
    let timestamps = coerce_timestamps(
        &names.timestamp_local,
        frame.require(&names.timestamp_local)?,
    )?;
    let partnumbers = part_numbers(frame.require(&names.partnumber)?);
    let flags = cart_flags(&names.add_to_cart, frame.require(&names.add_to_cart)?)?;

    let records = user_ids
        .iter()
        .zip(session_ids)
        .zip(timestamps)
        .zip(partnumbers)
        .zip(flags)
        .map(
            |((((&user_id, &session_id), timestamp), partnumber), add_to_cart)| {
                InteractionRecord::new(user_id, session_id, timestamp, partnumber, add_to_cart)
            },
        )
        .collect();

    Ok(records)
}
