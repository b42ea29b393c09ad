use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::{Column, Error, Result};

/// Naive formats tried after RFC 3339, in order
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
];

/// A parsed timestamp and whether the text carried a UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimestamp {
    pub value: NaiveDateTime,
    pub has_offset: bool,
}

/// Parse a timestamp string, remembering whether it carried an offset.
///
/// Offsets in RFC 3339 input are normalized to UTC. A bare date is read as
/// midnight.
pub fn parse_timestamp_detailed(value: &str) -> Option<ParsedTimestamp> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(ParsedTimestamp {
            value: dt.naive_utc(),
            has_offset: true,
        });
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Some(ParsedTimestamp {
        value: naive,
        has_offset: false,
    })
}

/// Parse a timestamp string into a date-time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    parse_timestamp_detailed(value).map(|parsed| parsed.value)
}

/// Coerce a column to date-time values.
///
/// Timestamp columns pass through unchanged; text columns are parsed row by
/// row and the first unparseable value is reported. Offset-carrying and
/// naive text cannot share a column, since one is an instant and the other a
/// wall-clock reading; the first row disagreeing with row 0 is reported.
pub fn coerce_timestamps(name: &str, column: &Column) -> Result<Vec<NaiveDateTime>> {
    match column {
        Column::Timestamp(values) => Ok(values.clone()),
        Column::Text(values) => {
            let mut first_has_offset = None;
            let mut parsed = Vec::with_capacity(values.len());

            for (row, raw) in values.iter().enumerate() {
                let ts = parse_timestamp_detailed(raw).ok_or_else(|| Error::InvalidTimestamp {
                    row,
                    value: raw.clone(),
                })?;

                match first_has_offset {
                    None => first_has_offset = Some(ts.has_offset),
                    Some(expected) if expected != ts.has_offset => {
                        return Err(Error::MixedTimestampOffsets {
                            row,
                            value: raw.clone(),
                        });
                    }
                    Some(_) => {}
                }

                parsed.push(ts.value);
            }

            Ok(parsed)
        }
        other => Err(Error::ColumnType {
            column: name.to_string(),
            expected: "timestamp or text",
            found: other.column_type(),
        }),
    }
}
