//! Column-oriented in-memory table.
//!
//! A [`Frame`] is what callers hand to the metrics engine: an ordered set of
//! named, equally sized [`Column`]s. Frames are never modified by the engine;
//! row selection always produces a new frame.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Logical type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Int,
    Float,
    Bool,
    Text,
    Timestamp,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Bool => "bool",
            ColumnType::Text => "text",
            ColumnType::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A single typed column of values
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Bool(Vec<bool>),
    Text(Vec<String>),
    Timestamp(Vec<NaiveDateTime>),
}

impl Column {
    /// Zero-length column of the given type
    pub fn empty(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Int => Column::Int(Vec::new()),
            ColumnType::Float => Column::Float(Vec::new()),
            ColumnType::Bool => Column::Bool(Vec::new()),
            ColumnType::Text => Column::Text(Vec::new()),
            ColumnType::Timestamp => Column::Timestamp(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Bool(v) => v.len(),
            Column::Text(v) => v.len(),
            Column::Timestamp(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int(_) => ColumnType::Int,
            Column::Float(_) => ColumnType::Float,
            Column::Bool(_) => ColumnType::Bool,
            Column::Text(_) => ColumnType::Text,
            Column::Timestamp(_) => ColumnType::Timestamp,
        }
    }

    /// Copy out the values whose mask entry is `true`.
    ///
    /// The mask must be as long as the column; callers go through
    /// [`Frame::filter`], which checks this.
    pub fn take(&self, mask: &[bool]) -> Column {
        match self {
            Column::Int(v) => Column::Int(select(v, mask)),
            Column::Float(v) => Column::Float(select(v, mask)),
            Column::Bool(v) => Column::Bool(select(v, mask)),
            Column::Text(v) => Column::Text(select(v, mask)),
            Column::Timestamp(v) => Column::Timestamp(select(v, mask)),
        }
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            Column::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            Column::Float(v) => Some(v),
            _ => None,
        }
    }
}

fn select<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
    values
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(value, _)| value.clone())
        .collect()
}

impl From<Vec<i64>> for Column {
    fn from(values: Vec<i64>) -> Self {
        Column::Int(values)
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Float(values)
    }
}

impl From<Vec<bool>> for Column {
    fn from(values: Vec<bool>) -> Self {
        Column::Bool(values)
    }
}

impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Column::Text(values)
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::Text(values.into_iter().map(String::from).collect())
    }
}

impl From<Vec<NaiveDateTime>> for Column {
    fn from(values: Vec<NaiveDateTime>) -> Self {
        Column::Timestamp(values)
    }
}

/// Ordered collection of named columns sharing one row count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<(String, Column)>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Frame::push_column`]
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        column: impl Into<Column>,
    ) -> Result<Self> {
        self.push_column(name, column)?;
        Ok(self)
    }

    /// Append a column. The first column fixes the row count.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        column: impl Into<Column>,
    ) -> Result<()> {
        let name = name.into();
        let column = column.into();

        if self.column(&name).is_some() {
            return Err(Error::DuplicateColumn(name));
        }

        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(Error::LengthMismatch {
                column: name,
                expected: self.row_count(),
                found: column.len(),
            });
        }

        self.columns.push((name, column));
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|(_, c)| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Like [`Frame::column`], but a missing column is a schema error
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn schema(&self) -> Vec<(String, ColumnType)> {
        self.columns
            .iter()
            .map(|(n, c)| (n.clone(), c.column_type()))
            .collect()
    }

    /// New frame holding the rows whose mask entry is `true`.
    ///
    /// Column names, order and types carry over even when no row survives.
    pub fn filter(&self, mask: &[bool]) -> Result<Frame> {
        if mask.len() != self.row_count() {
            return Err(Error::LengthMismatch {
                column: "<mask>".to_string(),
                expected: self.row_count(),
                found: mask.len(),
            });
        }

        let columns = self
            .columns
            .iter()
            .map(|(n, c)| (n.clone(), c.take(mask)))
            .collect();

        Ok(Frame { columns })
    }
}
