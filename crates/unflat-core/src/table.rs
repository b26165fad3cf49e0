// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory tabular data.
//!
//! [`DataTable`] owns a column schema and rows of [`Datum`]s. Its rows
//! implement [`Row`], which makes it handy for tests, fixtures and for
//! buffering results from drivers that do not expose borrowed rows.
//!
//! ```rust
//! use unflat_core::{DataTable, Datum, Row, Value};
//!
//! let mut table = DataTable::new(["id", "title"]);
//! table.push_row([Datum::from(1_i64), Datum::from("Alien")]);
//!
//! let row = table.row(0).unwrap();
//! assert_eq!(row.column_name(1), Some("title"));
//! assert_eq!(row.value(0), Value::Int(1));
//! ```

use crate::row::{Row, Value};

/// Owned column value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Datum {
    /// SQL `NULL`.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary value.
    Bytes(Vec<u8>)
}

impl Datum {
    /// Borrow as a [`Value`].
    #[must_use]
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::Int(*i),
            Self::UInt(u) => Value::UInt(*u),
            Self::Float(f) => Value::Float(*f),
            Self::Text(s) => Value::Text(s),
            Self::Bytes(b) => Value::Bytes(b)
        }
    }
}

macro_rules! impl_datum_from {
    ($($ty:ty => $variant:ident($conv:ty)),* $(,)?) => {$(
        impl From<$ty> for Datum {
            fn from(value: $ty) -> Self {
                Self::$variant(<$conv>::from(value))
            }
        }
    )*};
}

impl_datum_from!(
    bool => Bool(bool),
    i8 => Int(i64),
    i16 => Int(i64),
    i32 => Int(i64),
    i64 => Int(i64),
    u8 => UInt(u64),
    u16 => UInt(u64),
    u32 => UInt(u64),
    u64 => UInt(u64),
    f32 => Float(f64),
    f64 => Float(f64),
    String => Text(String),
    &str => Text(String),
    Vec<u8> => Bytes(Vec<u8>)
);

impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Column schema plus owned rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows:    Vec<Vec<Datum>>
}

impl DataTable {
    /// Create an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows:    Vec::new()
        }
    }

    /// Append a row.
    ///
    /// Missing trailing values are filled with [`Datum::Null`], extra values
    /// are dropped.
    pub fn push_row<I, D>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Datum>
    {
        let mut row: Vec<Datum> = values
            .into_iter()
            .map(Into::into)
            .take(self.columns.len())
            .collect();
        row.resize(self.columns.len(), Datum::Null);
        self.rows.push(row);
        self
    }

    /// Column names in positional order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<DataRow<'_>> {
        self.rows.get(index).map(|values| DataRow {
            columns: &self.columns,
            values
        })
    }

    /// Iterate over all rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = DataRow<'_>> + '_ {
        self.rows.iter().map(|values| DataRow {
            columns: &self.columns,
            values
        })
    }
}

/// Borrowed view of one [`DataTable`] row.
#[derive(Debug, Clone, Copy)]
pub struct DataRow<'t> {
    columns: &'t [String],
    values:  &'t [Datum]
}

impl Row for DataRow<'_> {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    fn value(&self, index: usize) -> Value<'_> {
        self.values.get(index).map_or(Value::Null, Datum::as_value)
    }
}
