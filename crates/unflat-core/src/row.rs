// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Row abstraction consumed by generated parsers.
//!
//! Generated code never touches a database driver directly. It reads through
//! the [`Row`] trait, which exposes column names for schema resolution and
//! borrowed [`Value`]s for conversion.
//!
//! # Implementing `Row`
//!
//! ```rust,ignore
//! impl Row for MyDriverRow {
//!     fn column_count(&self) -> usize {
//!         self.columns().len()
//!     }
//!
//!     fn column_name(&self, index: usize) -> Option<&str> {
//!         self.columns().get(index).map(|c| c.name())
//!     }
//!
//!     fn value(&self, index: usize) -> Value<'_> {
//!         // map driver values onto `Value`
//!     }
//! }
//! ```

/// A single column value borrowed from a row.
///
/// `Null` is also returned for out of range indexes, so generated code can
/// treat "column absent" and "column null" the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// SQL `NULL` or a missing column.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer of any width.
    Int(i64),
    /// Unsigned integer of any width.
    UInt(u64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(&'a str),
    /// Binary value.
    Bytes(&'a [u8])
}

impl Value<'_> {
    /// Check if the value is `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes"
        }
    }
}

/// Positional access to one row of tabular data.
pub trait Row {
    /// Number of columns in the row.
    fn column_count(&self) -> usize;

    /// Name of the column at `index`, `None` when out of range.
    fn column_name(&self, index: usize) -> Option<&str>;

    /// Value of the column at `index`, [`Value::Null`] when out of range.
    fn value(&self, index: usize) -> Value<'_>;
}

impl<R: Row + ?Sized> Row for &R {
    fn column_count(&self) -> usize {
        (**self).column_count()
    }

    fn column_name(&self, index: usize) -> Option<&str> {
        (**self).column_name(index)
    }

    fn value(&self, index: usize) -> Value<'_> {
        (**self).value(index)
    }
}
