// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core traits and types for unflat.
//!
//! This crate provides the runtime used by code generated with the
//! `#[unflat::model]` attribute. It can also be used standalone for
//! hand-written parsers.
//!
//! # Overview
//!
//! - [`Row`] / [`Value`] - Positional access to one row of tabular data
//! - [`FromValue`] - Conversion from column values
//! - [`Columns`] - Resolved column indexes of one target
//! - [`Unflat`] - A type that can be built from a row
//! - [`read_list`], [`read_unbuffered`], [`try_read_list`] - Reading helpers
//! - [`DataTable`] - In-memory rows
//! - [`prelude`] - Convenient re-exports
//!
//! # Column indexes
//!
//! Generated code keeps one `isize` per primitive member. `-1` means the
//! member matched no column; any other value is the column position. Indexes
//! are resolved once per result set and reused for every row.
//!
//! # Features
//!
//! | Feature | Effect |
//! |---------|--------|
//! | `streams` | `read_stream` over `futures::Stream` |
//! | `uuid` | [`FromValue`] for `uuid::Uuid` |
//! | `chrono` | [`FromValue`] for `chrono` date and time types |

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
pub mod prelude;
mod read;
mod row;
mod table;
mod value;

#[cfg(feature = "streams")]
pub use read::read_stream;
pub use self::{
    error::UnflatError,
    read::{Unbuffered, read_list, read_unbuffered, resolve_checked, try_read_list},
    row::{Row, Value},
    table::{DataRow, DataTable, Datum},
    value::{FromValue, cast, cast_or_default, value_at}
};

/// Resolved column indexes for one target type.
///
/// Implemented by the generated `{Target}Columns` struct.
///
/// # Example
///
/// ```rust,ignore
/// let mut columns = MovieColumns::unresolved();
/// columns.resolve("title", 0);
/// columns.resolve("id", 1);
/// ```
pub trait Columns: Sized {
    /// Number of required primitive members reached from the root without
    /// crossing an optional member.
    const REQUIRED: usize;

    /// Indexes before resolution: fixed ordinals, `-1` for everything else.
    fn unresolved() -> Self;

    /// Offer the column `name` at position `index`.
    ///
    /// The first member whose spellings match and whose index is still `-1`
    /// takes it. Already resolved members are never overwritten, so a
    /// repeated column name fills the next matching member.
    fn resolve(&mut self, name: &str, index: isize);

    /// Dotted paths of required root members that matched no column.
    fn missing_required(&self) -> Vec<&'static str>;

    /// Resolve every column of `row`.
    fn from_row<R: Row + ?Sized>(row: &R) -> Self {
        let mut columns = Self::unresolved();
        for index in 0..row.column_count() {
            let (Some(name), Ok(position)) = (row.column_name(index), isize::try_from(index)) else {
                continue;
            };
            columns.resolve(name, position);
        }
        columns
    }
}

/// A type that can be built from one row.
///
/// Implemented by `#[unflat::model]` for every struct marked
/// `#[unflat(target)]`.
pub trait Unflat: Sized {
    /// Resolved column indexes of this target.
    type Columns: Columns;

    /// Build one value from `row` using resolved `columns`.
    ///
    /// Never fails: unresolved or unconvertible required members take their
    /// `Default`, optional members stay `None`.
    fn parse<R: Row + ?Sized>(row: &R, columns: &Self::Columns) -> Self;
}
