// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema validation errors.
//!
//! Returned by [`try_read_list`](crate::try_read_list) when the first row's
//! schema cannot satisfy the required members of the target.

use std::{error::Error as StdError, fmt};

/// Error raised while validating a row schema against a target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnflatError {
    /// The row has fewer columns than the target has required members.
    NotEnoughColumns {
        /// Number of required primitive members.
        expected: usize,
        /// Number of columns in the row.
        actual:   usize
    },

    /// Required members whose column was not found in the row.
    MissingRequired {
        /// Dotted member paths, e.g. `director.name`.
        members: Vec<&'static str>
    }
}

impl UnflatError {
    /// Check if this is a column count error.
    #[must_use]
    pub const fn is_not_enough_columns(&self) -> bool {
        matches!(self, Self::NotEnoughColumns { .. })
    }

    /// Check if this is a missing member error.
    #[must_use]
    pub const fn is_missing_required(&self) -> bool {
        matches!(self, Self::MissingRequired { .. })
    }
}

impl fmt::Display for UnflatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughColumns { expected, actual } => write!(
                f,
                "not enough columns for required members: expected at least {expected}, row has {actual}"
            ),
            Self::MissingRequired { members } => {
                write!(f, "no column matched required members: {}", members.join(", "))
            }
        }
    }
}

impl StdError for UnflatError {}
