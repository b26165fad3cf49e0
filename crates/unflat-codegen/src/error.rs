// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Layout invariant violations reported by
//! [`SettablesCollected::verify`](crate::SettablesCollected::verify).

use std::{error::Error as StdError, fmt};

/// A broken layout invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Slice 0 is missing, has a parent, or is not required.
    Root,

    /// A slice inside `[slice + 1, slice + all_required_child_count]` is not
    /// a required descendant of `slice`.
    RequiredRange {
        /// Slice whose range is broken.
        slice:     usize,
        /// Offending slice in the range.
        offending: usize
    },

    /// Direct child count differs from the recorded count.
    ChildCount {
        /// Slice whose count is broken.
        slice:    usize,
        /// `true` for required children, `false` for optional ones.
        required: bool,
        /// Recorded count.
        expected: usize,
        /// Counted children.
        found:    usize
    },

    /// `first_optional_child` does not point at an optional child.
    FirstOptionalChild {
        /// Slice whose pointer is broken.
        slice: usize,
        /// Pointed-to slice.
        found: usize
    },

    /// An optional slice is marked set-to-default.
    OptionalDefaulted {
        /// Offending slice.
        slice: usize
    },

    /// A defaulted slice lies outside its parent's required range.
    DefaultOutsideParent {
        /// Defaulted slice.
        slice:  usize,
        /// Its parent.
        parent: usize
    },

    /// Primitive arrays and slice runs disagree.
    SettableCount {
        /// `"required"` or `"optional"`.
        kind:     &'static str,
        /// Array length.
        expected: usize,
        /// Sum over slices.
        found:    usize
    },

    /// Root totals do not cover every primitive.
    RootTotals {
        /// Primitives in the arrays.
        expected: usize,
        /// Root required plus optional totals.
        found:    usize
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "slice 0 must be the required root"),
            Self::RequiredRange { slice, offending } => write!(
                f,
                "slice {offending} is inside the required range of slice {slice} but is not its required descendant"
            ),
            Self::ChildCount {
                slice,
                required,
                expected,
                found
            } => write!(
                f,
                "slice {slice} records {expected} {} children, found {found}",
                if *required { "required" } else { "optional" }
            ),
            Self::FirstOptionalChild { slice, found } => write!(
                f,
                "first optional child of slice {slice} points at slice {found}, which is not its optional child"
            ),
            Self::OptionalDefaulted { slice } => {
                write!(f, "optional slice {slice} is marked set-to-default")
            }
            Self::DefaultOutsideParent { slice, parent } => write!(
                f,
                "defaulted slice {slice} lies outside the required range of parent {parent}"
            ),
            Self::SettableCount {
                kind,
                expected,
                found
            } => write!(f, "{kind} array holds {expected} members, slices claim {found}"),
            Self::RootTotals { expected, found } => {
                write!(f, "root totals cover {found} of {expected} primitive members")
            }
        }
    }
}

impl StdError for LayoutError {}
