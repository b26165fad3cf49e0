// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column name matching policy.
//!
//! Each primitive member accepts a small set of column spellings. The set is
//! derived from the member name (or its explicit source names) and the
//! target's [`MatchCase`] policy.
//!
//! | Policy | `release_year` accepts |
//! |--------|------------------------|
//! | `ORIGINAL` | `release_year` |
//! | `SNAKE` | `release_year` |
//! | `PASCAL` | `ReleaseYear` |
//! | `CAMEL` | `releaseYear` |
//! | `IGNORE_CASE` (with anything) | `release_year`, compared case-insensitively |
//!
//! Explicit source names are taken verbatim unless `OVERRIDDEN` is set.

use bitflags::bitflags;
use convert_case::{Case, Casing};

bitflags! {
    /// Column name matching flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MatchCase: u8 {
        /// Compare ASCII case-insensitively; conventions are not expanded.
        const IGNORE_CASE = 1 << 0;
        /// Accept the name as written.
        const ORIGINAL = 1 << 1;
        /// Accept `snake_case`.
        const SNAKE = 1 << 2;
        /// Accept `camelCase`.
        const CAMEL = 1 << 3;
        /// Accept `PascalCase`.
        const PASCAL = 1 << 4;
        /// Expand explicit source names as well.
        const OVERRIDDEN = 1 << 5;
    }
}

impl Default for MatchCase {
    fn default() -> Self {
        Self::all()
    }
}

impl MatchCase {
    /// Check if names are compared case-insensitively.
    #[must_use]
    pub const fn ignores_case(self) -> bool {
        self.contains(Self::IGNORE_CASE)
    }

    /// Check if the policy can match anything at all.
    #[must_use]
    pub fn matches_any(self) -> bool {
        self.intersects(Self::IGNORE_CASE | Self::ORIGINAL | Self::SNAKE | Self::CAMEL | Self::PASCAL)
    }

    /// Acceptable spellings for `name`, deduplicated, in policy order.
    ///
    /// `explicit` names are returned verbatim unless `OVERRIDDEN` is set;
    /// under `IGNORE_CASE` every spelling is lower-cased.
    #[must_use]
    pub fn spellings(self, name: &str, explicit: bool) -> Vec<String> {
        if self.ignores_case() {
            return vec![name.to_ascii_lowercase()];
        }
        if explicit && !self.contains(Self::OVERRIDDEN) {
            return vec![name.to_owned()];
        }

        let mut spellings = Vec::with_capacity(4);
        let conventions = [
            (Self::ORIGINAL, None),
            (Self::SNAKE, Some(Case::Snake)),
            (Self::PASCAL, Some(Case::Pascal)),
            (Self::CAMEL, Some(Case::Camel))
        ];
        for (flag, case) in conventions {
            if !self.contains(flag) {
                continue;
            }
            let spelling = case.map_or_else(|| name.to_owned(), |case| name.to_case(case));
            if !spellings.contains(&spelling) {
                spellings.push(spelling);
            }
        }
        spellings
    }
}
