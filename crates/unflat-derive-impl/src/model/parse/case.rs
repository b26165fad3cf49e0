// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `case(...)` column matching policy.
//!
//! | Flag | Effect |
//! |------|--------|
//! | `ignore_case` | ASCII case-insensitive comparison, conventions skipped |
//! | `original` | Member name as written |
//! | `snake` | `snake_case` |
//! | `camel` | `camelCase` |
//! | `pascal` | `PascalCase` |
//! | `overridden` | Expand explicit `source` names too |
//!
//! Without `case(...)` every flag is set.

use darling::{FromMeta, util::Flag};
use unflat_codegen::MatchCase;

/// Parsed `case(...)` flags.
#[derive(Debug, Default, FromMeta)]
pub struct CaseAttrs {
    /// `ignore_case`.
    pub ignore_case: Flag,
    /// `original`.
    pub original:    Flag,
    /// `snake`.
    pub snake:       Flag,
    /// `camel`.
    pub camel:       Flag,
    /// `pascal`.
    pub pascal:      Flag,
    /// `overridden`.
    pub overridden:  Flag
}

impl CaseAttrs {
    /// Convert to codegen flags.
    ///
    /// # Errors
    ///
    /// Returns an error when no flag can match a column name.
    pub fn policy(&self) -> darling::Result<MatchCase> {
        let flags = [
            (self.ignore_case, MatchCase::IGNORE_CASE),
            (self.original, MatchCase::ORIGINAL),
            (self.snake, MatchCase::SNAKE),
            (self.camel, MatchCase::CAMEL),
            (self.pascal, MatchCase::PASCAL),
            (self.overridden, MatchCase::OVERRIDDEN)
        ];
        let policy = flags
            .into_iter()
            .filter(|(flag, _)| flag.is_present())
            .fold(MatchCase::empty(), |policy, (_, bit)| policy | bit);

        if policy.matches_any() {
            Ok(policy)
        } else {
            Err(darling::Error::custom(
                "case(...) needs at least one of ignore_case, original, snake, camel, pascal"
            ))
        }
    }
}
