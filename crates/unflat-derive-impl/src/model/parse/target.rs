// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct-level `#[unflat(...)]` parsing with darling.
//!
//! # Supported Attributes
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `target` | No | `false` | Generate a parser for this struct |
//! | `case(...)` | No | every flag | Column name matching policy |
//! | `columns` | No | `{Target}Columns` | Name of the generated columns struct |

use darling::{FromDeriveInput, util::Flag};
use syn::{Generics, Ident, Visibility};
use unflat_codegen::{MatchCase, TargetOptions};

use super::CaseAttrs;

/// Struct-level attributes parsed from `#[unflat(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(unflat), supports(struct_named))]
pub struct TargetAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct visibility, reused for the columns struct.
    pub vis: Visibility,

    /// Struct generics; targets must not have any.
    pub generics: Generics,

    /// Marks a flatten target.
    #[darling(default)]
    pub target: Flag,

    /// Column name matching policy.
    #[darling(default)]
    pub case: Option<CaseAttrs>,

    /// Custom name of the columns struct.
    #[darling(default)]
    pub columns: Option<Ident>
}

impl TargetAttrs {
    /// Check if this struct is a flatten target.
    pub fn is_target(&self) -> bool {
        self.target.is_present()
    }

    /// Expansion options for this target.
    ///
    /// # Errors
    ///
    /// Returns an error for generic targets and empty case policies.
    pub fn options(&self, runtime: &syn::Path) -> darling::Result<TargetOptions> {
        if !self.generics.params.is_empty() {
            return Err(
                darling::Error::custom("flatten targets cannot be generic").with_span(&self.generics)
            );
        }
        let policy = match &self.case {
            Some(case) => case.policy()?,
            None => MatchCase::default()
        };

        let mut options = TargetOptions::new(self.ident.clone());
        if let Some(columns) = &self.columns {
            options.columns = columns.clone();
        }
        options.vis = self.vis.clone();
        options.policy = policy;
        options.runtime = runtime.clone();
        Ok(options)
    }
}
