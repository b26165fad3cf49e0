// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level `#[unflat(...)]` parsing.
//!
//! | Attribute | Applies to | Description |
//! |-----------|------------|-------------|
//! | `source = ".."` | primitive | Column spelling, repeatable |
//! | `ordinal = N` | primitive | Fixed column position |
//! | `parse = ".."` | primitive | Custom value expression |
//! | `prefix = ".."` | complex | Prepended to nested column names |
//! | `skip` | any | Member takes `Default::default()` |

use darling::{FromField, util::Flag};
use syn::{Ident, Type};
use unflat_codegen::Source;

/// Field attributes parsed from `#[unflat(...)]`.
#[derive(Debug, FromField)]
#[darling(attributes(unflat))]
pub struct MemberAttrs {
    /// Field identifier; `None` for tuple fields.
    pub ident: Option<Ident>,

    /// Declared field type.
    pub ty: Type,

    /// Explicit column names.
    #[darling(multiple)]
    pub source: Vec<String>,

    /// Fixed column position.
    #[darling(default)]
    pub ordinal: Option<usize>,

    /// Column name prefix for members below a complex member.
    #[darling(default)]
    pub prefix: Option<String>,

    /// Custom parse format.
    #[darling(default)]
    pub parse: Option<String>,

    /// Leave the member to `Default::default()`.
    #[darling(default)]
    pub skip: Flag
}

impl MemberAttrs {
    /// Field identifier.
    ///
    /// # Errors
    ///
    /// Returns an error for tuple fields.
    pub fn name(&self) -> darling::Result<&Ident> {
        self.ident
            .as_ref()
            .ok_or_else(|| darling::Error::custom("model fields must be named").with_span(&self.ty))
    }

    /// Column source of a primitive member.
    ///
    /// # Errors
    ///
    /// Returns an error when both `source` and `ordinal` are set.
    pub fn column_source(&self) -> darling::Result<Source> {
        match (self.ordinal, self.source.is_empty()) {
            (Some(_), false) => Err(darling::Error::custom(
                "`source` and `ordinal` cannot be combined"
            )
            .with_span(&self.ty)),
            (Some(ordinal), true) => Ok(Source::Ordinal(ordinal)),
            (None, _) => Ok(Source::Names(self.source.clone()))
        }
    }

    /// Reject attributes that only apply to primitive members.
    ///
    /// # Errors
    ///
    /// Returns an error naming the misplaced attribute.
    pub fn check_complex(&self) -> darling::Result<()> {
        let misplaced = [
            ("source", !self.source.is_empty()),
            ("ordinal", self.ordinal.is_some()),
            ("parse", self.parse.is_some())
        ];
        for (name, present) in misplaced {
            if present {
                return Err(darling::Error::custom(format!(
                    "`{name}` applies to primitive members only"
                ))
                .with_span(&self.ty));
            }
        }
        Ok(())
    }

    /// Reject attributes that only apply to complex members.
    ///
    /// # Errors
    ///
    /// Returns an error when `prefix` is set.
    pub fn check_primitive(&self) -> darling::Result<()> {
        if self.prefix.is_some() {
            return Err(
                darling::Error::custom("`prefix` applies to complex members only").with_span(&self.ty)
            );
        }
        Ok(())
    }
}
