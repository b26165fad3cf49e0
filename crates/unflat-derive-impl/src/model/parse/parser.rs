// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Custom parser functions.
//!
//! A function marked `#[unflat(parser)]` converts a column value into its
//! return type. Every primitive member of that type uses it instead of
//! `FromValue`, unless the member has its own `parse` format.
//!
//! Lookup is by proximity: parsers declared in an `impl` block of the struct
//! owning the member win over module-level functions.
//!
//! ```rust,ignore
//! #[unflat(parser)]
//! fn flag(value: unflat::Value<'_>) -> bool { .. }          // flag({0})
//!
//! impl Movie {
//!     #[unflat(parser)]
//!     fn year(value: unflat::Value<'_>) -> Year { .. }      // Movie::year({0})
//! }
//! ```

use std::collections::HashMap;

use darling::{FromAttributes, util::Flag};
use quote::ToTokens;
use syn::{Attribute, Ident, ReturnType, Signature, Type};

/// Function-level attributes parsed from `#[unflat(...)]`.
#[derive(Debug, Default, FromAttributes)]
#[darling(attributes(unflat))]
pub struct ParserAttrs {
    /// Marks a parser function.
    #[darling(default)]
    pub parser: Flag,

    /// Custom call format; defaults to `path({0})`.
    #[darling(default)]
    pub call: Option<String>
}

/// Key identifying a member type, compared by tokens.
pub fn type_key(ty: &Type) -> String {
    ty.to_token_stream().to_string()
}

/// Parsers visible from one module.
#[derive(Debug, Default)]
pub struct ParserTable {
    module: HashMap<String, String>,
    owned:  HashMap<(String, String), String>
}

impl ParserTable {
    /// Register a module-level function.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed attribute or a parser without a
    /// return type.
    pub fn add_function(&mut self, attrs: &[Attribute], sig: &Signature) -> darling::Result<()> {
        let Some((key, call)) = parser_entry(attrs, sig, None)? else {
            return Ok(());
        };
        self.module.insert(key, call);
        Ok(())
    }

    /// Register a method of `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed attribute or a parser without a
    /// return type.
    pub fn add_method(
        &mut self,
        owner: &Ident,
        attrs: &[Attribute],
        sig: &Signature
    ) -> darling::Result<()> {
        let Some((key, call)) = parser_entry(attrs, sig, Some(owner))? else {
            return Ok(());
        };
        self.owned.insert((owner.to_string(), key), call);
        Ok(())
    }

    /// Call format for a member of type `ty` declared in `owner`.
    pub fn lookup(&self, owner: &Ident, ty: &Type) -> Option<&str> {
        let key = type_key(ty);
        self.owned
            .get(&(owner.to_string(), key.clone()))
            .or_else(|| self.module.get(&key))
            .map(String::as_str)
    }
}

fn parser_entry(
    attrs: &[Attribute],
    sig: &Signature,
    owner: Option<&Ident>
) -> darling::Result<Option<(String, String)>> {
    let parsed = ParserAttrs::from_attributes(attrs)?;
    if !parsed.parser.is_present() {
        return Ok(None);
    }
    let ReturnType::Type(_, ty) = &sig.output else {
        return Err(darling::Error::custom("parser functions must return a value").with_span(sig));
    };

    let name = &sig.ident;
    let call = parsed.call.unwrap_or_else(|| match owner {
        Some(owner) => format!("{owner}::{name}({{0}})"),
        None => format!("{name}({{0}})")
    });
    Ok(Some((type_key(ty), call)))
}
