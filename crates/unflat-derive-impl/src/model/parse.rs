// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for `#[unflat::model]`.
//!
//! # Architecture
//!
//! ```text
//! parse.rs (coordinator)
//! ├── case.rs   - case(...) matching flags
//! ├── member.rs - field attributes (source, ordinal, parse, prefix, skip)
//! ├── parser.rs - #[unflat(parser)] functions and their lookup table
//! └── target.rs - struct attributes (target, case, columns)
//! ```

mod case;
mod member;
mod parser;
mod target;

use darling::FromMeta;
pub use case::CaseAttrs;
pub use member::MemberAttrs;
pub use parser::ParserTable;
use proc_macro2::TokenStream;
pub use target::TargetAttrs;

/// Default path of the runtime crate.
fn default_runtime() -> syn::Path {
    syn::parse_quote!(::unflat)
}

/// Module-level arguments of `#[unflat::model(...)]`.
#[derive(Debug, FromMeta)]
pub struct ModuleArgs {
    /// Path of the runtime crate used by generated code.
    #[darling(rename = "crate", default = "default_runtime")]
    pub runtime: syn::Path
}

impl ModuleArgs {
    /// Parse the attribute arguments.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown or malformed arguments.
    pub fn parse(attr: TokenStream) -> darling::Result<Self> {
        let items = darling::ast::NestedMeta::parse_meta_list(attr)?;
        Self::from_list(&items)
    }
}
