// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Code emitters.
//!
//! Each emitter reads a [`SettablesCollected`] and produces tokens for one
//! part of the generated parser.
//!
//! # Architecture
//!
//! ```text
//! emit.rs (coordinator)
//! │
//! ├── presence.rs  → `columns.col_x != -1` checks per optional slice
//! ├── construct.rs → body of `Unflat::parse`
//! └── schema.rs    → `{Target}Columns` struct, defaults, name resolver
//! ```
//!
//! # Generated Code
//!
//! | Item | Source |
//! |------|--------|
//! | `{Target}Columns` | [`emit_columns_struct`] |
//! | `impl Columns for {Target}Columns` | [`emit_default_indexes`], [`emit_index_resolver`], [`emit_missing_required`] |
//! | `impl Unflat for {Target}` | [`emit_construction`] |

mod construct;
mod presence;
mod schema;

use proc_macro2::{Literal, Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Ident, Path, Visibility};

pub use self::{
    construct::emit_construction,
    presence::{Presence, presence_check, presence_checks},
    schema::{
        ColumnVar, column_vars, emit_columns_struct, emit_default_indexes, emit_index_resolver,
        emit_missing_required, spelling_groups
    }
};
use crate::{collect::SettablesCollected, naming::MatchCase};

/// Name of the resolved columns parameter in generated code.
pub(crate) const COLUMNS: &str = "columns";

/// Name of the row parameter in generated code.
pub(crate) const ROW: &str = "row";

/// Everything needed to expand one flatten target.
#[derive(Debug, Clone)]
pub struct TargetOptions {
    /// Target struct identifier.
    pub target: Ident,

    /// Name of the generated columns struct.
    pub columns: Ident,

    /// Visibility of the generated columns struct.
    pub vis: Visibility,

    /// Column name matching policy.
    pub policy: MatchCase,

    /// Path of the runtime crate, `::unflat` by default.
    pub runtime: Path
}

impl TargetOptions {
    /// Options with the default columns name, `pub` visibility, every
    /// matching flag and the `::unflat` runtime.
    #[must_use]
    pub fn new(target: Ident) -> Self {
        let columns = format_ident!("{}Columns", target);
        Self {
            target,
            columns,
            vis: Visibility::Public(syn::token::Pub::default()),
            policy: MatchCase::default(),
            runtime: syn::parse_quote!(::unflat)
        }
    }
}

/// Expand one flatten target: columns struct plus both trait impls.
///
/// # Errors
///
/// Returns an error if a custom parse format does not form an expression.
#[tracing::instrument(level = "debug", skip_all, fields(target = %options.target))]
pub fn expand_target(
    collected: &SettablesCollected<'_>,
    options: &TargetOptions
) -> syn::Result<TokenStream> {
    let TargetOptions {
        target,
        columns: columns_ty,
        vis,
        policy,
        runtime
    } = options;

    let columns_struct = emit_columns_struct(collected, columns_ty, vis);
    let defaults = emit_default_indexes(collected);
    let resolver = emit_index_resolver(collected, *policy);
    let missing = emit_missing_required(collected);
    let required = Literal::usize_unsuffixed(collected.root().all_required_simple_count());
    let construction = emit_construction(collected, runtime)?;
    let row = format_ident!("{}", ROW);
    let columns = format_ident!("{}", COLUMNS);

    tracing::debug!(
        slices = collected.slices().len(),
        columns = collected.required().len() + collected.optional().len(),
        "target expanded"
    );

    Ok(quote! {
        #columns_struct

        impl #runtime::Columns for #columns_ty {
            const REQUIRED: usize = #required;

            fn unresolved() -> Self {
                #defaults
            }

            fn resolve(&mut self, name: &str, index: isize) {
                #resolver
            }

            fn missing_required(&self) -> ::std::vec::Vec<&'static str> {
                #missing
            }
        }

        impl #runtime::Unflat for #target {
            type Columns = #columns_ty;

            #[allow(unused_variables)]
            fn parse<R: #runtime::Row + ?Sized>(#row: &R, #columns: &#columns_ty) -> Self {
                #construction
                parsed
            }
        }
    })
}

/// Substitute `{0}`, `{1}`, ... in a parse format.
///
/// `{{` and `}}` escape braces.
///
/// # Errors
///
/// Returns a message for unbalanced braces or unknown placeholders.
pub fn expand_format(format: &str, args: &[&str]) -> Result<String, String> {
    let mut out = String::with_capacity(format.len() + 16);
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(d) if d.is_ascii_digit() => digits.push(d),
                        _ => return Err(format!("unterminated placeholder in `{format}`"))
                    }
                }
                let arg = digits
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| args.get(n))
                    .ok_or_else(|| format!("unknown placeholder `{{{digits}}}` in `{format}`"))?;
                out.push_str(arg);
            }
            '}' => return Err(format!("unmatched `}}` in `{format}`")),
            c => out.push(c)
        }
    }
    Ok(out)
}

/// Parse a substituted format string into an expression.
pub(crate) fn format_expr(format: &str, args: &[&str]) -> syn::Result<TokenStream> {
    let text = expand_format(format, args).map_err(|msg| syn::Error::new(Span::call_site(), msg))?;
    let expr: syn::Expr = syn::parse_str(&text).map_err(|err| {
        syn::Error::new(
            Span::call_site(),
            format!("parse format `{format}` is not an expression: {err}")
        )
    })?;
    Ok(quote!(#expr))
}
