// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column index resolution.
//!
//! Every primitive member gets one `isize` variable in the generated
//! `{Target}Columns` struct. Variables start at their fixed ordinal or `-1`
//! and are filled by name while the row schema is scanned.
//!
//! # Resolver
//!
//! Spellings are bucketed by byte length so a column name is only compared
//! against candidates of the same length:
//!
//! ```rust,ignore
//! match name.len() {
//!     2 => {
//!         if self.col_id == -1 && name.eq_ignore_ascii_case("id") {
//!             self.col_id = index;
//!             return;
//!         }
//!         if self.col_1__director_id == -1 && name.eq_ignore_ascii_case("id") {
//!             self.col_1__director_id = index;
//!             return;
//!         }
//!     }
//!     _ => {}
//! }
//! ```
//!
//! A repeated column name (as produced by joins) fills the next member that
//! accepts it, in slice order.

use std::collections::BTreeMap;

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::{Ident, Visibility};

use crate::{collect::SettablesCollected, model::Settable, naming::MatchCase};

/// One column index variable.
#[derive(Debug, Clone)]
pub struct ColumnVar<'m> {
    /// Owning slice.
    pub slice:    usize,
    /// Member the variable belongs to.
    pub settable: &'m Settable,
    /// Variable name, e.g. `col_1__director_name`.
    pub name:     String
}

/// Column variables in slice order, required before optional per slice.
#[must_use]
pub fn column_vars<'m>(collected: &SettablesCollected<'m>) -> Vec<ColumnVar<'m>> {
    let mut vars = Vec::with_capacity(collected.required().len() + collected.optional().len());
    for slice in collected.slices() {
        let owned = collected
            .required_of(slice)
            .iter()
            .chain(collected.optional_of(slice));
        for &settable in owned {
            vars.push(ColumnVar {
                slice: slice.index,
                settable,
                name: collected.column_var(slice, settable)
            });
        }
    }
    vars
}

/// `{Target}Columns` struct definition.
#[must_use]
pub fn emit_columns_struct(
    collected: &SettablesCollected<'_>,
    name: &Ident,
    vis: &Visibility
) -> TokenStream {
    let fields = column_vars(collected).into_iter().map(|var| {
        let slice = &collected.slices()[var.slice];
        let doc = format!("Column of `{}`.", collected.member_path(slice, var.settable));
        let ident = format_ident!("{}", var.name);
        quote! {
            #[doc = #doc]
            pub #ident: isize
        }
    });
    let doc = "Resolved column indexes, `-1` when unresolved. Generated by `unflat`.";
    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #vis struct #name {
            #(#fields),*
        }
    }
}

/// Body of `Columns::unresolved`: fixed ordinals or `-1`.
#[must_use]
pub fn emit_default_indexes(collected: &SettablesCollected<'_>) -> TokenStream {
    let fields = column_vars(collected).into_iter().map(|var| {
        let ident = format_ident!("{}", var.name);
        match var.settable.ordinal() {
            Some(ordinal) => {
                let ordinal = Literal::usize_unsuffixed(ordinal);
                quote!(#ident: #ordinal)
            }
            None => quote!(#ident: -1)
        }
    });
    quote!(Self { #(#fields),* })
}

/// Accepted spellings grouped by byte length, each paired with its column
/// variable, in slice order within a group.
#[must_use]
pub fn spelling_groups(
    collected: &SettablesCollected<'_>,
    policy: MatchCase
) -> BTreeMap<usize, Vec<(String, String)>> {
    let mut groups: BTreeMap<usize, Vec<(String, String)>> = BTreeMap::new();
    for var in column_vars(collected) {
        if var.settable.ordinal().is_some() {
            continue;
        }
        let prefix = collected.source_prefix(&collected.slices()[var.slice]);
        let mut spellings: Vec<String> = Vec::new();
        match var.settable.explicit_names() {
            Some(names) => {
                for name in names {
                    spellings.extend(policy.spellings(&format!("{prefix}{name}"), true));
                }
            }
            None => {
                let name = format!("{prefix}{}", var.settable.name_str());
                spellings.extend(policy.spellings(&name, false));
            }
        }

        let mut seen: Vec<&str> = Vec::with_capacity(spellings.len());
        for spelling in &spellings {
            if seen.contains(&spelling.as_str()) {
                continue;
            }
            seen.push(spelling);
            groups
                .entry(spelling.len())
                .or_default()
                .push((var.name.clone(), spelling.clone()));
        }
    }
    groups
}

/// Body of `Columns::resolve(&mut self, name: &str, index: isize)`.
#[must_use]
pub fn emit_index_resolver(collected: &SettablesCollected<'_>, policy: MatchCase) -> TokenStream {
    let groups = spelling_groups(collected, policy);
    if groups.is_empty() {
        return quote!(let _ = (name, index););
    }

    let arms = groups.into_iter().map(|(len, candidates)| {
        let len = Literal::usize_unsuffixed(len);
        let checks = candidates.into_iter().map(|(var, spelling)| {
            let ident = format_ident!("{}", var);
            let matches = if policy.ignores_case() {
                quote!(name.eq_ignore_ascii_case(#spelling))
            } else {
                quote!(name == #spelling)
            };
            quote! {
                if self.#ident == -1 && #matches {
                    self.#ident = index;
                    return;
                }
            }
        });
        quote! {
            #len => {
                #(#checks)*
            }
        }
    });

    quote! {
        match name.len() {
            #(#arms)*
            _ => {}
        }
    }
}

/// Body of `Columns::missing_required`: dotted paths of unresolved
/// required members of the root closure.
#[must_use]
pub fn emit_missing_required(collected: &SettablesCollected<'_>) -> TokenStream {
    let checks = collected.root().required_closure().flat_map(|s| {
        let slice = &collected.slices()[s];
        collected.required_of(slice).iter().map(move |settable| {
            let ident = format_ident!("{}", collected.column_var(slice, settable));
            let path = collected.member_path(slice, settable);
            quote! {
                if self.#ident == -1 {
                    missing.push(#path);
                }
            }
        })
    });
    quote! {
        #[allow(unused_mut)]
        let mut missing = ::std::vec::Vec::new();
        #(#checks)*
        missing
    }
}
