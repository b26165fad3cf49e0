// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Presence checks for optional slices.
//!
//! An optional member is only built when the row carries enough of its
//! columns:
//!
//! - if its required closure has required primitives, all of them must be
//!   resolved (conjunction);
//! - otherwise any resolved primitive of the closure, or any nested optional
//!   member that would itself be built, is enough (disjunction).
//!
//! ```text
//! Streaming { url: String, quality: Option<u8> }   → columns.col_4__streaming_url != -1
//! Extra { a: Option<u8>, inner: Option<Inner> }     → col_a != -1 || (col_x != -1 && col_y != -1)
//! ```

use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};

use super::COLUMNS;
use crate::collect::SettablesCollected;

/// Boolean presence expression over column index variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// `columns.<var> != -1`.
    Column(String),
    /// Every term holds.
    All(Vec<Presence>),
    /// At least one term holds.
    Any(Vec<Presence>)
}

impl Presence {
    fn all(terms: Vec<Self>) -> Option<Self> {
        Self::group(terms, Self::All)
    }

    fn any(terms: Vec<Self>) -> Option<Self> {
        let mut flat = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Self::Any(inner) => flat.extend(inner),
                other => flat.push(other)
            }
        }
        Self::group(flat, Self::Any)
    }

    fn group(mut terms: Vec<Self>, wrap: fn(Vec<Self>) -> Self) -> Option<Self> {
        match terms.len() {
            0 => None,
            1 => terms.pop(),
            _ => Some(wrap(terms))
        }
    }

    /// Column variables referenced by this check, in order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut pending = vec![self];
        while let Some(term) = pending.pop() {
            match term {
                Self::Column(var) => out.push(var.as_str()),
                Self::All(terms) | Self::Any(terms) => pending.extend(terms.iter().rev())
            }
        }
        out
    }

    fn term_tokens(&self, parenthesize: bool) -> TokenStream {
        if parenthesize {
            let term = self;
            quote!((#term))
        } else {
            self.to_token_stream()
        }
    }
}

impl ToTokens for Presence {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Self::Column(var) => {
                let columns = format_ident!("{}", COLUMNS);
                let var = format_ident!("{}", var);
                tokens.extend(quote!(#columns.#var != -1));
            }
            Self::All(terms) => join(tokens, terms, quote!(&&), |term| matches!(term, Self::Any(_))),
            Self::Any(terms) => join(tokens, terms, quote!(||), |term| matches!(term, Self::All(_)))
        }
    }
}

fn join(
    tokens: &mut TokenStream,
    terms: &[Presence],
    separator: TokenStream,
    parenthesize: fn(&Presence) -> bool
) {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            tokens.extend(separator.clone());
        }
        tokens.extend(term.term_tokens(parenthesize(term)));
    }
}

/// Presence check of the optional slice at `index`.
///
/// `None` for required slices and for optional subtrees without any
/// primitive; those are built unconditionally.
#[must_use]
pub fn presence_check(collected: &SettablesCollected<'_>, index: usize) -> Option<Presence> {
    let slices = collected.slices();
    let slice = &slices[index];
    if slice.is_required {
        return None;
    }

    let closure = slice.required_closure();
    if slice.all_required_simple_count() > 0 {
        let terms = closure
            .flat_map(|s| {
                let member = &slices[s];
                collected
                    .required_of(member)
                    .iter()
                    .map(move |settable| Presence::Column(collected.column_var(member, settable)))
            })
            .collect();
        return Presence::all(terms);
    }

    let mut terms: Vec<Presence> = closure
        .clone()
        .flat_map(|s| {
            let member = &slices[s];
            collected
                .optional_of(member)
                .iter()
                .map(move |settable| Presence::Column(collected.column_var(member, settable)))
        })
        .collect();

    let end = slice.last_recursive_child.unwrap_or(index);
    let first = closure.end() + 1;
    if first <= end {
        for nested in &slices[first..=end] {
            let owned_by_closure = nested.parent.is_some_and(|p| closure.contains(&p));
            if !nested.is_required
                && owned_by_closure
                && let Some(check) = presence_check(collected, nested.index)
            {
                terms.push(check);
            }
        }
    }
    Presence::any(terms)
}

/// Presence checks of every optional slice that has one, in slice order.
#[must_use]
pub fn presence_checks(collected: &SettablesCollected<'_>) -> Vec<(usize, Presence)> {
    collected
        .slices()
        .iter()
        .filter(|slice| !slice.is_required)
        .filter_map(|slice| presence_check(collected, slice.index).map(|check| (slice.index, check)))
        .collect()
}
