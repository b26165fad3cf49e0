// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! Layout engine and code emitters behind `#[unflat::model]`.
//!
//! The attribute macro discovers a [`Model`] tree for every flatten target,
//! then hands it to this crate:
//!
//! ```text
//! Model ──collect──▶ SettablesCollected ──emit──▶ TokenStream
//!                      │
//!                      ├── slices (pre-order, required closures contiguous)
//!                      ├── required / optional primitives
//!                      └── column prefix, access path, source prefix slabs
//! ```
//!
//! # Example
//!
//! ```rust
//! use quote::format_ident;
//! use syn::parse_quote;
//! use unflat_codegen::{Link, Model, Settable, TargetOptions, collect, expand_target};
//!
//! let director = Model::new(parse_quote!(Director))
//!     .with_settable(Settable::required(format_ident!("name"), parse_quote!(String)));
//! let movie = Model::new(parse_quote!(Movie))
//!     .with_settable(Settable::required(format_ident!("id"), parse_quote!(i64)))
//!     .with_settable(Settable::optional(format_ident!("title"), parse_quote!(String)))
//!     .with_link(Link::optional(format_ident!("director"), director));
//!
//! let layout = collect(&movie);
//! layout.verify().unwrap();
//! assert_eq!(layout.slices().len(), 2);
//!
//! let tokens = expand_target(&layout, &TargetOptions::new(format_ident!("Movie"))).unwrap();
//! assert!(tokens.to_string().contains("MovieColumns"));
//! ```
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`model`] | Input tree: [`Model`], [`Settable`], [`Link`] |
//! | [`naming`] | Column spelling policy: [`MatchCase`] |
//! | [`collect`] | Flat layout: [`collect()`], [`SettablesCollected`], [`Slice`] |
//! | [`emit`] | Presence checks, construction, schema index |
//! | [`error`] | [`LayoutError`] |

pub mod collect;
pub mod emit;
pub mod error;
pub mod model;
pub mod naming;

#[cfg(test)]
pub(crate) mod fixtures;

pub use self::{
    collect::{Extent, SettablesCollected, Slice, collect},
    emit::{
        ColumnVar, Presence, TargetOptions, column_vars, emit_columns_struct, emit_construction,
        emit_default_indexes, emit_index_resolver, emit_missing_required, expand_format,
        expand_target, presence_check, presence_checks, spelling_groups
    },
    error::LayoutError,
    model::{Link, LinkTarget, Model, Settable, Source},
    naming::MatchCase
};
