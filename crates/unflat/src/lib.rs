// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # unflat
//!
//! One crate, all features. Re-exports:
//! - [`model`] attribute macro from `unflat-derive-impl`
//! - All types from `unflat-core` ([`Row`], [`Value`], [`Columns`],
//!   [`Unflat`], [`DataTable`], reading helpers)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use unflat::{DataTable, Datum};
//!
//! let mut table = DataTable::new(["id", "title"]);
//! table.push_row([Datum::from(1_i64), Datum::from("Alien")]);
//!
//! let movies: Vec<db::Movie> = unflat::read_list(table.rows());
//! ```

pub use unflat_core::*;
pub use unflat_derive_impl::model;
