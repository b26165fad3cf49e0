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

//! Internal proc-macro implementation for `unflat`.
//!
//! Use the `unflat` crate instead; it re-exports [`model`](macro@model)
//! together with the runtime the generated code calls into.
//!
//! # Attribute Quick Reference
//!
//! ## Module-Level `#[unflat::model(...)]`
//!
//! ```rust,ignore
//! #[unflat::model(crate = "::unflat")] // Optional: runtime path (default: ::unflat)
//! mod db { /* ... */ }
//! ```
//!
//! ## Struct-Level `#[unflat(...)]`
//!
//! ```rust,ignore
//! #[unflat(
//!     target,                   // Generate a parser for this struct
//!     case(ignore_case, snake), // Column name matching (default: every flag)
//!     columns = "MovieIndexes"  // Name of the columns struct (default: {Target}Columns)
//! )]
//! pub struct Movie { /* ... */ }
//! ```
//!
//! ## Field-Level Attributes
//!
//! ```rust,ignore
//! pub struct Movie {
//!     #[unflat(source = "movie_id", source = "id")] // Explicit column names
//!     pub id: i64,
//!
//!     #[unflat(ordinal = 2)]                        // Fixed column position
//!     pub rank: i64,
//!
//!     #[unflat(parse = "parse_year({0})")]          // {0} value, {1} index, {2} row
//!     pub year: i32,
//!
//!     #[unflat(prefix = "dir_")]                    // Prefix for nested column names
//!     pub director: Director,
//!
//!     #[unflat(skip)]                               // Default::default()
//!     pub cache: Vec<u8>,
//! }
//! ```
//!
//! ## Parser Functions
//!
//! ```rust,ignore
//! #[unflat(parser)]                         // Used for every member of type `Rating`
//! fn rating(value: unflat::Value<'_>) -> Rating { /* ... */ }
//!
//! impl Director {
//!     #[unflat(parser, call = "Director::age({0}).min(120)")] // Only for Director members
//!     fn age(value: unflat::Value<'_>) -> u8 { /* ... */ }
//! }
//! ```

mod model;

use proc_macro::TokenStream;

/// Generate row parsers for the flatten targets of an inline module.
///
/// # Overview
///
/// Every named struct in the module is a model type. Members whose type is
/// another model type are expanded into nested columns; `Option<T>` members
/// are optional and only built when their columns are present. Everything
/// else is a primitive read from one column through `FromValue`.
///
/// For each struct marked `#[unflat(target)]` the macro appends to the
/// module:
///
/// - **`{Target}Columns`**: one `isize` column index per primitive member
/// - **`impl Columns for {Target}Columns`**: name resolution with case
///   fallback, fixed ordinals, missing required members
/// - **`impl Unflat for {Target}`**: construction of the object graph from a
///   row
///
/// # Recursion
///
/// An optional member whose type is already being expanded on the current
/// path is not expanded again and stays `None`. A required one could never
/// be built and is a compile error.
///
/// # Example
///
/// ```rust,ignore
/// #[unflat::model]
/// mod db {
///     #[unflat(target)]
///     pub struct Movie {
///         pub id: i64,
///         pub title: Option<String>,
///         pub director: Director,
///     }
///
///     pub struct Director {
///         pub name: String,
///     }
/// }
///
/// let movies: Vec<db::Movie> = unflat::read_list(table.rows());
/// ```
///
/// # Errors
///
/// Compile errors for a non-inline module, targets that are not named
/// structs or are generic, conflicting member attributes, parse formats that
/// are not expressions and nesting deeper than 32 levels.
#[proc_macro_attribute]
pub fn model(attr: TokenStream, item: TokenStream) -> TokenStream {
    model::expand(attr.into(), item.into()).into()
}
