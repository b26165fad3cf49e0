// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Prelude module for convenient imports.
//!
//! ```rust
//! use unflat_core::prelude::*;
//! ```

#[cfg(feature = "streams")]
pub use crate::read_stream;
pub use crate::{
    Columns, DataTable, Datum, FromValue, Row, Unflat, UnflatError, Value, read_list,
    read_unbuffered, try_read_list
};
