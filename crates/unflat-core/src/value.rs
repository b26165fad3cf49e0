// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Value conversion used by generated construction code.
//!
//! # Helpers
//!
//! | Helper | Used for | Unresolved column (`-1`) |
//! |--------|----------|--------------------------|
//! | [`cast_or_default`] | required primitives | `T::default()` |
//! | [`cast`] | optional primitives | `None` |
//! | [`value_at`] | custom parse formats (`{0}`) | [`Value::Null`] |
//!
//! A value that cannot be converted to the target type behaves like `Null`.

use crate::row::{Row, Value};

/// Conversion from a borrowed column value.
///
/// Returns `None` for `Null` and for values of an incompatible kind.
pub trait FromValue: Sized {
    /// Convert `value` into `Self`.
    fn from_value(value: Value<'_>) -> Option<Self>;
}

impl FromValue for bool {
    fn from_value(value: Value<'_>) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            Value::Int(i) => Some(i != 0),
            Value::UInt(u) => Some(u != 0),
            Value::Text(s) => s.parse().ok(),
            _ => None
        }
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),* $(,)?) => {$(
        impl FromValue for $ty {
            fn from_value(value: Value<'_>) -> Option<Self> {
                match value {
                    Value::Int(i) => <$ty>::try_from(i).ok(),
                    Value::UInt(u) => <$ty>::try_from(u).ok(),
                    Value::Bool(b) => Some(<$ty>::from(b)),
                    Value::Text(s) => s.trim().parse().ok(),
                    _ => None
                }
            }
        }
    )*};
}

impl_from_value_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
impl FromValue for f64 {
    fn from_value(value: Value<'_>) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f),
            Value::Int(i) => Some(i as f64),
            Value::UInt(u) => Some(u as f64),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
impl FromValue for f32 {
    fn from_value(value: Value<'_>) -> Option<Self> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl FromValue for char {
    fn from_value(value: Value<'_>) -> Option<Self> {
        let Value::Text(s) = value else {
            return None;
        };
        let mut chars = s.chars();
        let first = chars.next()?;
        chars.next().is_none().then_some(first)
    }
}

impl FromValue for String {
    fn from_value(value: Value<'_>) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.to_owned()),
            _ => None
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value<'_>) -> Option<Self> {
        match value {
            Value::Bytes(b) => Some(b.to_vec()),
            Value::Text(s) => Some(s.as_bytes().to_vec()),
            _ => None
        }
    }
}

#[cfg(feature = "uuid")]
impl FromValue for uuid::Uuid {
    fn from_value(value: Value<'_>) -> Option<Self> {
        match value {
            Value::Text(s) => uuid::Uuid::parse_str(s).ok(),
            Value::Bytes(b) => uuid::Uuid::from_slice(b).ok(),
            _ => None
        }
    }
}

#[cfg(feature = "chrono")]
impl FromValue for chrono::NaiveDateTime {
    fn from_value(value: Value<'_>) -> Option<Self> {
        match value {
            Value::Text(s) => s
                .parse()
                .ok()
                .or_else(|| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok()),
            Value::Int(secs) => chrono::DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc()),
            _ => None
        }
    }
}

#[cfg(feature = "chrono")]
impl FromValue for chrono::NaiveDate {
    fn from_value(value: Value<'_>) -> Option<Self> {
        match value {
            Value::Text(s) => s.parse().ok(),
            _ => None
        }
    }
}

#[cfg(feature = "chrono")]
impl FromValue for chrono::DateTime<chrono::Utc> {
    fn from_value(value: Value<'_>) -> Option<Self> {
        match value {
            Value::Text(s) => s.parse().ok(),
            Value::Int(secs) => chrono::DateTime::from_timestamp(secs, 0),
            _ => None
        }
    }
}

/// Value at a resolved column index, `Null` for `-1`.
pub fn value_at<R: Row + ?Sized>(row: &R, index: isize) -> Value<'_> {
    match usize::try_from(index) {
        Ok(index) => row.value(index),
        Err(_) => Value::Null
    }
}

/// Converted value at `index`, `None` when unresolved, null or incompatible.
pub fn cast<T: FromValue, R: Row + ?Sized>(row: &R, index: isize) -> Option<T> {
    T::from_value(value_at(row, index))
}

/// Converted value at `index`, falling back to `T::default()`.
pub fn cast_or_default<T: FromValue + Default, R: Row + ?Sized>(row: &R, index: isize) -> T {
    cast(row, index).unwrap_or_default()
}
