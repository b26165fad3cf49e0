// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Reading rows into targets.
//!
//! Every helper resolves the column schema once, from the first row, and
//! reuses the resolved [`Columns`] for the remaining rows.
//!
//! | Helper | Result | Schema check |
//! |--------|--------|--------------|
//! | [`read_list`] | `Vec<T>` | none |
//! | [`read_unbuffered`] | lazy iterator | none |
//! | [`try_read_list`] | `Result<Vec<T>, UnflatError>` | column count, required members |
//! | `read_stream` | `Stream<Item = Result<T, E>>` (`streams` feature) | none |

use std::{any::type_name, fmt};

use crate::{Columns, Unflat, UnflatError, row::Row};

/// Resolve the schema of `row` and check it against the required members
/// of `T`.
///
/// # Errors
///
/// - [`UnflatError::NotEnoughColumns`] when the row has fewer columns than
///   `T` has required members
/// - [`UnflatError::MissingRequired`] when a required member matched no
///   column
pub fn resolve_checked<T: Unflat, R: Row + ?Sized>(row: &R) -> Result<T::Columns, UnflatError> {
    let actual = row.column_count();
    let expected = <T::Columns as Columns>::REQUIRED;
    if actual < expected {
        tracing::warn!(target_type = type_name::<T>(), expected, actual, "not enough columns");
        return Err(UnflatError::NotEnoughColumns { expected, actual });
    }

    let columns = T::Columns::from_row(row);
    let members = columns.missing_required();
    if !members.is_empty() {
        tracing::warn!(target_type = type_name::<T>(), ?members, "required members unresolved");
        return Err(UnflatError::MissingRequired { members });
    }
    Ok(columns)
}

/// Parse every row into `T`.
pub fn read_list<T, I>(rows: I) -> Vec<T>
where
    T: Unflat,
    I: IntoIterator,
    I::Item: Row
{
    read_unbuffered(rows).collect()
}

/// Parse rows lazily, one `T` per row.
pub fn read_unbuffered<T, I>(rows: I) -> Unbuffered<T, I::IntoIter>
where
    T: Unflat,
    I: IntoIterator,
    I::Item: Row
{
    Unbuffered {
        rows:    rows.into_iter(),
        columns: None
    }
}

/// Parse every row into `T`, validating the schema of the first row.
///
/// An empty input yields an empty list without validation.
///
/// # Errors
///
/// See [`resolve_checked`].
pub fn try_read_list<T, I>(rows: I) -> Result<Vec<T>, UnflatError>
where
    T: Unflat,
    I: IntoIterator,
    I::Item: Row
{
    let mut rows = rows.into_iter();
    let Some(first) = rows.next() else {
        return Ok(Vec::new());
    };

    let columns = resolve_checked::<T, _>(&first)?;
    let mut parsed = Vec::with_capacity(rows.size_hint().0 + 1);
    parsed.push(T::parse(&first, &columns));
    parsed.extend(rows.map(|row| T::parse(&row, &columns)));
    tracing::debug!(target_type = type_name::<T>(), count = parsed.len(), "rows parsed");
    Ok(parsed)
}

/// Lazy row parser returned by [`read_unbuffered`].
pub struct Unbuffered<T: Unflat, I> {
    rows:    I,
    columns: Option<T::Columns>
}

impl<T: Unflat, I> fmt::Debug for Unbuffered<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unbuffered")
            .field("target", &type_name::<T>())
            .field("resolved", &self.columns.is_some())
            .finish()
    }
}

impl<T, I> Iterator for Unbuffered<T, I>
where
    T: Unflat,
    I: Iterator,
    I::Item: Row
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let row = self.rows.next()?;
        let columns = self.columns.get_or_insert_with(|| {
            tracing::debug!(
                target_type = type_name::<T>(),
                columns = row.column_count(),
                "resolving column schema"
            );
            T::Columns::from_row(&row)
        });
        Some(T::parse(&row, columns))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// Parse a fallible row stream, one `Result<T, E>` per row.
///
/// Errors of the underlying stream are passed through; the schema is
/// resolved from the first successful row.
#[cfg(feature = "streams")]
#[cfg_attr(docsrs, doc(cfg(feature = "streams")))]
pub fn read_stream<T, R, E, S>(rows: S) -> impl futures::Stream<Item = Result<T, E>>
where
    T: Unflat,
    R: Row,
    S: futures::Stream<Item = Result<R, E>>
{
    use futures::StreamExt;

    rows.scan(None, |columns: &mut Option<T::Columns>, row: Result<R, E>| {
        let parsed = row.map(|row| {
            let columns = columns.get_or_insert_with(|| T::Columns::from_row(&row));
            T::parse(&row, columns)
        });
        futures::future::ready(Some(parsed))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cast, cast_or_default,
        table::{DataTable, Datum}
    };

    #[derive(Debug, PartialEq)]
    struct Tag {
        id:    i64,
        label: Option<String>
    }

    #[derive(Debug, Clone, Copy)]
    struct TagColumns {
        col_id:    isize,
        col_label: isize
    }

    impl Columns for TagColumns {
        const REQUIRED: usize = 1;

        fn unresolved() -> Self {
            Self {
                col_id:    -1,
                col_label: -1
            }
        }

        fn resolve(&mut self, name: &str, index: isize) {
            match name.len() {
                2 if self.col_id == -1 && name.eq_ignore_ascii_case("id") => self.col_id = index,
                5 if self.col_label == -1 && name.eq_ignore_ascii_case("label") => {
                    self.col_label = index;
                }
                _ => {}
            }
        }

        fn missing_required(&self) -> Vec<&'static str> {
            let mut missing = Vec::new();
            if self.col_id == -1 {
                missing.push("id");
            }
            missing
        }
    }

    impl Unflat for Tag {
        type Columns = TagColumns;

        fn parse<R: Row + ?Sized>(row: &R, columns: &TagColumns) -> Self {
            let mut parsed = Self {
                id:    cast_or_default(row, columns.col_id),
                label: None
            };
            if columns.col_label != -1 {
                parsed.label = cast(row, columns.col_label);
            }
            parsed
        }
    }

    fn tags() -> DataTable {
        let mut table = DataTable::new(["LABEL", "Id"]);
        table
            .push_row([Datum::from("red"), Datum::from(1_i64)])
            .push_row([Datum::Null, Datum::from(2_i64)]);
        table
    }

    #[test]
    fn read_list_resolves_once() {
        let parsed: Vec<Tag> = read_list(tags().rows());
        assert_eq!(
            parsed,
            vec![
                Tag {
                    id:    1,
                    label: Some("red".into())
                },
                Tag {
                    id:    2,
                    label: None
                },
            ]
        );
    }

    #[test]
    fn unbuffered_is_lazy() {
        let table = tags();
        let mut iter = read_unbuffered::<Tag, _>(table.rows());
        assert_eq!(iter.size_hint(), (2, Some(2)));
        assert!(format!("{iter:?}").contains("resolved: false"));
        assert_eq!(iter.next().map(|t| t.id), Some(1));
        assert!(format!("{iter:?}").contains("resolved: true"));
        assert_eq!(iter.next().map(|t| t.id), Some(2));
        assert!(iter.next().is_none());
    }

    #[test]
    fn try_read_list_accepts_valid_schema() {
        let parsed = try_read_list::<Tag, _>(tags().rows()).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn try_read_list_reports_missing_member() {
        let mut table = DataTable::new(["label", "other"]);
        table.push_row([Datum::from("x"), Datum::Null]);
        let err = try_read_list::<Tag, _>(table.rows()).unwrap_err();
        assert_eq!(err, UnflatError::MissingRequired { members: vec!["id"] });
    }

    #[test]
    fn try_read_list_reports_column_count() {
        let table = DataTable::new(Vec::<String>::new());
        assert!(try_read_list::<Tag, _>(table.rows()).unwrap().is_empty());

        let mut table = DataTable::new(Vec::<String>::new());
        table.push_row(Vec::<Datum>::new());
        let err = try_read_list::<Tag, _>(table.rows()).unwrap_err();
        assert_eq!(
            err,
            UnflatError::NotEnoughColumns {
                expected: 1,
                actual:   0
            }
        );
    }

    #[cfg(feature = "streams")]
    #[test]
    fn read_stream_passes_errors_through() {
        use futures::{StreamExt, executor::block_on, stream};

        let table = tags();
        let mut rows: Vec<Result<_, &str>> = table.rows().map(Ok).collect();
        rows.insert(1, Err("connection reset"));

        let parsed: Vec<Result<Tag, &str>> =
            block_on(read_stream::<Tag, _, _, _>(stream::iter(rows)).collect());
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].as_ref().map(|t| t.id), Ok(1));
        assert_eq!(parsed[1].as_ref().map(|t| t.id), Err(&"connection reset"));
        assert_eq!(parsed[2].as_ref().map(|t| t.id), Ok(2));
    }
}
