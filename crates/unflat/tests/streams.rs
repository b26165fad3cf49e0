// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Streams feature integration tests.
//!
//! Run with: `cargo test --features streams -p unflat --test streams`

#![cfg(feature = "streams")]

use futures::{StreamExt, executor::block_on, stream};
use unflat::{DataTable, Datum};

#[unflat::model]
mod db {
    #[derive(Debug, Default, PartialEq)]
    #[unflat(target)]
    pub struct Order {
        pub id:       i64,
        pub customer: Option<Customer>
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Customer {
        pub name: String
    }
}

fn orders() -> DataTable {
    let mut table = DataTable::new(["id", "name"]);
    table.push_row([Datum::from(1_i64), Datum::from("Ann")]);
    table.push_row([Datum::from(2_i64), Datum::from("Bob")]);
    table
}

#[test]
fn stream_rows_parse_in_order() {
    let table = orders();
    let rows = stream::iter(table.rows().map(Ok::<_, String>));

    let parsed: Vec<Result<db::Order, String>> = block_on(unflat::read_stream(rows).collect());
    let ids: Vec<i64> = parsed.iter().flatten().map(|order| order.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(
        parsed[1].as_ref().map(|order| order.customer.as_ref().map(|c| c.name.as_str())),
        Ok(Some("Bob"))
    );
}

#[test]
fn stream_errors_pass_through() {
    let table = orders();
    let mut rows: Vec<Result<_, &str>> = table.rows().map(Ok).collect();
    rows.insert(0, Err("connection reset"));

    let parsed: Vec<Result<db::Order, &str>> =
        block_on(unflat::read_stream(stream::iter(rows)).collect());
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[0], Err("connection reset"));
    assert_eq!(parsed[1].as_ref().map(|order| order.id), Ok(1));
}
