// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generated code can reach the runtime through another path.

mod runtime {
    pub use unflat::*;
}

#[unflat::model(crate = "crate::runtime")]
mod db {
    #[derive(Debug, Default)]
    #[unflat(target, case(snake, camel))]
    pub struct Order {
        pub order_id: i64,
        pub total_cents: Option<u64>,
    }
}

fn main() {
    let orders: Vec<db::Order> = runtime::read_list(runtime::DataTable::new(["orderId"]).rows());
    assert!(orders.is_empty());
}
