// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Single flat target with required and optional primitives.

#[unflat::model]
mod db {
    #[derive(Debug, Default)]
    #[unflat(target)]
    pub struct Account {
        pub id: i64,
        pub email: String,
        pub nickname: Option<String>,
    }
}

use unflat::Columns;

fn main() {
    let columns = db::AccountColumns::unresolved();
    assert_eq!(columns.col_id, -1);
    assert_eq!(<db::AccountColumns as Columns>::REQUIRED, 2);

    let accounts: Vec<db::Account> = unflat::read_list(unflat::DataTable::new(["id"]).rows());
    assert!(accounts.is_empty());
}
