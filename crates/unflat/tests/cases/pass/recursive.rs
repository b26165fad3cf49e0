// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Self-referencing and mutually recursive model types.

#[unflat::model]
mod db {
    #[derive(Debug, Default)]
    #[unflat(target)]
    pub struct Employee {
        pub id: i64,
        pub manager: Option<Box<Employee>>,
        pub team: Team,
    }

    #[derive(Debug, Default)]
    pub struct Team {
        pub title: String,
        pub lead: Option<Box<Employee>>,
    }
}

fn main() {
    let employees: Vec<db::Employee> =
        unflat::read_list(unflat::DataTable::new(["id", "title"]).rows());
    assert!(employees.is_empty());
}
