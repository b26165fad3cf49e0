// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#[unflat::model]
mod db {
    #[unflat(target)]
    pub struct Employee {
        pub id: i64,
        pub team: Team,
    }

    pub struct Team {
        pub title: String,
        pub lead: Box<Employee>,
    }
}

fn main() {}
