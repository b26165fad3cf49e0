// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#[unflat::model]
mod db {
    #[derive(Default)]
    #[unflat(target)]
    pub struct Movie {
        #[unflat(parse = "parse_id({0}")]
        pub id: i64,
    }
}

fn main() {}
