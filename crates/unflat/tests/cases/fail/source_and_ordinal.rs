// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#[unflat::model]
mod db {
    #[derive(Default)]
    #[unflat(target)]
    pub struct Movie {
        #[unflat(source = "movie_id", ordinal = 0)]
        pub id: i64,
    }
}

fn main() {}
