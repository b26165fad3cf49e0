// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Nested required and optional complex members, with prefixes.

#[unflat::model]
mod db {
    #[derive(Debug, Default)]
    #[unflat(target)]
    pub struct Movie {
        pub id: i64,
        pub title: Option<String>,
        #[unflat(prefix = "dir_")]
        pub director: Director,
        pub streaming: Option<Streaming>,
    }

    #[derive(Debug, Default)]
    pub struct Director {
        pub name: String,
        pub agent: Option<Agent>,
    }

    #[derive(Debug, Default)]
    pub struct Agent {
        pub agency: String,
    }

    #[derive(Debug, Default)]
    pub struct Streaming {
        pub url: String,
        pub quality: Option<u8>,
    }
}

fn main() {
    let columns = db::MovieColumns {
        col_id: 0,
        col_title: -1,
        col_1__director_name: 1,
        col_2__director__agent_agency: -1,
        col_3__streaming_url: -1,
        col_3__streaming_quality: -1,
    };
    let _ = columns;
}
