// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Every member attribute and parser functions.

#[unflat::model]
mod db {
    #[derive(Debug)]
    pub struct Grade(pub char);

    #[derive(Debug)]
    #[unflat(target, case(original, pascal), columns = "ScoreIndexes")]
    pub struct Score {
        #[unflat(ordinal = 0)]
        pub rank: i64,
        #[unflat(source = "player", source = "player_name")]
        pub player: String,
        pub featured: bool,
        pub grade: Grade,
        #[unflat(parse = "{0}.is_null()")]
        pub missing_note: bool,
        #[unflat(skip)]
        pub cache: Vec<u8>,
    }

    #[unflat(parser)]
    fn flag(value: unflat::Value<'_>) -> bool {
        matches!(value, unflat::Value::Text("Y"))
    }

    impl Score {
        #[unflat(parser)]
        fn grade(value: unflat::Value<'_>) -> Grade {
            match value {
                unflat::Value::Text(text) => Grade(text.chars().next().unwrap_or('?')),
                _ => Grade('?'),
            }
        }
    }
}

use unflat::Columns;

fn main() {
    let columns = db::ScoreIndexes::unresolved();
    assert_eq!(columns.col_rank, 0);
}
