// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#[unflat::model]
mod db {
    #[unflat(target)]
    pub enum Kind {
        Movie,
        Show,
    }
}

fn main() {}
