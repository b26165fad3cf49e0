// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rows parsed through generated code.

use unflat::{Columns, DataTable, Datum, Unflat, UnflatError};

#[unflat::model]
mod db {
    #[derive(Debug, Default, PartialEq)]
    #[unflat(target)]
    pub struct Account {
        pub id:         i64,
        pub email:      String,
        pub nickname:   Option<String>,
        #[unflat(source = "created")]
        pub created_at: i64
    }

    #[derive(Debug, Default, PartialEq)]
    #[unflat(target)]
    pub struct Movie {
        pub id:        i64,
        pub title:     Option<String>,
        #[unflat(source = "year", source = "released")]
        pub year:      i32,
        #[unflat(prefix = "dir_")]
        pub director:  Director,
        pub streaming: Option<Streaming>,
        pub sequel:    Option<Box<Movie>>,
        #[unflat(skip)]
        pub cache:     Vec<u8>
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Director {
        pub name:  String,
        pub agent: Option<Agent>
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Agent {
        pub agency: String
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Streaming {
        pub url:     String,
        pub quality: Option<u8>
    }

    #[derive(Debug, Default, PartialEq)]
    #[unflat(target)]
    pub struct Pairing {
        pub id:      i64,
        pub lead:    Person,
        pub partner: Option<Person>
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Person {
        pub id:   i64,
        pub name: String
    }

    #[derive(Debug, Default, PartialEq)]
    #[unflat(target)]
    pub struct Employee {
        pub id:      i64,
        pub manager: Option<Box<Employee>>,
        pub team:    Team
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Team {
        pub title: String,
        pub lead:  Option<Box<Employee>>
    }

    #[derive(Debug, Default, PartialEq)]
    #[unflat(target)]
    pub struct Shipment {
        pub from:      Place,
        pub from_city: City
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Place {
        pub city_code: String
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct City {
        pub code: String
    }

    #[derive(Debug, PartialEq)]
    pub struct Grade(pub char);

    #[derive(Debug, PartialEq)]
    #[unflat(target, case(original, pascal), columns = "ScoreIndexes")]
    pub struct Score {
        #[unflat(ordinal = 0)]
        pub rank:        i64,
        pub player_name: String,
        pub featured:    bool,
        pub grade:       Grade,
        #[unflat(parse = "{0}.is_null()")]
        pub unrated:     bool
    }

    #[derive(Debug, Default, PartialEq)]
    #[unflat(target)]
    pub struct Settings {
        pub extra: Option<Extra>
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Extra {
        pub theme: Option<String>,
        pub font:  Option<String>
    }

    #[unflat(parser)]
    fn flag(value: unflat::Value<'_>) -> bool {
        matches!(value, unflat::Value::Text("Y") | unflat::Value::Bool(true))
    }

    impl Score {
        #[unflat(parser)]
        fn grade(value: unflat::Value<'_>) -> Grade {
            match value {
                unflat::Value::Text(text) => Grade(text.chars().next().unwrap_or('?')),
                _ => Grade('?')
            }
        }
    }
}

use db::{
    Account, Agent, City, Director, Employee, Movie, Pairing, Person, Place, Score, Settings,
    Shipment, Streaming
};

fn movies() -> DataTable {
    let mut table = DataTable::new([
        "id", "title", "released", "dir_name", "dir_agency", "url", "quality"
    ]);
    table.push_row([
        Datum::from(7_i64),
        Datum::from("Alien"),
        Datum::from(1979_i64),
        Datum::from("Scott"),
        Datum::from("CAA"),
        Datum::from("https://stream/alien"),
        Datum::from(4_i64)
    ]);
    table.push_row([
        Datum::from(8_i64),
        Datum::Null,
        Datum::from(1986_i64),
        Datum::from("Cameron"),
        Datum::Null,
        Datum::Null,
        Datum::Null
    ]);
    table
}

#[test]
fn flat_target() {
    let mut table = DataTable::new(["ID", "Email", "created", "nickname"]);
    table.push_row([
        Datum::from(1_i64),
        Datum::from("ann@example.com"),
        Datum::from(100_i64),
        Datum::Null
    ]);
    table.push_row([
        Datum::from(2_i64),
        Datum::from("bob@example.com"),
        Datum::from(200_i64),
        Datum::from("bob")
    ]);

    let accounts: Vec<Account> = unflat::read_list(table.rows());
    assert_eq!(
        accounts,
        vec![
            Account {
                id:         1,
                email:      "ann@example.com".into(),
                nickname:   None,
                created_at: 100
            },
            Account {
                id:         2,
                email:      "bob@example.com".into(),
                nickname:   Some("bob".into()),
                created_at: 200
            }
        ]
    );
}

#[test]
fn nested_and_optional_members() {
    let table = movies();
    let movies: Vec<Movie> = unflat::try_read_list(table.rows()).unwrap();

    assert_eq!(
        movies[0],
        Movie {
            id:        7,
            title:     Some("Alien".into()),
            year:      1979,
            director:  Director {
                name:  "Scott".into(),
                agent: Some(Agent {
                    agency: "CAA".into()
                })
            },
            streaming: Some(Streaming {
                url:     "https://stream/alien".into(),
                quality: Some(4)
            }),
            sequel:    None,
            cache:     Vec::new()
        }
    );

    // columns exist, so the optional shells are built even with null values
    let second = &movies[1];
    assert_eq!(second.title, None);
    assert_eq!(second.director.name, "Cameron");
    assert_eq!(second.director.agent, Some(Agent::default()));
    assert_eq!(
        second.streaming,
        Some(Streaming {
            url:     String::new(),
            quality: None
        })
    );
}

#[test]
fn optional_members_without_columns() {
    let mut table = DataTable::new(["id", "year", "dir_name"]);
    table.push_row([Datum::from(9_i64), Datum::from(2001_i64), Datum::from("Kubrick")]);

    let movies: Vec<Movie> = unflat::try_read_list(table.rows()).unwrap();
    assert_eq!(
        movies,
        vec![Movie {
            id: 9,
            year: 2001,
            director: Director {
                name:  "Kubrick".into(),
                agent: None
            },
            ..Movie::default()
        }]
    );
}

#[test]
fn columns_resolution() {
    assert_eq!(<db::MovieColumns as Columns>::REQUIRED, 3);

    let mut columns = db::MovieColumns::unresolved();
    assert_eq!(columns.col_id, -1);
    assert_eq!(
        columns.missing_required(),
        vec!["id", "year", "director.name"]
    );

    columns.resolve("RELEASED", 4);
    columns.resolve("Dir_Name", 2);
    assert_eq!(columns.col_year, 4);
    assert_eq!(columns.col_1__director_name, 2);
    assert_eq!(columns.missing_required(), vec!["id"]);

    // resolved members keep their first match
    columns.resolve("year", 6);
    assert_eq!(columns.col_year, 4);

    columns.resolve("unknown", 0);
    assert_eq!(columns.col_id, -1);
}

#[test]
fn schema_errors() {
    let mut narrow = DataTable::new(["title"]);
    narrow.push_row([Datum::from("Alien")]);
    assert_eq!(
        unflat::try_read_list::<Movie, _>(narrow.rows()),
        Err(UnflatError::NotEnoughColumns {
            expected: 3,
            actual:   1
        })
    );

    let mut unmatched = DataTable::new(["id", "title", "rating"]);
    unmatched.push_row([Datum::from(1_i64), Datum::from("Alien"), Datum::from(9_i64)]);
    let err = unflat::try_read_list::<Movie, _>(unmatched.rows()).unwrap_err();
    assert!(err.is_missing_required());
    assert_eq!(
        err,
        UnflatError::MissingRequired {
            members: vec!["year", "director.name"]
        }
    );

    let empty = DataTable::new(["title"]);
    assert_eq!(unflat::try_read_list::<Movie, _>(empty.rows()), Ok(Vec::new()));
}

#[test]
fn lenient_reading_defaults_required_members() {
    let mut table = DataTable::new(["title"]);
    table.push_row([Datum::from("Alien")]);

    let movies: Vec<Movie> = unflat::read_list(table.rows());
    assert_eq!(
        movies,
        vec![Movie {
            title: Some("Alien".into()),
            ..Movie::default()
        }]
    );
}

#[test]
fn unbuffered_reading() {
    let table = movies();
    let mut rows = unflat::read_unbuffered::<Movie, _>(table.rows());
    assert_eq!(rows.size_hint(), (2, Some(2)));
    assert_eq!(rows.next().map(|movie| movie.id), Some(7));
    assert_eq!(rows.next().map(|movie| movie.id), Some(8));
    assert!(rows.next().is_none());
}

#[test]
fn join_columns_fill_in_order() {
    let mut table = DataTable::new(["id", "id", "name", "id", "name"]);
    table.push_row([
        Datum::from(1_i64),
        Datum::from(10_i64),
        Datum::from("Fred"),
        Datum::from(11_i64),
        Datum::from("Ginger")
    ]);

    let pairings: Vec<Pairing> = unflat::try_read_list(table.rows()).unwrap();
    assert_eq!(
        pairings,
        vec![Pairing {
            id:      1,
            lead:    Person {
                id:   10,
                name: "Fred".into()
            },
            partner: Some(Person {
                id:   11,
                name: "Ginger".into()
            })
        }]
    );
}

#[test]
fn partial_join_leaves_optional_member_out() {
    let mut table = DataTable::new(["id", "id", "name", "id"]);
    table.push_row([
        Datum::from(1_i64),
        Datum::from(10_i64),
        Datum::from("Fred"),
        Datum::from(11_i64)
    ]);

    let pairings: Vec<Pairing> = unflat::read_list(table.rows());
    assert_eq!(pairings[0].partner, None);
}

#[test]
fn recursive_members_stay_none() {
    let mut table = DataTable::new(["id", "title"]);
    table.push_row([Datum::from(3_i64), Datum::from("Platform")]);

    let employees: Vec<Employee> = unflat::try_read_list(table.rows()).unwrap();
    assert_eq!(
        employees,
        vec![Employee {
            id:      3,
            manager: None,
            team:    db::Team {
                title: "Platform".into(),
                lead:  None
            }
        }]
    );
}

#[test]
fn parsers_ordinals_and_case_policy() {
    let mut table = DataTable::new(["position", "PlayerName", "featured", "grade", "Unrated"]);
    table.push_row([
        Datum::from(1_i64),
        Datum::from("Ann"),
        Datum::from("Y"),
        Datum::from("A"),
        Datum::Null
    ]);
    table.push_row([
        Datum::from(2_i64),
        Datum::from("Bob"),
        Datum::from("N"),
        Datum::from(5_i64),
        Datum::from("x")
    ]);

    let scores: Vec<Score> = unflat::try_read_list(table.rows()).unwrap();
    assert_eq!(
        scores,
        vec![
            Score {
                rank:        1,
                player_name: "Ann".into(),
                featured:    true,
                grade:       db::Grade('A'),
                unrated:     true
            },
            Score {
                rank:        2,
                player_name: "Bob".into(),
                featured:    false,
                grade:       db::Grade('?'),
                unrated:     false
            }
        ]
    );

    let mut columns = db::ScoreIndexes::unresolved();
    assert_eq!(columns.col_rank, 0);
    columns.resolve("PLAYERNAME", 1);
    assert_eq!(columns.col_player_name, -1);
    columns.resolve("player_name", 1);
    assert_eq!(columns.col_player_name, 1);
}

#[test]
fn optional_member_without_required_columns() {
    let mut table = DataTable::new(["font"]);
    table.push_row([Datum::from("mono")]);
    let settings: Vec<Settings> = unflat::read_list(table.rows());
    assert_eq!(
        settings,
        vec![Settings {
            extra: Some(db::Extra {
                theme: None,
                font:  Some("mono".into())
            })
        }]
    );

    let mut table = DataTable::new(["unrelated"]);
    table.push_row([Datum::from("mono")]);
    let settings: Vec<Settings> = unflat::try_read_list(table.rows()).unwrap();
    assert_eq!(settings, vec![Settings { extra: None }]);
}

#[test]
fn parse_uses_resolved_columns() {
    let table = movies();
    let first = table.row(0).unwrap();
    let columns = db::MovieColumns::from_row(&first);
    let movie = Movie::parse(&first, &columns);
    assert_eq!(movie.id, 7);
    assert_eq!(movie.year, 1979);
}

#[test]
fn underscored_paths_fill_their_own_members() {
    let mut table = DataTable::new(["code", "city_code"]);
    table.push_row([Datum::from("LIS"), Datum::from("PT-11")]);

    let shipments: Vec<Shipment> = unflat::try_read_list(table.rows()).unwrap();
    assert_eq!(
        shipments,
        vec![Shipment {
            from:      Place {
                city_code: "PT-11".into()
            },
            from_city: City {
                code: "LIS".into()
            }
        }]
    );

    let mut columns = db::ShipmentColumns::unresolved();
    columns.resolve("city_code", 1);
    assert_eq!(columns.col_1__from_city_code, 1);
    assert_eq!(columns.col_2__from_city_code, -1);
}
