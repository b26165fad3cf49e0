// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model trees shared by unit tests.

use quote::format_ident;
use syn::parse_quote;

use crate::model::{Link, Model, Settable};

pub fn req(name: &str) -> Settable {
    Settable::required(format_ident!("{}", name), parse_quote!(String))
}

pub fn opt(name: &str) -> Settable {
    Settable::optional(format_ident!("{}", name), parse_quote!(String))
}

pub fn model(ty: &str) -> Model {
    let ident = format_ident!("{}", ty);
    Model::new(parse_quote!(#ident))
}

/// ```text
/// Movie { id, title?, director: Director, streaming: Streaming? }
/// Director { name, address: Address, agent: Agent? }
/// Address { city }
/// Agent { name }
/// Streaming { url, quality? }
/// ```
pub fn movie() -> Model {
    let address = model("Address").with_settable(req("city"));
    let agent = model("Agent").with_settable(req("name"));
    let director = model("Director")
        .with_settable(req("name"))
        .with_link(Link::required(format_ident!("address"), address))
        .with_link(Link::optional(format_ident!("agent"), agent));
    let streaming = model("Streaming")
        .with_settable(req("url"))
        .with_settable(opt("quality"));
    model("Movie")
        .with_settable(req("id"))
        .with_settable(opt("title"))
        .with_link(Link::required(format_ident!("director"), director))
        .with_link(Link::optional(format_ident!("streaming"), streaming))
}

/// Optional subtree without required primitives.
///
/// ```text
/// Root { id, extra: Extra? }
/// Extra { a?, inner: Inner? }
/// Inner { x, y }
/// ```
pub fn extra() -> Model {
    let inner = model("Inner").with_settable(req("x")).with_settable(req("y"));
    let extra = model("Extra")
        .with_settable(opt("a"))
        .with_link(Link::optional(format_ident!("inner"), inner));
    model("Root")
        .with_settable(req("id"))
        .with_link(Link::optional(format_ident!("extra"), extra))
}

/// Optional links on two levels of a required chain.
///
/// ```text
/// Root { id, a: A, o: O? }
/// A { a, b: B, x: X? }
/// B { b, y: Y? }
/// X { x }  Y { y }  O { o }
/// ```
pub fn chain() -> Model {
    let b = model("B")
        .with_settable(req("b"))
        .with_link(Link::optional(format_ident!("y"), model("Y").with_settable(req("y"))));
    let a = model("A")
        .with_settable(req("a"))
        .with_link(Link::required(format_ident!("b"), b))
        .with_link(Link::optional(format_ident!("x"), model("X").with_settable(req("x"))));
    model("Root")
        .with_settable(req("id"))
        .with_link(Link::required(format_ident!("a"), a))
        .with_link(Link::optional(format_ident!("o"), model("O").with_settable(req("o"))))
}
