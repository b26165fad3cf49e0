// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model tree discovery.
//!
//! Walks the struct declarations of one module and builds the
//! [`Model`] tree of a flatten target.
//!
//! # Member Classification
//!
//! | Declared type | Result |
//! |---------------|--------|
//! | `T`, `T` not a module struct | required primitive |
//! | `Option<T>`, `T` not a module struct | optional primitive |
//! | `S` / `Box<S>`, `S` a module struct | required link |
//! | `Option<S>` / `Option<Box<S>>` | optional link |
//! | `Option<S>`, `S` already on the expansion path | set-to-default link, stays `None` |
//! | `S` already on the expansion path | error |
//! | `#[unflat(skip)]` | `Default::default()` |
//!
//! A target's tree is capped at [`MAX_DEPTH`] levels and [`MAX_NODES`]
//! expanded structs.

use std::collections::HashMap;

use darling::FromField;
use syn::{GenericArgument, Ident, ItemStruct, PathArguments, Type};
use unflat_codegen::{Link, Model, Settable};

use super::parse::{MemberAttrs, ParserTable};

/// Deepest accepted chain of nested model types.
pub const MAX_DEPTH: usize = 32;

/// Most structs expanded for one target, repeats included.
pub const MAX_NODES: usize = 1024;

/// Model structs and parsers of one module.
#[derive(Debug)]
pub struct Discovery<'a> {
    structs: HashMap<String, &'a ItemStruct>,
    parsers: &'a ParserTable
}

impl<'a> Discovery<'a> {
    /// Index the model structs among `structs`.
    ///
    /// Only named, non-generic structs take part; everything else is a
    /// primitive when used as a member type.
    pub fn new(structs: impl IntoIterator<Item = &'a ItemStruct>, parsers: &'a ParserTable) -> Self {
        let structs = structs
            .into_iter()
            .filter(|item| {
                matches!(item.fields, syn::Fields::Named(_)) && item.generics.params.is_empty()
            })
            .map(|item| (item.ident.to_string(), item))
            .collect();
        Self { structs, parsers }
    }

    /// Check if `name` is a model struct.
    pub fn is_model(&self, name: &str) -> bool {
        self.structs.contains_key(name)
    }

    /// Model tree rooted at `target`.
    ///
    /// # Errors
    ///
    /// Returns every member attribute error found in the tree. Also fails
    /// when a required member contains its own struct again, when nesting
    /// exceeds [`MAX_DEPTH`] or when the tree grows past [`MAX_NODES`].
    pub fn model(&self, target: &ItemStruct) -> darling::Result<Model> {
        let mut walk = Walk::default();
        self.expand(target, &mut walk)
    }

    fn expand(&self, item: &ItemStruct, walk: &mut Walk) -> darling::Result<Model> {
        if walk.path.len() >= MAX_DEPTH {
            return Err(darling::Error::custom(format!(
                "model nesting is deeper than {MAX_DEPTH} levels"
            ))
            .with_span(&item.ident));
        }
        walk.nodes += 1;
        if walk.exhausted() {
            return Err(darling::Error::custom(format!(
                "model tree expands to more than {MAX_NODES} structs"
            ))
            .with_span(&item.ident));
        }
        walk.path.push(item.ident.to_string());
        let model = self.members(item, walk);
        walk.path.pop();
        model
    }

    fn members(&self, item: &ItemStruct, walk: &mut Walk) -> darling::Result<Model> {
        let owner = &item.ident;
        let mut model = Model::new(syn::parse_quote!(#owner));
        let mut errors = darling::Error::accumulator();

        for field in &item.fields {
            let Some(attrs) = errors.handle(MemberAttrs::from_field(field)) else {
                continue;
            };
            let Some(name) = errors.handle(attrs.name().cloned()) else {
                continue;
            };
            if attrs.skip.is_present() {
                model = model.with_default(name);
                continue;
            }

            let shape = Shape::of(&attrs.ty);
            match shape.model_name().filter(|name| self.is_model(name)) {
                Some(child) => {
                    if errors.handle(attrs.check_complex()).is_none() {
                        continue;
                    }
                    if let Some(link) = errors.handle(self.link(name, &child, &shape, &attrs, walk)) {
                        model = model.with_link(link);
                    }
                    if walk.exhausted() {
                        break;
                    }
                }
                None => {
                    if errors.handle(attrs.check_primitive()).is_none() {
                        continue;
                    }
                    if let Some(settable) = errors.handle(self.settable(owner, name, &shape, &attrs)) {
                        model = model.with_settable(settable);
                    }
                }
            }
        }
        errors.finish_with(model)
    }

    fn link(
        &self,
        name: Ident,
        child: &str,
        shape: &Shape<'_>,
        attrs: &MemberAttrs,
        walk: &mut Walk
    ) -> darling::Result<Link> {
        let required = !shape.optional;
        let mut link = if walk.path.iter().any(|seen| seen == child) {
            if required {
                return Err(darling::Error::custom(format!(
                    "required member `{name}` contains `{child}` again and can never be built; \
                     use `Option<Box<{child}>>`"
                ))
                .with_span(shape.value));
            }
            Link::set_to_default(name, shape.inner.clone(), false)
        } else {
            let Some(item) = self.structs.get(child).copied() else {
                return Err(darling::Error::unknown_value(child).with_span(shape.inner));
            };
            let nested = self.expand(item, walk)?;
            if required {
                Link::required(name, nested)
            } else {
                Link::optional(name, nested)
            }
        };
        if shape.boxed {
            link = link.boxed();
        }
        if let Some(prefix) = &attrs.prefix {
            link = link.with_prefix(prefix.clone());
        }
        Ok(link)
    }

    fn settable(
        &self,
        owner: &Ident,
        name: Ident,
        shape: &Shape<'_>,
        attrs: &MemberAttrs
    ) -> darling::Result<Settable> {
        let ty = shape.value.clone();
        let settable = if shape.optional {
            Settable::optional(name, ty)
        } else {
            Settable::required(name, ty)
        };
        let settable = settable.with_source(attrs.column_source()?);

        let format = attrs
            .parse
            .clone()
            .or_else(|| self.parsers.lookup(owner, shape.value).map(str::to_owned));
        Ok(match format {
            Some(format) => settable.with_parse(format),
            None => settable
        })
    }
}

/// Expansion state of one target.
#[derive(Debug, Default)]
struct Walk {
    /// Struct names from the target down to the current one.
    path:  Vec<String>,
    nodes: usize
}

impl Walk {
    fn exhausted(&self) -> bool {
        self.nodes > MAX_NODES
    }
}

/// A member type with its `Option` and `Box` wrappers peeled off.
#[derive(Debug)]
struct Shape<'t> {
    /// Type without `Option`.
    value:    &'t Type,
    /// Type without `Option` and `Box`.
    inner:    &'t Type,
    optional: bool,
    boxed:    bool
}

impl<'t> Shape<'t> {
    fn of(ty: &'t Type) -> Self {
        let (optional, value) = match unwrap(ty, "Option") {
            Some(inner) => (true, inner),
            None => (false, ty)
        };
        let (boxed, inner) = match unwrap(value, "Box") {
            Some(inner) => (true, inner),
            None => (false, value)
        };
        Self {
            value,
            inner,
            optional,
            boxed
        }
    }

    /// Name of a plain single-segment path type.
    fn model_name(&self) -> Option<String> {
        let Type::Path(path) = self.inner else {
            return None;
        };
        if path.qself.is_some() || path.path.leading_colon.is_some() {
            return None;
        }
        let mut segments = path.path.segments.iter();
        let segment = match (segments.next(), segments.next()) {
            (Some(segment), None) => segment,
            (Some(first), Some(segment)) if first.ident == "self" && segments.next().is_none() => {
                segment
            }
            _ => return None
        };
        if !segment.arguments.is_none() {
            return None;
        }
        Some(segment.ident.to_string())
    }
}

/// Inner type of `wrapper<T>`, matched on the last path segment.
fn unwrap<'t>(ty: &'t Type, wrapper: &str) -> Option<&'t Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match (args.args.len(), args.args.first()) {
        (1, Some(GenericArgument::Type(inner))) => Some(inner),
        _ => None
    }
}
