// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[unflat::model]` expansion.
//!
//! # Architecture
//!
//! ```text
//! model.rs (coordinator)
//! ├── parse.rs    - attribute parsing (module, struct, field, parser)
//! ├── discover.rs - struct declarations to Model trees
//! └── strip.rs    - removes helper attributes from the output
//! ```
//!
//! # Pipeline
//!
//! ```text
//! mod db { .. }
//!   │ index structs, parsers and targets
//!   ▼
//! Model tree per target ──► collect ──► verify (debug) ──► expand_target
//!   │
//!   ▼
//! mod db { .. original items .. generated columns structs and impls .. }
//! ```

mod discover;
mod parse;
mod strip;


use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, ImplItem, Item, ItemMod, ItemStruct, Type};

use self::{
    discover::Discovery,
    parse::{ModuleArgs, ParserTable, TargetAttrs}
};

/// Expand `#[unflat::model(attr)]` on `item`.
///
/// Errors are rendered as `compile_error!` invocations.
pub fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    match generate(attr, item) {
        Ok(tokens) => tokens,
        Err(err) => err.write_errors()
    }
}

fn generate(attr: TokenStream, item: TokenStream) -> darling::Result<TokenStream> {
    let args = ModuleArgs::parse(attr)?;
    let mut module: ItemMod = syn::parse2(item)?;
    let Some((_, items)) = &module.content else {
        return Err(darling::Error::custom(
            "#[unflat::model] needs an inline module: `mod name { .. }`"
        )
        .with_span(&module.ident));
    };

    let index = ModuleIndex::build(items)?;
    let discovery = Discovery::new(index.structs.iter().copied(), &index.parsers);

    let mut errors = darling::Error::accumulator();
    let mut generated = Vec::with_capacity(index.targets.len());
    for (item, attrs) in &index.targets {
        if let Some(tokens) = errors.handle(expand_target(&discovery, item, attrs, &args.runtime)) {
            generated.push(tokens);
        }
    }
    errors.finish()?;

    if let Some((_, items)) = &mut module.content {
        strip::strip_items(items);
        items.extend(generated.into_iter().map(Item::Verbatim));
    }
    Ok(quote!(#module))
}

fn expand_target(
    discovery: &Discovery<'_>,
    item: &ItemStruct,
    attrs: &TargetAttrs,
    runtime: &syn::Path
) -> darling::Result<TokenStream> {
    let options = attrs.options(runtime)?;
    let model = discovery.model(item)?;
    let layout = unflat_codegen::collect(&model);

    #[cfg(debug_assertions)]
    layout.verify().map_err(|err| {
        darling::Error::custom(format!("inconsistent column layout: {err}")).with_span(&attrs.ident)
    })?;

    Ok(unflat_codegen::expand_target(&layout, &options)?)
}

/// Structs, parsers and flatten targets declared in one module.
#[derive(Debug)]
struct ModuleIndex<'a> {
    structs: Vec<&'a ItemStruct>,
    parsers: ParserTable,
    targets: Vec<(&'a ItemStruct, TargetAttrs)>
}

impl<'a> ModuleIndex<'a> {
    fn build(items: &'a [Item]) -> darling::Result<Self> {
        let mut errors = darling::Error::accumulator();
        let mut index = Self {
            structs: Vec::new(),
            parsers: ParserTable::default(),
            targets: Vec::new()
        };

        for item in items {
            match item {
                Item::Struct(item) => {
                    index.structs.push(item);
                    if has_unflat_attr(&item.attrs)
                        && let Some(attrs) = errors
                            .handle(TargetAttrs::from_derive_input(&DeriveInput::from(item.clone())))
                        && attrs.is_target()
                    {
                        index.targets.push((item, attrs));
                    }
                }
                Item::Enum(item) if has_unflat_attr(&item.attrs) => {
                    errors.handle(TargetAttrs::from_derive_input(&DeriveInput::from(item.clone())));
                }
                Item::Fn(item) => {
                    errors.handle(index.parsers.add_function(&item.attrs, &item.sig));
                }
                Item::Impl(item) if item.trait_.is_none() => {
                    let Some(owner) = impl_owner(&item.self_ty) else {
                        continue;
                    };
                    for method in &item.items {
                        if let ImplItem::Fn(method) = method {
                            errors.handle(index.parsers.add_method(owner, &method.attrs, &method.sig));
                        }
                    }
                }
                _ => {}
            }
        }
        errors.finish_with(index)
    }
}

fn has_unflat_attr(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident("unflat"))
}

fn impl_owner(ty: &Type) -> Option<&syn::Ident> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.get_ident(),
        _ => None
    }
}
