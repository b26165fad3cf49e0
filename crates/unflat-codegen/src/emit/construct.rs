// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Construction of the target from one row.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! #[allow(unused_mut)]
//! let mut parsed = Movie {
//!     id: ::unflat::cast_or_default(row, columns.col_id),
//!     title: ::core::option::Option::None,
//!     director: Director {
//!         name: ::unflat::cast_or_default(row, columns.col_1__director_name),
//!         agent: ::core::option::Option::None
//!     },
//!     streaming: ::core::option::Option::None
//! };
//! if columns.col_title != -1 {
//!     parsed.title = ::unflat::cast(row, columns.col_title);
//! }
//! if columns.col_2__director__agent_name != -1 {
//!     #[allow(unused_mut)]
//!     let mut parsed_2__director__agent = Agent { .. };
//!     parsed.director.agent = ::core::option::Option::Some(parsed_2__director__agent);
//! }
//! ```
//!
//! The root and every required slice of its closure form one nested struct
//! literal. Each optional slice opens a scope guarded by its presence check,
//! builds its own literal into a local binding and stores it into the parent
//! when the scope closes. Scopes close as soon as the next slice is not a
//! descendant, which keeps them balanced.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Ident, Path};

use super::{COLUMNS, ROW, format_expr, presence::presence_check};
use crate::{
    collect::{SettablesCollected, Slice},
    model::Settable
};

/// Body of `Unflat::parse`, binding the result to `parsed`.
///
/// # Errors
///
/// Returns an error if a custom parse format does not form an expression.
#[tracing::instrument(level = "debug", skip_all)]
pub fn emit_construction(
    collected: &SettablesCollected<'_>,
    runtime: &Path
) -> syn::Result<TokenStream> {
    let builder = Builder {
        collected,
        runtime,
        row: format_ident!("{}", ROW),
        columns: format_ident!("{}", COLUMNS)
    };

    let root = builder.initializer(0)?;
    let mut body = quote! {
        #[allow(unused_mut)]
        let mut parsed = #root;
    };
    body.extend(builder.optional_assignments(0)?);

    let mut scopes: Vec<Scope> = Vec::new();
    for slice in &collected.slices()[1..] {
        while let Some(scope) = scopes.last()
            && !collected.is_ancestor_or_self(scope.slice, slice.index)
        {
            builder.close(&mut scopes, &mut body);
        }

        let current = scopes.last_mut().map_or(&mut body, |scope| &mut scope.body);
        if slice.is_required {
            current.extend(builder.optional_assignments(slice.index)?);
            continue;
        }

        let binding = builder.binding(slice.index);
        let init = builder.initializer(slice.index)?;
        let mut scope_body = quote! {
            #[allow(unused_mut)]
            let mut #binding = #init;
        };
        scope_body.extend(builder.optional_assignments(slice.index)?);
        scopes.push(Scope {
            slice: slice.index,
            body:  scope_body
        });
    }
    while !scopes.is_empty() {
        builder.close(&mut scopes, &mut body);
    }

    Ok(body)
}

/// An open optional scope.
struct Scope {
    slice: usize,
    body:  TokenStream
}

/// A struct literal under construction.
struct Literal {
    slice:  usize,
    fields: Vec<TokenStream>
}

struct Builder<'a, 'm> {
    collected: &'a SettablesCollected<'m>,
    runtime:   &'a Path,
    row:       Ident,
    columns:   Ident
}

impl Builder<'_, '_> {
    fn slice(&self, index: usize) -> &Slice<'_> {
        &self.collected.slices()[index]
    }

    /// Local binding of a boundary slice.
    fn binding(&self, index: usize) -> Ident {
        let prefix = self.collected.column_prefix(self.slice(index));
        let suffix = prefix.get(crate::collect::ROOT_COLUMN.len()..).unwrap_or_default();
        format_ident!("parsed{}", suffix)
    }

    /// Place expression of a slice, relative to its boundary binding.
    fn place(&self, index: usize) -> TokenStream {
        let boundary = self.collected.boundary_of(index);
        let mut names = Vec::new();
        let mut current = index;
        while current != boundary {
            let slice = self.slice(current);
            if let Some(link) = slice.link {
                names.push(&link.name);
            }
            match slice.parent {
                Some(parent) => current = parent,
                None => break
            }
        }
        names.reverse();
        let binding = self.binding(boundary);
        quote!(#binding #(.#names)*)
    }

    /// Struct literal for a slice and its required closure.
    fn initializer(&self, index: usize) -> syn::Result<TokenStream> {
        let mut open: Vec<Literal> = Vec::new();
        for s in self.slice(index).required_closure() {
            let slice = self.slice(s);
            if slice.set_to_default {
                let value = quote!(::core::default::Default::default());
                attach(&mut open, slice, value);
            } else {
                open.push(Literal {
                    slice:  s,
                    fields: self.fields(slice)?
                });
            }

            while let Some(top) = open.last()
                && self.slice(top.slice).closes_at() == s
            {
                let Some(done) = open.pop() else {
                    break;
                };
                let finished = self.slice(done.slice);
                let literal = self.literal(finished, &done.fields);
                if open.is_empty() {
                    return Ok(literal);
                }
                let value = match finished.link {
                    Some(link) if link.boxed => quote!(::std::boxed::Box::new(#literal)),
                    _ => literal
                };
                attach(&mut open, finished, value);
            }
        }
        Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            format!("required closure of slice {index} did not close")
        ))
    }

    fn literal(&self, slice: &Slice<'_>, fields: &[TokenStream]) -> TokenStream {
        match slice.node {
            Some(node) => {
                let ty = &node.ty;
                quote!(#ty { #(#fields),* })
            }
            None => quote!(::core::default::Default::default())
        }
    }

    /// Fields known before the required children are attached.
    fn fields(&self, slice: &Slice<'_>) -> syn::Result<Vec<TokenStream>> {
        let Some(node) = slice.node else {
            return Ok(Vec::new());
        };
        let mut fields = Vec::with_capacity(node.settables.len() + node.links.len());
        for settable in self.collected.required_of(slice) {
            let name = &settable.name;
            let value = self.value(slice, settable)?;
            fields.push(quote!(#name: #value));
        }
        for settable in self.collected.optional_of(slice) {
            let name = &settable.name;
            fields.push(quote!(#name: ::core::option::Option::None));
        }
        for link in node.links.iter().filter(|link| !link.required) {
            let name = &link.name;
            fields.push(quote!(#name: ::core::option::Option::None));
        }
        for name in &node.defaults {
            fields.push(quote!(#name: ::core::default::Default::default()));
        }
        Ok(fields)
    }

    /// Value expression of a primitive: `T` when required, `Option<T>` when
    /// optional.
    fn value(&self, slice: &Slice<'_>, settable: &Settable) -> syn::Result<TokenStream> {
        let runtime = self.runtime;
        let (row, columns) = (&self.row, &self.columns);
        let var = format_ident!("{}", self.collected.column_var(slice, settable));
        let index = quote!(#columns.#var);

        let Some(format) = &settable.parse else {
            return Ok(if settable.required {
                quote!(#runtime::cast_or_default(#row, #index))
            } else {
                quote!(#runtime::cast(#row, #index))
            });
        };

        let value = quote!(#runtime::value_at(#row, #index)).to_string();
        let index_text = index.to_string();
        let row_text = row.to_string();
        let parsed = format_expr(format, &[&value, &index_text, &row_text])?;
        Ok(if settable.required {
            parsed
        } else {
            quote!(::core::option::Option::Some(#parsed))
        })
    }

    /// Guarded assignments of a slice's own optional primitives.
    fn optional_assignments(&self, index: usize) -> syn::Result<TokenStream> {
        let slice = self.slice(index);
        let optional = self.collected.optional_of(slice);
        if optional.is_empty() {
            return Ok(TokenStream::new());
        }

        let place = self.place(index);
        let columns = &self.columns;
        let mut out = TokenStream::new();
        for settable in optional {
            let name = &settable.name;
            let var = format_ident!("{}", self.collected.column_var(slice, settable));
            let value = self.value(slice, settable)?;
            out.extend(quote! {
                if #columns.#var != -1 {
                    #place.#name = #value;
                }
            });
        }
        Ok(out)
    }

    /// Close the innermost scope and append it to the enclosing body.
    fn close(&self, scopes: &mut Vec<Scope>, root: &mut TokenStream) {
        let Some(scope) = scopes.pop() else {
            return;
        };
        let slice = self.slice(scope.slice);
        let Some(link) = slice.link else {
            return;
        };
        let Some(parent) = slice.parent else {
            return;
        };

        let target = self.place(parent);
        let field = &link.name;
        let binding = self.binding(scope.slice);
        let value = if link.boxed {
            quote!(::std::boxed::Box::new(#binding))
        } else {
            quote!(#binding)
        };
        let body = scope.body;
        let block = quote! {
            #body
            #target.#field = ::core::option::Option::Some(#value);
        };
        let tokens = match presence_check(self.collected, scope.slice) {
            Some(check) => quote!(if #check { #block }),
            None => quote!({ #block })
        };

        match scopes.last_mut() {
            Some(outer) => outer.body.extend(tokens),
            None => root.extend(tokens)
        }
    }
}

/// Attach a finished child value to the literal on top of `open`.
fn attach(open: &mut [Literal], child: &Slice<'_>, value: TokenStream) {
    let (Some(top), Some(link)) = (open.last_mut(), child.link) else {
        return;
    };
    let name = &link.name;
    top.fields.push(quote!(#name: #value));
}
