// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Removes `#[unflat(...)]` helper attributes.
//!
//! An attribute macro has no registered helper attributes, so every
//! `#[unflat]` left in the module would fail to resolve.

use syn::{Attribute, ImplItem, Item};

/// Strip helper attributes from structs, fields, enums, functions and
/// inherent methods.
pub fn strip_items(items: &mut [Item]) {
    for item in items {
        match item {
            Item::Struct(item) => {
                retain(&mut item.attrs);
                for field in &mut item.fields {
                    retain(&mut field.attrs);
                }
            }
            Item::Enum(item) => retain(&mut item.attrs),
            Item::Fn(item) => retain(&mut item.attrs),
            Item::Impl(item) => {
                for method in &mut item.items {
                    if let ImplItem::Fn(method) = method {
                        retain(&mut method.attrs);
                    }
                }
            }
            _ => {}
        }
    }
}

fn retain(attrs: &mut Vec<Attribute>) {
    attrs.retain(|attr| !attr.path().is_ident("unflat"));
}

#[cfg(test)]
mod tests {
    use quote::ToTokens;

    use super::*;

    #[test]
    fn removes_only_unflat_attributes() {
        let mut file: syn::File = syn::parse_quote! {
            #[derive(Debug)]
            #[unflat(target)]
            pub struct Movie {
                #[unflat(source = "movie_id")]
                #[doc = "id"]
                pub id: i64,
            }

            #[unflat(parser)]
            #[inline]
            fn flag(value: Value<'_>) -> bool { true }

            impl Movie {
                #[unflat(parser)]
                fn rating(value: Value<'_>) -> Rating { todo!() }
            }
        };
        strip_items(&mut file.items);

        let output = file.to_token_stream().to_string();
        assert!(!output.contains("unflat"));
        assert!(output.contains("derive"));
        assert!(output.contains("inline"));
        assert!(output.contains("doc"));
    }
}
