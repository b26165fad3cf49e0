// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model tree: the input of the layout engine.
//!
//! A [`Model`] describes one struct type as seen from a flatten target. It is
//! a tree, not a graph: recursive types are cut by discovery, which turns the
//! re-entering member into a [`LinkTarget::Default`] link.
//!
//! ```text
//! Movie
//! ├── id: i64                    Settable (required)
//! ├── title: Option<String>      Settable (optional)
//! ├── director: Director         Link (required, Expand)
//! │   ├── name: String
//! │   └── agent: Option<Agent>   Link (optional, Expand)
//! └── sequel: Option<Box<Movie>> Link (optional, Default)
//! ```

use syn::{Ident, Path, Type, ext::IdentExt};

/// Where a primitive member reads its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Column spellings to match against row column names.
    ///
    /// Empty means "use the member name".
    Names(Vec<String>),

    /// Fixed column position; never resolved by name.
    Ordinal(usize)
}

impl Default for Source {
    fn default() -> Self {
        Self::Names(Vec::new())
    }
}

/// A primitive member that receives one column value.
#[derive(Debug, Clone)]
pub struct Settable {
    /// Field identifier.
    pub name: Ident,

    /// Value type, without the `Option` wrapper for optional members.
    pub ty: Type,

    /// Required members are always assigned; optional ones only when their
    /// column resolved.
    pub required: bool,

    /// Column source.
    pub source: Source,

    /// Custom parse format, `{0}` value, `{1}` column index, `{2}` row.
    pub parse: Option<String>
}

impl Settable {
    /// Required member reading its own name.
    #[must_use]
    pub fn required(name: Ident, ty: Type) -> Self {
        Self {
            name,
            ty,
            required: true,
            source: Source::default(),
            parse: None
        }
    }

    /// Optional member reading its own name.
    #[must_use]
    pub fn optional(name: Ident, ty: Type) -> Self {
        Self {
            required: false,
            ..Self::required(name, ty)
        }
    }

    /// Replace the column source.
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// Set a custom parse format.
    #[must_use]
    pub fn with_parse(mut self, format: impl Into<String>) -> Self {
        self.parse = Some(format.into());
        self
    }

    /// Field name without the `r#` prefix.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.name.unraw().to_string()
    }

    /// Explicitly configured column names, if any.
    #[must_use]
    pub fn explicit_names(&self) -> Option<&[String]> {
        match &self.source {
            Source::Names(names) if !names.is_empty() => Some(names),
            _ => None
        }
    }

    /// Fixed column ordinal, if any.
    #[must_use]
    pub fn ordinal(&self) -> Option<usize> {
        match self.source {
            Source::Ordinal(ordinal) => Some(ordinal),
            Source::Names(_) => None
        }
    }
}

/// What a complex member expands into.
#[derive(Debug, Clone)]
pub enum LinkTarget {
    /// Expand the member type.
    Expand(Box<Model>),

    /// Stop recursion; the member takes `Default::default()` (required) or
    /// stays `None` (optional).
    Default
}

/// A complex member holding a nested struct.
#[derive(Debug, Clone)]
pub struct Link {
    /// Field identifier.
    pub name: Ident,

    /// Member type without `Option` and `Box` wrappers.
    pub ty: Type,

    /// Required links are built unconditionally with their parent.
    pub required: bool,

    /// The member is `Box<T>` or `Option<Box<T>>`.
    pub boxed: bool,

    /// Column name prefix for every member below this link.
    pub prefix: Option<String>,

    /// Expansion target.
    pub target: LinkTarget
}

impl Link {
    /// Required link expanding `model`.
    #[must_use]
    pub fn required(name: Ident, model: Model) -> Self {
        let path = model.ty.clone();
        Self {
            name,
            ty: Type::Path(syn::TypePath { qself: None, path }),
            required: true,
            boxed: false,
            prefix: None,
            target: LinkTarget::Expand(Box::new(model))
        }
    }

    /// Optional link expanding `model`.
    #[must_use]
    pub fn optional(name: Ident, model: Model) -> Self {
        Self {
            required: false,
            ..Self::required(name, model)
        }
    }

    /// Link that stops recursion.
    #[must_use]
    pub fn set_to_default(name: Ident, ty: Type, required: bool) -> Self {
        Self {
            name,
            ty,
            required,
            boxed: false,
            prefix: None,
            target: LinkTarget::Default
        }
    }

    /// Mark the member as boxed.
    #[must_use]
    pub fn boxed(mut self) -> Self {
        self.boxed = true;
        self
    }

    /// Set the column name prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Field name without the `r#` prefix.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.name.unraw().to_string()
    }

    /// Check if this link stops recursion.
    #[must_use]
    pub fn is_set_to_default(&self) -> bool {
        matches!(self.target, LinkTarget::Default)
    }

    /// Expanded model, `None` for set-to-default links.
    #[must_use]
    pub fn model(&self) -> Option<&Model> {
        match &self.target {
            LinkTarget::Expand(model) => Some(model),
            LinkTarget::Default => None
        }
    }
}

/// One struct type and its members.
#[derive(Debug, Clone)]
pub struct Model {
    /// Struct path used in generated struct literals.
    pub ty: Path,

    /// Primitive members in declaration order.
    pub settables: Vec<Settable>,

    /// Complex members in declaration order.
    pub links: Vec<Link>,

    /// Members initialized with `Default::default()`.
    pub defaults: Vec<Ident>
}

impl Model {
    /// Model without members.
    #[must_use]
    pub fn new(ty: Path) -> Self {
        Self {
            ty,
            settables: Vec::new(),
            links: Vec::new(),
            defaults: Vec::new()
        }
    }

    /// Add a primitive member.
    #[must_use]
    pub fn with_settable(mut self, settable: Settable) -> Self {
        self.settables.push(settable);
        self
    }

    /// Add a complex member.
    #[must_use]
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Add a member initialized with `Default::default()`.
    #[must_use]
    pub fn with_default(mut self, name: Ident) -> Self {
        self.defaults.push(name);
        self
    }
}
