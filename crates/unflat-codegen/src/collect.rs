// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Flat layout of a model tree.
//!
//! [`collect`] linearizes a [`Model`](crate::Model) into an array of
//! [`Slice`]s, one per visited struct instance, in the order the emitters
//! need them.
//!
//! # Ordering
//!
//! ```text
//! Movie                      0  root (required)
//! ├── director: Director     1  required
//! │   ├── address: Address   2  required
//! │   └── agent: Option<..>  3  optional, deferred
//! └── streaming: Option<..>  4  optional
//!     └── ... (its own closure and optionals follow)
//! ```
//!
//! 1. Every slice is followed by its required closure: the descendants
//!    reached through required links only. For slice `i`, the closure is
//!    `[i + 1, i + all_required_child_count]`.
//! 2. Optional children of required slices are *deferred*. They surface once
//!    the enclosing boundary (the root or an optional slice) has closed its
//!    required closure, in closure pre-order.
//! 3. The boundary's own optional children come last.
//!
//! # String slabs
//!
//! Per-slice names are stored in three shared buffers addressed by
//! [`Extent`]s:
//!
//! | Slab | Example | Used for |
//! |------|---------|----------|
//! | column prefix | `col_2__director__address` | column index variables |
//! | access path | `parsed.director.address` | member paths in diagnostics |
//! | source prefix | `dir_addr_` | prepended to column spellings |

mod crawler;

use std::ops::{Range, RangeInclusive};

pub use self::crawler::collect;
pub(crate) use self::crawler::{ROOT_ACCESS, ROOT_COLUMN};
use crate::{
    error::LayoutError,
    model::{Link, Model, Settable}
};

/// A run inside one of the shared arrays or string slabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extent {
    /// First position.
    pub start: usize,
    /// Number of items.
    pub len:   usize
}

impl Extent {
    /// Positions covered by this run.
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// Check if the run is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// One visited struct instance.
#[derive(Debug, Clone)]
pub struct Slice<'m> {
    /// Position in [`SettablesCollected::slices`].
    pub index: usize,

    /// Expanded model, `None` for set-to-default slices.
    pub node: Option<&'m Model>,

    /// Incoming link, `None` for the root.
    pub link: Option<&'m Link>,

    /// Parent slice, `None` for the root.
    pub parent: Option<usize>,

    /// Built unconditionally together with its parent.
    pub is_required: bool,

    /// Takes `Default::default()` instead of being expanded.
    pub set_to_default: bool,

    /// Own required primitives in [`SettablesCollected::required`].
    pub required_simple: Extent,

    /// Own optional primitives in [`SettablesCollected::optional`].
    pub optional_simple: Extent,

    /// Required primitives of the required closure, excluding own.
    pub descendant_required_simples: usize,

    /// Every other primitive below this slice.
    pub descendant_optional_simples: usize,

    /// Direct required children.
    pub required_child_count: usize,

    /// Required closure size minus direct required children.
    pub required_recursive_child_count: usize,

    /// Direct optional children.
    pub optional_child_count: usize,

    /// Optional descendants that are not direct children.
    pub optional_recursive_child_count: usize,

    /// First direct child.
    pub first_child: Option<usize>,

    /// First direct required child.
    pub first_required_child: Option<usize>,

    /// First direct optional child.
    pub first_optional_child: Option<usize>,

    /// Last slice of the required closure.
    pub last_required_recursive_child: Option<usize>,

    /// Last descendant in slice order.
    pub last_recursive_child: Option<usize>,

    /// Column variable prefix.
    pub column_prefix: Extent,

    /// Dotted access path from `parsed`.
    pub access_path: Extent,

    /// Concatenated per-level source name prefixes.
    pub source_prefix: Extent
}

impl Slice<'_> {
    /// Own plus required-closure required primitives.
    #[must_use]
    pub const fn all_required_simple_count(&self) -> usize {
        self.required_simple.len + self.descendant_required_simples
    }

    /// Own optional primitives plus everything outside the required closure.
    #[must_use]
    pub const fn all_optional_simple_count(&self) -> usize {
        self.optional_simple.len + self.descendant_optional_simples
    }

    /// Size of the required closure.
    #[must_use]
    pub const fn all_required_child_count(&self) -> usize {
        self.required_child_count + self.required_recursive_child_count
    }

    /// Optional slices anywhere below this slice.
    #[must_use]
    pub const fn all_optional_child_count(&self) -> usize {
        self.optional_child_count + self.optional_recursive_child_count
    }

    /// This slice followed by its required closure.
    #[must_use]
    pub const fn required_closure(&self) -> RangeInclusive<usize> {
        self.index..=self.index + self.all_required_child_count()
    }

    /// Index of the last slice the required closure ends with.
    #[must_use]
    pub fn closes_at(&self) -> usize {
        self.last_required_recursive_child.unwrap_or(self.index)
    }

    /// Root and optional slices own a construction scope.
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        self.parent.is_none() || !self.is_required
    }

    /// Check if any primitive lives in this subtree.
    #[must_use]
    pub const fn has_members(&self) -> bool {
        self.all_required_simple_count() + self.all_optional_simple_count() > 0
    }
}

/// Layout of one flatten target.
#[derive(Debug, Clone)]
pub struct SettablesCollected<'m> {
    pub(crate) slices:          Vec<Slice<'m>>,
    pub(crate) required:        Vec<&'m Settable>,
    pub(crate) optional:        Vec<&'m Settable>,
    pub(crate) column_prefixes: String,
    pub(crate) access_paths:    String,
    pub(crate) source_prefixes: String
}

impl<'m> SettablesCollected<'m> {
    /// All slices; slice 0 is the root.
    #[must_use]
    pub fn slices(&self) -> &[Slice<'m>] {
        &self.slices
    }

    /// Root slice.
    #[must_use]
    pub fn root(&self) -> &Slice<'m> {
        &self.slices[0]
    }

    /// Required primitives of every slice, grouped by slice.
    #[must_use]
    pub fn required(&self) -> &[&'m Settable] {
        &self.required
    }

    /// Optional primitives of every slice, grouped by slice.
    #[must_use]
    pub fn optional(&self) -> &[&'m Settable] {
        &self.optional
    }

    /// Own required primitives of `slice`.
    #[must_use]
    pub fn required_of(&self, slice: &Slice<'_>) -> &[&'m Settable] {
        &self.required[slice.required_simple.range()]
    }

    /// Own optional primitives of `slice`.
    #[must_use]
    pub fn optional_of(&self, slice: &Slice<'_>) -> &[&'m Settable] {
        &self.optional[slice.optional_simple.range()]
    }

    /// Column variable prefix of `slice`, e.g. `col_1__director`.
    #[must_use]
    pub fn column_prefix(&self, slice: &Slice<'_>) -> &str {
        &self.column_prefixes[slice.column_prefix.range()]
    }

    /// Access path of `slice`, e.g. `parsed.director`.
    #[must_use]
    pub fn access_path(&self, slice: &Slice<'_>) -> &str {
        &self.access_paths[slice.access_path.range()]
    }

    /// Source name prefix of `slice`.
    #[must_use]
    pub fn source_prefix(&self, slice: &Slice<'_>) -> &str {
        &self.source_prefixes[slice.source_prefix.range()]
    }

    /// Column index variable of a primitive owned by `slice`.
    #[must_use]
    pub fn column_var(&self, slice: &Slice<'_>, settable: &Settable) -> String {
        format!("{}_{}", self.column_prefix(slice), settable.name_str())
    }

    /// Dotted member path relative to the root, e.g. `director.name`.
    #[must_use]
    pub fn member_path(&self, slice: &Slice<'_>, settable: &Settable) -> String {
        let path = self.access_path(slice);
        let relative = path
            .strip_prefix(ROOT_ACCESS)
            .unwrap_or(path)
            .trim_start_matches('.');
        if relative.is_empty() {
            settable.name_str()
        } else {
            format!("{relative}.{}", settable.name_str())
        }
    }

    /// Direct children of `index`, in slice order.
    pub fn children(&self, index: usize) -> impl Iterator<Item = &Slice<'m>> + '_ {
        let slice = &self.slices[index];
        let end = slice.last_recursive_child.unwrap_or(index);
        self.slices[index + 1..=end]
            .iter()
            .filter(move |child| child.parent == Some(index))
    }

    /// Check if `ancestor` is `index` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: usize, index: usize) -> bool {
        let mut current = Some(index);
        while let Some(i) = current {
            if i == ancestor {
                return true;
            }
            current = self.slices[i].parent;
        }
        false
    }

    /// Nearest boundary at or above `index`.
    #[must_use]
    pub fn boundary_of(&self, index: usize) -> usize {
        let mut current = index;
        while !self.slices[current].is_boundary() {
            match self.slices[current].parent {
                Some(parent) => current = parent,
                None => break
            }
        }
        current
    }

    /// Check every layout invariant.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn verify(&self) -> Result<(), LayoutError> {
        let root = self.slices.first().ok_or(LayoutError::Root)?;
        if root.parent.is_some() || !root.is_required || root.index != 0 {
            return Err(LayoutError::Root);
        }

        for slice in &self.slices {
            self.verify_required_range(slice)?;
            self.verify_optional_children(slice)?;
            self.verify_default(slice)?;
        }

        let required: usize = self.slices.iter().map(|s| s.required_simple.len).sum();
        if required != self.required.len() {
            return Err(LayoutError::SettableCount {
                kind:     "required",
                expected: self.required.len(),
                found:    required
            });
        }
        let optional: usize = self.slices.iter().map(|s| s.optional_simple.len).sum();
        if optional != self.optional.len() {
            return Err(LayoutError::SettableCount {
                kind:     "optional",
                expected: self.optional.len(),
                found:    optional
            });
        }

        let expected = self.required.len() + self.optional.len();
        let found = root.all_required_simple_count() + root.all_optional_simple_count();
        if expected != found {
            return Err(LayoutError::RootTotals { expected, found });
        }
        Ok(())
    }

    fn verify_required_range(&self, slice: &Slice<'_>) -> Result<(), LayoutError> {
        let mut direct = 0;
        for j in slice.index + 1..=slice.index + slice.all_required_child_count() {
            let Some(member) = self.slices.get(j) else {
                return Err(LayoutError::RequiredRange {
                    slice:     slice.index,
                    offending: j
                });
            };
            let mut current = member;
            loop {
                if !current.is_required {
                    return Err(LayoutError::RequiredRange {
                        slice:     slice.index,
                        offending: j
                    });
                }
                match current.parent {
                    Some(p) if p == slice.index => break,
                    Some(p) if p > slice.index => current = &self.slices[p],
                    _ => {
                        return Err(LayoutError::RequiredRange {
                            slice:     slice.index,
                            offending: j
                        });
                    }
                }
            }
            if member.parent == Some(slice.index) {
                direct += 1;
            }
        }
        if direct != slice.required_child_count {
            return Err(LayoutError::ChildCount {
                slice:    slice.index,
                required: true,
                expected: slice.required_child_count,
                found:    direct
            });
        }
        Ok(())
    }

    fn verify_optional_children(&self, slice: &Slice<'_>) -> Result<(), LayoutError> {
        if let Some(first) = slice.first_optional_child {
            let child = &self.slices[first];
            if child.parent != Some(slice.index) || child.is_required {
                return Err(LayoutError::FirstOptionalChild {
                    slice: slice.index,
                    found: first
                });
            }
        }
        let found = self
            .children(slice.index)
            .filter(|child| !child.is_required)
            .count();
        if found != slice.optional_child_count {
            return Err(LayoutError::ChildCount {
                slice:    slice.index,
                required: false,
                expected: slice.optional_child_count,
                found
            });
        }
        Ok(())
    }

    fn verify_default(&self, slice: &Slice<'_>) -> Result<(), LayoutError> {
        if !slice.set_to_default {
            return Ok(());
        }
        if !slice.is_required {
            return Err(LayoutError::OptionalDefaulted { slice: slice.index });
        }
        let Some(parent) = slice.parent else {
            return Err(LayoutError::Root);
        };
        let owner = &self.slices[parent];
        let inside = matches!(
            (owner.first_required_child, owner.last_required_recursive_child),
            (Some(first), Some(last)) if (first..=last).contains(&slice.index)
        );
        if inside {
            Ok(())
        } else {
            Err(LayoutError::DefaultOutsideParent {
                slice: slice.index,
                parent
            })
        }
    }
}
