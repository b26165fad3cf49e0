// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Explicit-stack crawler producing [`SettablesCollected`].
//!
//! # Frames
//!
//! | Visit | Entered for | Phases |
//! |-------|-------------|--------|
//! | `Boundary` | root, optional child | `Required` → `Deferred` → `Optional` |
//! | `Required` | required child | `Required` |
//! | `Deferred` | required slice revisited by its boundary | `Optional` → `Deferred` |
//!
//! A `Required` frame records the optional links of its slice in the
//! deferred list. When the owning boundary reaches its `Deferred` phase it
//! walks its required closure again, in pre-order, with `Deferred` frames
//! that resume those optional links. The entries of a boundary are dropped
//! once the walk is over, so the list is empty when the crawl ends.
//!
//! Finished `Boundary` and `Required` frames fold their counts into the
//! parent slice. A deferred optional child also pushes its totals up the
//! required chain to the boundary, whose count was folded before the child
//! existed.

use super::{Extent, SettablesCollected, Slice};
use crate::model::{Link, Model, Settable};

/// Column prefix of the root slice.
pub(crate) const ROOT_COLUMN: &str = "col";

/// Access path of the root slice.
pub(crate) const ROOT_ACCESS: &str = "parsed";

const COLUMN_SEPARATOR: &str = "__";

/// Build the flat layout of `root`.
///
/// Total over finite trees: recursion must already be cut with
/// set-to-default links.
#[tracing::instrument(level = "debug", skip_all)]
#[must_use]
pub fn collect(root: &Model) -> SettablesCollected<'_> {
    let mut crawler = Crawler::default();
    let root_slice = crawler.open_slice(Some(root), None, None, true);
    let mut stack = vec![Frame::boundary(root_slice, &root.links, 0, None)];

    while let Some(frame) = stack.last_mut() {
        match frame.phase {
            Phase::Required => {
                if let Some(link) = frame.next_link(|link| link.required) {
                    let parent = frame.slice;
                    let mark = crawler.path.push(link);
                    let child = crawler.open_slice(link.model(), Some(link), Some(parent), true);
                    let links = links_of(link);
                    crawler.deferred.push(Deferred {
                        slice: child,
                        links
                    });
                    stack.push(Frame::required(child, links, mark));
                } else if frame.visit == Visit::Boundary {
                    frame.enter_deferred();
                } else if let Some(done) = stack.pop() {
                    crawler.finish(&done);
                }
            }
            Phase::Deferred => {
                let end = frame.slice + crawler.slices[frame.slice].all_required_child_count();
                if frame.cursor <= end {
                    let child = frame.cursor;
                    frame.cursor = child + 1 + crawler.slices[child].all_required_child_count();
                    let position = frame.deferred_from + (child - frame.boundary - 1);
                    let entry = crawler.deferred[position];
                    debug_assert_eq!(entry.slice, child);
                    debug_assert_eq!(crawler.slices[child].parent, Some(frame.slice));

                    let (boundary, deferred_from) = (frame.boundary, frame.deferred_from);
                    let Some(link) = crawler.slices[child].link else {
                        continue;
                    };
                    let mark = crawler.path.push(link);
                    stack.push(Frame::deferred(child, entry.links, boundary, deferred_from, mark));
                } else if frame.visit == Visit::Boundary {
                    crawler.deferred.truncate(frame.deferred_from);
                    frame.phase = Phase::Optional;
                    frame.cursor = 0;
                } else if let Some(done) = stack.pop() {
                    crawler.finish(&done);
                }
            }
            Phase::Optional => {
                if let Some(link) = frame.next_link(|link| !link.required && !link.is_set_to_default())
                {
                    let parent = frame.slice;
                    let mark = crawler.path.push(link);
                    let child = crawler.open_slice(link.model(), Some(link), Some(parent), false);
                    let deferred_from = crawler.deferred.len();
                    stack.push(Frame::boundary(child, links_of(link), deferred_from, Some(mark)));
                } else if frame.visit == Visit::Deferred {
                    frame.enter_deferred();
                } else if let Some(done) = stack.pop() {
                    crawler.finish(&done);
                }
            }
        }
    }

    debug_assert!(crawler.deferred.is_empty(), "deferred entries left after crawl");
    tracing::debug!(
        slices = crawler.slices.len(),
        required = crawler.required.len(),
        optional = crawler.optional.len(),
        "layout collected"
    );

    SettablesCollected {
        slices:          crawler.slices,
        required:        crawler.required,
        optional:        crawler.optional,
        column_prefixes: crawler.column_prefixes,
        access_paths:    crawler.access_paths,
        source_prefixes: crawler.source_prefixes
    }
}

fn links_of(link: &Link) -> &[Link] {
    link.model().map_or(&[][..], |model| model.links.as_slice())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Boundary,
    Required,
    Deferred
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Required,
    Deferred,
    Optional
}

/// Optional links of a required slice, waiting for its boundary.
#[derive(Debug, Clone, Copy)]
struct Deferred<'m> {
    slice: usize,
    links: &'m [Link]
}

#[derive(Debug)]
struct Frame<'m> {
    slice:         usize,
    links:         &'m [Link],
    visit:         Visit,
    phase:         Phase,
    /// Next link position, or next required child slice while deferred.
    cursor:        usize,
    /// Owning boundary slice.
    boundary:      usize,
    /// First deferred entry of the owning boundary.
    deferred_from: usize,
    mark:          Option<Mark>
}

impl<'m> Frame<'m> {
    fn boundary(slice: usize, links: &'m [Link], deferred_from: usize, mark: Option<Mark>) -> Self {
        Self {
            slice,
            links,
            visit: Visit::Boundary,
            phase: Phase::Required,
            cursor: 0,
            boundary: slice,
            deferred_from,
            mark
        }
    }

    fn required(slice: usize, links: &'m [Link], mark: Mark) -> Self {
        Self {
            visit: Visit::Required,
            mark: Some(mark),
            ..Self::boundary(slice, links, 0, None)
        }
    }

    fn deferred(
        slice: usize,
        links: &'m [Link],
        boundary: usize,
        deferred_from: usize,
        mark: Mark
    ) -> Self {
        Self {
            slice,
            links,
            visit: Visit::Deferred,
            phase: Phase::Optional,
            cursor: 0,
            boundary,
            deferred_from,
            mark: Some(mark)
        }
    }

    fn next_link(&mut self, accept: impl Fn(&Link) -> bool) -> Option<&'m Link> {
        let links = self.links;
        let offset = links[self.cursor..].iter().position(accept)?;
        let position = self.cursor + offset;
        self.cursor = position + 1;
        Some(&links[position])
    }

    fn enter_deferred(&mut self) {
        self.phase = Phase::Deferred;
        self.cursor = self.slice + 1;
    }
}

/// Slab lengths to restore on backtrack.
#[derive(Debug, Clone, Copy)]
struct Mark {
    column: usize,
    access: usize,
    source: usize
}

/// Name stacks of the path from the root to the current frame.
#[derive(Debug)]
struct PathStack {
    column: String,
    access: String,
    source: String
}

impl Default for PathStack {
    fn default() -> Self {
        Self {
            column: ROOT_COLUMN.to_owned(),
            access: ROOT_ACCESS.to_owned(),
            source: String::new()
        }
    }
}

impl PathStack {
    fn push(&mut self, link: &Link) -> Mark {
        let mark = Mark {
            column: self.column.len(),
            access: self.access.len(),
            source: self.source.len()
        };
        let name = link.name_str();
        self.column.push_str(COLUMN_SEPARATOR);
        self.column.push_str(&name);
        self.access.push('.');
        self.access.push_str(&name);
        if let Some(prefix) = &link.prefix {
            self.source.push_str(prefix);
        }
        mark
    }

    fn pop(&mut self, mark: Mark) {
        self.column.truncate(mark.column);
        self.access.truncate(mark.access);
        self.source.truncate(mark.source);
    }
}

#[derive(Debug, Default)]
struct Crawler<'m> {
    slices:          Vec<Slice<'m>>,
    required:        Vec<&'m Settable>,
    optional:        Vec<&'m Settable>,
    column_prefixes: String,
    access_paths:    String,
    source_prefixes: String,
    path:            PathStack,
    deferred:        Vec<Deferred<'m>>
}

fn append(slab: &mut String, value: &str) -> Extent {
    let start = slab.len();
    slab.push_str(value);
    Extent {
        start,
        len: value.len()
    }
}

impl<'m> Crawler<'m> {
    fn open_slice(
        &mut self,
        node: Option<&'m Model>,
        link: Option<&'m Link>,
        parent: Option<usize>,
        is_required: bool
    ) -> usize {
        let index = self.slices.len();

        let required_start = self.required.len();
        let optional_start = self.optional.len();
        for settable in node.into_iter().flat_map(|node| &node.settables) {
            if settable.required {
                self.required.push(settable);
            } else {
                self.optional.push(settable);
            }
        }

        let column_prefix = self.column_prefix(index);
        let access_path = append(&mut self.access_paths, &self.path.access);
        let source_prefix = append(&mut self.source_prefixes, &self.path.source);

        if let Some(parent) = parent {
            let owner = &mut self.slices[parent];
            owner.first_child.get_or_insert(index);
            if is_required {
                owner.required_child_count += 1;
                owner.first_required_child.get_or_insert(index);
            } else {
                owner.optional_child_count += 1;
                owner.first_optional_child.get_or_insert(index);
            }
        }

        tracing::trace!(
            index,
            ?parent,
            is_required,
            path = self.path.access.as_str(),
            "slice opened"
        );

        self.slices.push(Slice {
            index,
            node,
            link,
            parent,
            is_required,
            set_to_default: link.is_some_and(Link::is_set_to_default),
            required_simple: Extent {
                start: required_start,
                len:   self.required.len() - required_start
            },
            optional_simple: Extent {
                start: optional_start,
                len:   self.optional.len() - optional_start
            },
            descendant_required_simples: 0,
            descendant_optional_simples: 0,
            required_child_count: 0,
            required_recursive_child_count: 0,
            optional_child_count: 0,
            optional_recursive_child_count: 0,
            first_child: None,
            first_required_child: None,
            first_optional_child: None,
            last_required_recursive_child: None,
            last_recursive_child: None,
            column_prefix,
            access_path,
            source_prefix
        });
        index
    }

    /// `col` for the root, `col_<index>` plus the link path otherwise.
    ///
    /// The slice index keeps variables distinct when link and member names
    /// contain underscores.
    fn column_prefix(&mut self, index: usize) -> Extent {
        let start = self.column_prefixes.len();
        self.column_prefixes.push_str(ROOT_COLUMN);
        if index > 0 {
            self.column_prefixes.push('_');
            self.column_prefixes.push_str(&index.to_string());
            self.column_prefixes
                .push_str(self.path.column.get(ROOT_COLUMN.len()..).unwrap_or_default());
        }
        Extent {
            start,
            len: self.column_prefixes.len() - start
        }
    }

    /// Pop bookkeeping for a finished frame.
    fn finish(&mut self, frame: &Frame<'m>) {
        if let Some(mark) = frame.mark {
            self.path.pop(mark);
        }
        if frame.visit != Visit::Deferred {
            self.fold(frame.slice);
        }
    }

    /// Fold a finished child into its parent.
    fn fold(&mut self, index: usize) {
        let child = &self.slices[index];
        let Some(parent) = child.parent else {
            return;
        };
        let is_required = child.is_required;
        let all_required = child.all_required_simple_count();
        let all_optional = child.all_optional_simple_count();
        let required_children = child.all_required_child_count();
        let optional_children = child.all_optional_child_count();
        let closes_at = child.closes_at();
        let last = child.last_recursive_child.unwrap_or(index);

        let owner = &mut self.slices[parent];
        if is_required {
            owner.descendant_required_simples += all_required;
            owner.descendant_optional_simples += all_optional;
            owner.required_recursive_child_count += required_children;
            owner.last_required_recursive_child = Some(closes_at);
        } else {
            owner.descendant_optional_simples += all_required + all_optional;
        }
        owner.optional_recursive_child_count += optional_children;
        owner.last_recursive_child = owner.last_recursive_child.max(Some(last));

        if is_required || owner.is_boundary() {
            return;
        }

        // deferred child: the required chain up to the boundary was folded
        // before this subtree existed
        let mut ancestor = owner.parent;
        while let Some(a) = ancestor {
            let slice = &mut self.slices[a];
            slice.descendant_optional_simples += all_required + all_optional;
            slice.optional_recursive_child_count += 1 + optional_children;
            slice.last_recursive_child = slice.last_recursive_child.max(Some(last));
            if slice.is_boundary() {
                break;
            }
            ancestor = slice.parent;
        }
    }
}
