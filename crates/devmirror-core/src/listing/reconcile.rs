//! Merges a fresh directory listing into the mirrored tree.
//!
//! A [`Reconciler`] is created per directory refresh. It snapshots the
//! directory's current children, then for every admitted listing line either
//! reuses the sibling with the same name or creates a new entry. Children
//! never matched by the listing are reported as removed by [`ListingOutcome`].

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::classify::classify;
use super::filter::RootFilter;
use super::parser::{parse_line, ListingLine};
use super::receiver::LineReceiver;
use super::symlink::resolve_link;
use crate::tree::entry::{Entry, EntryRef, EntryType, Metadata};

/// State for a single refresh of one directory.
///
/// Must not be shared between concurrent refreshes of the same directory.
pub struct Reconciler<'a> {
    parent: EntryRef,
    listing_root: bool,
    root_filter: &'a RootFilter,
    snapshot: Vec<EntryRef>,
    consumed: Vec<bool>,
    output: Vec<EntryRef>,
    cancel: Option<Arc<AtomicBool>>,
    skipped: usize,
}

impl<'a> Reconciler<'a> {
    /// Starts a refresh of `parent`, capturing its current children.
    ///
    /// `root_filter` is consulted only when `parent` is the tree root.
    pub fn new(parent: &EntryRef, root_filter: &'a RootFilter) -> Self {
        let (listing_root, snapshot) = {
            let parent = parent.borrow();
            (parent.is_root(), parent.children())
        };
        Self {
            parent: Rc::clone(parent),
            listing_root,
            root_filter,
            consumed: vec![false; snapshot.len()],
            snapshot,
            output: Vec::new(),
            cancel: None,
            skipped: 0,
        }
    }

    /// Attaches an externally owned cancellation flag, reported through
    /// [`LineReceiver::is_cancelled`].
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Processes one listing line.
    ///
    /// Returns the reconciled entry, or `None` when the line does not parse,
    /// carries an empty name or one containing `/`, or is rejected by the
    /// root filter.
    pub fn process_line(&mut self, line: &str) -> Option<EntryRef> {
        let Some(parsed) = parse_line(line) else {
            tracing::trace!("skipping unparsable listing line: {line:?}");
            self.skipped += 1;
            return None;
        };
        let ListingLine {
            permissions,
            owner,
            group,
            size,
            date,
            time,
            name_field,
        } = parsed;

        let mut entry_type = classify(&permissions);
        let mut name = name_field;
        let mut link_info = None;
        if entry_type == EntryType::Link {
            let link = resolve_link(&name);
            name = link.name;
            entry_type = link.entry_type;
            link_info = Some(link.link_info);
        }

        if name.is_empty() || name.contains('/') {
            tracing::trace!("skipping listing entry with invalid name {name:?}");
            self.skipped += 1;
            return None;
        }
        if self.listing_root && !self.root_filter.admits(&name) {
            tracing::trace!("root entry {name:?} not in allow-list");
            self.skipped += 1;
            return None;
        }

        let entry = self.match_or_create(&name, entry_type);
        {
            let mut node = entry.borrow_mut();
            node.set_entry_type(entry_type);
            node.update_metadata(Metadata {
                permissions,
                owner,
                group,
                size,
                date,
                time,
                link_info,
            });
        }
        self.output.push(Rc::clone(&entry));
        Some(entry)
    }

    /// Processes a batch of lines in order.
    pub fn process_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        for line in lines {
            self.process_line(line.as_ref());
        }
    }

    /// Returns the previously known child named `name`, consuming its
    /// snapshot slot, or creates a new child of the directory being listed.
    ///
    /// The caller fills in metadata; a created entry starts with defaults.
    pub(crate) fn match_or_create(&mut self, name: &str, entry_type: EntryType) -> EntryRef {
        let slot = self
            .snapshot
            .iter()
            .zip(&self.consumed)
            .position(|(child, consumed)| !consumed && child.borrow().name() == name);

        match slot {
            Some(index) => {
                self.consumed[index] = true;
                Rc::clone(&self.snapshot[index])
            }
            None => Entry::detached_child(&self.parent, name, entry_type),
        }
    }

    /// Entries reconciled so far, in listing order.
    pub fn entries(&self) -> &[EntryRef] {
        &self.output
    }

    /// Hook for resolving same-directory link targets against siblings.
    ///
    /// Intentionally does nothing: links whose target is a sibling keep the
    /// plain link type until a resolution rule is defined.
    fn finish_links(&mut self) {}

    /// Ends the refresh, reporting unmatched previous children as removed.
    pub fn finish(mut self) -> ListingOutcome {
        self.finish_links();

        let removed: Vec<EntryRef> = self
            .snapshot
            .into_iter()
            .zip(self.consumed)
            .filter(|(_, consumed)| !consumed)
            .map(|(child, _)| child)
            .collect();

        tracing::debug!(
            "reconciled {} entries under {:?} ({} removed, {} lines skipped)",
            self.output.len(),
            self.parent.borrow().name(),
            removed.len(),
            self.skipped,
        );

        ListingOutcome {
            parent: self.parent,
            entries: self.output,
            removed,
        }
    }
}

impl LineReceiver for Reconciler<'_> {
    fn consume(&mut self, lines: &[String]) {
        self.process_lines(lines);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Result of a completed refresh.
#[derive(Debug)]
pub struct ListingOutcome {
    parent: EntryRef,
    entries: Vec<EntryRef>,
    removed: Vec<EntryRef>,
}

impl ListingOutcome {
    /// The merged listing, one entry per admitted line.
    pub fn entries(&self) -> &[EntryRef] {
        &self.entries
    }

    /// Previously known children absent from the fresh listing.
    pub fn removed(&self) -> &[EntryRef] {
        &self.removed
    }

    /// Writes the merged listing into the tree.
    ///
    /// The directory's children become [`ListingOutcome::entries`] in listing
    /// order, removed entries lose their parent link, and the directory is
    /// stamped as freshly fetched. Returns the removed entries.
    pub fn apply(self) -> Vec<EntryRef> {
        for child in &self.removed {
            child.borrow_mut().detach();
        }
        let mut parent = self.parent.borrow_mut();
        parent.replace_children(self.entries);
        parent.mark_fetched();
        self.removed
    }
}
