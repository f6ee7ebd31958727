//! Mirrored tree node representation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Shared handle to a node of the mirrored tree.
///
/// Reconciliation preserves node identity across refreshes, so callers may
/// hold on to an `EntryRef` and compare handles with [`Rc::ptr_eq`].
pub type EntryRef = Rc<RefCell<Entry>>;

/// Kind of filesystem object, derived from the listing permission string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    File,
    Directory,
    /// A symbolic link known to point at a directory.
    DirectoryLink,
    Link,
    Block,
    Character,
    Socket,
    Fifo,
    Other,
}

/// Metadata fields overwritten on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub permissions: String,
    pub owner: String,
    pub group: String,
    pub size: u64,
    pub date: String,
    pub time: String,
    pub link_info: Option<String>,
}

/// A single node in the mirrored device tree.
///
/// Children are owned through [`EntryRef`] handles; the parent is a weak
/// back-reference used only for navigation.
#[derive(Debug)]
pub struct Entry {
    name: String,
    entry_type: EntryType,
    metadata: Metadata,
    children: Vec<EntryRef>,
    is_root: bool,
    parent: Weak<RefCell<Entry>>,
    fetched_at: Option<Instant>,
}

impl Entry {
    /// Creates the single top-level entry of a mirrored tree.
    pub fn new_root() -> EntryRef {
        Rc::new(RefCell::new(Self {
            name: String::new(),
            entry_type: EntryType::Directory,
            metadata: Metadata::default(),
            children: Vec::new(),
            is_root: true,
            parent: Weak::new(),
            fetched_at: None,
        }))
    }

    /// Creates a non-root entry whose parent link points at `parent`.
    ///
    /// The entry is not inserted into the parent's children; reconciliation
    /// does that when its outcome is applied.
    pub(crate) fn detached_child(parent: &EntryRef, name: &str, entry_type: EntryType) -> EntryRef {
        Rc::new(RefCell::new(Self {
            name: name.to_string(),
            entry_type,
            metadata: Metadata::default(),
            children: Vec::new(),
            is_root: false,
            parent: Rc::downgrade(parent),
            fetched_at: None,
        }))
    }

    /// Creates a child of `parent` and appends it to the parent's children.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidName`] if `name` is empty, contains `/`,
    /// or is already used by a sibling.
    pub fn add_child(parent: &EntryRef, name: &str, entry_type: EntryType) -> CoreResult<EntryRef> {
        if name.is_empty() || name.contains('/') {
            return Err(CoreError::InvalidName(name.to_string()));
        }
        if parent.borrow().find_child(name).is_some() {
            return Err(CoreError::InvalidName(name.to_string()));
        }
        let child = Self::detached_child(parent, name, entry_type);
        parent.borrow_mut().children.push(Rc::clone(&child));
        Ok(child)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn permissions(&self) -> &str {
        &self.metadata.permissions
    }

    pub fn owner(&self) -> &str {
        &self.metadata.owner
    }

    pub fn group(&self) -> &str {
        &self.metadata.group
    }

    /// Size in bytes as reported by the listing; `0` when unparsable.
    pub fn size(&self) -> u64 {
        self.metadata.size
    }

    pub fn date(&self) -> &str {
        &self.metadata.date
    }

    pub fn time(&self) -> &str {
        &self.metadata.time
    }

    /// Returns `"-> <target>"` for [`EntryType::Link`] entries, `None` otherwise.
    pub fn link_info(&self) -> Option<&str> {
        self.metadata.link_info.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Returns `true` for directories and links known to point at one.
    pub fn is_directory_like(&self) -> bool {
        matches!(
            self.entry_type,
            EntryType::Directory | EntryType::DirectoryLink
        )
    }

    /// Returns the owning entry, if it is still alive.
    pub fn parent(&self) -> Option<EntryRef> {
        self.parent.upgrade()
    }

    /// Returns a snapshot of the current child handles, in listing order.
    pub fn children(&self) -> Vec<EntryRef> {
        self.children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Finds a direct child by exact, case-sensitive name.
    pub fn find_child(&self, name: &str) -> Option<EntryRef> {
        self.children
            .iter()
            .find(|child| child.borrow().name == name)
            .cloned()
    }

    /// Returns `true` if this entry was never listed or its last listing is
    /// older than `interval`.
    pub fn needs_fetch(&self, interval: Duration) -> bool {
        match self.fetched_at {
            Some(at) => at.elapsed() >= interval,
            None => true,
        }
    }

    pub(crate) fn set_entry_type(&mut self, entry_type: EntryType) {
        self.entry_type = entry_type;
    }

    /// Overwrites every metadata field. Link info is kept only on plain links.
    pub(crate) fn update_metadata(&mut self, mut metadata: Metadata) {
        if self.entry_type != EntryType::Link {
            metadata.link_info = None;
        }
        self.metadata = metadata;
    }

    pub(crate) fn replace_children(&mut self, children: Vec<EntryRef>) {
        self.children = children;
    }

    pub(crate) fn detach(&mut self) {
        self.parent = Weak::new();
    }

    pub(crate) fn mark_fetched(&mut self) {
        self.fetched_at = Some(Instant::now());
    }
}

/// Owned, serializable copy of a mirrored subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub name: String,
    pub entry_type: EntryType,
    pub permissions: String,
    pub owner: String,
    pub group: String,
    pub size: u64,
    pub date: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_info: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EntrySnapshot>,
}

impl EntrySnapshot {
    /// Copies `entry` and all of its descendants.
    pub fn capture(entry: &EntryRef) -> Self {
        let entry = entry.borrow();
        Self {
            name: entry.name.clone(),
            entry_type: entry.entry_type,
            permissions: entry.metadata.permissions.clone(),
            owner: entry.metadata.owner.clone(),
            group: entry.metadata.group.clone(),
            size: entry.metadata.size,
            date: entry.metadata.date.clone(),
            time: entry.metadata.time.clone(),
            link_info: entry.metadata.link_info.clone(),
            children: entry.children.iter().map(Self::capture).collect(),
        }
    }
}
