//! In-memory mirror of the remote device tree.
//!
//! [`entry::Entry`] nodes are shared through [`entry::EntryRef`] handles so
//! that references held by callers survive directory refreshes.

pub mod entry;
pub mod path;

pub use entry::{Entry, EntryRef, EntrySnapshot, EntryType, Metadata};
pub use path::{escaped_path, full_path, listing_command};
