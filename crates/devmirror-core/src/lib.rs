//! devmirror core library — mirrors a remote device's file tree in memory.
//!
//! The device is reached through a shell-command channel that streams
//! `ls -l` output. `devmirror-core` turns that output into a tree of typed
//! [`Entry`] nodes and keeps node identity stable across refreshes, so that
//! callers can hold entry handles while directories are re-listed. It does
//! no I/O of its own.
//!
//! # Modules
//!
//! - [`tree`] — Entry model, path helpers and serializable snapshots.
//! - [`listing`] — Line parsing, type classification, link heuristics, root filtering and reconciliation.
//! - [`config`] — TOML configuration (root allow-list, refresh interval).
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).
//!
//! # Example
//!
//! ```
//! use devmirror_core::{Entry, Reconciler, RootFilter};
//!
//! let root = Entry::new_root();
//! let filter = RootFilter::new(["sdcard", "system"]);
//!
//! let mut reconciler = Reconciler::new(&root, &filter);
//! reconciler.process_lines(&[
//!     "drwxr-xr-x root root 0 2023-01-01 00:00 system",
//!     "dr-xr-xr-x root root 0 2023-01-01 00:00 proc",
//! ]);
//! reconciler.finish().apply();
//!
//! assert!(root.borrow().find_child("system").is_some());
//! assert!(root.borrow().find_child("proc").is_none());
//! ```

pub mod config;
pub mod error;
pub mod listing;
pub mod tree;

pub use config::settings::{Config, ListingConfig};
pub use error::{CoreError, CoreResult};
pub use listing::{
    deliver, parse_line, resolve_link, LineReceiver, ListingLine, ListingOutcome, Reconciler,
    RootFilter,
};
pub use tree::{escaped_path, full_path, listing_command, Entry, EntryRef, EntrySnapshot, EntryType};
