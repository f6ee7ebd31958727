//! Listing reconciliation engine.
//!
//! Raw `ls -l` output lines are parsed ([`parser`]), classified
//! ([`classify`]), link-resolved ([`symlink`]), filtered at the device root
//! ([`filter`]) and merged into the mirrored tree ([`reconcile`]). Line
//! batches arrive through the [`receiver::LineReceiver`] interface.

pub mod classify;
pub mod filter;
pub mod parser;
pub mod receiver;
pub mod reconcile;
pub mod symlink;

pub use classify::classify;
pub use filter::RootFilter;
pub use parser::{parse_line, ListingLine};
pub use receiver::{deliver, LineReceiver};
pub use reconcile::{ListingOutcome, Reconciler};
pub use symlink::{resolve_link, ResolvedLink, TargetLocation};
