//! Entry type classification from the permission string.

use crate::tree::entry::EntryType;

/// Maps the leading permission character to an [`EntryType`].
///
/// Total: unknown characters and empty strings classify as [`EntryType::Other`].
pub fn classify(permissions: &str) -> EntryType {
    match permissions.chars().next() {
        Some('-') => EntryType::File,
        Some('b') => EntryType::Block,
        Some('c') => EntryType::Character,
        Some('d') => EntryType::Directory,
        Some('l') => EntryType::Link,
        Some('s') => EntryType::Socket,
        Some('p') => EntryType::Fifo,
        _ => EntryType::Other,
    }
}
