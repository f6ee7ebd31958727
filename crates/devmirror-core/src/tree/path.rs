//! Remote path construction for mirrored entries.

use super::entry::EntryRef;

/// Characters the remote shell would interpret inside an unquoted argument.
const SHELL_SPECIAL: &[char] = &[
    '\\', '(', ')', '*', '+', '?', '"', '\'', '&', '#', ';', '|', '<', '>', '$', '`', '!', '[',
    ']', '{', '}', '~',
];

/// Collects names from the root down to `entry`, excluding the root itself.
fn segments(entry: &EntryRef) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = Some(EntryRef::clone(entry));
    while let Some(node) = current {
        let node = node.borrow();
        if node.is_root() {
            break;
        }
        names.push(node.name().to_string());
        current = node.parent();
    }
    names.reverse();
    names
}

/// Returns the absolute device path of `entry`. The root is `/`.
pub fn full_path(entry: &EntryRef) -> String {
    format!("/{}", segments(entry).join("/"))
}

/// Returns [`full_path`] with shell-special characters and whitespace in
/// each segment escaped by a backslash.
pub fn escaped_path(entry: &EntryRef) -> String {
    let escaped: Vec<String> = segments(entry)
        .iter()
        .map(|name| escape_segment(name))
        .collect();
    format!("/{}", escaped.join("/"))
}

fn escape_segment(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_whitespace() || SHELL_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Builds the long-listing command whose output feeds a refresh of `entry`.
///
/// The trailing `/` makes a directory link list its target's contents.
pub fn listing_command(entry: &EntryRef) -> String {
    let path = escaped_path(entry);
    if path.ends_with('/') {
        format!("ls -l {path}")
    } else {
        format!("ls -l {path}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::entry::{Entry, EntryType};

    #[test]
    fn root_path_is_slash() {
        let root = Entry::new_root();
        assert_eq!(full_path(&root), "/");
        assert_eq!(listing_command(&root), "ls -l /");
    }

    #[test]
    fn nested_path() {
        let root = Entry::new_root();
        let sdcard = Entry::add_child(&root, "sdcard", EntryType::Directory).unwrap();
        let dcim = Entry::add_child(&sdcard, "DCIM", EntryType::Directory).unwrap();
        assert_eq!(full_path(&dcim), "/sdcard/DCIM");
        assert_eq!(listing_command(&dcim), "ls -l /sdcard/DCIM/");
    }

    #[test]
    fn escapes_spaces_and_quotes() {
        let root = Entry::new_root();
        let sdcard = Entry::add_child(&root, "sdcard", EntryType::Directory).unwrap();
        let odd = Entry::add_child(&sdcard, "My Photos (old)'s", EntryType::Directory).unwrap();

        assert_eq!(full_path(&odd), "/sdcard/My Photos (old)'s");
        assert_eq!(escaped_path(&odd), r"/sdcard/My\ Photos\ \(old\)\'s");
    }
}
