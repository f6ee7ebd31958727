//! Link name splitting and local target heuristics.

use crate::tree::entry::EntryType;

const ARROW: &str = " -> ";

/// Where a link target lives relative to the link itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLocation {
    /// Single `..` segment: the parent directory.
    Parent,
    /// Single segment naming a sibling in the same directory.
    SameDirectory,
    /// Absolute or multi-segment path.
    Elsewhere,
    /// The name field carried no parsable target.
    Unknown,
}

/// Result of resolving a link entry's raw name field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub name: String,
    pub entry_type: EntryType,
    pub target: Option<String>,
    pub location: TargetLocation,
    /// Always `"-> "` followed by the raw target, or by nothing.
    pub link_info: String,
}

/// Splits `"name -> target"` and applies the local directory heuristics.
///
/// Without exactly one arrow the whole field is the name and the entry stays
/// a plain [`EntryType::Link`] with no captured target.
pub fn resolve_link(name_field: &str) -> ResolvedLink {
    let segments: Vec<&str> = name_field.split(ARROW).collect();
    let [name, target] = segments.as_slice() else {
        return ResolvedLink {
            name: name_field.to_string(),
            entry_type: EntryType::Link,
            target: None,
            location: TargetLocation::Unknown,
            link_info: "-> ".to_string(),
        };
    };

    let parts: Vec<&str> = target.split('/').collect();
    let (entry_type, location) = match parts.as_slice() {
        [".."] => (EntryType::DirectoryLink, TargetLocation::Parent),
        // Resolving against siblings is left to the finish-links pass.
        [_] => (EntryType::Link, TargetLocation::SameDirectory),
        _ => (EntryType::Link, TargetLocation::Elsewhere),
    };

    ResolvedLink {
        name: name.to_string(),
        entry_type,
        target: Some(target.to_string()),
        location,
        link_info: format!("-> {target}"),
    }
}
