//! Long-format listing line parser.
//!
//! Accepts both the classic toolbox layout
//! (`drwxr-xr-x root shell 0 2023-01-01 00:00 sdcard`) and layouts that
//! carry a numeric link-count column after the permission string.

use std::sync::LazyLock;

use regex::Regex;

/// Groups: permissions, owner, group, size, date, time, name field.
///
/// The link-count column is tried last so that numeric owners are not taken
/// for it. The size is a single token or the `major, minor` pair printed for
/// device nodes, and may be absent for directories; anything that is not a
/// plain integer becomes size `0`.
static LISTING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^([bcdlsp-][-r][-w][-xsS][-r][-w][-xsS][-r][-w][-xstST][.+@]?)",
        r"\s+(?:\d+\s+)??(\S+)\s+(\S+)\s+(?:(\d+,\s*\d+|\S+)\s+)?",
        r"(\d{4}-\d\d-\d\d)\s+(\d\d:\d\d)\s+(.*)$",
    ))
    .expect("listing line pattern is valid")
});

/// Raw fields extracted from one listing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine {
    pub permissions: String,
    pub owner: String,
    pub group: String,
    pub size: u64,
    pub date: String,
    pub time: String,
    /// Entry name, possibly followed by ` -> <target>` for links.
    pub name_field: String,
}

/// Parses a single listing line.
///
/// Returns `None` for anything that is not an entry line: blank lines,
/// `total N` headers, error messages.
pub fn parse_line(line: &str) -> Option<ListingLine> {
    let caps = LISTING_LINE.captures(line)?;
    Some(ListingLine {
        permissions: caps[1].to_string(),
        owner: caps[2].to_string(),
        group: caps[3].to_string(),
        size: caps
            .get(4)
            .and_then(|size| size.as_str().parse().ok())
            .unwrap_or(0),
        date: caps[5].to_string(),
        time: caps[6].to_string(),
        name_field: caps[7].to_string(),
    })
}
