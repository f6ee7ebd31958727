//! Top-level name policy for the device root.

use std::collections::HashSet;

use crate::config::settings::ListingConfig;

/// Allow-list of names admitted when the root directory is listed.
#[derive(Debug, Clone, Default)]
pub struct RootFilter {
    approved: HashSet<String>,
}

impl RootFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            approved: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &ListingConfig) -> Self {
        Self::new(config.root_allow_list.iter().cloned())
    }

    /// Exact, case-sensitive membership test.
    pub fn admits(&self, name: &str) -> bool {
        self.approved.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_only_listed_names() {
        let filter = RootFilter::new(["system", "sdcard"]);
        assert!(filter.admits("system"));
        assert!(filter.admits("sdcard"));
        assert!(!filter.admits("proc"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let filter = RootFilter::new(["system"]);
        assert!(!filter.admits("System"));
        assert!(!filter.admits("system "));
    }

    #[test]
    fn empty_filter_admits_nothing() {
        assert!(!RootFilter::default().admits("data"));
    }

    #[test]
    fn built_from_config_defaults() {
        let filter = RootFilter::from_config(&ListingConfig::default());
        assert!(filter.admits("storage"));
        assert!(!filter.admits("dev"));
    }
}
