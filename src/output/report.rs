use crate::output::username_log::UsernameLog;
use crate::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Usernames found by one crawl item, as the discovery tracker expects them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsernameReport {
    pub discovered_usernames: BTreeSet<String>,
    pub username_disabled_map: BTreeMap<String, bool>,
}

impl UsernameReport {
    /// Builds the report from an item directory's logs
    pub fn load(item_dir: &Path) -> Result<Self> {
        let discovered_usernames = UsernameLog::discovered(item_dir)
            .read_all()?
            .into_iter()
            .collect();

        let username_disabled_map = UsernameLog::disabled(item_dir)
            .read_all()?
            .into_iter()
            .map(|name| (name, true))
            .collect();

        Ok(Self {
            discovered_usernames,
            username_disabled_map,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.discovered_usernames.is_empty() && self.username_disabled_map.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
