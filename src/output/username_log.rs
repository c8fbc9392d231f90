//! Append-only username logs in the item directory

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Usernames linked from any fetched page
pub const DISCOVERED_LOG: &str = "usernames.txt";

/// Usernames whose profile page says it was disabled by its owner
pub const DISABLED_LOG: &str = "disabled_usernames.txt";

/// A one-name-per-line log file
///
/// The file is opened in append mode for every write and closed afterwards.
/// Each crawl item owns its directory, so there is exactly one writer per file.
#[derive(Debug, Clone)]
pub struct UsernameLog {
    path: PathBuf,
}

impl UsernameLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The discovered-usernames log of an item directory
    pub fn discovered(item_dir: &Path) -> Self {
        Self::new(item_dir.join(DISCOVERED_LOG))
    }

    /// The disabled-usernames log of an item directory
    pub fn disabled(item_dir: &Path) -> Self {
        Self::new(item_dir.join(DISABLED_LOG))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends names, one per line, and returns how many were written
    ///
    /// Nothing is opened when there is nothing to write.
    pub fn append<'a, I>(&self, names: I) -> std::io::Result<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut buffer = String::new();
        let mut count = 0;
        for name in names {
            buffer.push_str(name);
            buffer.push('\n');
            count += 1;
        }

        if count == 0 {
            return Ok(0);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(buffer.as_bytes())?;
        Ok(count)
    }

    /// Reads all logged names, trimmed, skipping blank lines
    ///
    /// A log that was never written reads as empty.
    pub fn read_all(&self) -> std::io::Result<Vec<String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
