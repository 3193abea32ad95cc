//! ``src/fs/entry.rs``
//! ============================================================================
//! # `Entry`: One Row of a Directory Listing
//!
//! Produced by a `FileSystem` listing and never mutated afterwards. Within
//! its parent listing an entry is identified by name only.

use compact_str::CompactString;
use std::fmt;

/// A single directory entry as reported by the listing collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: CompactString,
    pub is_dir: bool,
    pub size_bytes: u64,
}

impl Entry {
    pub fn new(name: impl Into<CompactString>, is_dir: bool, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            is_dir,
            size_bytes,
        }
    }

    pub fn dir(name: impl Into<CompactString>) -> Self {
        Self::new(name, true, 0)
    }

    pub fn file(name: impl Into<CompactString>, size_bytes: u64) -> Self {
        Self::new(name, false, size_bytes)
    }

    /// Dot-files are hidden unless the pane shows hidden entries.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Human-friendly file size.
    #[must_use]
    pub fn size_human(&self) -> String {
        bytesize::ByteSize::b(self.size_bytes).to_string()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dir {
            write!(f, "{}/", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_means_leading_dot() {
        assert!(Entry::dir(".git").is_hidden());
        assert!(Entry::file(".env", 3).is_hidden());
        assert!(!Entry::file("a.txt", 3).is_hidden());
        assert!(!Entry::file("a.", 3).is_hidden());
    }

    #[test]
    fn display_marks_directories() {
        assert_eq!(Entry::dir("src").to_string(), "src/");
        assert_eq!(Entry::file("main.rs", 10).to_string(), "main.rs");
    }
}
