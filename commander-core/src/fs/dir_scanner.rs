//! ``src/fs/dir_scanner.rs``
//!
//! # `Directory Scanner`: Asynchronous Filesystem Listing
//!
//! Reads a directory with `tokio::fs` and returns its entries in display
//! order: directories first, then files, each group sorted by name.
//! Hidden entries are always included; filtering is a view concern.

use crate::error::AppError;
use crate::fs::entry::Entry;
use std::{cmp::Ordering, fs::Metadata, path::Path, time::Instant};
use tokio::fs::{self, DirEntry, ReadDir};
use tracing::{debug, warn};

/// Scans `path` and returns its sorted entries.
///
/// Entries whose metadata cannot be read are skipped with a warning rather
/// than failing the whole listing.
pub async fn scan_dir(path: &Path) -> Result<Vec<Entry>, AppError> {
    let start_time: Instant = Instant::now();

    let mut read_dir: ReadDir = fs::read_dir(path)
        .await
        .map_err(|e| AppError::from_io(path, e))?;

    let mut entries: Vec<Entry> = Vec::new();

    while let Some(dir_entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| AppError::from_io(path, e))?
    {
        match entry_from_dir_entry(&dir_entry).await {
            Ok(entry) => entries.push(entry),

            Err(e) => {
                warn!("Failed to read metadata for {:?}: {}", dir_entry.path(), e);
            }
        }
    }

    sort_entries(&mut entries);

    debug!(
        path = %path.display(),
        count = entries.len(),
        "Directory scan completed in {:?}",
        start_time.elapsed()
    );

    Ok(entries)
}

async fn entry_from_dir_entry(dir_entry: &DirEntry) -> std::io::Result<Entry> {
    // Follow symlinks so a link to a directory can be entered.
    let metadata: Metadata = match fs::metadata(dir_entry.path()).await {
        Ok(m) => m,
        Err(_) => dir_entry.metadata().await?,
    };

    let name: String = dir_entry.file_name().to_string_lossy().into_owned();
    let is_dir: bool = metadata.is_dir();
    let size_bytes: u64 = if is_dir { 0 } else { metadata.len() };

    Ok(Entry::new(name, is_dir, size_bytes))
}

/// Sort entries: directories first, then by name.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a: &Entry, b: &Entry| -> Ordering {
        if a.is_dir && !b.is_dir {
            Ordering::Less
        } else if !a.is_dir && b.is_dir {
            Ordering::Greater
        } else {
            a.name.cmp(&b.name)
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn directories_come_first_and_hidden_entries_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("b.txt"), b"bb").await.unwrap();
        fs::write(root.join("a.txt"), b"a").await.unwrap();
        fs::write(root.join(".hidden"), b"").await.unwrap();
        fs::create_dir(root.join("zdir")).await.unwrap();
        fs::create_dir(root.join(".git")).await.unwrap();

        let entries = scan_dir(root).await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec![".git", "zdir", ".hidden", "a.txt", "b.txt"]);
        assert!(entries[0].is_dir && entries[1].is_dir);
        assert_eq!(entries[4].size_bytes, 2);
    }

    #[tokio::test]
    async fn missing_directory_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = scan_dir(&missing).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(p) if p == missing));
    }
}
