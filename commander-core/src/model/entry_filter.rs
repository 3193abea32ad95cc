//! ``src/model/entry_filter.rs``
//! ============================================================================
//! # `EntryFilter`: Hidden-File Projection
//!
//! A pane stores its cursor in *full* space (an index into every entry,
//! hidden ones included) so the selection survives a hidden-file toggle.
//! Rendering and viewport math work in *visible* space. These functions
//! translate between the two.

use crate::fs::entry::Entry;

/// Whether `entry` is drawn under the given hidden-file policy.
#[inline]
#[must_use]
pub fn is_visible(entry: &Entry, show_hidden: bool) -> bool {
    show_hidden || !entry.is_hidden()
}

/// The visible projection of `entries`, order preserved.
#[must_use]
pub fn visible(entries: &[Entry], show_hidden: bool) -> Vec<&Entry> {
    entries
        .iter()
        .filter(|entry| is_visible(entry, show_hidden))
        .collect()
}

#[must_use]
pub fn visible_count(entries: &[Entry], show_hidden: bool) -> usize {
    if show_hidden {
        return entries.len();
    }
    entries.iter().filter(|entry| !entry.is_hidden()).count()
}

/// Map a full-space cursor to visible space.
///
/// Subtracts the number of filtered entries in `[0, full_cursor]` and clamps
/// the result into `[0, visible_count - 1]`, or `0` when nothing is visible.
#[must_use]
pub fn to_visible_index(entries: &[Entry], show_hidden: bool, full_cursor: usize) -> usize {
    let count: usize = visible_count(entries, show_hidden);
    if count == 0 {
        return 0;
    }

    let last: usize = full_cursor.min(entries.len() - 1);
    let filtered: usize = entries[..=last]
        .iter()
        .filter(|entry| !is_visible(entry, show_hidden))
        .count();

    (last.saturating_sub(filtered)).min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::dir(".git"),
            Entry::dir("src"),
            Entry::file(".env", 1),
            Entry::file(".gitignore", 1),
            Entry::file("a.txt", 1),
            Entry::file("b.txt", 1),
        ]
    }

    #[test]
    fn hidden_entries_are_dropped_when_not_shown() {
        let entries = sample();
        let shown = visible(&entries, false);

        assert!(shown.iter().all(|e| !e.name.starts_with('.')));
        let names: Vec<&str> = shown.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["src", "a.txt", "b.txt"]);
    }

    #[test]
    fn show_hidden_returns_everything_in_order() {
        let entries = sample();
        let shown: Vec<Entry> = visible(&entries, true).into_iter().cloned().collect();
        assert_eq!(shown, entries);
        assert_eq!(visible_count(&entries, true), entries.len());
    }

    #[test]
    fn visible_index_skips_filtered_entries() {
        let entries = sample();

        // ".git" is filtered, "src" is the first visible row
        assert_eq!(to_visible_index(&entries, false, 1), 0);
        // "a.txt" sits behind three hidden entries
        assert_eq!(to_visible_index(&entries, false, 4), 1);
        assert_eq!(to_visible_index(&entries, false, 5), 2);
        // with everything shown the mapping is the identity
        assert_eq!(to_visible_index(&entries, true, 4), 4);
    }

    #[test]
    fn visible_index_is_monotonic_and_in_range() {
        let entries = sample();
        for show_hidden in [false, true] {
            let count = visible_count(&entries, show_hidden);
            let mut previous = 0;
            for cursor in 0..entries.len() + 3 {
                let idx = to_visible_index(&entries, show_hidden, cursor);
                assert!(idx >= previous);
                assert!(idx < count);
                previous = idx;
            }
        }
    }

    #[test]
    fn visible_index_of_empty_or_all_hidden_is_zero() {
        assert_eq!(to_visible_index(&[], false, 0), 0);
        assert_eq!(to_visible_index(&[], false, 7), 0);

        let all_hidden = vec![Entry::dir(".a"), Entry::file(".b", 0)];
        assert_eq!(to_visible_index(&all_hidden, false, 1), 0);
        assert!(visible(&all_hidden, false).is_empty());
    }
}
