//! ``src/model/viewport.rs``
//!
//! # `ViewportTracker`: Scroll Offset and Scrollbar Thumb
//!
//! Minimal-motion scrolling: the window moves only as far as needed to keep
//! the cursor on screen and never re-centres. All indices are visible-space.

/// Recompute the first drawn row so `cursor_visible` is inside the window.
///
/// The result is always within `[0, max(0, visible_count - viewport_height)]`.
#[must_use]
pub const fn reclamp(
    offset: usize,
    cursor_visible: usize,
    visible_count: usize,
    viewport_height: usize,
) -> usize {
    if viewport_height == 0 {
        return 0;
    }

    let mut offset: usize = offset;

    if cursor_visible < offset {
        offset = cursor_visible;
    } else if cursor_visible >= offset + viewport_height {
        offset = cursor_visible + 1 - viewport_height;
    }

    let max_offset: usize = visible_count.saturating_sub(viewport_height);
    if offset > max_offset { max_offset } else { offset }
}

/// Row of the scrollbar thumb within a track of `track_height` rows.
///
/// `None` when everything fits and no bar should be drawn.
#[must_use]
pub const fn scrollbar_thumb(
    total: usize,
    track_height: usize,
    cursor_visible: usize,
) -> Option<usize> {
    if track_height == 0 || total <= track_height {
        return None;
    }

    let thumb: usize = cursor_visible * track_height / total;
    if thumb > track_height - 1 {
        Some(track_height - 1)
    } else {
        Some(thumb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolls_by_one_row_when_cursor_leaves_bottom() {
        // height 10, 25 rows, cursor 9 -> 10
        assert_eq!(reclamp(0, 9, 25, 10), 0);
        assert_eq!(reclamp(0, 10, 25, 10), 1);
    }

    #[test]
    fn scrolls_up_to_reveal_cursor_at_top() {
        assert_eq!(reclamp(12, 4, 25, 10), 4);
        assert_eq!(reclamp(12, 12, 25, 10), 12);
    }

    #[test]
    fn offset_is_clamped_to_content() {
        // list shrank under a stale offset
        assert_eq!(reclamp(20, 3, 8, 10), 0);
        assert_eq!(reclamp(20, 22, 25, 10), 15);
        assert_eq!(reclamp(5, 0, 0, 10), 0);
        assert_eq!(reclamp(5, 0, 3, 0), 0);
    }

    #[test]
    fn reclamp_is_idempotent() {
        for offset in 0..30 {
            for cursor in 0..30 {
                for count in 0..30 {
                    let once = reclamp(offset, cursor, count, 7);
                    assert_eq!(reclamp(once, cursor, count, 7), once);
                }
            }
        }
    }

    #[test]
    fn thumb_absent_when_everything_fits() {
        assert_eq!(scrollbar_thumb(5, 20, 2), None);
        assert_eq!(scrollbar_thumb(20, 20, 19), None);
        assert_eq!(scrollbar_thumb(0, 20, 0), None);
        assert_eq!(scrollbar_thumb(30, 0, 3), None);
    }

    #[test]
    fn thumb_tracks_cursor_proportionally() {
        assert_eq!(scrollbar_thumb(100, 20, 0), Some(0));
        assert_eq!(scrollbar_thumb(100, 20, 10), Some(2));
        assert_eq!(scrollbar_thumb(100, 20, 99), Some(19));
        // cursor past the end still lands on the last track row
        assert_eq!(scrollbar_thumb(100, 20, 250), Some(19));

        for total in 11..60 {
            for cursor in 0..total {
                let thumb = scrollbar_thumb(total, 10, cursor).unwrap();
                assert!(thumb <= 9);
            }
        }
    }
}
