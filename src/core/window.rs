//! Viewport windowing: maps a long listing onto a fixed number of terminal rows.

/// Returns `(first, count)`, the contiguous slice of a listing to paint so that `selected` stays
/// visible.
///
/// The selection is kept centered once it is half a window away from either end. In an odd
/// window the extra row goes after the selection.
pub fn window(total: usize, selected: usize, rows: usize) -> (usize, usize) {
    let count = rows.min(total);
    let half = count / 2;

    let first = if selected < half {
        0
    } else if selected >= total - half {
        total - count
    } else {
        selected - half
    };

    (first, count)
}
