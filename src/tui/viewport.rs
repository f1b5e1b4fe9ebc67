//! Picks the slice of the match list painted in a frame.

use std::ops::Range;

/// Computes the half-open range of `matches` indices to paint.
///
/// The window grows upward from the cursor until it would use more than half of `available_rows`,
/// then the cursor row is counted, then it grows downward while the whole budget allows. Short
/// items therefore let more neighbours into view than tall wrapped ones, and leftover budget
/// favours the items after the cursor.
///
/// The upward cap is applied before the cursor row is counted, so a tall cursor item can leave
/// part of the budget unused. The cursor is always inside the returned range when `matches` is
/// non-empty; an empty list yields `0..0`.
pub fn compute_window<F>(matches: &[usize], cursor: usize, available_rows: usize, rows_for: F) -> Range<usize>
where
    F: Fn(usize) -> usize,
{
    if matches.is_empty() {
        return 0..0;
    }
    let cursor = cursor.min(matches.len() - 1);
    let available_rows = available_rows.max(1);
    let cost = |i: usize| rows_for(matches[i]);

    let mut used = 0;
    let mut start = cursor;
    while start > 0 {
        let rows = cost(start - 1);
        if used + rows > available_rows / 2 {
            break;
        }
        start -= 1;
        used += rows;
    }

    used += cost(cursor);

    let mut end = cursor + 1;
    while end < matches.len() {
        let rows = cost(end);
        if used + rows > available_rows {
            break;
        }
        used += rows;
        end += 1;
    }

    trace!("window {start}..{end} for cursor {cursor}, {used}/{available_rows} rows");
    start..end
}
