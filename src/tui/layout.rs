use unicode_display_width::width as display_width;

/// Columns taken by the `"> "` / `"  "` prefix of every item
pub const PREFIX_WIDTH: usize = 2;

/// Columns left for item text on a terminal `width` columns wide, never less than 1
pub fn text_width(width: u16) -> usize {
    (width as usize).saturating_sub(PREFIX_WIDTH).max(1)
}

/// Number of terminal rows an item occupies.
///
/// Truncated items always fit on one row. Wrapped items take one row per `width - 2` columns of
/// text, rounded up; an empty item still takes a row.
pub fn rows_for(display: &str, width: u16, truncate: bool) -> usize {
    if truncate || display.is_empty() {
        return 1;
    }
    (display_width(display) as usize).div_ceil(text_width(width)).max(1)
}
