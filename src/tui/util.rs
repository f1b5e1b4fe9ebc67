use std::borrow::Cow;

use ratatui::text::{Line, Span};
use unicode_display_width::{is_double_width, width as display_width};

/// Marker appended to truncated items
pub const ELLIPSIS: &str = "...";

#[inline]
pub fn char_display_width(c: char) -> usize {
    if c == '\u{FE0F}' || is_double_width(c) {
        return 2;
    }
    1
}

/// Shortens `text` to `max_width` columns, ending it with [`ELLIPSIS`].
///
/// Text that already fits, or a budget too small to hold the marker, is returned unchanged.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> Cow<'_, str> {
    let ellipsis_width = ELLIPSIS.len();
    if max_width <= ellipsis_width || display_width(text) as usize <= max_width {
        return Cow::Borrowed(text);
    }
    let budget = max_width - ellipsis_width;
    let mut w = 0;
    let mut res = String::with_capacity(max_width);
    for c in text.chars() {
        w += char_display_width(c);
        if w > budget {
            break;
        }
        res.push(c);
    }
    res.push_str(ELLIPSIS);
    Cow::Owned(res)
}

/// Splits a styled line into rows of at most `width` columns, keeping span styles.
///
/// Wrapping is per character, like a terminal does it. An empty line stays a single empty row.
pub fn wrap_line(line: Line<'_>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = Line::default();
    let mut w = 0;
    for span in line.spans {
        let mut content = String::new();
        for c in span.content.chars() {
            let cw = char_display_width(c);
            if w + cw > width && w > 0 {
                if !content.is_empty() {
                    row.push_span(Span::styled(std::mem::take(&mut content), span.style));
                }
                rows.push(std::mem::take(&mut row));
                w = 0;
            }
            content.push(c);
            w += cw;
        }
        if !content.is_empty() {
            row.push_span(Span::styled(content, span.style));
        }
    }
    rows.push(row);
    rows
}
