use std::ops::Range;

use ratatui::text::{Line, Span};
use unicode_display_width::width as display_width;

use crate::display::{DisplayPool, pad_to_width};
use crate::theme::ColorTheme;
use crate::tui::layout::text_width;
use crate::tui::selection::Selection;
use crate::tui::util::truncate_with_ellipsis;

const CURSOR_PREFIX: &str = "> ";
const BLANK_PREFIX: &str = "  ";
/// Shown instead of items when nothing matches
pub const NO_MATCHES: &str = "  (no matches)";

/// Renders the visible slice of the match list
pub struct ItemList<'a> {
    pool: &'a DisplayPool,
    theme: &'a ColorTheme,
    width: u16,
}

impl<'a> ItemList<'a> {
    /// Creates a renderer for a terminal `width` columns wide
    pub fn new(pool: &'a DisplayPool, theme: &'a ColorTheme, width: u16) -> Self {
        Self { pool, theme, width }
    }

    /// One line per match in `window`.
    ///
    /// Current and marked lines are padded to the widest visible item so their background forms a
    /// block, unless an item in view wraps: padding wrapped rows would give them ragged
    /// backgrounds, so that frame is left unpadded.
    pub fn lines(&self, matches: &[usize], window: Range<usize>, selection: &Selection) -> Vec<Line<'static>> {
        if matches.is_empty() {
            return vec![Line::raw(NO_MATCHES)];
        }
        let max_text = text_width(self.width);
        let truncate = self.pool.truncate();
        let visible = &matches[window.start..window.end.min(matches.len())];

        let texts: Vec<String> = visible
            .iter()
            .map(|&pos| {
                let text = self.pool.get(pos);
                if truncate {
                    truncate_with_ellipsis(text, max_text).into_owned()
                } else {
                    text.to_string()
                }
            })
            .collect();
        let widest = texts.iter().map(|t| display_width(t) as usize).max().unwrap_or(0);
        let pad_width = if truncate {
            Some(widest.min(max_text))
        } else if widest > max_text {
            None
        } else {
            Some(widest)
        };

        visible
            .iter()
            .zip(texts)
            .enumerate()
            .map(|(offset, (&pos, text))| {
                let is_current = window.start + offset == selection.cursor();
                let is_marked = selection.is_marked(pos);
                let style = self.theme.line_style(is_current, is_marked);
                let prefix = if is_current { CURSOR_PREFIX } else { BLANK_PREFIX };
                let text = match pad_width {
                    Some(w) if is_current || is_marked => pad_to_width(text, w),
                    _ => text,
                };
                Line::from(vec![Span::styled(prefix, style), Span::styled(text, style)])
            })
            .collect()
    }
}
