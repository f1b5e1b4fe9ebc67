use ratatui::text::{Line, Span};

use crate::theme::ColorTheme;

/// Label in front of the filter text
pub const FILTER_LABEL: &str = "Filter:";

/// The header line: the label followed by the literal filter text
pub fn prompt_line(query: &str, theme: &ColorTheme) -> Line<'static> {
    Line::from(vec![
        Span::styled(FILTER_LABEL, theme.prompt),
        Span::raw(" "),
        Span::styled(query.to_string(), theme.query),
    ])
}
