//! Handle the color theme
use ratatui::style::{Color, Modifier, Style};

/// The styles of qjp's UI
///
/// <pre>
/// +-------------------+
/// | Filter: query     |  --> prompt & query
/// |> current line     |  --> cursor
/// |  marked line      |  --> marked
/// |  normal line      |  --> normal
/// +-------------------+
/// </pre>
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorTheme {
    /// Unmarked, non-current lines
    pub normal: Style,
    /// The `Filter:` label
    pub prompt: Style,
    /// Filter text
    pub query: Style,
    /// The current line, prefix included
    pub cursor: Style,
    /// Marked lines
    pub marked: Style,
}

impl ColorTheme {
    /// Picks the theme from the environment: monochrome when `NO_COLOR` is set and non-empty
    pub fn from_env() -> Self {
        match std::env::var_os("NO_COLOR") {
            Some(no_color) if !no_color.is_empty() => ColorTheme::none(),
            _ => ColorTheme::default16(),
        }
    }

    /// Reverse video cursor, green background for marks, cyan prompt
    pub fn default16() -> Self {
        Self {
            normal: Style::default(),
            prompt: Style::default().fg(Color::Cyan),
            query: Style::default(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            marked: Style::default().bg(Color::Green),
        }
    }

    /// No colors at all; marks are underlined
    pub fn none() -> Self {
        Self {
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            marked: Style::default().add_modifier(Modifier::UNDERLINED),
            ..ColorTheme::default()
        }
    }

    /// Style of an item line
    pub fn line_style(&self, is_current: bool, is_marked: bool) -> Style {
        match (is_current, is_marked) {
            (true, true) => self.cursor.patch(self.marked),
            (true, false) => self.cursor,
            (false, true) => self.marked,
            (false, false) => self.normal,
        }
    }
}
