//! Terminal UI components and rendering.
//!
//! This module holds the picker's session state, the pieces it is computed from (selection,
//! layout, viewport), the byte decoder and the terminal driver that paints frames.

pub use app::{App, Step};
pub use backend::Tui;
pub use event::Action;

mod app;
mod backend;
/// Raw byte decoding and picker actions
pub mod event;
mod input;
/// Item list rendering
pub mod item_list;
/// Row cost of items
pub mod layout;
/// Cursor and multi-selection marks
pub mod selection;
mod util;
/// Visible window computation
pub mod viewport;

/// Rows reserved for the prompt line and a small margin
pub const CHROME_ROWS: u16 = 4;
const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;

/// Terminal size in cells, captured once per session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Columns
    pub width: u16,
    /// Rows
    pub height: u16,
}

impl Geometry {
    /// A terminal `width` columns by `height` rows
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Rows left for items once the chrome is drawn, never less than 1
    pub fn available_rows(&self) -> usize {
        self.height.saturating_sub(CHROME_ROWS).max(1) as usize
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
