use std::ops::Range;

use ratatui::text::Line;

use crate::display::DisplayPool;
use crate::filter::FilterState;
use crate::theme::ColorTheme;

use super::Geometry;
use super::event::Action;
use super::input::prompt_line;
use super::item_list::ItemList;
use super::layout::rows_for;
use super::selection::Selection;
use super::viewport::compute_window;

/// Outcome of handling one action
#[derive(Debug)]
pub enum Step {
    /// Keep running with the updated state
    Continue(App),
    /// The operator confirmed; the final state is kept to read the selection from
    Accept(App),
    /// The operator cancelled
    Abort(App),
}

/// Picker state for one session.
///
/// The state is threaded by value: [`App::handle`] consumes it and hands back the next one, so
/// every transition can be exercised without a terminal.
#[derive(Debug, Clone)]
pub struct App {
    pool: DisplayPool,
    geometry: Geometry,
    theme: ColorTheme,
    filter: FilterState,
    selection: Selection,
}

impl App {
    /// Starts a session over `pool` with an empty filter
    pub fn new(pool: DisplayPool, geometry: Geometry, theme: ColorTheme) -> Self {
        let filter = FilterState::new(&pool);
        Self {
            pool,
            geometry,
            theme,
            filter,
            selection: Selection::default(),
        }
    }

    /// Applies an action
    pub fn handle(self, action: Action) -> Step {
        debug!("handling {action:?}");
        match action {
            Action::Abort => Step::Abort(self),
            Action::Accept => Step::Accept(self),
            Action::AddChar(c) => {
                let filter = self.filter.push(&self.pool, c);
                Step::Continue(Self::refiltered(self.pool, self.geometry, self.theme, filter, self.selection))
            }
            Action::BackwardDeleteChar => {
                if self.filter.query().is_empty() {
                    return Step::Continue(self);
                }
                let filter = self.filter.pop(&self.pool);
                Step::Continue(Self::refiltered(self.pool, self.geometry, self.theme, filter, self.selection))
            }
            Action::Up => Step::Continue(Self {
                selection: self.selection.move_up(),
                ..self
            }),
            Action::Down => {
                let selection = self.selection.move_down(self.filter.matches());
                Step::Continue(Self { selection, ..self })
            }
            Action::Toggle => {
                let selection = self.selection.toggle(self.filter.matches());
                Step::Continue(Self { selection, ..self })
            }
        }
    }

    fn refiltered(
        pool: DisplayPool,
        geometry: Geometry,
        theme: ColorTheme,
        filter: FilterState,
        selection: Selection,
    ) -> Self {
        let selection = selection.clamp(filter.matches());
        Self {
            pool,
            geometry,
            theme,
            filter,
            selection,
        }
    }

    /// The filter text
    pub fn query(&self) -> &str {
        self.filter.query()
    }

    /// Matching record positions
    pub fn matches(&self) -> &[usize] {
        self.filter.matches()
    }

    /// Cursor and marks
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// What a confirm would return right now
    pub fn current_selection(&self) -> Vec<usize> {
        self.selection.current(self.filter.matches())
    }

    /// Slice of the match list that fits on screen around the cursor
    pub fn window(&self) -> Range<usize> {
        let width = self.geometry.width;
        let truncate = self.pool.truncate();
        compute_window(
            self.filter.matches(),
            self.selection.cursor(),
            self.geometry.available_rows(),
            |pos| rows_for(self.pool.get(pos), width, truncate),
        )
    }

    /// The whole frame: the prompt line, then the visible items
    pub fn render_lines(&self) -> Vec<Line<'static>> {
        let window = self.window();
        let mut lines = vec![prompt_line(self.filter.query(), &self.theme)];
        lines.extend(ItemList::new(&self.pool, &self.theme, self.geometry.width).lines(
            self.filter.matches(),
            window,
            &self.selection,
        ));
        lines
    }
}
