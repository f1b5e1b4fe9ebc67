use indexmap::IndexSet;

/// Cursor over the match list plus the set of marked records
///
/// `cursor` indexes the match list while `marked` holds record positions, so marks survive
/// refiltering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    cursor: usize,
    marked: IndexSet<usize>,
}

impl Selection {
    /// Index of the cursor in the match list
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the record at `position` is marked
    pub fn is_marked(&self, position: usize) -> bool {
        self.marked.contains(&position)
    }

    /// Number of marked records
    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    /// Places the cursor at `cursor`, clamped to the match list
    pub fn with_cursor(self, cursor: usize, matches: &[usize]) -> Self {
        Self { cursor, ..self }.clamp(matches)
    }

    /// Pulls the cursor back inside a match list that may have shrunk
    pub fn clamp(self, matches: &[usize]) -> Self {
        Self {
            cursor: self.cursor.min(matches.len().saturating_sub(1)),
            ..self
        }
    }

    /// Moves the cursor up one match, stopping at the first
    pub fn move_up(self) -> Self {
        Self {
            cursor: self.cursor.saturating_sub(1),
            ..self
        }
    }

    /// Moves the cursor down one match, stopping at the last
    pub fn move_down(self, matches: &[usize]) -> Self {
        let cursor = if self.cursor + 1 < matches.len() {
            self.cursor + 1
        } else {
            self.cursor
        };
        Self { cursor, ..self }
    }

    /// Flips the mark on the record under the cursor, then moves down unless on the last match
    pub fn toggle(self, matches: &[usize]) -> Self {
        let Some(&position) = matches.get(self.cursor) else {
            return self;
        };
        let mut marked = self.marked;
        if !marked.shift_remove(&position) {
            marked.insert(position);
        }
        trace!("toggled record {position}, marked: {marked:?}");
        Self {
            cursor: self.cursor,
            marked,
        }
        .move_down(matches)
    }

    /// Record positions the session would return if confirmed now.
    ///
    /// Marked records win over the cursor and come back in ascending record order, whatever order
    /// they were marked in. Without marks, the record under the cursor is returned.
    pub fn current(&self, matches: &[usize]) -> Vec<usize> {
        if !self.marked.is_empty() {
            let mut positions: Vec<usize> = self.marked.iter().copied().collect();
            positions.sort_unstable();
            return positions;
        }
        matches.get(self.cursor).copied().into_iter().collect()
    }
}
