//! Literal, case-insensitive filtering of display values.

use crate::display::DisplayPool;

/// Positions of the records whose display value contains `query`, ignoring case.
///
/// Order is preserved and an empty query matches everything.
pub fn apply(pool: &DisplayPool, query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return (0..pool.len()).collect();
    }
    (0..pool.len())
        .filter(|&pos| pool.get_lowercase(pos).contains(&needle))
        .collect()
}

/// The current filter text and the matches derived from it
///
/// Every edit recomputes `matches` immediately, so the two never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    matches: Vec<usize>,
}

impl FilterState {
    /// Initial state: empty filter, every record matches
    pub fn new(pool: &DisplayPool) -> Self {
        Self::with_query(pool, String::new())
    }

    /// State for an arbitrary filter text
    pub fn with_query(pool: &DisplayPool, query: String) -> Self {
        let matches = apply(pool, &query);
        Self { query, matches }
    }

    /// Appends a character and refilters
    pub fn push(self, pool: &DisplayPool, c: char) -> Self {
        let mut query = self.query;
        query.push(c);
        let next = Self::with_query(pool, query);
        debug!("filter {:?}: {} matches", next.query, next.matches.len());
        next
    }

    /// Drops the last character and refilters. No-op on an empty filter.
    pub fn pop(self, pool: &DisplayPool) -> Self {
        let mut query = self.query;
        if query.pop().is_none() {
            return Self { query, ..self };
        }
        let next = Self::with_query(pool, query);
        debug!("filter {:?}: {} matches", next.query, next.matches.len());
        next
    }

    /// The filter text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Matching record positions, in record order
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }
}
