//! Per-act path navigation: cursor movement, commitments and ratings.
//!
//! The navigator never mutates the graph. It reads the act it is given and
//! keeps its own [`NavigationState`], which is rebuilt wholesale whenever the
//! act changes or the run is rerolled.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{LOG_ROUTE_ACT_COMPLETE, LOG_ROUTE_COMMIT, LOG_ROUTE_RATED, RATING_MAX};
use crate::difficulty::{clamp_difficulty, parse_difficulty};
use crate::graph::Act;

/// Where the navigator is in the commit/rate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NavPhase {
    /// Choosing a column in the current row.
    #[default]
    Browsing,
    /// A column is committed; waiting for its rating.
    AwaitingRating,
    /// The last row has been rated; nothing further to advance to.
    Complete,
}

/// Mutable traversal state for a single act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NavigationState {
    pub phase: NavPhase,
    pub row: usize,
    pub cursor_col: usize,
    pub allowed: Vec<usize>,
    pub allowed_idx: usize,
    pub committed: BTreeMap<usize, usize>,
    pub stars: BTreeMap<usize, u8>,
    pub rating_input: String,
}

/// Parse free-form rating text into `[0, 6]`; anything unparsable reads as 0.
#[must_use]
pub fn parse_rating(input: &str) -> u8 {
    clamp_difficulty(parse_difficulty(input))
}

/// Columns a player may pick when entering `row`.
///
/// Row 0, a missing commitment on the previous row, or a committed node with
/// no outgoing edges all leave every column of `row` open.
#[must_use]
pub fn allowed_columns(act: &Act, row: usize, committed: &BTreeMap<usize, usize>) -> Vec<usize> {
    let every_column = || (0..act.row(row).map_or(0, <[_]>::len)).collect::<Vec<_>>();
    let Some(prev_row) = row.checked_sub(1) else {
        return every_column();
    };
    let (Some(&prev_col), Some(prev_nodes)) = (committed.get(&prev_row), act.row(prev_row)) else {
        return every_column();
    };
    let Some(node) = prev_nodes.get(prev_col).or_else(|| prev_nodes.last()) else {
        return every_column();
    };
    if node.edges.is_empty() {
        return every_column();
    }
    node.edges.to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathNavigator {
    state: NavigationState,
    logs: Vec<String>,
}

impl PathNavigator {
    /// Fresh navigator browsing row 0 of `act`.
    #[must_use]
    pub fn enter(act: &Act) -> Self {
        let mut navigator = Self::default();
        navigator.reset(act);
        navigator
    }

    /// Discard all traversal state and start over at row 0 of `act`.
    pub fn reset(&mut self, act: &Act) {
        self.state = NavigationState::default();
        self.load_row(act, 0);
    }

    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub const fn phase(&self) -> NavPhase {
        self.state.phase
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.state.row
    }

    #[must_use]
    pub const fn cursor_col(&self) -> usize {
        self.state.cursor_col
    }

    #[must_use]
    pub fn allowed(&self) -> &[usize] {
        &self.state.allowed
    }

    #[must_use]
    pub fn committed(&self, row: usize) -> Option<usize> {
        self.state.committed.get(&row).copied()
    }

    #[must_use]
    pub fn stars(&self, row: usize) -> Option<u8> {
        self.state.stars.get(&row).copied()
    }

    #[must_use]
    pub fn rating_input(&self) -> &str {
        &self.state.rating_input
    }

    /// Player-facing event log keys, oldest first.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub(crate) fn record(&mut self, key: &str) {
        self.logs.push(key.to_string());
    }

    /// Move the cursor `delta` steps through the allowed columns, clamping at
    /// either end. Ignored while a rating is pending.
    pub fn move_horizontal(&mut self, delta: isize) {
        if self.state.phase == NavPhase::AwaitingRating || self.state.allowed.is_empty() {
            return;
        }
        let last = self.state.allowed.len() - 1;
        let next = self.state.allowed_idx.saturating_add_signed(delta).min(last);
        self.state.allowed_idx = next;
        self.state.cursor_col = self.state.allowed[next];
    }

    /// Commit the cursor column for the current row and wait for a rating.
    pub fn commit(&mut self) {
        if self.state.phase != NavPhase::Browsing || self.state.allowed.is_empty() {
            return;
        }
        let row = self.state.row;
        self.state.committed.insert(row, self.state.cursor_col);
        self.state.phase = NavPhase::AwaitingRating;
        self.state.rating_input.clear();
        self.logs.push(LOG_ROUTE_COMMIT.to_string());
        log::debug!("committed row {row} column {}", self.state.cursor_col);
    }

    /// Replace the pending rating text with a single digit in `0..=6`.
    pub fn push_digit(&mut self, digit: char) {
        if self.state.phase != NavPhase::AwaitingRating {
            return;
        }
        if digit.to_digit(10).is_some_and(|d| d <= u32::from(RATING_MAX)) {
            self.state.rating_input = digit.to_string();
        }
    }

    /// Drop the last character of the pending rating text.
    pub fn backspace(&mut self) {
        if self.state.phase == NavPhase::AwaitingRating {
            self.state.rating_input.pop();
        }
    }

    /// Submit the pending rating text.
    pub fn submit_pending(&mut self, act: &Act) {
        let input = std::mem::take(&mut self.state.rating_input);
        self.submit_rating(act, &input);
    }

    /// Record a rating for the committed row and advance to the next row.
    ///
    /// Input is clamped into `[0, 6]`; it never fails. Rating the last row
    /// completes the act.
    pub fn submit_rating(&mut self, act: &Act, input: &str) {
        if self.state.phase != NavPhase::AwaitingRating {
            return;
        }
        let row = self.state.row;
        let rating = parse_rating(input);
        self.state.stars.insert(row, rating);
        self.state.rating_input.clear();
        self.logs.push(LOG_ROUTE_RATED.to_string());

        if row < act.last_row() {
            self.load_row(act, row + 1);
        } else {
            self.state.phase = NavPhase::Complete;
            self.logs.push(LOG_ROUTE_ACT_COMPLETE.to_string());
            log::debug!("act {} complete", act.index);
        }
    }

    fn load_row(&mut self, act: &Act, row: usize) {
        self.state.row = row;
        self.state.allowed = allowed_columns(act, row, &self.state.committed);
        self.state.allowed_idx = 0;
        self.state.cursor_col = self.state.allowed.first().copied().unwrap_or(0);
        self.state.phase = NavPhase::Browsing;
    }
}
