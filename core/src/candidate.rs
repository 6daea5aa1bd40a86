//! Candidate types for steno translation.
//!
//! This module provides:
//! - `Candidate`: one dictionary match offered for selection
//! - `CandidateList`: paginated list with cursor navigation
//!
//! The list does its own position bookkeeping and nothing else; it never
//! talks to the dictionary or the host.

use serde::{Deserialize, Serialize};

/// Default number of candidates per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One dictionary match: display text plus the outline (canonical
/// stroke-sequence form) it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub outline: String,
}

impl Candidate {
    pub fn new<T: Into<String>, U: Into<String>>(text: T, outline: U) -> Self {
        Candidate {
            text: text.into(),
            outline: outline.into(),
        }
    }
}

/// A paginated candidate list with cursor navigation.
///
/// Paging never wraps: `page_up` on the first page and `page_down` past
/// the last are no-ops that report "no change". The cursor walks the
/// full ordered set, crossing page boundaries as needed, and saturates
/// at the first/last candidate.
#[derive(Debug, Clone)]
pub struct CandidateList {
    candidates: Vec<Candidate>,

    /// Candidates per page, always > 0.
    page_size: usize,

    /// Current page index (0-based).
    page: usize,

    /// Cursor position within the current page (0-based).
    cursor: usize,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            candidates: Vec::new(),
            page_size: page_size.max(1),
            page: 0,
            cursor: 0,
        }
    }

    /// Replace the full ordered set, resetting to page 0 cursor 0.
    pub fn refresh(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.page = 0;
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
        self.page = 0;
        self.cursor = 0;
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn num_pages(&self) -> usize {
        if self.candidates.is_empty() {
            0
        } else {
            self.candidates.len().div_ceil(self.page_size)
        }
    }

    /// Current page index (0-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Cursor position within the current page (0-based).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn current_page_len(&self) -> usize {
        let start = self.page * self.page_size;
        let end = (start + self.page_size).min(self.candidates.len());
        end.saturating_sub(start)
    }

    /// Candidates on the current page.
    pub fn visible(&self) -> &[Candidate] {
        if self.candidates.is_empty() {
            return &[];
        }
        let start = self.page * self.page_size;
        let end = (start + self.page_size).min(self.candidates.len());
        &self.candidates[start..end]
    }

    /// Global index of the candidate under the cursor.
    pub fn current_index(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let global = self.page * self.page_size + self.cursor;
        (global < self.candidates.len()).then_some(global)
    }

    /// Candidate under the cursor, if any.
    pub fn current(&self) -> Option<&Candidate> {
        self.current_index().map(|i| &self.candidates[i])
    }

    /// Move to the previous page. Returns whether the page changed.
    pub fn page_up(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Move to the next page. Returns whether the page changed.
    pub fn page_down(&mut self) -> bool {
        let num_pages = self.num_pages();
        if num_pages == 0 || self.page + 1 >= num_pages {
            return false;
        }
        self.page += 1;
        // Keep the cursor inside the (possibly short) last page.
        let page_len = self.current_page_len();
        if page_len > 0 && self.cursor >= page_len {
            self.cursor = page_len - 1;
        }
        true
    }

    /// Move the cursor to the previous candidate, crossing page
    /// boundaries. Returns whether the cursor moved.
    pub fn cursor_up(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else if self.page > 0 {
            self.page -= 1;
            // Pages before the last are always full.
            self.cursor = self.page_size - 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor to the next candidate, crossing page boundaries.
    /// Returns whether the cursor moved.
    pub fn cursor_down(&mut self) -> bool {
        let Some(global) = self.current_index() else {
            return false;
        };
        if global + 1 >= self.candidates.len() {
            return false;
        }
        self.cursor += 1;
        if self.cursor >= self.page_size {
            self.page += 1;
            self.cursor = 0;
        }
        true
    }

    /// Select a candidate by position within the current page. Returns
    /// the candidate if the position is valid for that page.
    pub fn select(&mut self, page_index: usize) -> Option<&Candidate> {
        if page_index < self.current_page_len() {
            self.cursor = page_index;
            self.current()
        } else {
            None
        }
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new()
    }
}
