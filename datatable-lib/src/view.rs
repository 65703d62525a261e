//! Layout-agnostic view model.
//!
//! [`Presenter::view`](crate::Presenter::view) flattens presenter
//! state into these plain structs. A front-end only draws them; every
//! decision (which rows, which text, which indicator) is already made.

use crate::column::Alignment;
use crate::event::ActionKind;
use crate::query::{Pagination, SortDirection};

/// Everything needed to draw the presenter once.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub body: Body,
    /// Pagination controls; `None` when the consumer supplied no pagination.
    pub pagination: Option<PageInfo>,
    /// Text currently shown in the search box.
    pub search: String,
}

/// The main content area.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Loading,
    Empty(EmptyState),
    Table(TableView),
    Cards(Vec<CardView>),
}

/// What to say when nothing is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// No record exists and no constraint is active.
    NoData { message: String },
    /// Records may exist but the search or a filter hides them all.
    NoResults {
        message: String,
        /// Active search term, if the search caused it.
        term: Option<String>,
    },
    /// Records pass the constraints but the requested page lies past the
    /// last one.
    PageOutOfRange { message: String, page: usize },
}

impl EmptyState {
    pub(crate) fn no_results(term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            EmptyState::NoResults {
                message: "No results match the current filters".to_string(),
                term: None,
            }
        } else {
            EmptyState::NoResults {
                message: format!("No results found for \"{term}\""),
                term: Some(term.to_string()),
            }
        }
    }

    pub(crate) fn page_out_of_range(page: usize, total_pages: usize) -> Self {
        EmptyState::PageOutOfRange {
            message: format!("Page {page} is past the last page ({total_pages})"),
            page,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            EmptyState::NoData { message }
            | EmptyState::NoResults { message, .. }
            | EmptyState::PageOutOfRange { message, .. } => message,
        }
    }

    /// Whether a "clear search and filters" control should be offered.
    pub fn can_clear(&self) -> bool {
        matches!(self, EmptyState::NoResults { .. })
    }
}

// =============================================================================
// Table layout
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
    /// Whether rows carry an actions column.
    pub has_actions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub title: String,
    pub align: Alignment,
    pub width: Option<u16>,
    pub sortable: bool,
    /// Direction when this column is the active sort.
    pub sort: Option<SortDirection>,
}

impl HeaderCell {
    /// Title followed by the sort indicator, if any.
    pub fn label(&self) -> String {
        match self.sort {
            Some(direction) => format!("{} {}", self.title, direction.indicator()),
            None => self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub key: String,
    pub cells: Vec<Cell>,
    pub actions: Vec<ActionKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub align: Alignment,
}

// =============================================================================
// Card layout
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub key: String,
    /// Text of the identity column.
    pub title: String,
    pub actions: Vec<ActionKind>,
    /// Always-visible label/value pairs.
    pub primary: Vec<CardField>,
    /// Secondary pairs; empty unless the card is expanded.
    pub secondary: Vec<CardField>,
    /// `Some(expanded)` when the card has secondary fields to disclose.
    pub disclosure: Option<bool>,
    /// Number of secondary fields behind the disclosure.
    pub hidden_fields: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub label: String,
    pub text: String,
}

// =============================================================================
// Pagination controls
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub current: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub show_size_changer: bool,
    pub page_size_options: Vec<usize>,
}

impl From<&Pagination> for PageInfo {
    fn from(page: &Pagination) -> Self {
        Self {
            current: page.current(),
            page_size: page.page_size(),
            total: page.total(),
            total_pages: page.total_pages(),
            has_prev: page.has_prev(),
            has_next: page.has_next(),
            show_size_changer: page.show_size_changer(),
            page_size_options: page.page_size_options().to_vec(),
        }
    }
}
