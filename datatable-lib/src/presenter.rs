//! The presenter state machine.
//!
//! [`Presenter`] owns everything the data table tracks between renders:
//! the search box, the pending debounce, filters, sort, expanded cards,
//! viewport layout, mirrored pagination and the outbound event queue.
//! Transitions take `&mut self`; queries take `&self`. Nothing here performs
//! I/O or reads a clock on its own, so the whole surface is driveable from
//! plain tests.

use std::collections::HashSet;

use log::{debug, trace, warn};
use tokio::time::Instant;

use crate::column::{Column, ColumnSet};
use crate::config::TableConfig;
use crate::debounce::Debounce;
use crate::error::{PaginationError, TableError};
use crate::event::{ActionKind, Actions, TableEvent};
use crate::layout::LayoutMode;
use crate::model::{TableRecord, Value};
use crate::query::{FilterState, Pagination, SortState, filter_indices, sort_indices};
use crate::view::{
    Body, CardField, CardView, Cell, EmptyState, HeaderCell, PageInfo, RowView, TableView, View,
};

/// Headless data table over records of type `R`.
///
/// # Example
///
/// ```
/// use datatable_lib::column::{Column, ColumnSet, FilterType};
/// use datatable_lib::config::TableConfig;
/// use datatable_lib::model::Row;
/// use datatable_lib::Presenter;
///
/// let columns = ColumnSet::new(vec![
///     Column::new("id", "ID").sortable(),
///     Column::new("status", "Status").filterable(FilterType::Select),
/// ])
/// .unwrap();
///
/// let mut table = Presenter::new(columns, TableConfig::default());
/// table.set_data(vec![
///     Row::new().set("id", 1).set("status", "active"),
///     Row::new().set("id", 2).set("status", "failed"),
/// ]);
/// table.apply_filter("status", "failed").unwrap();
/// assert_eq!(table.visible_indices(), vec![1]);
/// ```
#[derive(Debug)]
pub struct Presenter<R> {
    config: TableConfig,
    columns: ColumnSet,
    data: Vec<R>,
    loading: bool,
    pagination: Option<Pagination>,
    actions: Actions,
    search_input: String,
    debounce: Debounce<String>,
    filters: FilterState,
    sort: Option<SortState>,
    expanded: HashSet<String>,
    viewport_width: u32,
    layout: LayoutMode,
    events: Vec<TableEvent>,
}

impl<R: TableRecord> Presenter<R> {
    /// Creates an empty presenter laid out as a table.
    pub fn new(columns: ColumnSet, config: TableConfig) -> Self {
        let viewport_width = config.mobile_breakpoint;
        Self {
            debounce: Debounce::new(config.search_debounce),
            layout: LayoutMode::for_width(viewport_width, config.mobile_breakpoint),
            viewport_width,
            config,
            columns,
            data: Vec::new(),
            loading: false,
            pagination: None,
            actions: Actions::none(),
            search_input: String::new(),
            filters: FilterState::new(),
            sort: None,
            expanded: HashSet::new(),
            events: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Replaces the record set.
    ///
    /// Expanded cards whose row key no longer exists are collapsed.
    pub fn set_data(&mut self, data: Vec<R>) {
        debug!("set_data: {} records", data.len());
        self.data = data;
        let keys = self.row_keys();
        if keys.len() < self.data.len() {
            warn!(
                "set_data: {} records share a `{}` value; their cards expand together",
                self.data.len() - keys.len(),
                self.config.row_key
            );
        }
        self.expanded.retain(|key| keys.contains(key));
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Mirrors the consumer's pagination state. `None` disables pagination.
    pub fn set_pagination(&mut self, pagination: Option<Pagination>) {
        self.pagination = pagination;
    }

    pub fn set_actions(&mut self, actions: Actions) {
        self.actions = actions;
    }

    /// Records a new viewport width and returns the resulting layout.
    pub fn resize(&mut self, width: u32) -> LayoutMode {
        self.viewport_width = width;
        let layout = LayoutMode::for_width(width, self.config.mobile_breakpoint);
        if layout != self.layout {
            debug!("resize: {width}px switches layout to {layout:?}");
            self.layout = layout;
        }
        layout
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Handles a keystroke in the search box.
    ///
    /// The input (and, in client mode, the visible rows) update immediately.
    /// The outbound `Search` event waits for the debounce period, restarted
    /// by every call.
    pub fn type_search(&mut self, term: impl Into<String>, now: Instant) {
        let term = term.into();
        trace!("type_search: {term:?}");
        let changed = term != self.search_input;
        self.search_input.clone_from(&term);
        self.debounce.push(term, now);
        if changed {
            self.constraints_changed();
        }
    }

    /// Controlled-value update from the consumer.
    ///
    /// Ignored while a debounce is pending, so an external value never
    /// overwrites what the user is typing. Returns `true` if applied.
    pub fn set_search_value(&mut self, value: impl Into<String>) -> bool {
        if self.debounce.is_pending() {
            debug!("set_search_value: ignored while typing");
            return false;
        }
        let value = value.into();
        if value != self.search_input {
            self.search_input = value;
            self.constraints_changed();
        }
        true
    }

    /// Advances the debounce clock. Returns `true` if a `Search` event was
    /// emitted.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debounce.poll(now) {
            Some(term) => {
                debug!("search settled: {term:?}");
                self.events.push(TableEvent::Search(term));
                true
            }
            None => false,
        }
    }

    /// When the pending search term will settle, for hosts scheduling
    /// [`tick`](Self::tick).
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    // -------------------------------------------------------------------------
    // Filters and sort
    // -------------------------------------------------------------------------

    /// Sets (or, with an empty value, clears) the filter of one column.
    pub fn apply_filter(&mut self, key: &str, value: impl Into<String>) -> Result<(), TableError> {
        let column = self
            .columns
            .get(key)
            .ok_or_else(|| TableError::unknown_column(key))?;
        if !column.filterable {
            return Err(TableError::not_filterable(key));
        }

        if self.filters.set(key, value) {
            debug!("apply_filter: {key} -> {:?}", self.filters.get(key));
            self.events.push(TableEvent::Filter(self.filters.clone()));
            self.constraints_changed();
        }
        Ok(())
    }

    /// Clears the search term and every filter.
    ///
    /// Always emits `Filter` with the empty state followed by `Search("")`;
    /// a pending debounced term is dropped.
    pub fn clear_filters(&mut self) {
        debug!("clear_filters");
        self.debounce.cancel();
        let had_constraints = self.filters.clear() | !self.search_input.is_empty();
        self.search_input.clear();
        self.events.push(TableEvent::Filter(FilterState::new()));
        self.events.push(TableEvent::Search(String::new()));
        if had_constraints {
            self.constraints_changed();
        }
    }

    /// Activates the header of column `key`.
    ///
    /// The same column toggles direction; another column starts ascending.
    /// The result is applied locally and announced with a `Sort` event.
    pub fn set_sort(&mut self, key: &str) -> Result<SortState, TableError> {
        let column = self
            .columns
            .get(key)
            .ok_or_else(|| TableError::unknown_column(key))?;
        if !column.sortable {
            return Err(TableError::not_sortable(key));
        }

        let next = SortState::next(self.sort.as_ref(), key);
        debug!("set_sort: {key} {}", next.direction);
        self.events.push(TableEvent::Sort {
            field: column.data_index.clone(),
            direction: next.direction,
        });
        self.sort = Some(next.clone());
        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Requests page `page` (1-based).
    ///
    /// Pages past the end are allowed and render as no results.
    pub fn change_page(&mut self, page: usize) -> Result<(), TableError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage.into());
        }
        let Some(pagination) = self.pagination.as_mut() else {
            debug!("change_page: no pagination configured");
            return Ok(());
        };
        pagination.set_current(page)?;
        self.events.push(TableEvent::PaginationChange {
            page,
            page_size: pagination.page_size(),
        });
        Ok(())
    }

    /// Requests a new page size and returns to page 1.
    pub fn change_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize.into());
        }
        let Some(pagination) = self.pagination.as_mut() else {
            debug!("change_page_size: no pagination configured");
            return Ok(());
        };
        pagination.set_page_size(page_size)?;
        pagination.set_current(1)?;
        self.events.push(TableEvent::PaginationChange { page: 1, page_size });
        Ok(())
    }

    /// Search and filters narrowed the set: go back to the first page.
    fn constraints_changed(&mut self) {
        if !self.config.filters_locally() {
            return;
        }
        if let Some(pagination) = self.pagination.as_mut()
            && pagination.current() != 1
            && pagination.set_current(1).is_ok()
        {
            self.events.push(TableEvent::PaginationChange {
                page: 1,
                page_size: pagination.page_size(),
            });
        }
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Expands or collapses the card of row `key`. Returns the new state.
    pub fn toggle_expanded(&mut self, key: &str) -> Result<bool, TableError> {
        if !self.row_keys().contains(key) {
            return Err(TableError::unknown_row(key));
        }
        let expanded = if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        };
        debug!("toggle_expanded: {key} -> {expanded}");
        Ok(expanded)
    }

    /// Fires an enabled row action for row `key`.
    pub fn trigger_action(&mut self, kind: ActionKind, key: &str) -> Result<(), TableError> {
        if !self.actions.contains(kind) {
            return Err(TableError::ActionDisabled { action: kind });
        }
        if !self.row_keys().contains(key) {
            return Err(TableError::unknown_row(key));
        }
        debug!("trigger_action: {kind} on {key}");
        self.events.push(TableEvent::Action {
            kind,
            key: key.to_string(),
        });
        Ok(())
    }

    /// Takes every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn data(&self) -> &[R] {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn actions(&self) -> &Actions {
        &self.actions
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    /// Whether a search term or a filter currently constrains the set.
    pub fn has_constraints(&self) -> bool {
        !self.search_input.trim().is_empty() || !self.filters.is_empty()
    }

    /// Stable key of the record at `index`: the `row_key` field, or
    /// `#<index>` when that field is missing or empty.
    pub fn row_key(&self, index: usize) -> String {
        self.data
            .get(index)
            .and_then(|record| record.field(&self.config.row_key))
            .map(|value| value.to_string())
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| format!("#{index}"))
    }

    fn row_keys(&self) -> HashSet<String> {
        (0..self.data.len()).map(|index| self.row_key(index)).collect()
    }

    /// Indices of the records passing search and filters, in sort order.
    fn ordered_indices(&self) -> Vec<usize> {
        let mut indices = if self.config.filters_locally() {
            filter_indices(&self.data, &self.columns, &self.search_input, &self.filters)
        } else {
            (0..self.data.len()).collect()
        };

        if let Some(sort) = &self.sort
            && let Some(column) = self.columns.get(&sort.column)
        {
            sort_indices(&self.data, &mut indices, &column.data_index, sort.direction);
        }
        indices
    }

    /// Number of records passing search and filters, before pagination.
    pub fn filtered_count(&self) -> usize {
        if self.config.filters_locally() {
            filter_indices(&self.data, &self.columns, &self.search_input, &self.filters).len()
        } else {
            self.data.len()
        }
    }

    /// Indices into [`data`](Self::data) of the records on screen.
    pub fn visible_indices(&self) -> Vec<usize> {
        let indices = self.ordered_indices();
        match &self.pagination {
            Some(pagination) if !self.config.server_side_pagination => {
                indices[pagination.range(indices.len())].to_vec()
            }
            _ => indices,
        }
    }

    pub fn visible_records(&self) -> Vec<&R> {
        self.visible_indices()
            .into_iter()
            .map(|index| &self.data[index])
            .collect()
    }

    /// Pagination as displayed.
    ///
    /// Unless the server paginates, `total` is the number of records passing
    /// the current search and filters.
    pub fn effective_pagination(&self) -> Option<Pagination> {
        let mut pagination = self.pagination.clone()?;
        if !self.config.server_side_pagination {
            pagination.set_total(self.filtered_count());
        }
        Some(pagination)
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Builds the view model for the current state.
    pub fn view(&self) -> View {
        View {
            body: self.body(),
            pagination: self.effective_pagination().as_ref().map(PageInfo::from),
            search: self.search_input.clone(),
        }
    }

    fn body(&self) -> Body {
        if self.loading {
            return Body::Loading;
        }

        let indices = self.visible_indices();
        if indices.is_empty() {
            return Body::Empty(self.empty_state());
        }

        match self.layout {
            LayoutMode::Table => Body::Table(self.table_view(&indices)),
            LayoutMode::Cards => {
                Body::Cards(indices.iter().map(|&index| self.card_view(index)).collect())
            }
        }
    }

    fn empty_state(&self) -> EmptyState {
        if self.filtered_count() > 0
            && let Some(pagination) = self.effective_pagination()
        {
            return EmptyState::page_out_of_range(pagination.current(), pagination.total_pages());
        }
        if self.has_constraints() {
            EmptyState::no_results(&self.search_input)
        } else {
            EmptyState::NoData {
                message: self.config.empty_message.clone(),
            }
        }
    }

    fn cell_text(&self, index: usize, column: &Column) -> String {
        let value: Option<Value> = self.data[index].field(&column.data_index);
        column.cell_text(value.as_ref(), &self.config.placeholder)
    }

    fn table_view(&self, indices: &[usize]) -> TableView {
        let headers = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                title: column.title.clone(),
                align: column.align,
                width: column.width,
                sortable: column.sortable,
                sort: self
                    .sort
                    .as_ref()
                    .filter(|sort| sort.column == column.key)
                    .map(|sort| sort.direction),
            })
            .collect();

        let actions = self.actions.to_vec();
        let rows = indices
            .iter()
            .map(|&index| RowView {
                key: self.row_key(index),
                cells: self
                    .columns
                    .iter()
                    .map(|column| Cell {
                        text: self.cell_text(index, column),
                        align: column.align,
                    })
                    .collect(),
                actions: actions.clone(),
            })
            .collect();

        TableView {
            headers,
            rows,
            has_actions: !self.actions.is_empty(),
        }
    }

    fn card_view(&self, index: usize) -> CardView {
        let key = self.row_key(index);
        let field = |column: &Column| CardField {
            label: column.title.clone(),
            text: self.cell_text(index, column),
        };

        let title = self
            .columns
            .identity()
            .map(|column| self.cell_text(index, column))
            .unwrap_or_else(|| key.clone());
        let hidden_fields = self.columns.secondary().count();
        let expanded = self.expanded.contains(&key);

        CardView {
            title,
            actions: self.actions.to_vec(),
            primary: self.columns.primary().map(&field).collect(),
            secondary: if expanded {
                self.columns.secondary().map(&field).collect()
            } else {
                Vec::new()
            },
            disclosure: (hidden_fields > 0).then_some(expanded),
            hidden_fields,
            key,
        }
    }
}
