use std::time::{Duration, Instant};

use crate::query::{
    apply_updates, compose_location, join_filter_values, split_filter_values, split_location,
    QueryParams, DEFAULT_PAGE_INDEX, DEFAULT_PAGE_SIZE, PAGE_INDEX_PARAM, PAGE_SIZE_PARAM,
    SEARCH_PARAM, SORT_COLUMN_PARAM, SORT_DIR_PARAM,
};

/// Quiet period a free-text search must observe before it reaches the URL.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterableColumn {
    pub id: String,
    pub title: String,
    pub options: Vec<FilterOption>,
}

/// Column declarations: which ids share the global search box and which
/// carry a discrete multi-select filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableConfig {
    pub searchable: Vec<String>,
    pub filterable: Vec<FilterableColumn>,
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_searchable(mut self, id: impl Into<String>) -> Self {
        self.searchable.push(id.into());
        self
    }

    pub fn with_filterable(
        mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        options: Vec<FilterOption>,
    ) -> Self {
        self.filterable.push(FilterableColumn {
            id: id.into(),
            title: title.into(),
            options,
        });
        self
    }

    pub fn is_searchable(&self, id: &str) -> bool {
        self.searchable.iter().any(|column| column == id)
    }

    pub fn is_filterable(&self, id: &str) -> bool {
        self.filterable.iter().any(|column| column.id == id)
    }

    pub fn filterable_column(&self, id: &str) -> Option<&FilterableColumn> {
        self.filterable.iter().find(|column| column.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_param(self) -> &'static str {
        match self {
            SortDirection::Asc => "0",
            SortDirection::Desc => "1",
        }
    }

    /// Anything other than `"1"` sorts ascending.
    pub fn from_param(raw: &str) -> Self {
        if raw == "1" {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub column: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Free text shared by every searchable column.
    Text(String),
    /// Selected option values of a filterable column, in selection order.
    Select(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub id: String,
    pub value: FilterValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSearch {
    deadline: Instant,
}

/// Table view state reconciled with the location it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    config: TableConfig,
    path: String,
    query: QueryParams,
    page_index: u64,
    page_size: u64,
    sorting: Option<Sort>,
    column_filters: Vec<ColumnFilter>,
    page_count: Option<u64>,
    pending_search: Option<PendingSearch>,
}

impl TableState {
    /// Seeds table state from a `path?query` location.
    pub fn from_location(config: TableConfig, location: &str) -> Self {
        let (path, raw_query) = split_location(location);
        let query = QueryParams::parse(raw_query);

        let page_index = parse_page_number(query.get(PAGE_INDEX_PARAM), DEFAULT_PAGE_INDEX) - 1;
        let page_size = parse_page_number(query.get(PAGE_SIZE_PARAM), DEFAULT_PAGE_SIZE);
        let sorting = query.get(SORT_COLUMN_PARAM).map(|column| Sort {
            column: column.to_string(),
            direction: SortDirection::from_param(query.get(SORT_DIR_PARAM).unwrap_or("0")),
        });

        let mut column_filters = Vec::new();
        for (key, value) in query.pairs() {
            let seen = column_filters.iter().any(|f: &ColumnFilter| &f.id == key);
            if config.is_filterable(key) && !seen {
                let values = split_filter_values(value);
                if !values.is_empty() {
                    column_filters.push(ColumnFilter {
                        id: key.clone(),
                        value: FilterValue::Select(values),
                    });
                }
            }
        }

        let mut state = Self {
            config,
            path: path.to_string(),
            query,
            page_index,
            page_size,
            sorting,
            column_filters,
            page_count: None,
            pending_search: None,
        };
        if let Some(search) = state.query.get(SEARCH_PARAM).map(ToOwned::to_owned) {
            state.set_search_text(&search);
        }
        state
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// The canonical location this state was last synchronized to.
    pub fn location(&self) -> String {
        compose_location(&self.path, &self.query)
    }

    /// 0-based page index.
    pub fn page_index(&self) -> u64 {
        self.page_index
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn sorting(&self) -> Option<&Sort> {
        self.sorting.as_ref()
    }

    pub fn column_filters(&self) -> &[ColumnFilter] {
        &self.column_filters
    }

    pub fn filter(&self, id: &str) -> Option<&FilterValue> {
        self.column_filters
            .iter()
            .find(|filter| filter.id == id)
            .map(|filter| &filter.value)
    }

    /// Selected values of a filterable column.
    pub fn selection(&self, id: &str) -> Option<&[String]> {
        match self.filter(id) {
            Some(FilterValue::Select(values)) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// The shared free-text search, read from the first searchable column.
    pub fn search_text(&self) -> Option<&str> {
        self.config
            .searchable
            .iter()
            .find_map(|id| match self.filter(id) {
                Some(FilterValue::Text(text)) => Some(text.as_str()),
                _ => None,
            })
    }

    pub fn page_count(&self) -> Option<u64> {
        self.page_count
    }

    pub fn has_pending_search(&self) -> bool {
        self.pending_search.is_some()
    }

    pub(crate) fn set_pagination(&mut self, page_index: u64, page_size: u64) {
        self.page_index = page_index;
        self.page_size = page_size.max(1);
    }

    pub(crate) fn set_sorting(&mut self, sorting: Option<Sort>) {
        self.sorting = sorting;
    }

    pub(crate) fn set_page_count(&mut self, page_count: Option<u64>) {
        self.page_count = page_count;
    }

    /// Writes `text` into every searchable column's slot; empty text clears them.
    pub(crate) fn set_search_text(&mut self, text: &str) {
        let searchable = self.config.searchable.clone();
        for id in searchable {
            if text.is_empty() {
                self.remove_filter(&id);
            } else {
                self.upsert_filter(&id, FilterValue::Text(text.to_string()));
            }
        }
    }

    pub(crate) fn schedule_search(&mut self, text: &str, at: Instant) {
        self.set_search_text(text);
        self.pending_search = Some(PendingSearch {
            deadline: at + SEARCH_DEBOUNCE,
        });
    }

    /// Clears and reports a pending search whose quiet period has elapsed.
    pub(crate) fn take_due_search(&mut self, now: Instant) -> bool {
        match &self.pending_search {
            Some(pending) if now >= pending.deadline => {
                self.pending_search = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_selection(&mut self, id: &str, values: Vec<String>) {
        if values.is_empty() {
            self.remove_filter(id);
        } else {
            self.upsert_filter(id, FilterValue::Select(values));
        }
    }

    pub(crate) fn clear_filters(&mut self) {
        self.column_filters.clear();
        self.pending_search = None;
    }

    /// Composes the next query from the current state. The free-text search
    /// is only written when `flush_search` is set; otherwise the URL keeps
    /// whatever search it already carried.
    pub(crate) fn compose_query(&self, flush_search: bool) -> QueryParams {
        let mut params = self.query.clone();

        let mut updates: Vec<(&str, Option<String>)> = vec![
            (PAGE_INDEX_PARAM, Some(self.page_index.saturating_add(1).to_string())),
            (PAGE_SIZE_PARAM, Some(self.page_size.to_string())),
        ];
        match &self.sorting {
            Some(sort) => {
                updates.push((SORT_COLUMN_PARAM, Some(sort.column.clone())));
                updates.push((SORT_DIR_PARAM, Some(sort.direction.as_param().to_string())));
            }
            None => {
                updates.push((SORT_COLUMN_PARAM, None));
                updates.push((SORT_DIR_PARAM, None));
            }
        }
        apply_updates(&mut params, &updates);

        for id in &self.config.searchable {
            if self.filter(id).is_none() {
                params.delete(id);
            }
        }
        for column in &self.config.filterable {
            match self.selection(&column.id) {
                Some(values) if !values.is_empty() => {
                    params.set(&column.id, join_filter_values(values));
                }
                _ => params.delete(&column.id),
            }
        }

        if flush_search {
            match self.search_text() {
                Some(text) => params.set(SEARCH_PARAM, text),
                None => params.delete(SEARCH_PARAM),
            }
        }
        params
    }

    /// Adopts `query` as the synchronized location. Returns `false` when it
    /// matches what the state already points at.
    pub(crate) fn commit_query(&mut self, query: QueryParams) -> bool {
        if compose_location(&self.path, &query) == self.location() {
            return false;
        }
        self.query = query;
        true
    }

    fn upsert_filter(&mut self, id: &str, value: FilterValue) {
        match self.column_filters.iter_mut().find(|filter| filter.id == id) {
            Some(filter) => filter.value = value,
            None => self.column_filters.push(ColumnFilter {
                id: id.to_string(),
                value,
            }),
        }
    }

    fn remove_filter(&mut self, id: &str) {
        self.column_filters.retain(|filter| filter.id != id);
    }
}

// Absent falls back to `default`; present but non-numeric or below 1 falls back to 1.
fn parse_page_number(raw: Option<&str>, default: u64) -> u64 {
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(n) if n >= 1 => n as u64,
            _ => 1,
        },
    }
}
