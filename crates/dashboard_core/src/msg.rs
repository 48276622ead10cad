use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Location changed outside the table (first mount, back/forward).
    LocationChanged(String),
    /// User picked a page or page size. `page_index` is 0-based.
    PaginationChanged { page_index: u64, page_size: u64 },
    NextPage,
    PreviousPage,
    /// User toggled a column sort; `None` clears sorting.
    SortingChanged(Option<crate::Sort>),
    /// User typed into the global search box.
    SearchInput { value: String, at: Instant },
    /// User changed the selection of a filterable column.
    FilterSelected { column: String, values: Vec<String> },
    /// User reset every column filter, including the search box.
    FiltersCleared,
    /// Server reported the page count for the current query.
    PageCountChanged(Option<u64>),
    ModalOpened(crate::Modal),
    ModalClosed,
    /// Timer tick; flushes a search whose debounce window has elapsed.
    Tick { now: Instant },
    /// Fallback for placeholder wiring.
    NoOp,
}
