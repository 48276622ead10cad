use crate::{FilterValue, Modal, Sort, TableState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub table: TableViewModel,
    pub modal: Modal,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableViewModel {
    /// 1-based, as shown to the user.
    pub page: u64,
    pub page_size: u64,
    pub page_count: Option<u64>,
    pub can_previous: bool,
    pub can_next: bool,
    pub sort: Option<Sort>,
    pub search: String,
    pub selections: Vec<SelectionView>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    pub column: String,
    pub values: Vec<String>,
}

impl TableViewModel {
    pub fn from_state(state: &TableState) -> Self {
        let page = state.page_index().saturating_add(1);
        let can_next = match state.page_count() {
            Some(count) => page < count,
            None => false,
        };
        let selections = state
            .column_filters()
            .iter()
            .filter_map(|filter| match &filter.value {
                FilterValue::Select(values) => Some(SelectionView {
                    column: filter.id.clone(),
                    values: values.clone(),
                }),
                FilterValue::Text(_) => None,
            })
            .collect();

        Self {
            page,
            page_size: state.page_size(),
            page_count: state.page_count(),
            can_previous: state.page_index() > 0,
            can_next,
            sort: state.sorting().cloned(),
            search: state.search_text().unwrap_or_default().to_string(),
            selections,
            url: state.location(),
        }
    }
}
