use crate::{AppState, Effect, Modal, Msg, TableState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::LocationChanged(location) => {
            let config = state.table().config().clone();
            *state.table_mut() = TableState::from_location(config, &location);
            state.mark_dirty();
            Vec::new()
        }
        Msg::PaginationChanged {
            page_index,
            page_size,
        } => {
            state.table_mut().set_pagination(page_index, page_size);
            state.mark_dirty();
            navigate(&mut state, false)
        }
        Msg::NextPage => {
            let table = state.table();
            let next = table.page_index().saturating_add(1);
            // Without a known page count there is nothing to bound against.
            if table.page_count().is_some_and(|count| next < count) {
                let page_size = table.page_size();
                state.table_mut().set_pagination(next, page_size);
                state.mark_dirty();
                navigate(&mut state, false)
            } else {
                Vec::new()
            }
        }
        Msg::PreviousPage => {
            let table = state.table();
            if table.page_index() > 0 {
                let previous = table.page_index() - 1;
                let page_size = table.page_size();
                state.table_mut().set_pagination(previous, page_size);
                state.mark_dirty();
                navigate(&mut state, false)
            } else {
                Vec::new()
            }
        }
        Msg::SortingChanged(sorting) => {
            state.table_mut().set_sorting(sorting);
            state.mark_dirty();
            navigate(&mut state, false)
        }
        Msg::SearchInput { value, at } => {
            // The input reflects every keystroke; the URL waits for the
            // debounce window to close on a later tick.
            state.table_mut().schedule_search(value.trim(), at);
            state.mark_dirty();
            Vec::new()
        }
        Msg::FilterSelected { column, values } => {
            if !state.table().config().is_filterable(&column) {
                return (state, Vec::new());
            }
            state.table_mut().set_selection(&column, values);
            state.mark_dirty();
            navigate(&mut state, false)
        }
        Msg::FiltersCleared => {
            state.table_mut().clear_filters();
            state.mark_dirty();
            navigate(&mut state, true)
        }
        Msg::PageCountChanged(page_count) => {
            if state.table().page_count() != page_count {
                state.table_mut().set_page_count(page_count);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ModalOpened(modal) => {
            state.set_modal(modal);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ModalClosed => {
            if state.modal().is_open() {
                state.set_modal(Modal::None);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick { now } => {
            if state.table_mut().take_due_search(now) {
                navigate(&mut state, true)
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn navigate(state: &mut AppState, flush_search: bool) -> Vec<Effect> {
    let query = state.table().compose_query(flush_search);
    if state.table_mut().commit_query(query) {
        vec![Effect::Navigate {
            url: state.table().location(),
            scroll: false,
        }]
    } else {
        Vec::new()
    }
}
