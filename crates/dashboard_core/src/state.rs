use crate::view_model::{AppViewModel, TableViewModel};
use crate::{Modal, TableConfig, TableState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    table: TableState,
    modal: Modal,
    dirty: bool,
}

impl AppState {
    pub fn new(config: TableConfig, location: &str) -> Self {
        Self {
            table: TableState::from_location(config, location),
            modal: Modal::None,
            dirty: false,
        }
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            table: TableViewModel::from_state(&self.table),
            modal: self.modal.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }

    pub(crate) fn set_modal(&mut self, modal: Modal) {
        self.modal = modal;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
