//! Dashboard core: pure table-state synchronization and view-model helpers.
mod effect;
mod modal;
mod msg;
mod order_status;
pub mod query;
mod state;
mod table;
mod update;
mod view_model;

pub use effect::Effect;
pub use modal::Modal;
pub use msg::Msg;
pub use order_status::{order_progress, OrderStatus, StatusStep, StepState, ORDER_FLOW};
pub use query::QueryParams;
pub use state::AppState;
pub use table::{
    ColumnFilter, FilterOption, FilterValue, FilterableColumn, Sort, SortDirection, TableConfig,
    TableState, SEARCH_DEBOUNCE,
};
pub use update::update;
pub use view_model::{AppViewModel, SelectionView, TableViewModel};
