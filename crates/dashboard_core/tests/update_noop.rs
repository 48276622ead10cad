use dashboard_core::{update, AppState, Msg, TableConfig};

#[test]
fn update_is_noop() {
    let state = AppState::new(TableConfig::new(), "/dashboard/orders?pageIndex=3");
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
