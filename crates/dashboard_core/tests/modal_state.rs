use dashboard_core::{update, AppState, Modal, Msg, TableConfig};

fn state() -> AppState {
    AppState::new(TableConfig::new(), "/dashboard/bakeries")
}

#[test]
fn opening_a_modal_replaces_the_current_one() {
    let (state, effects) = update(
        state(),
        Msg::ModalOpened(Modal::BakeryDetail {
            bakery_id: "bk-1".to_string(),
        }),
    );
    assert!(effects.is_empty());
    assert!(state.modal().is_open());

    let (state, _) = update(
        state,
        Msg::ModalOpened(Modal::ConfirmDelete {
            resource: "cakes".to_string(),
            id: "ck-9".to_string(),
        }),
    );
    assert_eq!(
        state.view().modal,
        Modal::ConfirmDelete {
            resource: "cakes".to_string(),
            id: "ck-9".to_string(),
        }
    );
}

#[test]
fn closing_resets_to_none_and_only_marks_dirty_once() {
    let (state, _) = update(
        state(),
        Msg::ModalOpened(Modal::PromotionForm { promotion_id: None }),
    );
    let (mut state, effects) = update(state, Msg::ModalClosed);
    assert!(effects.is_empty());
    assert_eq!(*state.modal(), Modal::None);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::ModalClosed);
    assert!(!state.consume_dirty());
}
