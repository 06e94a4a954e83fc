use scraper_admin_core::{update, AutoScrapeState, Msg};

#[test]
fn update_is_noop() {
    let state = AutoScrapeState::new();
    let before = state.view();
    let (next, effects) = update(state, Msg::NoOp);

    assert_eq!(before, next.view());
    assert!(effects.is_empty());
}
