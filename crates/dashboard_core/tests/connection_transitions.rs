use dashboard_core::{update, ConnectionState, DashboardState, Msg};
use pretty_assertions::assert_eq;

#[test]
fn repeated_open_leaves_state_unchanged_and_clean() {
    let opened = update(DashboardState::new(), Msg::StreamOpened);
    let mut again = update(opened.clone(), Msg::StreamOpened);
    assert_eq!(again, opened);
    assert_eq!(again.connection(), ConnectionState::Open);
    assert!(!again.consume_dirty());
}

#[test]
fn clean_close_keeps_previous_error() {
    let state = update(
        DashboardState::new(),
        Msg::MessageSkipped {
            reason: "bad payload".to_string(),
        },
    );
    let mut state = update(state, Msg::StreamClosed { reason: None });
    assert_eq!(state.connection(), ConnectionState::Closed);
    assert_eq!(state.last_error(), Some("bad payload"));
    assert!(!state.consume_dirty());
}
