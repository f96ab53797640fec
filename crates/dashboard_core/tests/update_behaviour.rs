use std::sync::Once;

use dashboard_core::{update, ConnectionState, DashboardState, Msg, Snapshot};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn snapshot_with_queue(queue_size: u64) -> Snapshot {
    Snapshot {
        queue_size,
        ..Snapshot::default()
    }
}

#[test]
fn snapshot_replaces_previous_and_marks_dirty() {
    init_logging();
    let state = update(DashboardState::new(), Msg::StreamOpened);
    assert_eq!(state.connection(), ConnectionState::Open);

    let mut first = snapshot_with_queue(3);
    first.master_logged_in = true;
    let state = update(state, Msg::SnapshotReceived(Box::new(first)));
    let mut state = update(
        state,
        Msg::SnapshotReceived(Box::new(snapshot_with_queue(1))),
    );

    // No field of the first snapshot leaks into the second.
    let current = state.snapshot().expect("snapshot");
    assert_eq!(current.queue_size, 1);
    assert!(!current.master_logged_in);
    assert_eq!(state.received(), 2);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn skipped_message_is_counted_without_dirtying() {
    init_logging();
    let state = update(
        DashboardState::new(),
        Msg::SnapshotReceived(Box::new(snapshot_with_queue(2))),
    );
    let mut state = state;
    assert!(state.consume_dirty());

    let mut state = update(
        state,
        Msg::MessageSkipped {
            reason: "expected value at line 1 column 1".to_string(),
        },
    );
    assert!(!state.consume_dirty());
    assert_eq!(state.skipped(), 1);
    assert_eq!(state.snapshot().map(|s| s.queue_size), Some(2));
    assert_eq!(
        state.status_line(),
        "Stream: Connecting | Updates: 1 | Skipped: 1 | Last error: expected value at line 1 column 1"
    );
}

#[test]
fn stream_closed_keeps_last_snapshot() {
    init_logging();
    let state = update(DashboardState::new(), Msg::StreamOpened);
    let state = update(
        state,
        Msg::SnapshotReceived(Box::new(snapshot_with_queue(4))),
    );
    let state = update(
        state,
        Msg::StreamClosed {
            reason: Some("network error".to_string()),
        },
    );

    assert_eq!(state.connection(), ConnectionState::Closed);
    assert_eq!(state.last_error(), Some("network error"));
    assert_eq!(state.snapshot().map(|s| s.queue_size), Some(4));
}
