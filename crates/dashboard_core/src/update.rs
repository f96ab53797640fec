use crate::{ConnectionState, DashboardState, Msg};

/// Pure update function: applies a message to state.
///
/// A received snapshot replaces the previous one wholesale; fields are never
/// merged across snapshots.
pub fn update(mut state: DashboardState, msg: Msg) -> DashboardState {
    match msg {
        Msg::StreamOpened => state.set_connection(ConnectionState::Open),
        Msg::SnapshotReceived(snapshot) => state.replace_snapshot(*snapshot),
        Msg::MessageSkipped { reason } => state.record_skip(reason),
        Msg::StreamClosed { reason } => {
            state.set_connection(ConnectionState::Closed);
            state.set_last_error(reason);
        }
    }
    state
}
