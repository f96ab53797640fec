use crate::Snapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The push channel is connected.
    StreamOpened,
    /// A decoded status update arrived.
    SnapshotReceived(Box<Snapshot>),
    /// An inbound message could not be decoded and was dropped.
    MessageSkipped { reason: String },
    /// The push channel ended; `reason` is set when it ended on an error.
    StreamClosed { reason: Option<String> },
}
