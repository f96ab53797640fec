use crate::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    snapshot: Option<Snapshot>,
    connection: ConnectionState,
    received: u64,
    skipped: u64,
    last_error: Option<String>,
    dirty: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest snapshot; the one the page currently reflects once rendered.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// One-line summary of the connection for a status bar.
    pub fn status_line(&self) -> String {
        let connection = match self.connection {
            ConnectionState::Connecting => "Connecting",
            ConnectionState::Open => "Live",
            ConnectionState::Closed => "Closed",
        };
        let mut line = format!(
            "Stream: {} | Updates: {} | Skipped: {}",
            connection, self.received, self.skipped
        );
        if let Some(err) = &self.last_error {
            line.push_str(&format!(" | Last error: {err}"));
        }
        line
    }

    /// Returns whether a new snapshot arrived since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
        self.received += 1;
        self.dirty = true;
    }

    pub(crate) fn record_skip(&mut self, reason: String) {
        self.skipped += 1;
        self.last_error = Some(reason);
    }

    pub(crate) fn set_connection(&mut self, connection: ConnectionState) {
        self.connection = connection;
    }

    pub(crate) fn set_last_error(&mut self, reason: Option<String>) {
        if reason.is_some() {
            self.last_error = reason;
        }
    }
}
