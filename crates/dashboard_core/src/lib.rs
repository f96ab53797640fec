//! Dashboard core: snapshot model, pure state machine and the change-gated
//! renderer that turns snapshots into page updates.
mod action;
mod document;
mod msg;
mod render;
mod snapshot;
mod state;
mod surface;
mod update;
mod view_model;

pub use action::{ConsoleAction, FormMethod};
pub use document::{Document, ElementState, RenderedRow};
pub use msg::Msg;
pub use render::{ConsoleFingerprint, DashboardRenderer, CONSOLE_COLUMNS};
pub use snapshot::{ConsoleEntry, CurrentTask, LogEntry, Snapshot};
pub use state::{ConnectionState, DashboardState};
pub use surface::{
    ElementId, ListItem, ScheduleToggle, Surface, SurfaceCommand, TableCell, TableRow,
};
pub use update::update;
pub use view_model::{
    ConsoleRowView, DashboardViewModel, ListEntry, LoginView, QueueView, TaskPhase,
    TaskStatusView, Tone, CONSOLES_EMPTY, IDLE_DETAIL, LOGIN_MISSING, LOGIN_VALID, LOGS_EMPTY,
    NEXT_BACKUP_FALLBACK, QUEUED_DETAIL, QUEUE_EMPTY, TASK_RUNNING_FALLBACK, TASK_WORKING,
};
