//! Commands the renderer issues against the page, addressed by element id.

use crate::action::ConsoleAction;

/// Page elements the renderer writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    TaskStatus,
    TaskDetail,
    TaskSubdetail,
    TaskTiming,
    QueueDetail,
    QueueList,
    NextBackup,
    CurrentTime,
    LogsList,
    LoginStatusDot,
    LoginStatusText,
    CookieCheckTime,
    ConsolesBody,
}

impl ElementId {
    /// DOM id of the element in the dashboard page.
    pub fn dom_id(self) -> &'static str {
        match self {
            ElementId::TaskStatus => "task-status",
            ElementId::TaskDetail => "task-detail",
            ElementId::TaskSubdetail => "task-subdetail",
            ElementId::TaskTiming => "task-timing",
            ElementId::QueueDetail => "queue-detail",
            ElementId::QueueList => "queue-list",
            ElementId::NextBackup => "next-backup",
            ElementId::CurrentTime => "current-time",
            ElementId::LogsList => "logs-ul",
            ElementId::LoginStatusDot => "login-status-dot",
            ElementId::LoginStatusText => "login-status-text",
            ElementId::CookieCheckTime => "cookie-check-time",
            ElementId::ConsolesBody => "consoles-tbody",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub text: String,
    pub class: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    pub class: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleToggle {
    pub label: &'static str,
    pub class: &'static str,
    pub action: ConsoleAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    /// Single placeholder cell spanning `colspan` columns.
    Empty { colspan: u32, text: &'static str },
    Console {
        cells: Vec<TableCell>,
        schedule: ScheduleToggle,
        actions: Vec<ConsoleAction>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    SetText {
        element: ElementId,
        text: String,
    },
    SetClass {
        element: ElementId,
        class: &'static str,
    },
    /// Clears the list and appends `items` in order.
    PopulateList {
        element: ElementId,
        items: Vec<ListItem>,
    },
    /// Clears the table body and appends `rows` in order.
    PopulateTable {
        element: ElementId,
        rows: Vec<TableRow>,
    },
}

impl SurfaceCommand {
    pub fn element(&self) -> ElementId {
        match self {
            SurfaceCommand::SetText { element, .. }
            | SurfaceCommand::SetClass { element, .. }
            | SurfaceCommand::PopulateList { element, .. }
            | SurfaceCommand::PopulateTable { element, .. } => *element,
        }
    }
}

/// Something that can apply render commands, such as a page document.
pub trait Surface {
    fn apply(&mut self, command: SurfaceCommand);

    fn apply_all(&mut self, commands: Vec<SurfaceCommand>) {
        for command in commands {
            self.apply(command);
        }
    }
}
