use crate::action::ConsoleAction;
use crate::{ConsoleEntry, Snapshot};

pub const TASK_RUNNING_FALLBACK: &str = "Task running";
pub const TASK_WORKING: &str = "Working...";
pub const QUEUED_DETAIL: &str = "Tasks are queued and waiting.";
pub const IDLE_DETAIL: &str = "No task is running.";
pub const QUEUE_EMPTY: &str = "Queue is empty.";
pub const LOGS_EMPTY: &str = "No logs yet. Activity will appear here once tasks run.";
pub const LOGIN_VALID: &str = "Cookies are valid.";
pub const LOGIN_MISSING: &str = "Not logged in. Please do a manual server-side login.";
pub const CONSOLES_EMPTY: &str = "No consoles yet. Add one below or import a JSON list.";
pub const NEXT_BACKUP_FALLBACK: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    Running,
    Queued,
    Idle,
}

impl TaskPhase {
    pub fn label(self) -> &'static str {
        match self {
            TaskPhase::Running => "Running",
            TaskPhase::Queued => "Queued",
            TaskPhase::Idle => "Idle",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            TaskPhase::Running => Tone::Success,
            TaskPhase::Queued => Tone::Warning,
            TaskPhase::Idle => Tone::Neutral,
        }
    }
}

/// Visual styling of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatusView {
    pub phase: TaskPhase,
    pub detail: String,
    pub subdetail: String,
    pub timing: String,
}

/// One entry of a rebuilt list region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Item(String),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueView {
    pub detail: String,
    pub entries: Vec<ListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub logged_in: bool,
    pub text: &'static str,
    pub last_checked: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleRowView {
    pub id: String,
    pub name: String,
    pub backup_url: String,
    pub status: String,
    pub time: String,
    pub excluded: bool,
    pub toggle: ConsoleAction,
    pub actions: [ConsoleAction; 4],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardViewModel {
    pub task: TaskStatusView,
    pub queue: QueueView,
    pub logs: Vec<ListEntry>,
    pub login: LoginView,
    pub consoles: Vec<ConsoleRowView>,
    pub next_backup: String,
    pub current_time: String,
}

impl DashboardViewModel {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            task: task_status(snapshot),
            queue: queue(snapshot),
            logs: logs(snapshot),
            login: login(snapshot),
            consoles: snapshot.consoles.iter().map(ConsoleRowView::from_entry).collect(),
            next_backup: non_empty_or(&snapshot.next_backup_time_str, NEXT_BACKUP_FALLBACK),
            current_time: snapshot.current_time_local.clone(),
        }
    }
}

impl ConsoleRowView {
    pub fn from_entry(entry: &ConsoleEntry) -> Self {
        let id = entry.id.as_str();
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            backup_url: entry.backup_url.clone(),
            status: non_empty_or(&entry.status, "None"),
            time: non_empty_or(&entry.time, "Never"),
            excluded: entry.excluded,
            toggle: ConsoleAction::ToggleSchedule(id.to_owned()),
            actions: [
                ConsoleAction::ManualBackup(id.to_owned()),
                ConsoleAction::Remove(id.to_owned()),
                ConsoleAction::DownloadLatest(id.to_owned()),
                ConsoleAction::ViewHistory(id.to_owned()),
            ],
        }
    }

    pub fn schedule_label(&self) -> &'static str {
        if self.excluded {
            "Excluded"
        } else {
            "Included"
        }
    }
}

fn task_status(snapshot: &Snapshot) -> TaskStatusView {
    let task = &snapshot.current_task;
    let phase = if task.running {
        TaskPhase::Running
    } else if snapshot.queue_size > 0 {
        TaskPhase::Queued
    } else {
        TaskPhase::Idle
    };

    let (detail, subdetail) = match phase {
        TaskPhase::Running => {
            let name = task.effective_name();
            let subdetail = if !task.step.is_empty() && task.step != name {
                task.step.clone()
            } else {
                TASK_WORKING.to_string()
            };
            (non_empty_or(name, TASK_RUNNING_FALLBACK), subdetail)
        }
        TaskPhase::Queued => (QUEUED_DETAIL.to_string(), String::new()),
        TaskPhase::Idle => (IDLE_DETAIL.to_string(), String::new()),
    };

    let timing = match (&task.elapsed_seconds, task.running) {
        (Some(elapsed), true) => format!("Elapsed: {elapsed}s"),
        _ => String::new(),
    };

    TaskStatusView {
        phase,
        detail,
        subdetail,
        timing,
    }
}

fn queue(snapshot: &Snapshot) -> QueueView {
    let running = snapshot.current_task.running;
    let mut detail = if running {
        format!(
            "Started: {}",
            non_empty_or(&snapshot.current_task.start_time_local, "Unknown")
        )
    } else {
        format!("Queue size: {}", snapshot.queue_size)
    };
    if snapshot.scheduled_queue_size > 0 {
        detail.push_str(&format!(
            " | Scheduled queue: position {}/{}",
            snapshot.scheduled_queue_position, snapshot.scheduled_queue_size
        ));
    }

    // Items are shown as given, even when their count disagrees with queue_size.
    let entries = if !snapshot.queue_items.is_empty() {
        snapshot
            .queue_items
            .iter()
            .cloned()
            .map(ListEntry::Item)
            .collect()
    } else if !running {
        vec![ListEntry::Placeholder(QUEUE_EMPTY)]
    } else {
        Vec::new()
    };

    QueueView { detail, entries }
}

fn logs(snapshot: &Snapshot) -> Vec<ListEntry> {
    if snapshot.logs.is_empty() {
        return vec![ListEntry::Placeholder(LOGS_EMPTY)];
    }
    snapshot
        .logs
        .iter()
        .map(|entry| ListEntry::Item(format!("[{}] - {}", entry.timestamp, entry.message)))
        .collect()
}

fn login(snapshot: &Snapshot) -> LoginView {
    let logged_in = snapshot.master_logged_in;
    let last_checked = if snapshot.last_cookie_check_local.is_empty() {
        String::new()
    } else {
        format!("Last checked: {}", snapshot.last_cookie_check_local)
    };
    LoginView {
        logged_in,
        text: if logged_in { LOGIN_VALID } else { LOGIN_MISSING },
        last_checked,
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
