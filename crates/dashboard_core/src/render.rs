use dashboard_logging::{dash_render_debug, dash_warn, set_render_pass};

use crate::surface::{ListItem, ScheduleToggle, Surface, SurfaceCommand, TableCell, TableRow};
use crate::view_model::{ConsoleRowView, DashboardViewModel, ListEntry, Tone, CONSOLES_EMPTY};
use crate::{ConsoleEntry, ElementId, Snapshot};

/// Number of columns in the console table.
pub const CONSOLE_COLUMNS: u32 = 6;

const EMPTY_STATE_CLASS: &str = "empty-state";

/// Canonical structural key of a console list. Two lists have the same
/// fingerprint iff they are equal field by field, in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleFingerprint(String);

impl ConsoleFingerprint {
    /// Ids are normalised to strings while decoding, so a console whose id
    /// arrives as `1` in one update and `"1"` in the next keeps the same
    /// fingerprint and does not trigger a table rebuild.
    pub fn of(consoles: &[ConsoleEntry]) -> Self {
        match serde_json::to_string(consoles) {
            Ok(key) => Self(key),
            Err(err) => {
                // Plain string fields cannot fail to serialize; fall back to Debug.
                dash_warn!("Console fingerprint serialization failed: {}", err);
                Self(format!("{consoles:?}"))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Turns snapshots into surface commands.
///
/// Every region except the console table is rewritten on every pass. The
/// console table is only rebuilt when its fingerprint differs from the one
/// this renderer rendered last.
#[derive(Debug, Default)]
pub struct DashboardRenderer {
    last_consoles: Option<ConsoleFingerprint>,
    passes: u64,
}

impl DashboardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed render passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn last_consoles(&self) -> Option<&ConsoleFingerprint> {
        self.last_consoles.as_ref()
    }

    /// Runs one full render pass and returns the commands it produced.
    pub fn render(&mut self, snapshot: &Snapshot) -> Vec<SurfaceCommand> {
        self.passes += 1;
        set_render_pass(self.passes);

        let view = DashboardViewModel::from_snapshot(snapshot);
        let mut cmds = Vec::with_capacity(16);
        render_task_status(&view, &mut cmds);
        render_queue(&view, &mut cmds);
        render_header(&view, &mut cmds);
        render_logs(&view, &mut cmds);
        render_login(&view, &mut cmds);

        let fingerprint = ConsoleFingerprint::of(&snapshot.consoles);
        if self.last_consoles.as_ref() == Some(&fingerprint) {
            dash_render_debug!("console table unchanged, skipping rebuild");
        } else {
            dash_render_debug!("rebuilding console table ({} rows)", view.consoles.len());
            self.last_consoles = Some(fingerprint);
            cmds.push(SurfaceCommand::PopulateTable {
                element: ElementId::ConsolesBody,
                rows: console_rows(&view.consoles),
            });
        }

        cmds
    }

    /// Renders `snapshot` straight into `surface`.
    pub fn render_into<S: Surface + ?Sized>(&mut self, snapshot: &Snapshot, surface: &mut S) {
        let commands = self.render(snapshot);
        surface.apply_all(commands);
    }
}

fn render_task_status(view: &DashboardViewModel, cmds: &mut Vec<SurfaceCommand>) {
    let task = &view.task;
    cmds.push(set_text(ElementId::TaskStatus, task.phase.label()));
    cmds.push(SurfaceCommand::SetClass {
        element: ElementId::TaskStatus,
        class: badge_class(task.phase.tone()),
    });
    cmds.push(set_text(ElementId::TaskDetail, &task.detail));
    cmds.push(set_text(ElementId::TaskSubdetail, &task.subdetail));
    cmds.push(set_text(ElementId::TaskTiming, &task.timing));
}

fn render_queue(view: &DashboardViewModel, cmds: &mut Vec<SurfaceCommand>) {
    cmds.push(set_text(ElementId::QueueDetail, &view.queue.detail));
    cmds.push(SurfaceCommand::PopulateList {
        element: ElementId::QueueList,
        items: list_items(&view.queue.entries),
    });
}

fn render_header(view: &DashboardViewModel, cmds: &mut Vec<SurfaceCommand>) {
    cmds.push(set_text(ElementId::NextBackup, &view.next_backup));
    cmds.push(set_text(ElementId::CurrentTime, &view.current_time));
}

fn render_logs(view: &DashboardViewModel, cmds: &mut Vec<SurfaceCommand>) {
    cmds.push(SurfaceCommand::PopulateList {
        element: ElementId::LogsList,
        items: list_items(&view.logs),
    });
}

fn render_login(view: &DashboardViewModel, cmds: &mut Vec<SurfaceCommand>) {
    let login = &view.login;
    cmds.push(SurfaceCommand::SetClass {
        element: ElementId::LoginStatusDot,
        class: if login.logged_in {
            "status-dot green"
        } else {
            "status-dot red"
        },
    });
    cmds.push(set_text(ElementId::LoginStatusText, login.text));
    cmds.push(set_text(ElementId::CookieCheckTime, &login.last_checked));
}

fn console_rows(consoles: &[ConsoleRowView]) -> Vec<TableRow> {
    if consoles.is_empty() {
        return vec![TableRow::Empty {
            colspan: CONSOLE_COLUMNS,
            text: CONSOLES_EMPTY,
        }];
    }
    consoles.iter().map(console_row).collect()
}

fn console_row(console: &ConsoleRowView) -> TableRow {
    TableRow::Console {
        cells: vec![
            cell(&console.name, None),
            cell(&console.backup_url, Some("console-url")),
            cell(&console.status, Some("console-status")),
            cell(&console.time, None),
        ],
        schedule: ScheduleToggle {
            label: console.schedule_label(),
            class: if console.excluded {
                "console-schedule is-excluded"
            } else {
                "console-schedule is-included"
            },
            action: console.toggle.clone(),
        },
        actions: console.actions.to_vec(),
    }
}

fn list_items(entries: &[ListEntry]) -> Vec<ListItem> {
    entries
        .iter()
        .map(|entry| match entry {
            ListEntry::Item(text) => ListItem {
                text: text.clone(),
                class: None,
            },
            ListEntry::Placeholder(text) => ListItem {
                text: (*text).to_string(),
                class: Some(EMPTY_STATE_CLASS),
            },
        })
        .collect()
}

fn badge_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Success => "badge success",
        Tone::Warning => "badge warning",
        Tone::Neutral => "badge",
    }
}

fn cell(text: &str, class: Option<&'static str>) -> TableCell {
    TableCell {
        text: text.to_string(),
        class,
    }
}

fn set_text(element: ElementId, text: &str) -> SurfaceCommand {
    SurfaceCommand::SetText {
        element,
        text: text.to_string(),
    }
}
