//! Plain-text view of the rendered page for a terminal.

use std::fmt::Write;

use dashboard_core::{Document, ElementId, TableRow};

pub fn page_text(document: &Document, status_line: &str, rendered_at: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Backup Dashboard ({rendered_at}) ===");
    let _ = writeln!(out, "{status_line}");
    let _ = writeln!(
        out,
        "Next backup: {} | {}",
        document.text(ElementId::NextBackup),
        document.text(ElementId::CurrentTime)
    );

    let _ = writeln!(
        out,
        "\n[{}] {}",
        document.text(ElementId::TaskStatus),
        document.text(ElementId::TaskDetail)
    );
    push_non_empty(&mut out, document.text(ElementId::TaskSubdetail));
    push_non_empty(&mut out, document.text(ElementId::TaskTiming));

    let _ = writeln!(out, "\nQueue: {}", document.text(ElementId::QueueDetail));
    for item in document.items(ElementId::QueueList) {
        let _ = writeln!(out, "  - {}", item.text);
    }

    let login_dot = if document.class(ElementId::LoginStatusDot).ends_with("green") {
        "ok"
    } else {
        "!!"
    };
    let _ = writeln!(
        out,
        "\nLogin [{login_dot}] {}",
        document.text(ElementId::LoginStatusText)
    );
    push_non_empty(&mut out, document.text(ElementId::CookieCheckTime));

    let _ = writeln!(out, "\nConsoles:");
    for rendered in document.rows(ElementId::ConsolesBody) {
        match &rendered.row {
            TableRow::Empty { text, .. } => {
                let _ = writeln!(out, "  {text}");
            }
            TableRow::Console {
                cells, schedule, ..
            } => {
                let columns: Vec<&str> = cells.iter().map(|cell| cell.text.as_str()).collect();
                let _ = writeln!(out, "  {} | {}", columns.join(" | "), schedule.label);
            }
        }
    }

    let _ = writeln!(out, "\nLogs:");
    for item in document.items(ElementId::LogsList) {
        let _ = writeln!(out, "  {}", item.text);
    }
    out
}

fn push_non_empty(out: &mut String, line: &str) {
    if !line.is_empty() {
        let _ = writeln!(out, "  {line}");
    }
}
