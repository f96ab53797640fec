use std::sync::Once;

use dashboard_core::{
    ConsoleAction, ConsoleEntry, ConsoleFingerprint, DashboardRenderer, Document, ElementId,
    FormMethod, Snapshot, SurfaceCommand, TableRow, CONSOLES_EMPTY, CONSOLE_COLUMNS,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn console(id: &str, name: &str) -> ConsoleEntry {
    ConsoleEntry {
        id: id.to_string(),
        name: name.to_string(),
        backup_url: format!("https://{name}.example"),
        status: "Success".to_string(),
        time: "2026-10-17 22:00:00".to_string(),
        excluded: false,
    }
}

fn with_consoles(consoles: Vec<ConsoleEntry>) -> Snapshot {
    Snapshot {
        consoles,
        ..Snapshot::default()
    }
}

fn table_commands(commands: &[SurfaceCommand]) -> usize {
    commands
        .iter()
        .filter(|cmd| cmd.element() == ElementId::ConsolesBody)
        .count()
}

#[test]
fn identical_console_list_is_not_rebuilt() {
    init_logging();
    let mut renderer = DashboardRenderer::new();
    let mut document = Document::new();
    let mut snapshot = with_consoles(vec![console("1", "office"), console("2", "lab")]);

    renderer.render_into(&snapshot, &mut document);
    let rows_before = document.rows(ElementId::ConsolesBody).to_vec();
    assert_eq!(document.mutations(ElementId::ConsolesBody), 1);

    // Other regions change every tick; the table must not.
    snapshot.queue_size = 9;
    snapshot.current_time_local = "later".to_string();
    let commands = renderer.render(&snapshot);
    assert_eq!(table_commands(&commands), 0);
    assert!(!commands.is_empty());

    renderer.render_into(&snapshot, &mut document);
    assert_eq!(document.mutations(ElementId::ConsolesBody), 1);
    assert_eq!(document.rows(ElementId::ConsolesBody), rows_before.as_slice());
}

#[test]
fn numeric_and_string_ids_share_a_fingerprint() {
    init_logging();
    let numeric = Snapshot::from_json(r#"{"consoles":[{"id":1,"name":"office"}]}"#).expect("decode");
    let text = Snapshot::from_json(r#"{"consoles":[{"id":"1","name":"office"}]}"#).expect("decode");
    assert_eq!(
        ConsoleFingerprint::of(&numeric.consoles),
        ConsoleFingerprint::of(&text.consoles)
    );

    let mut renderer = DashboardRenderer::new();
    assert_eq!(table_commands(&renderer.render(&numeric)), 1);
    assert_eq!(table_commands(&renderer.render(&text)), 0);
}

#[test]
fn any_single_field_change_rebuilds() {
    init_logging();
    let base = vec![console("1", "office"), console("2", "lab")];
    let mutations: [fn(&mut Vec<ConsoleEntry>); 8] = [
        |c| c[0].id = "9".to_string(),
        |c| c[0].name = "renamed".to_string(),
        |c| c[1].backup_url = String::new(),
        |c| c[1].status = "Failed".to_string(),
        |c| c[0].time = String::new(),
        |c| c[1].excluded = true,
        |c| c.swap(0, 1),
        |c| {
            c.pop();
        },
    ];

    for mutate in mutations {
        let mut renderer = DashboardRenderer::new();
        let first = renderer.render(&with_consoles(base.clone()));
        assert_eq!(table_commands(&first), 1);

        let mut changed = base.clone();
        mutate(&mut changed);
        let second = renderer.render(&with_consoles(changed));
        assert_eq!(table_commands(&second), 1);
    }
}

#[test]
fn rebuild_replaces_rows_with_new_generation() {
    init_logging();
    let mut renderer = DashboardRenderer::new();
    let mut document = Document::new();

    renderer.render_into(&with_consoles(vec![console("1", "office")]), &mut document);
    let first_generation = document.rows(ElementId::ConsolesBody)[0].generation;

    let mut changed = console("1", "office");
    changed.status = "Failed".to_string();
    renderer.render_into(&with_consoles(vec![changed]), &mut document);
    let rows = document.rows(ElementId::ConsolesBody);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].generation > first_generation);
}

#[test]
fn first_pass_renders_empty_state_row() {
    init_logging();
    let mut renderer = DashboardRenderer::new();
    let mut document = Document::new();
    renderer.render_into(&Snapshot::default(), &mut document);

    let rows = document.rows(ElementId::ConsolesBody);
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].row,
        TableRow::Empty {
            colspan: CONSOLE_COLUMNS,
            text: CONSOLES_EMPTY,
        }
    );

    renderer.render_into(&Snapshot::default(), &mut document);
    assert_eq!(document.mutations(ElementId::ConsolesBody), 1);
}

#[test]
fn row_columns_and_defaults() {
    init_logging();
    let entry = ConsoleEntry {
        id: "a".to_string(),
        name: "X".to_string(),
        backup_url: String::new(),
        status: String::new(),
        time: String::new(),
        excluded: true,
    };
    let commands = DashboardRenderer::new().render(&with_consoles(vec![entry]));
    let rows = commands
        .into_iter()
        .find_map(|cmd| match cmd {
            SurfaceCommand::PopulateTable { rows, .. } => Some(rows),
            _ => None,
        })
        .expect("table command");

    let TableRow::Console {
        cells,
        schedule,
        actions,
    } = &rows[0]
    else {
        panic!("expected a console row, got {:?}", rows[0]);
    };
    let texts: Vec<&str> = cells.iter().map(|cell| cell.text.as_str()).collect();
    assert_eq!(texts, vec!["X", "", "None", "Never"]);
    assert_eq!(schedule.label, "Excluded");
    assert_eq!(schedule.class, "console-schedule is-excluded");
    assert_eq!(schedule.action, ConsoleAction::ToggleSchedule("a".to_string()));
    assert_eq!(
        actions,
        &vec![
            ConsoleAction::ManualBackup("a".to_string()),
            ConsoleAction::Remove("a".to_string()),
            ConsoleAction::DownloadLatest("a".to_string()),
            ConsoleAction::ViewHistory("a".to_string()),
        ]
    );
}

#[test]
fn included_console_toggle() {
    init_logging();
    let mut document = Document::new();
    DashboardRenderer::new().render_into(&with_consoles(vec![console("1", "office")]), &mut document);
    match &document.rows(ElementId::ConsolesBody)[0].row {
        TableRow::Console { schedule, .. } => {
            assert_eq!(schedule.label, "Included");
            assert_eq!(schedule.class, "console-schedule is-included");
        }
        other => panic!("unexpected row {other:?}"),
    }
}

#[test]
fn renderer_instances_gate_independently() {
    init_logging();
    let snapshot = with_consoles(vec![console("1", "office")]);
    let mut first = DashboardRenderer::new();
    let mut second = DashboardRenderer::new();

    assert_eq!(table_commands(&first.render(&snapshot)), 1);
    assert_eq!(table_commands(&first.render(&snapshot)), 0);
    assert_eq!(table_commands(&second.render(&snapshot)), 1);
    assert_eq!(first.passes(), 2);
    assert_eq!(second.passes(), 1);
    assert_eq!(
        first.last_consoles(),
        Some(&ConsoleFingerprint::of(&snapshot.consoles))
    );
}

#[test]
fn action_paths_and_methods() {
    assert_eq!(
        ConsoleAction::ToggleSchedule("7".to_string()).path(),
        "/toggle_console_schedule/7"
    );
    assert_eq!(ConsoleAction::ManualBackup("7".to_string()).path(), "/manual_backup/7");
    assert_eq!(ConsoleAction::Remove("7".to_string()).path(), "/remove_console/7");
    assert_eq!(
        ConsoleAction::DownloadLatest("7".to_string()).path(),
        "/download_latest_backup/7"
    );
    assert_eq!(ConsoleAction::ViewHistory("7".to_string()).path(), "/console_history/7");
    assert_eq!(
        ConsoleAction::Remove("a/b c".to_string()).path(),
        "/remove_console/a%2Fb%20c"
    );

    assert_eq!(ConsoleAction::ManualBackup("1".into()).method(), FormMethod::Post);
    assert_eq!(ConsoleAction::DownloadLatest("1".into()).method(), FormMethod::Get);
    assert_eq!(ConsoleAction::ViewHistory("1".into()).method(), FormMethod::Get);
}
