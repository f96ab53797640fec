use std::io::Write;

use anyhow::Context;
use chrono::Local;
use dashboard_core::{update, DashboardRenderer, DashboardState, Document, Msg};
use dashboard_logging::{dash_debug, dash_info, dash_warn};
use dashboard_stream::{StreamEvent, Subscription};

use super::{config, logging, ui};

pub fn run_app() -> anyhow::Result<()> {
    let path = config::resolve_path(std::env::args().skip(1), |name| std::env::var(name).ok());
    let loaded = config::load(&path)?;
    let from_file = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    config.apply_env_overrides(|name| std::env::var(name).ok());
    let level = config.level().context("invalid log level in config")?;

    logging::initialize(config.log_destination, level, &config.log_file);
    if from_file {
        dash_info!("Loaded configuration from {:?}", path);
    } else {
        dash_info!("No configuration at {:?}; using defaults", path);
    }

    let subscription = Subscription::open(config.stream_url.clone(), config.subscribe_settings());
    let mut page = Page::new(config.present);

    while let Some(event) = subscription.recv() {
        let closed = matches!(event, StreamEvent::Closed(_));
        page.dispatch_msg(map_event(event));
        if closed {
            break;
        }
    }

    dash_info!("{}", page.state.status_line());
    Ok(())
}

fn map_event(event: StreamEvent) -> Msg {
    match event {
        StreamEvent::Opened => Msg::StreamOpened,
        StreamEvent::Snapshot(snapshot) => Msg::SnapshotReceived(snapshot),
        StreamEvent::Skipped(reason) => Msg::MessageSkipped {
            reason: reason.to_string(),
        },
        StreamEvent::Closed(error) => Msg::StreamClosed {
            reason: error.map(|err| err.to_string()),
        },
    }
}

/// The page: state, renderer and the document it renders into.
struct Page {
    state: DashboardState,
    renderer: DashboardRenderer,
    document: Document,
    present: bool,
}

impl Page {
    fn new(present: bool) -> Self {
        Self {
            state: DashboardState::new(),
            renderer: DashboardRenderer::new(),
            document: Document::new(),
            present,
        }
    }

    /// Applies one message; a new snapshot gets exactly one render pass.
    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let mut state = update(state, msg);
        let rendered = state.consume_dirty();
        if rendered {
            if let Some(snapshot) = state.snapshot() {
                let before = self.document.total_mutations();
                self.renderer.render_into(snapshot, &mut self.document);
                dash_debug!(
                    "Render pass {} applied {} mutations",
                    self.renderer.passes(),
                    self.document.total_mutations() - before
                );
            }
        }
        self.state = state;

        if rendered && self.present {
            self.print_page();
        }
    }

    fn print_page(&self) {
        let text = ui::present::page_text(
            &self.document,
            &self.state.status_line(),
            &Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        let mut stdout = std::io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{text}") {
            dash_warn!("Failed to write page to stdout: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use dashboard_core::{ConsoleEntry, ElementId, Snapshot};
    use dashboard_stream::{SkipReason, StreamError};

    use super::*;

    fn snapshot(queue_size: u64) -> Box<Snapshot> {
        Box::new(Snapshot {
            queue_size,
            consoles: vec![ConsoleEntry {
                id: "1".to_string(),
                name: "Office".to_string(),
                ..ConsoleEntry::default()
            }],
            ..Snapshot::default()
        })
    }

    #[test]
    fn every_snapshot_renders_once_in_order() {
        let mut page = Page::new(false);
        page.dispatch_msg(map_event(StreamEvent::Opened));
        page.dispatch_msg(map_event(StreamEvent::Snapshot(snapshot(1))));
        page.dispatch_msg(map_event(StreamEvent::Snapshot(snapshot(2))));

        assert_eq!(page.renderer.passes(), 2);
        assert_eq!(page.document.text(ElementId::QueueDetail), "Queue size: 2");
        // Same console list twice: the table was built once.
        assert_eq!(page.document.mutations(ElementId::ConsolesBody), 1);
    }

    #[test]
    fn skipped_and_closed_do_not_render() {
        let mut page = Page::new(false);
        page.dispatch_msg(map_event(StreamEvent::Snapshot(snapshot(3))));
        let mutations = page.document.total_mutations();

        page.dispatch_msg(map_event(StreamEvent::Skipped(SkipReason::Malformed(
            "bad".to_string(),
        ))));
        page.dispatch_msg(map_event(StreamEvent::Closed(Some(StreamError {
            kind: dashboard_stream::FailureKind::Network,
            message: "reset".to_string(),
        }))));

        assert_eq!(page.renderer.passes(), 1);
        assert_eq!(page.document.total_mutations(), mutations);
        assert_eq!(page.document.text(ElementId::QueueDetail), "Queue size: 3");
        assert_eq!(page.state.skipped(), 1);
        assert_eq!(page.state.last_error(), Some("network error: reset"));
    }
}
