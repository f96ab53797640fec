use url::Url;

/// Per-console form target. The renderer only addresses these; submitting
/// them is a plain navigation owned by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    ToggleSchedule(String),
    ManualBackup(String),
    Remove(String),
    DownloadLatest(String),
    ViewHistory(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

impl FormMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            FormMethod::Get => "GET",
            FormMethod::Post => "POST",
        }
    }
}

impl ConsoleAction {
    pub fn console_id(&self) -> &str {
        match self {
            ConsoleAction::ToggleSchedule(id)
            | ConsoleAction::ManualBackup(id)
            | ConsoleAction::Remove(id)
            | ConsoleAction::DownloadLatest(id)
            | ConsoleAction::ViewHistory(id) => id,
        }
    }

    pub fn method(&self) -> FormMethod {
        match self {
            ConsoleAction::DownloadLatest(_) | ConsoleAction::ViewHistory(_) => FormMethod::Get,
            _ => FormMethod::Post,
        }
    }

    fn route(&self) -> &'static str {
        match self {
            ConsoleAction::ToggleSchedule(_) => "toggle_console_schedule",
            ConsoleAction::ManualBackup(_) => "manual_backup",
            ConsoleAction::Remove(_) => "remove_console",
            ConsoleAction::DownloadLatest(_) => "download_latest_backup",
            ConsoleAction::ViewHistory(_) => "console_history",
        }
    }

    /// Button caption shown in the console table.
    pub fn caption(&self) -> &'static str {
        match self {
            ConsoleAction::ToggleSchedule(_) => "Toggle Schedule",
            ConsoleAction::ManualBackup(_) => "Backup Now",
            ConsoleAction::Remove(_) => "Remove",
            ConsoleAction::DownloadLatest(_) => "Download Latest",
            ConsoleAction::ViewHistory(_) => "View History",
        }
    }

    /// Relative form action, e.g. `/manual_backup/7`. The id is encoded as a
    /// single path segment.
    pub fn path(&self) -> String {
        // Any absolute base works; only the path is kept.
        let Ok(mut url) = Url::parse("http://dashboard.invalid/") else {
            return format!("/{}/{}", self.route(), self.console_id());
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear().push(self.route()).push(self.console_id());
        }
        url.path().to_string()
    }
}
