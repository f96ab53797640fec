//! Wire model of one status update pushed by the backup server.

use serde::{Deserialize, Deserializer, Serialize};

/// One complete state update. Replaced wholesale on every message.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_task: CurrentTask,
    #[serde(default, deserialize_with = "null_as_default")]
    pub queue_size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub queue_items: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scheduled_queue_position: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scheduled_queue_size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_backup_time_str: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_time_local: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logs: Vec<LogEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub master_logged_in: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_cookie_check_local: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub consoles: Vec<ConsoleEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CurrentTask {
    #[serde(default, deserialize_with = "null_as_default")]
    pub running: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub step: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub task_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_time_local: String,
    /// Seconds since the task started; `null`, `""` and non-numeric text mean unknown.
    #[serde(default, deserialize_with = "optional_number")]
    pub elapsed_seconds: Option<serde_json::Number>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct LogEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// A managed backup target as listed in the console table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ConsoleEntry {
    #[serde(default, deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub backup_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excluded: bool,
}

impl Snapshot {
    /// Parses one JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

impl CurrentTask {
    /// Name shown for the running task: `task_name`, else `step`.
    pub fn effective_name(&self) -> &str {
        if self.task_name.is_empty() {
            &self.step
        } else {
            &self.task_name
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Console ids are integers on the reference server but strings in the model.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(text)) => text,
        Some(RawId::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<serde_json::Number>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Number(number)) => Some(number),
        Some(RawNumber::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}
