use dashboard_core::Snapshot;

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes one message payload.
///
/// Returns `Ok(None)` for an empty (or whitespace-only) payload, which is not
/// an error and must not trigger a render.
pub fn decode_payload(data: &str) -> Result<Option<Snapshot>, PayloadError> {
    if data.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(Snapshot::from_json(data)?))
}
