//! Incremental decoding of a `text/event-stream` body.

use dashboard_logging::dash_warn;
use encoding_rs::{Decoder, UTF_8};

/// Room for a field name and separator on top of the data limit.
const FIELD_PREFIX_SLACK: usize = 8;

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: String,
    pub id: Option<String>,
}

impl ServerEvent {
    /// Untyped events and events typed `message` carry status updates.
    pub fn is_message(&self) -> bool {
        matches!(self.event.as_deref(), None | Some("") | Some("message"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Event(ServerEvent),
    /// An event exceeded the size limit and was dropped whole.
    Oversized { max_bytes: usize },
}

/// Line-oriented event stream parser. Feed it text in arbitrary chunks.
#[derive(Debug)]
pub struct EventStreamDecoder {
    max_event_bytes: usize,
    line: String,
    after_cr: bool,
    data: String,
    has_data: bool,
    event: Option<String>,
    last_id: Option<String>,
    oversized: bool,
    skipping_line: bool,
}

impl EventStreamDecoder {
    pub fn new(max_event_bytes: usize) -> Self {
        Self {
            max_event_bytes,
            line: String::new(),
            after_cr: false,
            data: String::new(),
            has_data: false,
            event: None,
            last_id: None,
            oversized: false,
            skipping_line: false,
        }
    }

    /// Id of the most recent event that set one.
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_id.as_deref()
    }

    pub fn feed(&mut self, text: &str) -> Vec<Decoded> {
        let mut out = Vec::new();
        for ch in text.chars() {
            // "\r\n" is a single line break.
            if std::mem::take(&mut self.after_cr) && ch == '\n' {
                continue;
            }
            match ch {
                '\r' => {
                    self.after_cr = true;
                    self.end_line(&mut out);
                }
                '\n' => self.end_line(&mut out),
                _ if self.oversized => self.skipping_line = true,
                // Comment bodies are never stored.
                _ if self.line.starts_with(':') => {}
                _ => {
                    self.line.push(ch);
                    if self.line.len() > self.max_event_bytes + FIELD_PREFIX_SLACK {
                        self.drop_oversized();
                    }
                }
            }
        }
        out
    }

    fn end_line(&mut self, out: &mut Vec<Decoded>) {
        let line = std::mem::take(&mut self.line);
        if std::mem::take(&mut self.skipping_line) {
            return;
        }
        if line.is_empty() {
            self.dispatch(out);
            return;
        }
        if self.oversized || line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line.as_str(), ""),
        };
        match field {
            "data" => {
                let joined = self.data.len() + usize::from(self.has_data) + value.len();
                if joined > self.max_event_bytes {
                    self.mark_oversized();
                    return;
                }
                if self.has_data {
                    self.data.push('\n');
                }
                self.data.push_str(value);
                self.has_data = true;
            }
            "event" => self.event = Some(value.to_string()),
            "id" if !value.contains('\0') => self.last_id = Some(value.to_string()),
            // Reconnection hints do not apply: the subscription is never reopened.
            _ => {}
        }
    }

    fn dispatch(&mut self, out: &mut Vec<Decoded>) {
        let event = self.event.take();
        if std::mem::take(&mut self.oversized) {
            out.push(Decoded::Oversized {
                max_bytes: self.max_event_bytes,
            });
        } else if std::mem::take(&mut self.has_data) {
            out.push(Decoded::Event(ServerEvent {
                event,
                data: std::mem::take(&mut self.data),
                id: self.last_id.clone(),
            }));
        }
        self.data.clear();
    }

    fn drop_oversized(&mut self) {
        self.skipping_line = true;
        self.line.clear();
        self.mark_oversized();
    }

    fn mark_oversized(&mut self) {
        self.oversized = true;
        self.data.clear();
        self.has_data = false;
    }
}

/// Streaming UTF-8 decoder that tolerates code points split across chunks.
pub struct Utf8StreamDecoder {
    decoder: Decoder,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self {
            decoder: UTF_8.new_decoder_with_bom_removal(),
        }
    }

    pub fn decode(&mut self, bytes: &[u8], last: bool) -> String {
        let capacity = self
            .decoder
            .max_utf8_buffer_length(bytes.len())
            .unwrap_or(bytes.len() * 3 + 4);
        let mut text = String::with_capacity(capacity);
        let (_, _, had_errors) = self.decoder.decode_to_string(bytes, &mut text, last);
        if had_errors {
            dash_warn!("Invalid UTF-8 in event stream replaced");
        }
        text
    }
}

impl Default for Utf8StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}
