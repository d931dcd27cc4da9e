//! Render adapter capability and the JSON-lines sink.
//!
//! The session never draws anything itself. It hands render events to a
//! [`RenderSink`]; the bundled sink writes one JSON object per line, tagged
//! by `event`.

use std::io::{self, Write};

use serde::Serialize;

use transcript_layout::Frame;
use transcript_types::{GraphSnapshot, Transcript};

/// One caption of the transcript listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionLine {
    pub index: usize,
    /// `HH:MM:SS` of the caption start
    pub timestamp: String,
    pub text: String,
}

impl CaptionLine {
    pub fn listing(transcript: &Transcript) -> Vec<CaptionLine> {
        transcript
            .entries()
            .iter()
            .enumerate()
            .map(|(index, e)| CaptionLine {
                index,
                timestamp: e.timestamp_label(),
                text: e.text.clone(),
            })
            .collect()
    }
}

/// Everything a renderer is told.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    /// Session lifecycle: `loading`, `ready` or `failed`
    Status {
        state: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Full caption listing, sent once the transcript is loaded
    Transcript { lines: Vec<CaptionLine> },
    /// Caption playing now
    Caption { index: usize },
    /// New node/link set
    Snapshot(GraphSnapshot),
    /// Positions after a simulation tick
    Frame(Frame),
    /// Playback jumped
    Seek { seconds: f64 },
}

impl RenderEvent {
    pub fn status(state: &str, message: Option<String>) -> Self {
        RenderEvent::Status {
            state: state.to_string(),
            message,
        }
    }
}

/// Receives render events from a view session.
pub trait RenderSink {
    fn emit(&mut self, event: RenderEvent) -> io::Result<()>;
}

/// Keeps every event; used by tests and headless runs.
impl RenderSink for Vec<RenderEvent> {
    fn emit(&mut self, event: RenderEvent) -> io::Result<()> {
        self.push(event);
        Ok(())
    }
}

/// Writes each event as one line of JSON.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn emit(&mut self, event: RenderEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
