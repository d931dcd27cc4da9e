//! Transcript entries and the ordered transcript store.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::TranscriptError;
use crate::offset;

/// One caption of a transcript.
///
/// Entries are immutable records supplied by the transcript service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Caption text; captions without text arrive as null
    #[serde(default, deserialize_with = "text_or_empty")]
    pub text: String,

    /// Offset at which the caption starts
    #[serde(with = "crate::offset")]
    pub begin: Duration,

    /// Offset at which the caption ends
    #[serde(with = "crate::offset")]
    pub end: Duration,
}

impl TranscriptEntry {
    /// Create a new entry.
    pub fn new(text: impl Into<String>, begin: Duration, end: Duration) -> Self {
        Self {
            text: text.into(),
            begin,
            end,
        }
    }

    /// Begin offset in fractional seconds, the unit of the playback clock.
    pub fn begin_seconds(&self) -> f64 {
        self.begin.as_secs_f64()
    }

    /// `HH:MM:SS` label shown beside the caption.
    pub fn timestamp_label(&self) -> String {
        offset::format_clock(self.begin)
    }
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Time-ordered sequence of transcript entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TranscriptEntry>", into = "Vec<TranscriptEntry>")]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Build a transcript, restoring begin-offset order if the source broke it.
    pub fn new(mut entries: Vec<TranscriptEntry>) -> Self {
        let ordered = entries.windows(2).all(|w| w[0].begin <= w[1].begin);
        if !ordered {
            warn!(
                entries = entries.len(),
                "Transcript entries out of order, sorting by begin offset"
            );
            entries.sort_by_key(|e| e.begin);
        }
        Self { entries }
    }

    /// Parse the transcript service's JSON array.
    pub fn from_json(json: &str) -> Result<Self, TranscriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// All entries in order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose begin offset is at or before `seconds`.
    ///
    /// Because entries are time-ordered this is always a prefix.
    pub fn visible_at(&self, seconds: f64) -> &[TranscriptEntry] {
        let count = self
            .entries
            .partition_point(|e| e.begin_seconds() <= seconds);
        &self.entries[..count]
    }

    /// Index of the caption playing at `seconds`, if any has started.
    pub fn entry_index_at(&self, seconds: f64) -> Option<usize> {
        self.visible_at(seconds).len().checked_sub(1)
    }
}

impl From<Vec<TranscriptEntry>> for Transcript {
    fn from(entries: Vec<TranscriptEntry>) -> Self {
        Self::new(entries)
    }
}

impl From<Transcript> for Vec<TranscriptEntry> {
    fn from(transcript: Transcript) -> Self {
        transcript.entries
    }
}
