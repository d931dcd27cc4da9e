//! Caption offset parsing and formatting.
//!
//! Offsets arrive from the transcript service as duration strings. The
//! subtitle backend emits `HH:MM:SS.fff`, but shorter clock forms, unit
//! suffixes (`12.5s`, `1500ms`) and bare seconds are accepted as well.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

use crate::error::TranscriptError;

/// Parse a duration string into a [`Duration`].
///
/// # Errors
///
/// Returns `TranscriptError::InvalidOffset` for empty, negative, non-finite
/// or otherwise malformed input.
pub fn parse_offset(raw: &str) -> Result<Duration, TranscriptError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(TranscriptError::InvalidOffset("empty offset".to_string()));
    }

    let seconds = if let Some(millis) = text.strip_suffix("ms") {
        parse_number(millis, raw)? / 1000.0
    } else if let Some(secs) = text.strip_suffix('s') {
        parse_number(secs, raw)?
    } else if text.contains(':') {
        parse_clock(text, raw)?
    } else {
        parse_number(text, raw)?
    };

    seconds_to_duration(seconds).ok_or_else(|| TranscriptError::InvalidOffset(raw.to_string()))
}

/// Convert fractional seconds into a [`Duration`], rejecting negatives, NaN
/// and values too large to represent.
pub fn seconds_to_duration(seconds: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(seconds).ok()
}

fn parse_number(text: &str, raw: &str) -> Result<f64, TranscriptError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| TranscriptError::InvalidOffset(raw.to_string()))
}

fn parse_clock(text: &str, raw: &str) -> Result<f64, TranscriptError> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(TranscriptError::InvalidOffset(raw.to_string()));
    }

    let (whole, last) = parts.split_at(parts.len() - 1);
    let mut seconds = 0.0;
    for part in whole {
        let value: u64 = part
            .parse()
            .map_err(|_| TranscriptError::InvalidOffset(raw.to_string()))?;
        seconds = seconds * 60.0 + value as f64;
    }
    Ok(seconds * 60.0 + parse_number(last[0], raw)?)
}

/// Format an offset as `HH:MM:SS.mmm`, the subtitle wire form.
pub fn format_offset(offset: Duration) -> String {
    let millis = offset.as_millis();
    format!(
        "{}.{:03}",
        format_clock(offset),
        (millis % 1000) as u32
    )
}

/// Format an offset as `HH:MM:SS` for display next to a caption.
pub fn format_clock(offset: Duration) -> String {
    let total = offset.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOffset {
    Text(String),
    Seconds(f64),
}

/// Serde adapter for `#[serde(with = "crate::offset")]` fields.
pub fn serialize<S>(offset: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_offset(*offset))
}

/// Serde adapter for `#[serde(with = "crate::offset")]` fields.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    match RawOffset::deserialize(deserializer)? {
        RawOffset::Text(text) => parse_offset(&text).map_err(serde::de::Error::custom),
        RawOffset::Seconds(seconds) => seconds_to_duration(seconds)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid offset: {seconds}"))),
    }
}
