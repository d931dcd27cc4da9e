//! Mock transcript source for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use transcript_types::Transcript;

use crate::error::ClientError;
use crate::TranscriptSource;

/// Returns a canned transcript (or failure), optionally after a delay.
///
/// Useful for driving a view session without a transcript service.
pub struct MockTranscriptSource {
    outcome: Result<Transcript, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockTranscriptSource {
    pub fn new(transcript: Transcript) -> Self {
        Self {
            outcome: Ok(transcript),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Source whose every fetch fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptSource for MockTranscriptSource {
    async fn fetch(&self, _video_id: &str) -> Result<Transcript, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            Ok(transcript) => Ok(transcript.clone()),
            Err(message) => Err(ClientError::Http(message.clone())),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
