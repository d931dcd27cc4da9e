//! Transcript source backed by the transcript HTTP service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use transcript_types::{SourceConfig, Transcript};

use crate::error::ClientError;
use crate::{parse_transcript, TranscriptSource};

/// Fetches `GET {endpoint}/api/transcript/{id}`.
///
/// The service answers with a JSON array of `{text, begin, end}` records.
/// A failed request is reported once; there is no retry.
pub struct HttpTranscriptSource {
    client: Client,
    endpoint: String,
}

impl HttpTranscriptSource {
    pub fn new(config: &SourceConfig) -> Result<Self, ClientError> {
        if config.endpoint.trim().is_empty() {
            return Err(ClientError::Config("source.endpoint is empty".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn transcript_url(&self, video_id: &str) -> String {
        format!("{}/api/transcript/{}", self.endpoint, video_id)
    }
}

#[async_trait]
impl TranscriptSource for HttpTranscriptSource {
    async fn fetch(&self, video_id: &str) -> Result<Transcript, ClientError> {
        let url = self.transcript_url(video_id);
        debug!(url = %url, "Fetching transcript");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let body = response.text().await?;
        let transcript = parse_transcript(video_id, &body)?;
        info!(video_id = video_id, entries = transcript.len(), "Transcript fetched");
        Ok(transcript)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
