//! # transcript-client
//!
//! Where transcripts come from.
//!
//! [`TranscriptSource`] is the fetch capability the viewer depends on. It is
//! implemented by the HTTP transcript service client, a file reader for
//! saved transcripts, and a mock for tests.

mod error;
mod file;
mod http;
mod mock;
mod video_id;

pub use error::ClientError;
pub use file::FileTranscriptSource;
pub use http::HttpTranscriptSource;
pub use mock::MockTranscriptSource;
pub use video_id::resolve_video_id;

use async_trait::async_trait;

use transcript_types::{SourceConfig, Transcript};

/// Pluggable transcript fetch.
///
/// A fetch is a one-shot request; callers decide what to do on failure.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the full transcript of `video_id`.
    async fn fetch(&self, video_id: &str) -> Result<Transcript, ClientError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Pick the source for the given settings.
///
/// An explicit file wins, then a configured transcript directory, then the
/// HTTP service.
pub fn source_from_config(
    config: &SourceConfig,
    file: Option<&std::path::Path>,
) -> Result<Box<dyn TranscriptSource>, ClientError> {
    if let Some(path) = file {
        return Ok(Box::new(FileTranscriptSource::from_file(path)));
    }
    if let Some(dir) = &config.transcript_dir {
        return Ok(Box::new(FileTranscriptSource::from_dir(dir)));
    }
    Ok(Box::new(HttpTranscriptSource::new(config)?))
}

/// Parse a service response, rejecting an empty transcript.
pub(crate) fn parse_transcript(video_id: &str, body: &str) -> Result<Transcript, ClientError> {
    let transcript = Transcript::from_json(body).map_err(|e| ClientError::Parse(e.to_string()))?;
    if transcript.is_empty() {
        return Err(ClientError::EmptyTranscript(video_id.to_string()));
    }
    Ok(transcript)
}
