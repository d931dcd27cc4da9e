//! Transcript source reading JSON files from disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use transcript_types::Transcript;

use crate::error::ClientError;
use crate::{parse_transcript, TranscriptSource};

#[derive(Debug, Clone)]
enum Location {
    /// `{dir}/{video_id}.json`
    Directory(PathBuf),
    /// One file, whatever the id
    File(PathBuf),
}

/// Reads transcripts saved in the service's JSON format.
#[derive(Debug, Clone)]
pub struct FileTranscriptSource {
    location: Location,
}

impl FileTranscriptSource {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::Directory(dir.into()),
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
        }
    }

    /// Path read for `video_id`.
    pub fn path_for(&self, video_id: &str) -> PathBuf {
        match &self.location {
            Location::Directory(dir) => dir.join(format!("{video_id}.json")),
            Location::File(path) => path.clone(),
        }
    }
}

#[async_trait]
impl TranscriptSource for FileTranscriptSource {
    async fn fetch(&self, video_id: &str) -> Result<Transcript, ClientError> {
        let path = self.path_for(video_id);
        debug!(path = %path.display(), "Reading transcript file");

        let body = tokio::fs::read_to_string(&path).await?;
        let transcript = parse_transcript(video_id, &body)?;
        info!(path = %path.display(), entries = transcript.len(), "Transcript loaded");
        Ok(transcript)
    }

    fn describe(&self) -> String {
        match &self.location {
            Location::Directory(dir) => display(dir),
            Location::File(path) => display(path),
        }
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
