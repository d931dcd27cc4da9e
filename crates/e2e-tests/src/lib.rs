//! End-to-end test infrastructure for transcript-graph.
//!
//! Provides a shared TestHarness and helper functions for E2E tests
//! covering the transcript-to-layout pipeline.

use std::path::{Path, PathBuf};
use std::time::Duration;

use transcript_client::FileTranscriptSource;
use transcript_topics::{LowercaseStemmer, TopicPipeline, WordTokenizer};
use transcript_types::{AnalysisConfig, LayoutConfig, Transcript, TranscriptEntry};

/// Shared test harness for E2E tests.
///
/// Holds a temp directory of `<video-id>.json` transcripts and a file
/// source reading from it.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Directory holding transcript files
    pub transcript_dir: PathBuf,
    pub source: FileTranscriptSource,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let transcript_dir = temp_dir.path().to_path_buf();
        let source = FileTranscriptSource::from_dir(&transcript_dir);
        Self {
            _temp_dir: temp_dir,
            transcript_dir,
            source,
        }
    }

    /// Save `transcript` as `<video_id>.json`.
    pub fn save(&self, video_id: &str, transcript: &Transcript) -> PathBuf {
        write_transcript(&self.transcript_dir, video_id, transcript)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a transcript in the service's JSON format.
pub fn write_transcript(dir: &Path, video_id: &str, transcript: &Transcript) -> PathBuf {
    let path = dir.join(format!("{video_id}.json"));
    let json = serde_json::to_string(transcript).expect("Failed to serialize transcript");
    std::fs::write(&path, json).expect("Failed to write transcript");
    path
}

/// Transcript with one entry per text, `spacing` apart.
pub fn create_test_transcript(texts: &[&str], spacing: Duration) -> Transcript {
    Transcript::new(
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let begin = spacing * i as u32;
                TranscriptEntry::new(*text, begin, begin + spacing)
            })
            .collect(),
    )
}

/// `count` entries, one second apart, with texts "line 0", "line 1", ...
pub fn numbered_transcript(count: usize) -> Transcript {
    let texts: Vec<String> = (0..count).map(|i| format!("line {i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    create_test_transcript(&refs, Duration::from_secs(1))
}

/// Pipeline with exact (lowercase-only) stems, so tests can name stems.
pub fn exact_pipeline(step: usize, frequency_threshold: u32) -> TopicPipeline {
    TopicPipeline::with_capabilities(
        AnalysisConfig {
            step,
            frequency_threshold,
            ..AnalysisConfig::default()
        },
        Box::new(WordTokenizer),
        Box::new(LowercaseStemmer),
    )
    .expect("Failed to build pipeline")
}

/// Layout config with a fixed seed.
pub fn seeded_layout() -> LayoutConfig {
    LayoutConfig {
        seed: Some(42),
        ..LayoutConfig::default()
    }
}
