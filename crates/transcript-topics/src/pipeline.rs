//! End-to-end transcript -> graph pass.

use std::time::Duration;

use tracing::{debug, info};

use transcript_types::{AnalysisConfig, GraphSnapshot, Transcript, TranscriptEntry};

use crate::builder::GraphBuilder;
use crate::common_words::CommonWords;
use crate::error::TopicsError;
use crate::frequency::analyze;
use crate::text::{PorterStemmer, Stemmer, Tokenizer, WordTokenizer};
use crate::window::segment_entries;

/// Windowing, frequency analysis and graph building bundled with the
/// linguistic capabilities they share.
///
/// A pass holds no state between calls: the same transcript and clock time
/// always produce the same snapshot.
pub struct TopicPipeline {
    tokenizer: Box<dyn Tokenizer>,
    stemmer: Box<dyn Stemmer>,
    common: CommonWords,
    config: AnalysisConfig,
}

impl TopicPipeline {
    /// Pipeline with the default word tokenizer and Porter stemmer.
    pub fn new(config: AnalysisConfig) -> Result<Self, TopicsError> {
        Self::with_capabilities(config, Box::new(WordTokenizer), Box::new(PorterStemmer::new()))
    }

    /// Pipeline with caller-supplied tokenizer and stemmer.
    ///
    /// The exclusion list is stemmed here, once, with the same stemmer.
    pub fn with_capabilities(
        config: AnalysisConfig,
        tokenizer: Box<dyn Tokenizer>,
        stemmer: Box<dyn Stemmer>,
    ) -> Result<Self, TopicsError> {
        config.validate().map_err(TopicsError::InvalidConfig)?;
        let common = CommonWords::new(stemmer.as_ref(), config.extra_common_words.as_slice());
        info!(
            step = config.step,
            threshold = config.frequency_threshold,
            common_stems = common.len(),
            "Topic pipeline ready"
        );
        Ok(Self {
            tokenizer,
            stemmer,
            common,
            config,
        })
    }

    /// Replace the exclusion set.
    pub fn with_common_words(mut self, common: CommonWords) -> Self {
        self.common = common;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Number of entries visible at `at` (all entries when `at` is None).
    pub fn visible_count(&self, transcript: &Transcript, at: Option<f64>) -> usize {
        match at {
            Some(seconds) => transcript.visible_at(seconds).len(),
            None => transcript.len(),
        }
    }

    /// Build the snapshot for the part of `transcript` visible at `at`.
    ///
    /// `None` builds the whole transcript (the static layout).
    pub fn compute(&self, transcript: &Transcript, at: Option<f64>) -> GraphSnapshot {
        let entries = match at {
            Some(seconds) => transcript.visible_at(seconds),
            None => transcript.entries(),
        };
        self.compute_entries(entries)
    }

    /// Build the snapshot for an explicit entry slice.
    pub fn compute_entries(&self, entries: &[TranscriptEntry]) -> GraphSnapshot {
        let segments = segment_entries(entries, self.config.step);
        let analysis = analyze(
            segments.iter().map(|s| s.text.as_str()),
            self.tokenizer.as_ref(),
            self.stemmer.as_ref(),
            &self.common,
            &self.config,
        );
        let snapshot = GraphBuilder::new(self.tokenizer.as_ref(), self.stemmer.as_ref())
            .build(&segments, &analysis);

        debug!(
            entries = entries.len(),
            nodes = snapshot.nodes.len(),
            links = snapshot.links.len(),
            "Recomputed snapshot"
        );
        snapshot
    }

    /// Begin offset of the first entry of segment `index`.
    pub fn segment_start(&self, transcript: &Transcript, index: usize) -> Option<Duration> {
        transcript
            .entries()
            .get(index.checked_mul(self.config.step)?)
            .map(|e| e.begin)
    }
}
