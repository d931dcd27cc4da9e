//! Stem frequency analysis.
//!
//! One pass over the segment texts accumulates, per stem, the total count and
//! how often each surface form produced it. The result is a plain value; no
//! state outlives the pass.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use transcript_types::AnalysisConfig;

use crate::common_words::CommonWords;
use crate::text::{stemmed_tokens, Stemmer, Tokenizer};

/// Counts collected for one stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyRecord {
    pub stem: String,
    pub count: u32,
    /// Surface form -> occurrences, in first-seen order
    occurrences: Vec<(String, u32)>,
}

impl FrequencyRecord {
    fn new(stem: String) -> Self {
        Self {
            stem,
            count: 0,
            occurrences: Vec::new(),
        }
    }

    fn record(&mut self, surface: &str) {
        self.count += 1;
        match self.occurrences.iter_mut().find(|(form, _)| form == surface) {
            Some((_, seen)) => *seen += 1,
            None => self.occurrences.push((surface.to_string(), 1)),
        }
    }

    pub fn occurrences(&self) -> &[(String, u32)] {
        &self.occurrences
    }

    pub fn occurrence_count(&self, surface: &str) -> u32 {
        self.occurrences
            .iter()
            .find(|(form, _)| form == surface)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Most frequent surface form; ties go to the one seen first.
    pub fn representative(&self) -> Option<&str> {
        let mut best: Option<&(String, u32)> = None;
        for entry in &self.occurrences {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(form, _)| form.as_str())
    }
}

/// Accumulates stem counts over a sequence of texts.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    records: Vec<FrequencyRecord>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one surface form under its stem.
    pub fn record(&mut self, stem: &str, surface: &str) {
        let slot = match self.index.get(stem) {
            Some(&slot) => slot,
            None => {
                self.records.push(FrequencyRecord::new(stem.to_string()));
                self.index.insert(stem.to_string(), self.records.len() - 1);
                self.records.len() - 1
            }
        };
        self.records[slot].record(surface);
    }

    /// Tokenize, stem and record every token of `text`.
    pub fn add_text(&mut self, text: &str, tokenizer: &dyn Tokenizer, stemmer: &dyn Stemmer) {
        for (surface, stem) in stemmed_tokens(text, tokenizer, stemmer) {
            self.record(&stem, &surface);
        }
    }

    pub fn get(&self, stem: &str) -> Option<&FrequencyRecord> {
        self.index.get(stem).map(|&slot| &self.records[slot])
    }

    /// Records in first-seen order.
    pub fn records(&self) -> &[FrequencyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply the exclusion set, length floor and count threshold.
    pub fn finish(self, common: &CommonWords, config: &AnalysisConfig) -> FrequencyAnalysis {
        let uncommon_words: Vec<String> = self
            .records
            .iter()
            .filter(|r| !common.contains(&r.stem) && r.stem.chars().count() > config.min_stem_length)
            .map(|r| r.stem.clone())
            .collect();

        let frequent_words: Vec<FrequentWord> = uncommon_words
            .iter()
            .filter_map(|stem| self.get(stem))
            .filter(|r| r.count > config.frequency_threshold)
            .map(|r| FrequentWord {
                stem: r.stem.clone(),
                title: r.representative().unwrap_or(&r.stem).to_string(),
                count: r.count,
            })
            .collect();

        debug!(
            stems = self.records.len(),
            uncommon = uncommon_words.len(),
            frequent = frequent_words.len(),
            threshold = config.frequency_threshold,
            "Frequency analysis complete"
        );

        let frequent_stems = frequent_words.iter().map(|w| w.stem.clone()).collect();
        FrequencyAnalysis {
            table: self,
            uncommon_words,
            frequent_words,
            frequent_stems,
        }
    }
}

/// A stem that earned a keyword node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentWord {
    pub stem: String,
    /// Representative surface form
    pub title: String,
    pub count: u32,
}

/// Result of one analysis pass.
#[derive(Debug, Clone)]
pub struct FrequencyAnalysis {
    table: FrequencyTable,
    uncommon_words: Vec<String>,
    frequent_words: Vec<FrequentWord>,
    frequent_stems: HashSet<String>,
}

impl FrequencyAnalysis {
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Stems outside the exclusion set and longer than the length floor.
    pub fn uncommon_words(&self) -> &[String] {
        &self.uncommon_words
    }

    /// Uncommon stems whose count is above the threshold, in first-seen order.
    pub fn frequent_words(&self) -> &[FrequentWord] {
        &self.frequent_words
    }

    pub fn is_frequent(&self, stem: &str) -> bool {
        self.frequent_stems.contains(stem)
    }

    pub fn count(&self, stem: &str) -> u32 {
        self.table.get(stem).map(|r| r.count).unwrap_or(0)
    }
}

/// Analyze `texts` in a single pass.
pub fn analyze<'a, I>(
    texts: I,
    tokenizer: &dyn Tokenizer,
    stemmer: &dyn Stemmer,
    common: &CommonWords,
    config: &AnalysisConfig,
) -> FrequencyAnalysis
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table = FrequencyTable::new();
    for text in texts {
        table.add_text(text, tokenizer, stemmer);
    }
    table.finish(common, config)
}
