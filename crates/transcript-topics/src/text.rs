//! Tokenizer and stemmer capabilities.
//!
//! Both are traits so the analyzer can be driven by any linguistic backend.
//! The defaults split on non-word characters and apply the Snowball English
//! (Porter2) stemmer.

use rust_stemmers::{Algorithm, Stemmer as SnowballStemmer};

/// Splits text into an ordered sequence of surface-form tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Maps a token to its normalized stem.
///
/// The same stemmer must be applied to the exclusion list and to extracted
/// tokens so that both sides compare equal.
pub trait Stemmer: Send + Sync {
    fn stem(&self, token: &str) -> String;
}

/// Word tokenizer that keeps case and splits on anything that is not a
/// letter, digit or underscore.
///
/// Apostrophes split words (`don't` becomes `don`, `t`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Porter-family stemmer: lower-cases, then applies Snowball English.
pub struct PorterStemmer {
    inner: SnowballStemmer,
}

impl PorterStemmer {
    pub fn new() -> Self {
        Self {
            inner: SnowballStemmer::create(Algorithm::English),
        }
    }
}

impl Default for PorterStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, token: &str) -> String {
        self.inner.stem(&token.to_lowercase()).into_owned()
    }
}

/// Stemmer that only lower-cases. Handy where exact stems matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseStemmer;

impl Stemmer for LowercaseStemmer {
    fn stem(&self, token: &str) -> String {
        token.to_lowercase()
    }
}

/// Tokenize `text` and stem every token, keeping the surface form.
pub fn stemmed_tokens(
    text: &str,
    tokenizer: &dyn Tokenizer,
    stemmer: &dyn Stemmer,
) -> Vec<(String, String)> {
    tokenizer
        .tokenize(text)
        .into_iter()
        .map(|token| {
            let stem = stemmer.stem(&token);
            (token, stem)
        })
        .collect()
}
