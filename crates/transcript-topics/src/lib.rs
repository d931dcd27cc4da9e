//! # transcript-topics
//!
//! Turns a timestamped transcript into a topic graph.
//!
//! The transcript is cut into fixed-size windows (segments), the words of
//! every segment are stemmed and counted, and stems that are frequent,
//! uncommon and long enough become keyword nodes linked to every node that
//! mentions them.
//!
//! ## Features
//! - Fixed-size windowing with a final partial window
//! - Pluggable tokenizer and stemmer (Snowball English by default)
//! - Pre-stemmed common-word exclusion set
//! - Pure, per-pass frequency analysis with representative surface forms
//! - Deterministic node/link construction

pub mod builder;
pub mod common_words;
pub mod error;
pub mod frequency;
pub mod pipeline;
pub mod text;
pub mod window;

pub use builder::{timeline_links, GraphBuilder};
pub use common_words::CommonWords;
pub use error::TopicsError;
pub use frequency::{analyze, FrequencyAnalysis, FrequencyRecord, FrequencyTable, FrequentWord};
pub use pipeline::TopicPipeline;
pub use text::{LowercaseStemmer, PorterStemmer, Stemmer, Tokenizer, WordTokenizer};
pub use window::{segment_entries, Segment};
