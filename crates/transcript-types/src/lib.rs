//! # transcript-types
//!
//! Shared domain types for the transcript topic graph.
//!
//! This crate defines the core data structures used throughout the system:
//! - Transcript entries: immutable, time-ordered captions with begin/end offsets
//! - Graph snapshot: segment, anchor and keyword nodes plus their links
//! - Settings: layered configuration for analysis, layout, source and playback
//!
//! ## Usage
//!
//! ```rust
//! use transcript_types::{Transcript, TranscriptEntry};
//! use std::time::Duration;
//!
//! let transcript = Transcript::new(vec![TranscriptEntry::new(
//!     "hello there",
//!     Duration::from_secs(0),
//!     Duration::from_secs(2),
//! )]);
//! assert_eq!(transcript.visible_at(1.0).len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod offset;
pub mod transcript;

pub use config::{AnalysisConfig, LayoutConfig, PlaybackConfig, Settings, SourceConfig};
pub use error::TranscriptError;
pub use graph::{Anchor, GraphLink, GraphNode, GraphSnapshot, LinkClass, NodeGroup, NodeId};
pub use transcript::{Transcript, TranscriptEntry};
