//! CLI argument parsing for the transcript viewer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Transcript topic graph viewer
///
/// Builds a topic graph from a video transcript and lays it out.
#[derive(Parser, Debug)]
#[command(name = "transcript-viewer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/transcript-graph/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Viewer commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the topic graph as JSON
    Graph {
        /// Video id or URL
        video: String,

        /// Read the transcript from this JSON file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Only use captions that started by this many seconds
        #[arg(long)]
        at: Option<f64>,
    },

    /// Lay out the topic graph headless and print node positions
    Layout {
        /// Video id or URL
        video: String,

        /// Read the transcript from this JSON file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Only use captions that started by this many seconds
        #[arg(long)]
        at: Option<f64>,

        /// Maximum simulation ticks
        #[arg(long, default_value = "300")]
        ticks: u64,
    },

    /// Print the transcript with timestamps
    Transcript {
        /// Video id or URL
        video: String,

        /// Read the transcript from this JSON file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Play the transcript and stream render events as JSON lines
    Watch {
        /// Video id or URL
        video: String,

        /// Read the transcript from this JSON file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Playback start position in seconds
        #[arg(long, default_value = "0")]
        start_at: f64,

        /// Playback speed multiplier (overrides playback.rate)
        #[arg(long)]
        rate: Option<f64>,
    },

    /// Print the video id of a URL
    Resolve {
        /// Video URL or bare id
        url: String,
    },
}
