//! Transcript Viewer
//!
//! Turns a video transcript into a topic graph and lays it out.
//!
//! # Usage
//!
//! ```bash
//! transcript-viewer graph <VIDEO> [--file PATH] [--at SECONDS]
//! transcript-viewer layout <VIDEO> [--file PATH] [--at SECONDS] [--ticks N]
//! transcript-viewer transcript <VIDEO> [--file PATH]
//! transcript-viewer watch <VIDEO> [--file PATH] [--start-at SECONDS] [--rate R]
//! transcript-viewer resolve <URL>
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/transcript-graph/config.toml)
//! 3. `--config` file
//! 4. Environment variables (TGRAPH_*)
//! 5. CLI flags

use anyhow::{bail, Result};
use clap::Parser;

use transcript_viewer::{
    init_logging, load_settings, run_graph, run_layout, run_resolve, run_transcript, run_watch,
    Cli, Commands,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Resolve { url } = &cli.command {
        return run_resolve(url);
    }

    let mut settings = load_settings(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_logging(&settings.log_level)?;

    match cli.command {
        Commands::Graph { video, file, at } => {
            run_graph(&settings, &video, file.as_deref(), at).await?;
        }
        Commands::Layout {
            video,
            file,
            at,
            ticks,
        } => {
            run_layout(&settings, &video, file.as_deref(), at, ticks).await?;
        }
        Commands::Transcript { video, file } => {
            run_transcript(&settings, &video, file.as_deref()).await?;
        }
        Commands::Watch {
            video,
            file,
            start_at,
            rate,
        } => {
            if let Some(rate) = rate {
                if !(rate.is_finite() && rate > 0.0) {
                    bail!("--rate must be > 0, got {rate}");
                }
                settings.playback.rate = rate;
            }
            run_watch(&settings, &video, file.as_deref(), start_at).await?;
        }
        Commands::Resolve { url } => {
            run_resolve(&url)?;
        }
    }

    Ok(())
}
