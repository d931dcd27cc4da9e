//! Command implementations.
//!
//! Handles:
//! - graph / layout: one-shot snapshot and headless layout
//! - transcript: timestamped caption listing
//! - watch: live session loop (`drive_session`)
//! - resolve: video id extraction

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use transcript_client::{resolve_video_id, source_from_config, TranscriptSource};
use transcript_layout::Simulation;
use transcript_topics::TopicPipeline;
use transcript_types::{PlaybackConfig, Settings, Transcript};

use crate::clock::{PlaybackClock, SimulatedClock};
use crate::command::ViewCommand;
use crate::render::{JsonLinesSink, RenderSink};
use crate::session::ViewSession;

/// Load settings and apply the `--log-level` override.
pub fn load_settings(config_path: Option<&str>, log_level: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(level) = log_level {
        settings.log_level = level.to_string();
    }
    Ok(settings)
}

/// Install the tracing subscriber. `RUST_LOG` wins over `level`.
///
/// Logs go to stderr; stdout is reserved for command output.
pub fn init_logging(level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

async fn fetch_transcript(settings: &Settings, video: &str, file: Option<&Path>) -> Result<Transcript> {
    let video_id = resolve_video_id(video)?;
    let source = source_from_config(&settings.source, file)?;
    info!(video_id = %video_id, source = %source.describe(), "Fetching transcript");
    let transcript = source
        .fetch(&video_id)
        .await
        .with_context(|| format!("Failed to fetch transcript for {video_id}"))?;
    Ok(transcript)
}

/// Print the snapshot for the transcript as seen at `at` (whole transcript
/// when None).
pub async fn run_graph(
    settings: &Settings,
    video: &str,
    file: Option<&Path>,
    at: Option<f64>,
) -> Result<()> {
    let transcript = fetch_transcript(settings, video, file).await?;
    let pipeline = TopicPipeline::new(settings.analysis.clone())?;
    let snapshot = pipeline.compute(&transcript, at);

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Run the simulation until it settles (or `ticks` steps) and print the
/// final frame.
pub async fn run_layout(
    settings: &Settings,
    video: &str,
    file: Option<&Path>,
    at: Option<f64>,
    ticks: u64,
) -> Result<()> {
    let transcript = fetch_transcript(settings, video, file).await?;
    let pipeline = TopicPipeline::new(settings.analysis.clone())?;
    let snapshot = pipeline.compute(&transcript, at);

    let mut simulation = Simulation::new(settings.layout.clone())?;
    simulation.set_snapshot(&snapshot);
    let steps = simulation.run(ticks);
    info!(
        steps = steps,
        settled = !simulation.is_running(),
        "Layout finished"
    );

    println!("{}", serde_json::to_string_pretty(&simulation.frame())?);
    Ok(())
}

pub async fn run_transcript(settings: &Settings, video: &str, file: Option<&Path>) -> Result<()> {
    let transcript = fetch_transcript(settings, video, file).await?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for entry in transcript.entries() {
        writeln!(out, "{} {}", entry.timestamp_label(), entry.text)?;
    }
    Ok(())
}

pub fn run_resolve(url: &str) -> Result<()> {
    println!("{}", resolve_video_id(url)?);
    Ok(())
}

/// Live session: plays the transcript on a simulated clock, streams render
/// events to stdout and reads view commands from stdin.
///
/// Runs until Ctrl+C or until stdout is closed.
pub async fn run_watch(
    settings: &Settings,
    video: &str,
    file: Option<&Path>,
    start_at: f64,
) -> Result<()> {
    let video_id = resolve_video_id(video)?;
    let source: Arc<dyn TranscriptSource> = Arc::from(source_from_config(&settings.source, file)?);

    let pipeline = TopicPipeline::new(settings.analysis.clone())?;
    let simulation = Simulation::new(settings.layout.clone())?;
    let mut clock = SimulatedClock::new(start_at, settings.playback.rate);
    clock.start();
    let mut session = ViewSession::new(pipeline, simulation, clock, JsonLinesSink::new(io::stdout()));
    session.start()?;

    info!(
        video_id = %video_id,
        source = %source.describe(),
        start_at = start_at,
        rate = settings.playback.rate,
        "Watch session starting"
    );

    let (tx, commands) = mpsc::channel(COMMAND_BUFFER);
    spawn_stdin_reader(tx).context("Failed to start command reader")?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl+C, shutting down...");
                cancel.cancel();
            }
        });
    }

    drive_session(
        &mut session,
        source,
        &video_id,
        &settings.playback,
        commands,
        cancel,
    )
    .await
}

const COMMAND_BUFFER: usize = 64;

/// Forward stdin lines from a detached thread. A blocking read there never
/// holds up runtime shutdown; the thread ends with the process.
fn spawn_stdin_reader(tx: mpsc::Sender<String>) -> io::Result<()> {
    std::thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || {
            for line in io::stdin().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read command");
                        break;
                    }
                }
            }
        })?;
    Ok(())
}

/// Event loop behind `watch`.
///
/// Fetches the transcript in the background and multiplexes fetch
/// completion, clock polls, simulation ticks and view commands onto
/// `session`. Returns once `cancel` fires or a render event cannot be
/// written; a fetch still in flight is aborted.
pub async fn drive_session<C, S>(
    session: &mut ViewSession<C, S>,
    source: Arc<dyn TranscriptSource>,
    video_id: &str,
    playback: &PlaybackConfig,
    mut commands: mpsc::Receiver<String>,
    cancel: CancellationToken,
) -> Result<()>
where
    C: PlaybackClock,
    S: RenderSink,
{
    let mut fetch = {
        let source = Arc::clone(&source);
        let video_id = video_id.to_string();
        tokio::spawn(async move { source.fetch(&video_id).await })
    };
    let mut fetch_pending = true;

    let mut clock_poll = tokio::time::interval(Duration::from_millis(playback.clock_poll_ms));
    let mut ticker = tokio::time::interval(Duration::from_millis(playback.tick_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut commands_open = true;

    let result: Result<()> = loop {
        tokio::select! {
            _ = cancel.cancelled() => break Ok(()),

            joined = &mut fetch, if fetch_pending => {
                fetch_pending = false;
                let outcome = match joined {
                    Ok(Ok(transcript)) => session.on_transcript_loaded(transcript),
                    Ok(Err(e)) => session.on_transcript_failed(e.to_string()),
                    Err(e) => session.on_transcript_failed(format!("Fetch task failed: {e}")),
                };
                if let Err(e) = outcome {
                    break Err(render_failed(e));
                }
            }

            _ = clock_poll.tick() => {
                if let Err(e) = session.on_clock_tick() {
                    break Err(render_failed(e));
                }
            }

            _ = ticker.tick(), if session.is_animating() => {
                if let Err(e) = session.on_sim_tick() {
                    break Err(render_failed(e));
                }
            }

            line = commands.recv(), if commands_open => match line {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => match ViewCommand::parse(&line) {
                    Ok(command) => {
                        if let Err(e) = session.on_command(command) {
                            break Err(render_failed(e));
                        }
                    }
                    Err(e) => warn!(error = %e, line = %line, "Ignoring malformed command"),
                },
                None => {
                    debug!("Command stream closed");
                    commands_open = false;
                }
            },
        }
    };

    fetch.abort();
    cancel.cancel();
    info!(state = session.state().name(), "Watch session ended");
    result
}

fn render_failed(err: io::Error) -> anyhow::Error {
    anyhow::Error::new(err).context("Failed to write render event")
}
