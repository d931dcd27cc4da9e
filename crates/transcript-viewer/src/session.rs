//! A live view of one transcript.
//!
//! The session owns the topic pipeline, the layout simulation, the playback
//! clock and the render sink, and reacts to four kinds of events: transcript
//! load, clock polls, simulation ticks and renderer commands. It is driven
//! from a single task, so none of its state is shared.

use std::io;

use tracing::{debug, info, warn};

use transcript_layout::Simulation;
use transcript_topics::TopicPipeline;
use transcript_types::{GraphSnapshot, Transcript};

use crate::clock::PlaybackClock;
use crate::command::ViewCommand;
use crate::render::{CaptionLine, RenderEvent, RenderSink};

/// Transcript lifecycle of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    Ready(Transcript),
    /// Fetch failed; the session stays here and shows an empty graph
    Failed(String),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Loading => "loading",
            SessionState::Ready(_) => "ready",
            SessionState::Failed(_) => "failed",
        }
    }
}

pub struct ViewSession<C, S> {
    pipeline: TopicPipeline,
    simulation: Simulation,
    clock: C,
    sink: S,
    state: SessionState,
    snapshot: GraphSnapshot,
    /// Entry count the current snapshot was built from
    visible: Option<usize>,
    caption: Option<usize>,
}

impl<C: PlaybackClock, S: RenderSink> ViewSession<C, S> {
    pub fn new(pipeline: TopicPipeline, simulation: Simulation, clock: C, sink: S) -> Self {
        Self {
            pipeline,
            simulation,
            clock,
            sink,
            state: SessionState::Loading,
            snapshot: GraphSnapshot::empty(),
            visible: None,
            caption: None,
        }
    }

    /// Announce the loading state.
    pub fn start(&mut self) -> io::Result<()> {
        self.sink.emit(RenderEvent::status("loading", None))
    }

    pub fn on_transcript_loaded(&mut self, transcript: Transcript) -> io::Result<()> {
        info!(entries = transcript.len(), "Transcript ready");
        self.sink.emit(RenderEvent::status("ready", None))?;
        self.sink.emit(RenderEvent::Transcript {
            lines: CaptionLine::listing(&transcript),
        })?;
        self.state = SessionState::Ready(transcript);
        self.visible = None;
        self.refresh()
    }

    pub fn on_transcript_failed(&mut self, message: impl Into<String>) -> io::Result<()> {
        let message = message.into();
        warn!(error = %message, "Transcript unavailable");
        self.sink
            .emit(RenderEvent::status("failed", Some(message.clone())))?;
        self.state = SessionState::Failed(message);
        Ok(())
    }

    /// Poll the clock. Recomputes only when the visible entry count changed.
    ///
    /// Returns whether a new snapshot was built.
    pub fn on_clock_tick(&mut self) -> io::Result<bool> {
        self.refresh_caption()?;
        let before = self.visible;
        self.refresh()?;
        Ok(self.visible != before)
    }

    /// Advance the layout one tick and emit the frame, if it is still moving.
    pub fn on_sim_tick(&mut self) -> io::Result<bool> {
        if !self.simulation.tick() {
            return Ok(false);
        }
        self.sink.emit(RenderEvent::Frame(self.simulation.frame()))?;
        Ok(true)
    }

    pub fn on_command(&mut self, command: ViewCommand) -> io::Result<()> {
        debug!(?command, "View command");
        match command {
            ViewCommand::DragStart { id } => {
                self.simulation.drag_start(&id);
            }
            ViewCommand::DragMove { id, x, y } => {
                self.simulation.drag_move(&id, x, y);
            }
            ViewCommand::DragEnd { id } => {
                self.simulation.drag_end(&id);
            }
            ViewCommand::SeekSegment { index } => self.seek_segment(index)?,
            ViewCommand::Seek { seconds } => self.seek(seconds)?,
        }
        Ok(())
    }

    /// Jump playback to the first caption of segment `index`.
    pub fn seek_segment(&mut self, index: usize) -> io::Result<()> {
        let SessionState::Ready(transcript) = &self.state else {
            return Ok(());
        };
        match self.pipeline.segment_start(transcript, index) {
            Some(begin) => self.seek(begin.as_secs_f64()),
            None => {
                debug!(index = index, "Ignoring seek to unknown segment");
                Ok(())
            }
        }
    }

    pub fn seek(&mut self, seconds: f64) -> io::Result<()> {
        self.clock.seek_to(seconds);
        self.sink.emit(RenderEvent::Seek { seconds })?;
        self.on_clock_tick().map(|_| ())
    }

    /// Whether simulation ticks still do anything.
    pub fn is_animating(&self) -> bool {
        self.simulation.is_running()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Position used to filter the transcript. Before the clock is ready the
    /// view shows the state at the start of playback.
    fn playback_position(&self) -> f64 {
        self.clock.current_time().unwrap_or(0.0)
    }

    fn refresh(&mut self) -> io::Result<()> {
        let SessionState::Ready(transcript) = &self.state else {
            return Ok(());
        };
        let at = self.playback_position();
        let count = self.pipeline.visible_count(transcript, Some(at));
        if self.visible == Some(count) {
            return Ok(());
        }

        let snapshot = self.pipeline.compute(transcript, Some(at));
        self.simulation.set_snapshot(&snapshot);
        self.visible = Some(count);
        debug!(
            at = at,
            visible = count,
            nodes = snapshot.nodes.len(),
            "Snapshot rebuilt"
        );
        self.snapshot = snapshot.clone();
        self.sink.emit(RenderEvent::Snapshot(snapshot))
    }

    fn refresh_caption(&mut self) -> io::Result<()> {
        let SessionState::Ready(transcript) = &self.state else {
            return Ok(());
        };
        let Some(at) = self.clock.current_time() else {
            return Ok(());
        };
        let caption = transcript.entry_index_at(at);
        if caption == self.caption {
            return Ok(());
        }
        self.caption = caption;
        match caption {
            Some(index) => self.sink.emit(RenderEvent::Caption { index }),
            None => Ok(()),
        }
    }
}
