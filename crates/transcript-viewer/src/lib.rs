//! Transcript viewer library exports.
//!
//! Wires the topic pipeline and layout simulation to a playback clock, a
//! transcript source and a render sink.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `clock`: Playback clock capability and simulated clock
//! - `command`: View commands read from the renderer
//! - `commands`: Command implementations (graph, layout, transcript, watch, resolve)
//! - `render`: Render events and sinks
//! - `session`: Live view session

pub mod cli;
pub mod clock;
pub mod command;
pub mod commands;
pub mod render;
pub mod session;

pub use cli::{Cli, Commands};
pub use clock::{PlaybackClock, SimulatedClock};
pub use command::ViewCommand;
pub use commands::{
    drive_session, init_logging, load_settings, run_graph, run_layout, run_resolve,
    run_transcript, run_watch,
};
pub use render::{CaptionLine, JsonLinesSink, RenderEvent, RenderSink};
pub use session::{SessionState, ViewSession};
