//! Integration tests for the transcript viewer.
//!
//! These drive a view session the way the watch loop does: fetch through a
//! transcript source, then clock polls and simulation ticks, checking the
//! JSON lines a renderer would receive.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use transcript_client::{MockTranscriptSource, TranscriptSource};
use transcript_layout::Simulation;
use transcript_topics::TopicPipeline;
use transcript_types::{
    AnalysisConfig, LayoutConfig, PlaybackConfig, Settings, Transcript, TranscriptEntry,
};
use transcript_viewer::{
    drive_session, load_settings, run_graph, run_layout, run_resolve, run_transcript, JsonLinesSink,
    SimulatedClock, ViewCommand, ViewSession,
};

fn sample_transcript() -> Transcript {
    let texts = [
        "welcome to the stream about rust compilers",
        "compilers turn source into machine code",
        "the rust compiler is written in rust",
        "today we look at compilers and parsers",
        "parsers feed the compiler an abstract tree",
        "rust makes compilers pleasant to write",
    ];
    Transcript::new(
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                TranscriptEntry::new(
                    *t,
                    Duration::from_secs(i as u64 * 3),
                    Duration::from_secs(i as u64 * 3 + 3),
                )
            })
            .collect(),
    )
}

fn new_session(start_at: f64) -> ViewSession<SimulatedClock, JsonLinesSink<Vec<u8>>> {
    let pipeline = TopicPipeline::new(AnalysisConfig {
        step: 2,
        frequency_threshold: 2,
        ..AnalysisConfig::default()
    })
    .unwrap();
    let simulation = Simulation::new(LayoutConfig {
        seed: Some(11),
        ..LayoutConfig::default()
    })
    .unwrap();
    let mut clock = SimulatedClock::new(start_at, 1.0);
    clock.start();
    ViewSession::new(pipeline, simulation, clock, JsonLinesSink::new(Vec::new()))
}

fn events(session: ViewSession<SimulatedClock, JsonLinesSink<Vec<u8>>>) -> Vec<Value> {
    String::from_utf8(session.into_sink().into_inner())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn write_transcript_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    let json = serde_json::to_string(&sample_transcript()).unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_session_streams_snapshot_and_frames() {
    let source = MockTranscriptSource::new(sample_transcript());
    let mut session = new_session(100.0);
    session.start().unwrap();

    let transcript = source.fetch("abc").await.unwrap();
    session.on_transcript_loaded(transcript).unwrap();

    let mut frames = 0;
    while session.on_sim_tick().unwrap() {
        frames += 1;
        assert!(frames < 10_000, "simulation never settled");
    }
    assert!(!session.is_animating());

    let events = events(session);
    let kinds: Vec<&str> = events
        .iter()
        .take(4)
        .map(|e| e["event"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["status", "status", "transcript", "snapshot"]);
    assert_eq!(events[0]["state"], "loading");
    assert_eq!(events[1]["state"], "ready");
    assert_eq!(events[2]["lines"].as_array().unwrap().len(), 6);
    assert_eq!(events[2]["lines"][1]["timestamp"], "00:00:03");

    let snapshot = &events[3];
    let ids: Vec<&Value> = snapshot["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| &n["id"])
        .collect();
    assert!(ids.contains(&&Value::from("start")));
    assert!(ids.contains(&&Value::from("end")));
    assert!(ids.iter().any(|id| id.as_str().map_or(false, |s| s.starts_with("compil"))));

    let frame_events: Vec<&Value> = events.iter().filter(|e| e["event"] == "frame").collect();
    assert_eq!(frame_events.len(), frames);
    let last = frame_events.last().unwrap();
    assert_eq!(
        last["positions"].as_array().unwrap().len(),
        snapshot["nodes"].as_array().unwrap().len()
    );
}

#[tokio::test]
async fn test_session_failed_fetch() {
    let source = MockTranscriptSource::failing("Transcript service returned HTTP 500: boom");
    let mut session = new_session(0.0);
    session.start().unwrap();

    match source.fetch("abc").await {
        Ok(transcript) => session.on_transcript_loaded(transcript).unwrap(),
        Err(e) => session.on_transcript_failed(e.to_string()).unwrap(),
    }
    assert!(!session.on_clock_tick().unwrap());

    let events = events(session);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1]["state"], "failed");
    assert!(events[1]["message"].as_str().unwrap().contains("HTTP 500"));
}

fn cancel_after(delay: Duration) -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        trigger.cancel();
    });
    cancel
}

#[tokio::test]
async fn test_drive_session_stops_on_cancel_with_open_commands() {
    let source = Arc::new(
        MockTranscriptSource::new(sample_transcript()).with_delay(Duration::from_secs(60)),
    );
    let mut session = new_session(0.0);
    session.start().unwrap();

    // sender stays alive, so the command stream never ends
    let (_commands_tx, commands) = mpsc::channel(8);
    let cancel = cancel_after(Duration::from_millis(200));

    let finished = tokio::time::timeout(
        Duration::from_secs(5),
        drive_session(
            &mut session,
            source.clone(),
            "abc",
            &PlaybackConfig::default(),
            commands,
            cancel,
        ),
    )
    .await;
    assert!(finished.is_ok(), "session loop ignored cancellation");
    finished.unwrap().unwrap();

    assert_eq!(source.calls(), 1);
    assert_eq!(session.state().name(), "loading");
}

#[tokio::test]
async fn test_drive_session_applies_commands() {
    let source = Arc::new(MockTranscriptSource::new(sample_transcript()));
    let mut session = new_session(0.0);
    session.start().unwrap();

    let (commands_tx, commands) = mpsc::channel(8);
    commands_tx.send("not a command".to_string()).await.unwrap();
    commands_tx
        .send(r#"{"command": "seek", "seconds": 7.0}"#.to_string())
        .await
        .unwrap();
    drop(commands_tx);
    let cancel = cancel_after(Duration::from_millis(300));

    drive_session(
        &mut session,
        source.clone(),
        "abc",
        &PlaybackConfig::default(),
        commands,
        cancel,
    )
    .await
    .unwrap();

    assert_eq!(source.calls(), 1);
    assert_eq!(session.state().name(), "ready");
    // entries at 0s, 3s and 6s are visible -> two segments of two
    assert_eq!(session.snapshot().segment_count(), 2);

    let events = events(session);
    assert!(events
        .iter()
        .any(|e| e["event"] == "seek" && e["seconds"] == 7.0));
}

#[tokio::test]
async fn test_graph_grows_with_playback() {
    let mut session = new_session(0.0);
    session.on_transcript_loaded(sample_transcript()).unwrap();
    assert_eq!(session.snapshot().segment_count(), 1);

    session
        .on_command(ViewCommand::Seek { seconds: 7.0 })
        .unwrap();
    assert_eq!(session.snapshot().segment_count(), 2);
    assert!(session.snapshot().validate().is_ok());

    session
        .on_command(ViewCommand::SeekSegment { index: 0 })
        .unwrap();
    assert_eq!(session.snapshot().segment_count(), 1);
}

#[test]
fn test_load_settings_from_file_with_log_override() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "log_level = \"warn\"\n\n[analysis]\nstep = 4\n\n[playback]\nrate = 2.0"
    )
    .unwrap();

    let path = file.path().to_string_lossy().to_string();
    let settings = load_settings(Some(&path), None).unwrap();
    assert_eq!(settings.log_level, "warn");
    assert_eq!(settings.analysis.step, 4);
    assert_eq!(settings.playback.rate, 2.0);

    let settings = load_settings(Some(&path), Some("trace")).unwrap();
    assert_eq!(settings.log_level, "trace");
}

#[test]
fn test_load_settings_rejects_invalid_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[analysis]\nstep = 0").unwrap();
    let path = file.path().to_string_lossy().to_string();
    assert!(load_settings(Some(&path), None).is_err());
}

#[tokio::test]
async fn test_one_shot_commands_read_files() {
    let file = write_transcript_file();
    let settings = Settings::default();

    run_graph(&settings, "abc", Some(file.path()), None).await.unwrap();
    run_graph(&settings, "abc", Some(file.path()), Some(4.0)).await.unwrap();
    run_layout(&settings, "abc", Some(file.path()), None, 50).await.unwrap();
    run_transcript(&settings, "abc", Some(file.path())).await.unwrap();
}

#[tokio::test]
async fn test_one_shot_commands_report_errors() {
    let settings = Settings::default();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    assert!(run_graph(&settings, "abc", Some(missing.as_path()), None).await.is_err());
    assert!(run_graph(&settings, "https://example.com/feed", None, None).await.is_err());
    assert!(run_resolve("https://youtu.be/9Edkw-PC_jI").is_ok());
    assert!(run_resolve("definitely not a url").is_err());
}
