//! Commands sent to a running view session.

use serde::Deserialize;

use transcript_types::NodeId;

/// One line of input from the renderer, tagged by `command`.
///
/// ```json
/// {"command": "drag_start", "id": 3}
/// {"command": "drag_move", "id": 3, "x": 100.0, "y": 200.0}
/// {"command": "drag_end", "id": 3}
/// {"command": "seek_segment", "index": 2}
/// {"command": "seek", "seconds": 42.5}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewCommand {
    DragStart { id: NodeId },
    DragMove { id: NodeId, x: f64, y: f64 },
    DragEnd { id: NodeId },
    /// Jump playback to the first caption of a segment
    SeekSegment { index: usize },
    Seek { seconds: f64 },
}

impl ViewCommand {
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }
}
