//! Fixed-size windowing of transcript entries into segments.
//!
//! Each window of `step` consecutive entries becomes one dialogue segment,
//! the unit that appears as a timeline node. The last window may be partial.

use std::ops::Range;

use tracing::debug;

use transcript_types::TranscriptEntry;

/// A window of consecutive transcript entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Window index, also the node id
    pub index: usize,
    /// Space-joined entry texts
    pub text: String,
    /// Entry indices covered by this window
    pub source_range: Range<usize>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.source_range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_range.is_empty()
    }
}

/// Partition `entries` into consecutive windows of `step` entries.
///
/// A `step` of zero is treated as one entry per window.
pub fn segment_entries(entries: &[TranscriptEntry], step: usize) -> Vec<Segment> {
    let step = step.max(1);
    let segments: Vec<Segment> = entries
        .chunks(step)
        .enumerate()
        .map(|(index, window)| {
            let start = index * step;
            Segment {
                index,
                text: window
                    .iter()
                    .map(|e| e.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
                source_range: start..start + window.len(),
            }
        })
        .collect();

    debug!(
        entries = entries.len(),
        step = step,
        segments = segments.len(),
        "Segmented transcript"
    );
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn entries(count: usize) -> Vec<TranscriptEntry> {
        (0..count)
            .map(|i| {
                TranscriptEntry::new(
                    format!("line{i}"),
                    Duration::from_secs(i as u64),
                    Duration::from_secs(i as u64 + 1),
                )
            })
            .collect()
    }

    #[test]
    fn test_twelve_entries_make_two_segments() {
        let segments = segment_entries(&entries(12), 10);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 10);
        assert_eq!(segments[1].len(), 2);
        assert_eq!(segments[1].source_range, 10..12);
        assert_eq!(segments[1].text, "line10 line11");
    }

    #[test]
    fn test_segment_count_is_ceiling() {
        for len in 0..35 {
            for step in 1..12 {
                let segments = segment_entries(&entries(len), step);
                assert_eq!(segments.len(), len.div_ceil(step));
                for segment in &segments {
                    assert!(!segment.is_empty() && segment.len() <= step);
                }
                if let Some(last) = segments.last() {
                    assert_eq!(last.source_range.end, len);
                }
            }
        }
    }

    #[test]
    fn test_indices_are_monotonic() {
        let segments = segment_entries(&entries(25), 10);
        let indices: Vec<usize> = segments.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_transcript() {
        assert!(segment_entries(&[], 10).is_empty());
    }

    #[test]
    fn test_zero_step_is_clamped() {
        assert_eq!(segment_entries(&entries(3), 0).len(), 3);
    }
}
