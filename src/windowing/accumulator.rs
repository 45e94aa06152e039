use rand::Rng;

use crate::error::{Result, SegmentationError};
use crate::types::{Cue, TailPolicy, Window};

use super::{Cursor, TextRule, WindowPolicy, EPS};

/// Closes a window once the summed durations of its cues reach `threshold`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWindow {
    threshold: f64,
    tail: TailPolicy,
}

impl FixedWindow {
    pub const DEFAULT_THRESHOLD: f64 = 180.0;

    pub fn new(threshold: f64, tail: TailPolicy) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(SegmentationError::invalid_config(format!(
                "fixed window threshold must be positive, got {}",
                threshold
            )));
        }
        Ok(Self { threshold, tail })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn tail(&self) -> TailPolicy {
        self.tail
    }

    fn flush_tail(&self, cues: &[Cue], cursor: Cursor, total_duration: f64) -> Option<Window> {
        if self.tail == TailPolicy::Drop || cursor.cue >= cues.len() {
            return None;
        }
        if total_duration - cursor.time <= EPS {
            return None;
        }
        Some(Window {
            begin: cursor.time,
            end: total_duration,
            cues: cursor.cue..cues.len(),
        })
    }
}

impl WindowPolicy for FixedWindow {
    fn next_window<R: Rng + ?Sized>(
        &self,
        cues: &[Cue],
        cursor: Cursor,
        total_duration: f64,
        _rng: &mut R,
    ) -> Option<Window> {
        let mut accumulated = 0.0;
        let mut furthest = cursor.time;
        for (idx, cue) in cues.iter().enumerate().skip(cursor.cue) {
            accumulated += cue.duration;
            furthest = furthest.max(cue.end());
            let end = furthest.min(total_duration);
            // Only close once the window actually extends past its start.
            if accumulated >= self.threshold - EPS && end - cursor.time > EPS {
                // A window reaching the end of the transcript leaves no room for a tail window.
                let last = if self.tail == TailPolicy::Flush && total_duration - end <= EPS {
                    cues.len()
                } else {
                    idx + 1
                };
                return Some(Window {
                    begin: cursor.time,
                    end,
                    cues: cursor.cue..last,
                });
            }
        }
        self.flush_tail(cues, cursor, total_duration)
    }

    fn text_rule(&self) -> TextRule {
        TextRule::Assigned
    }
}
