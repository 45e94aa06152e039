use rand::Rng;

use crate::error::{Result, SegmentationError};
use crate::types::{Cue, Window};

use super::{Cursor, TextRule, WindowPolicy};

/// Draws each window width uniformly from `[min_width, max_width]` whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomWindow {
    min_width: u32,
    max_width: u32,
}

impl RandomWindow {
    pub const DEFAULT_MIN_WIDTH: u32 = 30;
    pub const DEFAULT_MAX_WIDTH: u32 = 120;

    pub fn new(min_width: u32, max_width: u32) -> Result<Self> {
        if min_width == 0 {
            return Err(SegmentationError::invalid_config(
                "random window minimum width must be positive",
            ));
        }
        if max_width < min_width {
            return Err(SegmentationError::invalid_config(format!(
                "random window bounds out of order: max {} < min {}",
                max_width, min_width
            )));
        }
        Ok(Self {
            min_width,
            max_width,
        })
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.min_width, self.max_width)
    }
}

impl Default for RandomWindow {
    fn default() -> Self {
        Self {
            min_width: Self::DEFAULT_MIN_WIDTH,
            max_width: Self::DEFAULT_MAX_WIDTH,
        }
    }
}

impl WindowPolicy for RandomWindow {
    fn next_window<R: Rng + ?Sized>(
        &self,
        _cues: &[Cue],
        cursor: Cursor,
        total_duration: f64,
        rng: &mut R,
    ) -> Option<Window> {
        if cursor.time >= total_duration {
            return None;
        }
        let width = rng.gen_range(self.min_width..=self.max_width);
        let end = (cursor.time + f64::from(width)).min(total_duration);
        Some(Window {
            begin: cursor.time,
            end,
            cues: cursor.cue..cursor.cue,
        })
    }

    fn text_rule(&self) -> TextRule {
        TextRule::StartInRange
    }
}
