//! Windowing policies - decide where each segment of a transcript begins and ends
//!
//! A policy is asked for one window at a time, starting from a [`Cursor`].
//! Windows it returns are contiguous: each begins exactly where the previous one ended.

mod accumulator;
mod randomized;

pub use accumulator::FixedWindow;
pub use randomized::RandomWindow;

use rand::Rng;
use tracing::debug;

use crate::error::Result;
use crate::types::{Cue, TailPolicy, Window, WindowMode};

pub(crate) const EPS: f64 = 1e-9;

/// How the segment builder gathers text for a window produced by a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    /// Join the cues the policy assigned to the window
    Assigned,
    /// Join every cue whose start lies inside the window
    StartInRange,
}

/// Position reached so far while walking a transcript
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    pub time: f64,
    /// Index of the first cue not yet assigned to a window
    pub cue: usize,
}

impl Cursor {
    pub fn advance(self, window: &Window) -> Self {
        Self {
            time: window.end,
            cue: window.cues.end.max(self.cue),
        }
    }
}

pub trait WindowPolicy {
    /// Produce the window starting at `cursor`, or `None` once the transcript is exhausted
    fn next_window<R: Rng + ?Sized>(
        &self,
        cues: &[Cue],
        cursor: Cursor,
        total_duration: f64,
        rng: &mut R,
    ) -> Option<Window>;

    fn text_rule(&self) -> TextRule;
}

/// Policy selected from configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowStrategy {
    Fixed(FixedWindow),
    Randomized(RandomWindow),
}

impl WindowStrategy {
    pub fn new(
        mode: WindowMode,
        fixed_threshold: f64,
        tail: TailPolicy,
        min_width: u32,
        max_width: u32,
    ) -> Result<Self> {
        match mode {
            WindowMode::Fixed => Ok(Self::Fixed(FixedWindow::new(fixed_threshold, tail)?)),
            WindowMode::Randomized => Ok(Self::Randomized(RandomWindow::new(min_width, max_width)?)),
        }
    }
}

impl WindowPolicy for WindowStrategy {
    fn next_window<R: Rng + ?Sized>(
        &self,
        cues: &[Cue],
        cursor: Cursor,
        total_duration: f64,
        rng: &mut R,
    ) -> Option<Window> {
        match self {
            Self::Fixed(policy) => policy.next_window(cues, cursor, total_duration, rng),
            Self::Randomized(policy) => policy.next_window(cues, cursor, total_duration, rng),
        }
    }

    fn text_rule(&self) -> TextRule {
        match self {
            Self::Fixed(policy) => policy.text_rule(),
            Self::Randomized(policy) => policy.text_rule(),
        }
    }
}

/// Run a policy until it signals completion
pub fn plan_windows<P, R>(policy: &P, cues: &[Cue], total_duration: f64, rng: &mut R) -> Vec<Window>
where
    P: WindowPolicy,
    R: Rng + ?Sized,
{
    let mut windows = Vec::new();
    let mut cursor = Cursor::default();
    while let Some(window) = policy.next_window(cues, cursor, total_duration, rng) {
        // A policy that stops advancing would never terminate.
        if window.end <= cursor.time {
            debug!(
                begin = window.begin,
                end = window.end,
                "policy returned a window that does not advance; stopping"
            );
            break;
        }
        debug!(begin = window.begin, end = window.end, cues = ?window.cues, "planned window");
        cursor = cursor.advance(&window);
        windows.push(window);
    }
    windows
}
