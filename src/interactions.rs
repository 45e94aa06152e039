//! Playback interaction log - an append-only record of what a viewer did and when

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::timecode::{format_clock, ClockStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Play,
    Pause,
    Seek,
    SeekForward,
    SeekBackward,
}

impl Action {
    pub fn is_seek(self) -> bool {
        matches!(self, Self::Seek | Self::SeekForward | Self::SeekBackward)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Seek => "seek",
            Self::SeekForward => "seek forward",
            Self::SeekBackward => "seek backward",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Wall-clock milliseconds since the viewing session started
    pub at_ms: u64,
    /// Playback position when the action happened
    pub video_time_ms: u64,
    pub action: Action,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionLog {
    events: Vec<InteractionEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionSummary {
    pub total_pauses: usize,
    /// All seek kinds, including relative skips
    pub total_seeks: usize,
    pub session_ms: u64,
    pub events: usize,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<InteractionEvent>) -> Self {
        Self { events }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read interaction log {:?}", path))?;
        let events: Vec<InteractionEvent> =
            serde_json::from_str(&data).context("Failed to parse interaction log JSON")?;
        Ok(Self::from_events(events))
    }

    pub fn record(&mut self, action: Action, video_time_ms: u64, at_ms: u64) {
        self.events.push(InteractionEvent {
            at_ms,
            video_time_ms,
            action,
        });
    }

    pub fn events(&self) -> &[InteractionEvent] {
        &self.events
    }

    pub fn summary(&self) -> InteractionSummary {
        InteractionSummary {
            total_pauses: self
                .events
                .iter()
                .filter(|event| event.action == Action::Pause)
                .count(),
            total_seeks: self
                .events
                .iter()
                .filter(|event| event.action.is_seek())
                .count(),
            session_ms: self.events.iter().map(|event| event.at_ms).max().unwrap_or(0),
            events: self.events.len(),
        }
    }

    /// Chronological report in the same clock format as segment labels
    pub fn render(&self) -> String {
        let summary = self.summary();
        let mut out = String::new();
        let rule = "=".repeat(50);
        let _ = writeln!(out, "VIDEO INTERACTION SUMMARY");
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(
            out,
            "Total Viewing Session: {}",
            format_clock(summary.session_ms as f64 / 1000.0, ClockStyle::Compact)
        );
        let _ = writeln!(out, "Total Pauses: {}", summary.total_pauses);
        let _ = writeln!(out, "Total Seeks: {}", summary.total_seeks);
        let _ = writeln!(out);
        let _ = writeln!(out, "Chronological Interaction Log:");
        let _ = writeln!(out, "{}", "-".repeat(50));

        let mut ordered: Vec<&InteractionEvent> = self.events.iter().collect();
        ordered.sort_by_key(|event| event.at_ms);
        for event in ordered {
            let _ = writeln!(
                out,
                "[{}] At video time {}: {}",
                format_clock(event.at_ms as f64 / 1000.0, ClockStyle::Padded),
                format_clock(event.video_time_ms as f64 / 1000.0, ClockStyle::Compact),
                event.action.label()
            );
        }
        out
    }
}
