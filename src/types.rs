//! Core types for the clipseg segmentation pipeline

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// One transcript entry as delivered by the transcript source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub text: String,
    pub start: f64,    // seconds from video start
    pub duration: f64, // seconds
}

impl Cue {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Half-open time interval `[begin, end)` chosen by a windowing policy
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub begin: f64, // seconds
    pub end: f64,   // seconds
    /// Cues the policy assigned to this window; empty when the policy does not partition cues
    pub cues: Range<usize>,
}

impl Window {
    pub fn width(&self) -> f64 {
        self.end - self.begin
    }
}

/// A cognitive skill attached to a segment, carried with its description for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillTag {
    pub name: String,
    pub description: String,
}

/// Annotated output unit bound to exactly one window
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub index: usize,
    pub begin: f64,
    pub end: f64,
    pub timestamp_label: String,
    pub text: String,
    pub topic: String,
    pub cognitive_tags: Vec<SkillTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptView {
    pub timestamp_label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicView {
    pub timestamp_label: String,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillView {
    pub timestamp_label: String,
    pub cognitive_tags: Vec<SkillTag>,
}

/// Three parallel views over the same windows
#[derive(Debug, Clone, Default, Serialize)]
pub struct SegmentViews {
    pub transcript: Vec<TranscriptView>,
    pub topics: Vec<TopicView>,
    pub skills: Vec<SkillView>,
}

impl SegmentViews {
    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }
}

impl From<Vec<Segment>> for SegmentViews {
    fn from(segments: Vec<Segment>) -> Self {
        let mut views = SegmentViews::default();
        for segment in segments {
            views.transcript.push(TranscriptView {
                timestamp_label: segment.timestamp_label.clone(),
                text: segment.text,
            });
            views.topics.push(TopicView {
                timestamp_label: segment.timestamp_label.clone(),
                topic: segment.topic,
            });
            views.skills.push(SkillView {
                timestamp_label: segment.timestamp_label,
                cognitive_tags: segment.cognitive_tags,
            });
        }
        views
    }
}

/// Windowing policy selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Close a window once cue durations sum past a threshold
    Fixed,
    /// Draw each window width uniformly from a bounded range
    #[default]
    Randomized,
}

/// What the fixed-duration policy does with cues left over when input runs out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TailPolicy {
    #[default]
    Drop,
    Flush,
}
