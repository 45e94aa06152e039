//! Plain-text rendering of segmentation results for terminal display

use std::fmt::Write as _;

use crate::annotation::labels::display_name;
use crate::types::{Segment, SegmentViews, SkillTag};

const PREVIEW_CHARS: usize = 150;

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn write_tags(out: &mut String, tags: &[SkillTag]) {
    let _ = writeln!(out, "Cognitive Types:");
    for tag in tags {
        let _ = writeln!(out, "  - {}: {}", display_name(&tag.name), tag.description);
    }
}

pub fn render_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Video Segments Analysis:");
    let _ = writeln!(out, "{}", "=".repeat(50));
    for segment in segments {
        let _ = writeln!(out);
        let _ = writeln!(out, "Segment {}:", segment.index + 1);
        let _ = writeln!(out, "Timestamp: {}", segment.timestamp_label);
        let _ = writeln!(out, "Topic: {}", segment.topic);
        write_tags(&mut out, &segment.cognitive_tags);
        let _ = writeln!(out, "Transcript Preview: {}", preview(&segment.text));
        let _ = writeln!(out, "{}", "-".repeat(50));
    }
    out
}

pub fn render_views(views: &SegmentViews) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(80);
    let light = "-".repeat(80);

    let _ = writeln!(out, "1. TRANSCRIPT ANALYSIS");
    let _ = writeln!(out, "{}", heavy);
    for view in &views.transcript {
        let _ = writeln!(out, "\nTimestamp: {}", view.timestamp_label);
        let _ = writeln!(out, "Transcript: {}", view.text);
        let _ = writeln!(out, "{}", light);
    }

    let _ = writeln!(out, "\n2. TOPIC ANALYSIS");
    let _ = writeln!(out, "{}", heavy);
    for view in &views.topics {
        let _ = writeln!(out, "\nTimestamp: {}", view.timestamp_label);
        let _ = writeln!(out, "Topic: {}", view.topic);
        let _ = writeln!(out, "{}", light);
    }

    let _ = writeln!(out, "\n3. COGNITIVE ABILITY ANALYSIS");
    let _ = writeln!(out, "{}", heavy);
    for view in &views.skills {
        let _ = writeln!(out, "\nTimestamp: {}", view.timestamp_label);
        write_tags(&mut out, &view.cognitive_tags);
        let _ = writeln!(out, "{}", light);
    }
    out
}
