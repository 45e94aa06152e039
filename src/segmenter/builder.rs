use crate::annotation::Annotation;
use crate::timecode::{format_range, ClockStyle};
use crate::types::{Cue, Segment, Window};
use crate::windowing::TextRule;

/// Gather the transcript text belonging to `window`
///
/// An empty string is returned when no cue matches.
pub fn build_text(window: &Window, cues: &[Cue], rule: TextRule) -> String {
    let texts: Vec<&str> = match rule {
        TextRule::Assigned => cues
            .get(window.cues.clone())
            .unwrap_or(&[])
            .iter()
            .map(|cue| cue.text.trim())
            .collect(),
        TextRule::StartInRange => cues
            .iter()
            .filter(|cue| window.begin <= cue.start && cue.start < window.end)
            .map(|cue| cue.text.trim())
            .collect(),
    };
    texts
        .into_iter()
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn build_segment(
    index: usize,
    window: &Window,
    cues: &[Cue],
    rule: TextRule,
    style: ClockStyle,
    annotation: Annotation,
) -> Segment {
    Segment {
        index,
        begin: window.begin,
        end: window.end,
        timestamp_label: format_range(window.begin, window.end, style),
        text: build_text(window, cues, rule),
        topic: annotation.topic,
        cognitive_tags: annotation.cognitive_tags,
    }
}
