//! Transcription sources - where cue sequences come from
//!
//! Cues are read from JSON arrays shaped like `[{"text": .., "start": .., "duration": ..}]`,
//! the layout common transcript downloaders emit. A source either returns the whole
//! sequence or fails; nothing is streamed.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::TranscriptError;
use crate::types::Cue;

pub trait TranscriptSource {
    fn fetch(&self, video_id: &str) -> Result<Vec<Cue>, TranscriptError>;
}

/// Parse a JSON cue array, rejecting negative or non-finite timings
///
/// Ordering by start offset is the producer's responsibility and is not checked here.
pub fn parse_cues(raw: &str) -> Result<Vec<Cue>, TranscriptError> {
    let cues: Vec<Cue> =
        serde_json::from_str(raw).map_err(|e| TranscriptError::json("parse transcript cues", e))?;
    for (index, cue) in cues.iter().enumerate() {
        if !cue.start.is_finite() || cue.start < 0.0 {
            return Err(TranscriptError::InvalidCue {
                index,
                message: format!("start must be a non-negative number, got {}", cue.start),
            });
        }
        if !cue.duration.is_finite() || cue.duration < 0.0 {
            return Err(TranscriptError::InvalidCue {
                index,
                message: format!(
                    "duration must be a non-negative number, got {}",
                    cue.duration
                ),
            });
        }
    }
    Ok(cues)
}

pub fn load_cues(path: &Path) -> Result<Vec<Cue>, TranscriptError> {
    let data = fs::read_to_string(path)
        .map_err(|e| TranscriptError::io(format!("reading {}", path.display()), e))?;
    let cues = parse_cues(&data)?;
    info!(path = %path.display(), cues = cues.len(), "loaded transcript");
    Ok(cues)
}

/// Serves one transcript file for every video id
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TranscriptSource for FileSource {
    fn fetch(&self, video_id: &str) -> Result<Vec<Cue>, TranscriptError> {
        debug!(video_id, path = %self.path.display(), "fetching transcript from file");
        load_cues(&self.path)
    }
}

/// Looks up `<root>/<video_id>.json`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, video_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", video_id))
    }
}

impl TranscriptSource for DirectorySource {
    fn fetch(&self, video_id: &str) -> Result<Vec<Cue>, TranscriptError> {
        // Ids containing path separators would escape the root.
        if video_id.is_empty() || video_id.contains(['/', '\\']) || video_id.contains("..") {
            return Err(TranscriptError::NotFound {
                video_id: video_id.to_string(),
            });
        }
        let path = self.path_for(video_id);
        if !path.is_file() {
            return Err(TranscriptError::NotFound {
                video_id: video_id.to_string(),
            });
        }
        load_cues(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_downloader_shape() {
        let json = r#"[
            {"text": "hello", "start": 0.0, "duration": 1.5},
            {"text": "world", "start": 1.5, "duration": 2}
        ]"#;
        let cues = parse_cues(json).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[1], Cue::new("world", 1.5, 2.0));
    }

    #[test]
    fn rejects_negative_timing() {
        let json = r#"[{"text": "x", "start": -1.0, "duration": 1.0}]"#;
        let err = parse_cues(json).unwrap_err();
        assert!(matches!(err, TranscriptError::InvalidCue { index: 0, .. }));

        let json = r#"[{"text": "x", "start": 1.0, "duration": -0.5}]"#;
        assert!(parse_cues(json).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_cues("{not json").unwrap_err();
        assert!(matches!(err, TranscriptError::Json { .. }));
    }

    #[test]
    fn unordered_cues_are_accepted() {
        let json = r#"[
            {"text": "late", "start": 10.0, "duration": 1.0},
            {"text": "early", "start": 2.0, "duration": 1.0}
        ]"#;
        assert_eq!(parse_cues(json).unwrap().len(), 2);
    }

    #[test]
    fn directory_source_refuses_escaping_ids() {
        let source = DirectorySource::new("transcripts");
        assert!(matches!(
            source.fetch("../secret"),
            Err(TranscriptError::NotFound { .. })
        ));
        assert!(source.path_for("abc").ends_with("abc.json"));
    }
}
