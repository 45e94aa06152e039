pub mod annotation;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interactions;
pub mod report;
pub mod segmenter;
pub mod timecode;
pub mod transcription;
pub mod types;
pub mod windowing;

pub use annotation::{Annotator, LabelPools, Skill};
pub use config::SegmenterSettings;
pub use error::{SegmentationError, TranscriptError};
pub use segmenter::{total_duration, Segmenter};
pub use transcription::{DirectorySource, FileSource, TranscriptSource};
pub use types::{Cue, Segment, SegmentViews, SkillTag, TailPolicy, Window, WindowMode};
pub use windowing::{FixedWindow, RandomWindow, WindowPolicy, WindowStrategy};
