use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegmentationError {
    #[error("transcript contains no cues")]
    EmptyInput,
    #[error("failed to fetch transcript for '{video_id}': {source}")]
    UpstreamFetchFailure {
        video_id: String,
        #[source]
        source: TranscriptError,
    },
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl SegmentationError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub(crate) fn upstream(video_id: impl Into<String>, source: TranscriptError) -> Self {
        Self::UpstreamFetchFailure {
            video_id: video_id.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no transcript available for video '{video_id}'")]
    NotFound { video_id: String },
    #[error("cue {index} is invalid: {message}")]
    InvalidCue { index: usize, message: String },
}

impl TranscriptError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SegmentationError>;
