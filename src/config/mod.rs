use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::annotation::{Annotator, LabelPools};
use crate::error::SegmentationError;
use crate::timecode::ClockStyle;
use crate::types::{TailPolicy, WindowMode};
use crate::windowing::{FixedWindow, RandomWindow, WindowStrategy};

/// Segmentation parameters, loadable from JSON with every field optional
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmenterSettings {
    pub mode: WindowMode,
    pub fixed_threshold: f64, // seconds of summed cue duration
    pub tail: TailPolicy,
    pub min_width: u32, // seconds
    pub max_width: u32, // seconds
    pub tag_count: usize,
    pub clock_style: ClockStyle,
    /// Replaces the built-in topic and skill pools when present
    pub labels: Option<LabelPools>,
}

impl Default for SegmenterSettings {
    fn default() -> Self {
        Self {
            mode: WindowMode::default(),
            fixed_threshold: FixedWindow::DEFAULT_THRESHOLD,
            tail: TailPolicy::default(),
            min_width: RandomWindow::DEFAULT_MIN_WIDTH,
            max_width: RandomWindow::DEFAULT_MAX_WIDTH,
            tag_count: Annotator::DEFAULT_TAG_COUNT,
            clock_style: ClockStyle::default(),
            labels: None,
        }
    }
}

impl SegmenterSettings {
    pub fn label_pools(&self) -> &LabelPools {
        self.labels.as_ref().unwrap_or_else(|| LabelPools::builtin())
    }

    pub fn strategy(&self) -> Result<WindowStrategy, SegmentationError> {
        WindowStrategy::new(
            self.mode,
            self.fixed_threshold,
            self.tail,
            self.min_width,
            self.max_width,
        )
    }

    /// Check every parameter before any windowing begins
    pub fn validate(&self) -> Result<(), SegmentationError> {
        self.strategy()?;
        Annotator::new(self.label_pools(), self.tag_count)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: SegmenterSettings,
    /// File the settings were read from, if any
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_override(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(custom) => {
                let resolved = canonicalize_file(&custom)?;
                let settings = load_settings(&resolved)?;
                Ok(Self {
                    settings,
                    source: Some(resolved),
                })
            }
            None => Ok(Self {
                settings: SegmenterSettings::default(),
                source: None,
            }),
        }
    }
}

fn canonicalize_file(path: &Path) -> Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("failed to resolve config file at {:?}", path))?;
    if canonical.is_file() {
        Ok(canonical)
    } else {
        Err(anyhow!("config path {:?} is not a file", canonical))
    }
}

fn load_settings(path: &Path) -> Result<SegmenterSettings> {
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read config {:?}", path))?;
    parse_settings(&data).with_context(|| format!("invalid config {:?}", path))
}

pub fn parse_settings(raw: &str) -> Result<SegmenterSettings> {
    let settings: SegmenterSettings =
        serde_json::from_str(raw).context("failed to parse settings JSON")?;
    Ok(settings)
}
