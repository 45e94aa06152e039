use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::catalog::Catalog;
use crate::config::SegmenterSettings;
use crate::timecode::{parse_clock, ClockStyle};
use crate::types::{TailPolicy, WindowMode};

#[derive(Parser, Debug)]
#[command(
    name = "clipseg",
    version,
    about = "Split video transcripts into timed, annotated learning segments"
)]
pub struct Cli {
    /// Log progress to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Segment a transcript and print the annotated segments.
    Segment(SegmentArgs),
    /// List the built-in video catalog.
    Catalog(CatalogArgs),
    /// Summarize a recorded playback interaction log.
    Interactions(InteractionArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Where the transcript comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Transcript JSON file (array of {text, start, duration}).
    #[arg(long, value_name = "FILE", conflicts_with_all = ["video_id", "grade"])]
    pub transcript: Option<PathBuf>,
    /// Video id looked up as <DIR>/<ID>.json.
    #[arg(long, value_name = "ID", conflicts_with = "grade")]
    pub video_id: Option<String>,
    /// Directory of per-video transcript files.
    #[arg(long, value_name = "DIR")]
    pub transcripts_dir: Option<PathBuf>,
    /// Catalog grade to pick a video from.
    #[arg(long, requires_all = ["subject", "video"])]
    pub grade: Option<u8>,
    /// Catalog subject (also used as the topic category).
    #[arg(long, requires = "grade")]
    pub subject: Option<String>,
    /// 1-based position of the video within the subject listing.
    #[arg(long, requires = "grade")]
    pub video: Option<usize>,
}

/// A transcript input with its catalog context resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedInput {
    File(PathBuf),
    Directory {
        root: PathBuf,
        video_id: String,
        /// Subject from the catalog, when the video was picked there
        subject: Option<String>,
    },
}

impl InputArgs {
    pub fn resolve(&self, catalog: &Catalog) -> Result<ResolvedInput> {
        if let Some(path) = &self.transcript {
            return Ok(ResolvedInput::File(path.clone()));
        }
        let root = || {
            self.transcripts_dir
                .clone()
                .context("--transcripts-dir is required when selecting a video by id")
        };
        if let Some(video_id) = &self.video_id {
            return Ok(ResolvedInput::Directory {
                root: root()?,
                video_id: video_id.clone(),
                subject: None,
            });
        }
        if let (Some(grade), Some(subject), Some(position)) =
            (self.grade, self.subject.as_deref(), self.video)
        {
            let entry = catalog.select(grade, subject, position).with_context(|| {
                format!(
                    "no catalog video {} for grade {} subject '{}'",
                    position, grade, subject
                )
            })?;
            return Ok(ResolvedInput::Directory {
                root: root()?,
                video_id: entry.video_id.clone(),
                subject: Some(entry.subject.clone()),
            });
        }
        bail!("provide --transcript, --video-id, or --grade/--subject/--video")
    }
}

/// Windowing and annotation overrides layered on top of the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// JSON settings file; flags below override its values.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub mode: Option<WindowMode>,
    /// Summed cue duration that closes a fixed window, as seconds or MM:SS / H:MM:SS.
    #[arg(long, value_name = "TIME", value_parser = parse_clock)]
    pub threshold: Option<f64>,
    /// Keep or discard cues left over after the last fixed window.
    #[arg(long, value_enum)]
    pub tail: Option<TailPolicy>,
    /// Smallest randomized window width in seconds.
    #[arg(long = "min-width")]
    pub min_width: Option<u32>,
    /// Largest randomized window width in seconds.
    #[arg(long = "max-width")]
    pub max_width: Option<u32>,
    /// Number of cognitive-skill tags per segment.
    #[arg(long)]
    pub tags: Option<usize>,
    #[arg(long, value_enum)]
    pub clock: Option<ClockStyle>,
}

impl WindowArgs {
    pub fn apply(&self, settings: &mut SegmenterSettings) -> Result<()> {
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        if let Some(threshold) = self.threshold {
            ensure!(threshold > 0.0, "threshold must be positive");
            settings.fixed_threshold = threshold;
        }
        if let Some(tail) = self.tail {
            settings.tail = tail;
        }
        if let Some(min) = self.min_width {
            settings.min_width = min;
        }
        if let Some(max) = self.max_width {
            settings.max_width = max;
        }
        if let Some(tags) = self.tags {
            settings.tag_count = tags;
        }
        if let Some(clock) = self.clock {
            settings.clock_style = clock;
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub window: WindowArgs,
    /// Topic category; defaults to the catalog subject or the default pool.
    #[arg(long)]
    pub category: Option<String>,
    /// Seed for window widths and label sampling.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print transcript, topic and skill views separately.
    #[arg(long)]
    pub views: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Only list this grade.
    #[arg(long)]
    pub grade: Option<u8>,
}

#[derive(Args, Debug, Clone)]
pub struct InteractionArgs {
    /// Interaction log JSON (array of {at_ms, video_time_ms, action}).
    #[arg(value_name = "LOG")]
    pub log: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_segment_flags() {
        let cli = Cli::parse_from([
            "clipseg",
            "segment",
            "--transcript",
            "t.json",
            "--mode",
            "fixed",
            "--tail",
            "flush",
            "--seed",
            "4",
        ]);
        let Command::Segment(args) = cli.command else {
            panic!("expected segment command");
        };
        assert_eq!(args.window.mode, Some(WindowMode::Fixed));
        assert_eq!(args.window.tail, Some(TailPolicy::Flush));
        assert_eq!(args.seed, Some(4));
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn threshold_accepts_clock_values() {
        let parse = |raw: &str| {
            let cli = Cli::parse_from([
                "clipseg",
                "segment",
                "--transcript",
                "t.json",
                "--threshold",
                raw,
            ]);
            let Command::Segment(args) = cli.command else {
                panic!("expected segment command");
            };
            args.window.threshold
        };
        assert_eq!(parse("3:00"), Some(180.0));
        assert_eq!(parse("0:01:30"), Some(90.0));
        assert_eq!(parse("45"), Some(45.0));
        let bad = Cli::try_parse_from([
            "clipseg",
            "segment",
            "--transcript",
            "t.json",
            "--threshold",
            "1:xx",
        ]);
        assert!(bad.is_err());
    }

    #[test]
    fn transcript_conflicts_with_catalog_selection() {
        let result = Cli::try_parse_from([
            "clipseg",
            "segment",
            "--transcript",
            "t.json",
            "--grade",
            "5",
            "--subject",
            "Math",
            "--video",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn resolves_catalog_selection() {
        let input = InputArgs {
            transcripts_dir: Some(PathBuf::from("transcripts")),
            grade: Some(6),
            subject: Some("Science".to_string()),
            video: Some(1),
            ..InputArgs::default()
        };
        let resolved = input.resolve(Catalog::builtin()).unwrap();
        assert_eq!(
            resolved,
            ResolvedInput::Directory {
                root: PathBuf::from("transcripts"),
                video_id: "EXUr_VfIiSI".to_string(),
                subject: Some("Science".to_string()),
            }
        );
    }

    #[test]
    fn video_id_requires_directory() {
        let input = InputArgs {
            video_id: Some("abc".to_string()),
            ..InputArgs::default()
        };
        assert!(input.resolve(Catalog::builtin()).is_err());
    }

    #[test]
    fn window_flags_override_settings() {
        let mut settings = SegmenterSettings::default();
        let args = WindowArgs {
            mode: Some(WindowMode::Fixed),
            threshold: Some(60.0),
            tags: Some(3),
            ..WindowArgs::default()
        };
        args.apply(&mut settings).unwrap();
        assert_eq!(settings.mode, WindowMode::Fixed);
        assert_eq!(settings.fixed_threshold, 60.0);
        assert_eq!(settings.tag_count, 3);

        let bad = WindowArgs {
            threshold: Some(-1.0),
            ..WindowArgs::default()
        };
        assert!(bad.apply(&mut settings).is_err());
    }
}
