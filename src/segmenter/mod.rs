//! Segmentation engine - windows a cue sequence and annotates each window
//!
//! The engine keeps no state between runs: output depends only on the cues,
//! the category, the settings and the random source handed in.

pub mod builder;

pub use builder::{build_segment, build_text};

use rand::Rng;
use tracing::{info, warn};

use crate::annotation::{Annotator, LabelPools};
use crate::config::SegmenterSettings;
use crate::error::{Result, SegmentationError};
use crate::timecode::ClockStyle;
use crate::transcription::TranscriptSource;
use crate::types::{Cue, Segment, SegmentViews};
use crate::windowing::{plan_windows, WindowPolicy, WindowStrategy};

/// End of the last cue; the extent every policy windows over
pub fn total_duration(cues: &[Cue]) -> Result<f64> {
    cues.last()
        .map(Cue::end)
        .ok_or(SegmentationError::EmptyInput)
}

#[derive(Debug, Clone, Copy)]
pub struct Segmenter<'a> {
    strategy: WindowStrategy,
    annotator: Annotator<'a>,
    clock_style: ClockStyle,
}

impl<'a> Segmenter<'a> {
    /// Validates every parameter up front so no windowing starts on a bad configuration
    pub fn new(settings: &SegmenterSettings, pools: &'a LabelPools) -> Result<Self> {
        let strategy = settings.strategy()?;
        let annotator = Annotator::new(pools, settings.tag_count)?;
        Ok(Self {
            strategy,
            annotator,
            clock_style: settings.clock_style,
        })
    }

    /// Uses the label pools embedded in `settings`, or the built-in pools
    pub fn from_settings(settings: &'a SegmenterSettings) -> Result<Self> {
        Self::new(settings, settings.label_pools())
    }

    pub fn strategy(&self) -> WindowStrategy {
        self.strategy
    }

    pub fn segment<R: Rng + ?Sized>(
        &self,
        cues: &[Cue],
        category: &str,
        rng: &mut R,
    ) -> Result<Vec<Segment>> {
        let total = total_duration(cues)?;
        let windows = plan_windows(&self.strategy, cues, total, rng);
        let rule = self.strategy.text_rule();

        let segments: Vec<Segment> = windows
            .iter()
            .enumerate()
            .map(|(index, window)| {
                let annotation = self.annotator.annotate(category, rng);
                build_segment(index, window, cues, rule, self.clock_style, annotation)
            })
            .collect();

        info!(
            cues = cues.len(),
            total_duration = total,
            segments = segments.len(),
            category,
            "segmented transcript"
        );
        Ok(segments)
    }

    /// Transcript, topic and skill views sharing identical window boundaries
    pub fn segment_views<R: Rng + ?Sized>(
        &self,
        cues: &[Cue],
        category: &str,
        rng: &mut R,
    ) -> Result<SegmentViews> {
        self.segment(cues, category, rng).map(SegmentViews::from)
    }

    /// Fetch then segment; a failed fetch yields no segments at all
    pub fn segment_from_source<S, R>(
        &self,
        source: &S,
        video_id: &str,
        category: &str,
        rng: &mut R,
    ) -> Result<Vec<Segment>>
    where
        S: TranscriptSource + ?Sized,
        R: Rng + ?Sized,
    {
        let cues = source.fetch(video_id).map_err(|err| {
            warn!(video_id, error = %err, "transcript fetch failed");
            SegmentationError::upstream(video_id, err)
        })?;
        self.segment(&cues, category, rng)
    }

    pub fn views_from_source<S, R>(
        &self,
        source: &S,
        video_id: &str,
        category: &str,
        rng: &mut R,
    ) -> Result<SegmentViews>
    where
        S: TranscriptSource + ?Sized,
        R: Rng + ?Sized,
    {
        self.segment_from_source(source, video_id, category, rng)
            .map(SegmentViews::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranscriptError;
    use crate::types::{TailPolicy, WindowMode};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct FailingSource;

    impl TranscriptSource for FailingSource {
        fn fetch(&self, video_id: &str) -> std::result::Result<Vec<Cue>, TranscriptError> {
            Err(TranscriptError::NotFound {
                video_id: video_id.to_string(),
            })
        }
    }

    struct StaticSource(Vec<Cue>);

    impl TranscriptSource for StaticSource {
        fn fetch(&self, _video_id: &str) -> std::result::Result<Vec<Cue>, TranscriptError> {
            Ok(self.0.clone())
        }
    }

    fn fixed_settings(threshold: f64) -> SegmenterSettings {
        SegmenterSettings {
            mode: WindowMode::Fixed,
            fixed_threshold: threshold,
            tail: TailPolicy::Drop,
            ..SegmenterSettings::default()
        }
    }

    #[test]
    fn settings_choose_the_window_strategy() {
        let fixed = fixed_settings(60.0);
        let segmenter = Segmenter::from_settings(&fixed).unwrap();
        let WindowStrategy::Fixed(policy) = segmenter.strategy() else {
            panic!("expected fixed strategy");
        };
        assert_eq!(policy.threshold(), 60.0);
        assert_eq!(policy.tail(), TailPolicy::Drop);

        let settings = SegmenterSettings {
            min_width: 45,
            max_width: 90,
            ..SegmenterSettings::default()
        };
        let segmenter = Segmenter::from_settings(&settings).unwrap();
        let WindowStrategy::Randomized(policy) = segmenter.strategy() else {
            panic!("expected randomized strategy");
        };
        assert_eq!(policy.bounds(), (45, 90));
    }

    #[test]
    fn empty_input_is_reported() {
        let settings = SegmenterSettings::default();
        let segmenter = Segmenter::from_settings(&settings).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let err = segmenter.segment(&[], "Math", &mut rng).unwrap_err();
        assert!(matches!(err, SegmentationError::EmptyInput));
    }

    #[test]
    fn fixed_mode_groups_by_duration_sum() {
        let settings = fixed_settings(10.0);
        let segmenter = Segmenter::from_settings(&settings).unwrap();
        let cues = vec![
            Cue::new("a", 0.0, 5.0),
            Cue::new("b", 10.0, 5.0),
            Cue::new("c", 20.0, 5.0),
        ];
        let mut rng = StdRng::seed_from_u64(0);

        let segments = segmenter.segment(&cues, "Math", &mut rng).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "a b");
        assert_eq!(segments[0].timestamp_label, "0:00:00 - 0:00:15");
    }

    #[test]
    fn upstream_failure_yields_no_segments() {
        let settings = SegmenterSettings::default();
        let segmenter = Segmenter::from_settings(&settings).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let err = segmenter
            .segment_from_source(&FailingSource, "AF31lWJJSgg", "Math", &mut rng)
            .unwrap_err();
        match err {
            SegmentationError::UpstreamFetchFailure { video_id, .. } => {
                assert_eq!(video_id, "AF31lWJJSgg")
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn views_share_boundaries() {
        let settings = SegmenterSettings::default();
        let segmenter = Segmenter::from_settings(&settings).unwrap();
        let source = StaticSource(vec![
            Cue::new("intro", 0.0, 40.0),
            Cue::new("body", 40.0, 200.0),
            Cue::new("outro", 240.0, 30.0),
        ]);
        let mut rng = StdRng::seed_from_u64(7);

        let views = segmenter
            .views_from_source(&source, "id", "Science", &mut rng)
            .unwrap();
        assert!(!views.is_empty());
        assert_eq!(views.transcript.len(), views.topics.len());
        assert_eq!(views.topics.len(), views.skills.len());
        for ((text, topic), skills) in views
            .transcript
            .iter()
            .zip(&views.topics)
            .zip(&views.skills)
        {
            assert_eq!(text.timestamp_label, topic.timestamp_label);
            assert_eq!(topic.timestamp_label, skills.timestamp_label);
        }
    }

    #[test]
    fn bad_configuration_fails_before_windowing() {
        let settings = SegmenterSettings {
            tag_count: 10,
            ..SegmenterSettings::default()
        };
        assert!(matches!(
            Segmenter::from_settings(&settings),
            Err(SegmentationError::InvalidConfiguration { .. })
        ));
    }
}
