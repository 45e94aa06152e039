//! Annotation - attaches a topic and cognitive-skill tags to each segment
//!
//! Labels are drawn at random from fixed pools; there is no inference from the text.

pub mod labels;

pub use labels::{LabelPools, Skill};

use rand::seq::index;
use rand::Rng;
use tracing::debug;

use crate::error::{Result, SegmentationError};
use crate::types::SkillTag;

/// Metadata assigned to one segment
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub topic: String,
    pub cognitive_tags: Vec<SkillTag>,
}

#[derive(Debug, Clone, Copy)]
pub struct Annotator<'a> {
    pools: &'a LabelPools,
    tag_count: usize,
}

impl<'a> Annotator<'a> {
    pub const DEFAULT_TAG_COUNT: usize = 2;

    pub fn new(pools: &'a LabelPools, tag_count: usize) -> Result<Self> {
        pools.validate()?;
        if tag_count == 0 {
            return Err(SegmentationError::invalid_config(
                "tag count must be at least 1",
            ));
        }
        if tag_count > pools.skills.len() {
            return Err(SegmentationError::invalid_config(format!(
                "tag count {} exceeds skill pool size {}",
                tag_count,
                pools.skills.len()
            )));
        }
        Ok(Self { pools, tag_count })
    }

    pub fn tag_count(&self) -> usize {
        self.tag_count
    }

    /// Uniform pick from the category's topic pool, or the default pool for unknown categories
    pub fn topic<R: Rng + ?Sized>(&self, category: &str, rng: &mut R) -> &'a str {
        let (pool, fallback) = self.pools.topic_pool(category);
        if fallback {
            debug!(
                category,
                default = %self.pools.default_category,
                "unrecognized category; using default topic pool"
            );
        }
        // Pools are validated non-empty in `new`.
        &pool[rng.gen_range(0..pool.len())]
    }

    /// `tag_count` distinct skills sampled without replacement
    pub fn skills<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<SkillTag> {
        index::sample(rng, self.pools.skills.len(), self.tag_count)
            .into_iter()
            .map(|idx| self.pools.skills[idx].to_tag())
            .collect()
    }

    pub fn annotate<R: Rng + ?Sized>(&self, category: &str, rng: &mut R) -> Annotation {
        Annotation {
            topic: self.topic(category, rng).to_string(),
            cognitive_tags: self.skills(rng),
        }
    }
}
