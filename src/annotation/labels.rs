use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::{Result, SegmentationError};
use crate::types::SkillTag;

/// A named cognitive ability used as an annotation tag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub description: String,
}

impl Skill {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// `logic_and_reasoning` -> `Logic And Reasoning`
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    pub fn to_tag(&self) -> SkillTag {
        SkillTag {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

pub fn display_name(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Topic pools keyed by content category plus the shared skill pool
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelPools {
    pub topics: BTreeMap<String, Vec<String>>,
    /// Category whose pool is used when a lookup misses
    pub default_category: String,
    pub skills: Vec<Skill>,
}

impl LabelPools {
    /// Process-wide built-in pools, constructed on first use
    pub fn builtin() -> &'static LabelPools {
        static BUILTIN: OnceLock<LabelPools> = OnceLock::new();
        BUILTIN.get_or_init(builtin_pools)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.topics.contains_key(&self.default_category) {
            return Err(SegmentationError::invalid_config(format!(
                "default category '{}' has no topic pool",
                self.default_category
            )));
        }
        if let Some((category, _)) = self.topics.iter().find(|(_, pool)| pool.is_empty()) {
            return Err(SegmentationError::invalid_config(format!(
                "topic pool for '{}' is empty",
                category
            )));
        }
        if self.skills.is_empty() {
            return Err(SegmentationError::invalid_config("skill pool is empty"));
        }
        let mut seen = HashSet::new();
        for skill in &self.skills {
            if !seen.insert(skill.name.as_str()) {
                return Err(SegmentationError::invalid_config(format!(
                    "skill '{}' appears more than once",
                    skill.name
                )));
            }
        }
        Ok(())
    }

    /// Topic pool for `category`, and whether the default pool stood in for it
    pub fn topic_pool(&self, category: &str) -> (&[String], bool) {
        match self.topics.get(category) {
            Some(pool) => (pool, false),
            None => (self.default_pool(), true),
        }
    }

    pub fn default_pool(&self) -> &[String] {
        self.topics
            .get(&self.default_category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.name == name)
    }
}

fn builtin_pools() -> LabelPools {
    let topics = [
        (
            "Math",
            &[
                "Number Operations",
                "Problem Solving",
                "Logical Reasoning",
                "Pattern Recognition",
                "Mathematical Concepts",
                "Practical Applications",
            ][..],
        ),
        (
            "Science",
            &[
                "Scientific Principles",
                "Natural Phenomena",
                "Experimental Methods",
                "Scientific Reasoning",
                "Real-world Applications",
                "Data Analysis",
            ][..],
        ),
        (
            "English",
            &[
                "Grammar Rules",
                "Vocabulary",
                "Reading Comprehension",
                "Writing Skills",
                "Speaking Practice",
            ][..],
        ),
    ]
    .into_iter()
    .map(|(category, pool)| {
        (
            category.to_string(),
            pool.iter().map(|topic| topic.to_string()).collect(),
        )
    })
    .collect();

    let skills = vec![
        Skill::new(
            "attention",
            "Ability to focus on specific details and maintain concentration",
        ),
        Skill::new(
            "memory",
            "Ability to retain and recall information effectively",
        ),
        Skill::new(
            "logic_and_reasoning",
            "Ability to analyze problems and think critically",
        ),
        Skill::new(
            "auditory_processing",
            "Ability to understand and process spoken information",
        ),
        Skill::new(
            "visual_processing",
            "Ability to interpret and understand visual information",
        ),
        Skill::new(
            "processing_speed",
            "Speed at which information is processed and understood",
        ),
    ];

    LabelPools {
        topics,
        default_category: "Math".to_string(),
        skills,
    }
}
