//! Selectable content - a static grade → subject → video table

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub title: String,
    pub video_id: String,
    /// Also the annotation category for segments of this video
    pub subject: String,
    pub grade: u8,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    grades: BTreeMap<u8, BTreeMap<String, Vec<CatalogEntry>>>,
}

impl Catalog {
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(builtin_catalog)
    }

    pub fn insert(&mut self, entry: CatalogEntry) {
        self.grades
            .entry(entry.grade)
            .or_default()
            .entry(entry.subject.clone())
            .or_default()
            .push(entry);
    }

    pub fn grades(&self) -> impl Iterator<Item = u8> + '_ {
        self.grades.keys().copied()
    }

    pub fn subjects(&self, grade: u8) -> Vec<&str> {
        self.grades
            .get(&grade)
            .map(|subjects| subjects.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn videos(&self, grade: u8, subject: &str) -> &[CatalogEntry] {
        self.grades
            .get(&grade)
            .and_then(|subjects| subjects.get(subject))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Pick a video by its 1-based position in the subject listing
    pub fn select(&self, grade: u8, subject: &str, position: usize) -> Option<&CatalogEntry> {
        position
            .checked_sub(1)
            .and_then(|idx| self.videos(grade, subject).get(idx))
    }
}

fn builtin_catalog() -> Catalog {
    const FIRST: &str = "AF31lWJJSgg";
    const SECOND: &str = "EXUr_VfIiSI";
    let rows: [(u8, &str, &str, &str, &str); 12] = [
        (5, "Math", "Basic Mathematics", FIRST, "Learn fundamental mathematics concepts with detailed explanations"),
        (5, "Math", "Number Operations", SECOND, "Master basic number operations and calculations"),
        (5, "Math", "Math Practice Problems", FIRST, "Practice solving mathematical problems step by step"),
        (5, "Science", "Introduction to Science", SECOND, "Basic introduction to scientific concepts"),
        (5, "Science", "Natural Phenomena", FIRST, "Understanding the world around us"),
        (5, "Science", "Scientific Method", SECOND, "Learn how scientists solve problems"),
        (6, "Math", "Advanced Mathematics", FIRST, "More complex mathematical concepts and applications"),
        (6, "Math", "Problem Solving", SECOND, "Advanced problem-solving techniques"),
        (6, "Math", "Mathematical Reasoning", FIRST, "Develop logical thinking through mathematics"),
        (6, "Science", "Scientific Principles", SECOND, "Advanced scientific concepts and theories"),
        (6, "Science", "Experimental Science", FIRST, "Learn about scientific experiments"),
        (6, "Science", "Applied Science", SECOND, "Real-world applications of science"),
    ];

    let mut catalog = Catalog::default();
    for (grade, subject, title, video_id, description) in rows {
        catalog.insert(CatalogEntry {
            title: title.to_string(),
            video_id: video_id.to_string(),
            subject: subject.to_string(),
            grade,
            description: description.to_string(),
        });
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_two_grades_with_three_videos_per_subject() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.grades().collect::<Vec<_>>(), vec![5, 6]);
        for grade in [5, 6] {
            assert_eq!(catalog.subjects(grade), vec!["Math", "Science"]);
            for subject in catalog.subjects(grade) {
                assert_eq!(catalog.videos(grade, subject).len(), 3);
            }
        }
    }

    #[test]
    fn select_is_one_based() {
        let catalog = Catalog::builtin();
        let entry = catalog.select(5, "Math", 2).unwrap();
        assert_eq!(entry.title, "Number Operations");
        assert_eq!(entry.video_id, "EXUr_VfIiSI");
        assert!(catalog.select(5, "Math", 0).is_none());
        assert!(catalog.select(5, "Math", 4).is_none());
        assert!(catalog.select(7, "Math", 1).is_none());
        assert!(catalog.select(5, "Art", 1).is_none());
    }
}
