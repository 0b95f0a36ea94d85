//! Heading-keyword segmentation of resume text into scoring categories

use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest line still considered a heading.
const MAX_HEADING_CHARS: usize = 48;
const MAX_HEADING_WORDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    Skills,
    Education,
    Experience,
    Certifications,
    /// Text before the first heading, and sections without a weight (summary,
    /// projects, interests, ...).
    General,
}

impl SectionType {
    pub const WEIGHTED: [SectionType; 4] = [
        SectionType::Skills,
        SectionType::Education,
        SectionType::Experience,
        SectionType::Certifications,
    ];
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionType::Skills => write!(f, "Skills"),
            SectionType::Education => write!(f, "Education"),
            SectionType::Experience => write!(f, "Experience"),
            SectionType::Certifications => write!(f, "Certifications"),
            SectionType::General => write!(f, "General"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub section_type: SectionType,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSections {
    pub full_text: String,
    pub sections: Vec<Section>,
}

impl DocumentSections {
    /// All text filed under `section_type`, in document order.
    pub fn content(&self, section_type: SectionType) -> String {
        self.sections
            .iter()
            .filter(|section| section.section_type == section_type)
            .map(|section| section.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_weighted_sections(&self) -> bool {
        self.sections
            .iter()
            .any(|section| section.section_type != SectionType::General && !section.content.trim().is_empty())
    }
}

pub struct SectionSegmenter {
    matcher: AhoCorasick,
    kinds: Vec<SectionType>,
}

impl SectionSegmenter {
    pub fn new() -> Self {
        let headings = Self::heading_keywords();
        let patterns: Vec<&str> = headings.iter().map(|(pattern, _)| *pattern).collect();
        let kinds = headings.iter().map(|(_, kind)| *kind).collect();

        // Built from a fixed, known-good pattern list
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .expect("Invalid section heading patterns");

        Self { matcher, kinds }
    }

    /// Split text into sections. Heading lines start a new section and are
    /// not part of any section's content.
    pub fn segment(&self, text: &str) -> DocumentSections {
        let mut sections = Vec::new();
        let mut current = Section {
            section_type: SectionType::General,
            content: String::new(),
        };

        for line in text.lines() {
            match self.heading_type(line) {
                Some(section_type) => {
                    let finished = std::mem::replace(
                        &mut current,
                        Section {
                            section_type,
                            content: String::new(),
                        },
                    );
                    if !finished.content.trim().is_empty() {
                        sections.push(finished);
                    }
                }
                None => {
                    if !current.content.is_empty() {
                        current.content.push('\n');
                    }
                    current.content.push_str(line);
                }
            }
        }
        if !current.content.trim().is_empty() {
            sections.push(current);
        }

        DocumentSections {
            full_text: text.to_string(),
            sections,
        }
    }

    /// Section type if `line` reads like a heading: short, and starting with a
    /// heading keyword that ends on a word boundary.
    pub fn heading_type(&self, line: &str) -> Option<SectionType> {
        let candidate = line
            .trim()
            .trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());

        if candidate.is_empty()
            || candidate.chars().count() > MAX_HEADING_CHARS
            || candidate.split_whitespace().count() > MAX_HEADING_WORDS
        {
            return None;
        }

        let found = self.matcher.find(candidate)?;
        if found.start() != 0 {
            return None;
        }
        let at_boundary = candidate[found.end()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        at_boundary.then(|| self.kinds[found.pattern().as_usize()])
    }

    fn heading_keywords() -> Vec<(&'static str, SectionType)> {
        vec![
            ("skills", SectionType::Skills),
            ("technical skills", SectionType::Skills),
            ("core competencies", SectionType::Skills),
            ("competencies", SectionType::Skills),
            ("expertise", SectionType::Skills),
            ("technologies", SectionType::Skills),
            ("tech stack", SectionType::Skills),
            ("education", SectionType::Education),
            ("academic background", SectionType::Education),
            ("academic history", SectionType::Education),
            ("experience", SectionType::Experience),
            ("work experience", SectionType::Experience),
            ("professional experience", SectionType::Experience),
            ("employment", SectionType::Experience),
            ("employment history", SectionType::Experience),
            ("work history", SectionType::Experience),
            ("career history", SectionType::Experience),
            ("certifications", SectionType::Certifications),
            ("certification", SectionType::Certifications),
            ("certificates", SectionType::Certifications),
            ("licenses", SectionType::Certifications),
            ("summary", SectionType::General),
            ("profile", SectionType::General),
            ("objective", SectionType::General),
            ("about", SectionType::General),
            ("projects", SectionType::General),
            ("interests", SectionType::General),
            ("languages", SectionType::General),
            ("awards", SectionType::General),
            ("publications", SectionType::General),
            ("references", SectionType::General),
        ]
    }
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Smith\nBackend developer\n\nSKILLS:\nRust, Python, SQL\n\nWork Experience\nAcme Corp - built payment APIs\n\nEducation\nBSc Computer Science\n\nProjects\nOpen source CLI tools";

    #[test]
    fn test_heading_detection() {
        let segmenter = SectionSegmenter::new();
        assert_eq!(segmenter.heading_type("SKILLS:"), Some(SectionType::Skills));
        assert_eq!(segmenter.heading_type("  Work Experience "), Some(SectionType::Experience));
        assert_eq!(segmenter.heading_type("Licenses & Certifications"), Some(SectionType::Certifications));
        assert_eq!(segmenter.heading_type("Summary"), Some(SectionType::General));
        // keyword must end on a word boundary
        assert_eq!(segmenter.heading_type("Skillset"), None);
        // long prose lines are not headings
        assert_eq!(
            segmenter.heading_type("Experience with distributed systems and message queues at scale"),
            None
        );
        assert_eq!(segmenter.heading_type("Built payment APIs"), None);
    }

    #[test]
    fn test_segmentation() {
        let sections = SectionSegmenter::new().segment(RESUME);

        assert_eq!(sections.content(SectionType::Skills), "Rust, Python, SQL\n");
        assert_eq!(sections.content(SectionType::Experience), "Acme Corp - built payment APIs\n");
        assert_eq!(sections.content(SectionType::Education), "BSc Computer Science\n");
        assert_eq!(sections.content(SectionType::Certifications), "");
        assert!(sections.content(SectionType::General).contains("Open source CLI tools"));
        assert!(sections.content(SectionType::General).starts_with("Jane Smith"));
        assert!(sections.has_weighted_sections());
    }

    #[test]
    fn test_text_without_headings() {
        let sections = SectionSegmenter::new().segment("Python developer\nLoves SQL");
        assert_eq!(sections.sections.len(), 1);
        assert!(!sections.has_weighted_sections());
        assert_eq!(sections.full_text, "Python developer\nLoves SQL");
    }
}
