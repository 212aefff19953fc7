//! Outline records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level, H1 being the most prominent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// All levels, most prominent first.
    pub const ALL: [HeadingLevel; 4] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
    ];

    /// Map a nesting depth to a level, clipping anything deeper than 3 to H4.
    pub fn from_depth(depth: usize) -> Self {
        Self::ALL[depth.min(3)]
    }

    /// 0-based position of the level (H1 = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Level name as it appears in output.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A heading found in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text, trimmed
    pub text: String,

    /// 0-based page index
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title plus headings of one document, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title (may be empty)
    pub title: String,

    /// Headings in reading order
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Create an outline with a title and no headings.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// Append a heading.
    pub fn push(&mut self, entry: OutlineEntry) {
        self.outline.push(entry);
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Whether no headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Headings at one level, in reading order.
    pub fn headings_at(&self, level: HeadingLevel) -> impl Iterator<Item = &OutlineEntry> {
        self.outline.iter().filter(move |e| e.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_depth_clips() {
        assert_eq!(HeadingLevel::from_depth(0), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from_depth(2), HeadingLevel::H3);
        assert_eq!(HeadingLevel::from_depth(3), HeadingLevel::H4);
        assert_eq!(HeadingLevel::from_depth(17), HeadingLevel::H4);
    }

    #[test]
    fn test_level_serializes_as_name() {
        let entry = OutlineEntry::new(HeadingLevel::H3, "Scope", 4);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"level":"H3","text":"Scope","page":4}"#);
    }

    #[test]
    fn test_headings_at() {
        let mut outline = DocumentOutline::new("Guide");
        outline.push(OutlineEntry::new(HeadingLevel::H1, "A", 0));
        outline.push(OutlineEntry::new(HeadingLevel::H2, "B", 0));
        outline.push(OutlineEntry::new(HeadingLevel::H1, "C", 1));

        let h1: Vec<_> = outline
            .headings_at(HeadingLevel::H1)
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(h1, vec!["A", "C"]);
        assert_eq!(outline.len(), 3);
    }
}
