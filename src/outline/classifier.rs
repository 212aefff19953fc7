//! Heading classification.
//!
//! A candidate line is tested against three rules in a fixed order; the
//! first one that fires decides the level:
//!
//! 1. font size against the per-level thresholds, H1 first;
//! 2. a leading section number such as `2`, `2.3` or `2.3.`;
//! 3. presence of a CJK ideograph.
//!
//! Lines identical to the document title and lines of at most one
//! character are rejected before any rule runs.

use regex::Regex;

use super::SizeRank;
use crate::model::HeadingLevel;

/// Minimum font size per heading level.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingThresholds {
    levels: [f32; 4],
}

impl HeadingThresholds {
    /// Create thresholds for H1..H4.
    pub fn new(h1: f32, h2: f32, h3: f32, h4: f32) -> Self {
        Self {
            levels: [h1, h2, h3, h4],
        }
    }

    /// Threshold for `level`.
    pub fn get(&self, level: HeadingLevel) -> f32 {
        self.levels[level.index()]
    }

    /// Replace the threshold for `level`.
    pub fn set(&mut self, level: HeadingLevel, size: f32) {
        self.levels[level.index()] = size;
    }

    /// First level, H1 first, whose threshold `size` meets.
    pub fn level_for(&self, size: f32) -> Option<HeadingLevel> {
        HeadingLevel::ALL
            .into_iter()
            .find(|level| size >= self.get(*level))
    }
}

impl Default for HeadingThresholds {
    fn default() -> Self {
        Self::new(16.0, 13.0, 11.0, 9.0)
    }
}

/// Which rule produced a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingRule {
    /// Font size met a level threshold
    FontSize,
    /// Leading section number
    Numbering,
    /// Contains CJK ideographs
    Script,
}

/// A positive classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingMatch {
    pub level: HeadingLevel,
    pub rule: HeadingRule,
}

/// Classifies lines of one document.
///
/// Holds only read-only calibration (thresholds and the normalized title),
/// so one classifier can be shared across threads.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    thresholds: HeadingThresholds,
    title: String,
    numbering: Regex,
}

impl HeadingClassifier {
    /// Create a classifier with explicit thresholds and the title to exclude.
    pub fn new(thresholds: HeadingThresholds, title: &str) -> Self {
        Self {
            thresholds,
            title: title.trim().to_lowercase(),
            numbering: Regex::new(r"^\d+(?:\.\d+)*\.?").unwrap(),
        }
    }

    /// Create a classifier calibrated by a document's size rank.
    pub fn for_document(rank: &SizeRank, defaults: &HeadingThresholds, title: &str) -> Self {
        Self::new(rank.thresholds(defaults), title)
    }

    /// Thresholds in effect.
    pub fn thresholds(&self) -> &HeadingThresholds {
        &self.thresholds
    }

    /// Heading level of a line, or `None` for body text.
    pub fn classify(&self, text: &str, size: f32) -> Option<HeadingLevel> {
        self.classify_detailed(text, size).map(|m| m.level)
    }

    /// Like [`classify`](Self::classify), also reporting the rule that fired.
    pub fn classify_detailed(&self, text: &str, size: f32) -> Option<HeadingMatch> {
        let text = text.trim();
        if text.chars().count() <= 1 || text.to_lowercase() == self.title {
            return None;
        }

        if let Some(level) = self.thresholds.level_for(size) {
            return Some(HeadingMatch {
                level,
                rule: HeadingRule::FontSize,
            });
        }

        if self.numbering.is_match(text) {
            // Every '.' in the line counts, not only those in the number.
            let depth = text.matches('.').count();
            return Some(HeadingMatch {
                level: HeadingLevel::from_depth(depth),
                rule: HeadingRule::Numbering,
            });
        }

        if text.chars().any(is_cjk_char) {
            let level = if text.chars().count() > 2 {
                HeadingLevel::H2
            } else {
                HeadingLevel::H3
            };
            return Some(HeadingMatch {
                level,
                rule: HeadingRule::Script,
            });
        }

        None
    }
}

/// Classify one line against a document's size rank.
///
/// Convenience for one-off calls; build a [`HeadingClassifier`] once per
/// document when classifying many lines.
pub fn classify(
    text: &str,
    size: f32,
    rank: &SizeRank,
    defaults: &HeadingThresholds,
    title: &str,
) -> Option<HeadingLevel> {
    HeadingClassifier::for_document(rank, defaults, title).classify(text, size)
}

/// Characters whose Unicode name carries "CJK", as assigned in Unicode 15.1:
/// unified and compatibility ideographs (all extensions), radicals
/// supplement, strokes and the squared ideographs of the enclosed supplement.
/// Unassigned gaps inside those blocks do not count.
pub fn is_cjk_char(c: char) -> bool {
    matches!(
        c as u32,
        0x2E80..=0x2E99
            | 0x2E9B..=0x2EF3
            | 0x31C0..=0x31E3
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xF900..=0xFA6D
            | 0xFA70..=0xFAD9
            | 0x1F210..=0x1F212
            | 0x1F214..=0x1F23B
            | 0x1F240..=0x1F248
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2B739
            | 0x2B740..=0x2B81D
            | 0x2B820..=0x2CEA1
            | 0x2CEB0..=0x2EBE0
            | 0x2EBF0..=0x2EE5D
            | 0x2F800..=0x2FA1D
            | 0x30000..=0x3134A
            | 0x31350..=0x323AF
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::FontHistogram;

    fn classifier(title: &str) -> HeadingClassifier {
        HeadingClassifier::new(HeadingThresholds::default(), title)
    }

    #[test]
    fn test_default_thresholds_cascade() {
        let c = classifier("");
        assert_eq!(c.classify("Overview", 18.0), Some(HeadingLevel::H1));
        assert_eq!(c.classify("Overview", 16.0), Some(HeadingLevel::H1));
        assert_eq!(c.classify("Overview", 13.5), Some(HeadingLevel::H2));
        assert_eq!(c.classify("Overview", 11.0), Some(HeadingLevel::H3));
        assert_eq!(c.classify("Overview", 9.0), Some(HeadingLevel::H4));
        assert_eq!(c.classify("Overview", 8.0), None);
    }

    #[test]
    fn test_rank_derived_thresholds() {
        let mut h = FontHistogram::new();
        for size in [20.0, 20.0, 20.0, 14.0, 11.0, 9.0] {
            h.add(size);
        }
        let c = HeadingClassifier::for_document(&h.size_rank(), &HeadingThresholds::default(), "");
        assert_eq!(c.classify("Results", 20.0), Some(HeadingLevel::H1));
        assert_eq!(c.classify("Results", 14.0), Some(HeadingLevel::H2));
        assert_eq!(c.classify("Results", 11.0), Some(HeadingLevel::H3));
        assert_eq!(c.classify("Results", 9.0), Some(HeadingLevel::H4));
    }

    #[test]
    fn test_title_is_rejected_even_at_h1_size() {
        let c = classifier("  Annual Report ");
        assert_eq!(c.classify("annual report", 30.0), None);
        assert_eq!(c.classify(" ANNUAL REPORT ", 30.0), None);
        assert_eq!(c.classify("Annual Report 2", 30.0), Some(HeadingLevel::H1));
    }

    #[test]
    fn test_single_character_is_rejected() {
        let c = classifier("");
        assert_eq!(c.classify("A", 40.0), None);
        assert_eq!(c.classify("  7 ", 40.0), None);
        assert_eq!(c.classify("", 40.0), None);
        assert_eq!(c.classify("第", 5.0), None);
    }

    #[test]
    fn test_numbering_depth_counts_every_dot() {
        let c = classifier("");
        assert_eq!(c.classify("2 Methods", 8.0), Some(HeadingLevel::H1));
        assert_eq!(c.classify("2.3 Methods", 8.0), Some(HeadingLevel::H2));
        assert_eq!(c.classify("2. Methods", 8.0), Some(HeadingLevel::H2));
        assert_eq!(c.classify("2.3.1 Sampling", 8.0), Some(HeadingLevel::H3));
        assert_eq!(c.classify("1.2.3.4.5 Deep", 8.0), Some(HeadingLevel::H4));
        // Dots outside the number still add depth.
        assert_eq!(
            c.classify("2. See Section A.1 for details.", 8.0),
            Some(HeadingLevel::H4)
        );
    }

    #[test]
    fn test_numbering_requires_leading_digit() {
        let c = classifier("");
        assert_eq!(c.classify("Section 2.3", 8.0), None);
        assert_eq!(c.classify("(2) Methods", 8.0), None);
    }

    #[test]
    fn test_cjk_fallback() {
        let c = classifier("");
        assert_eq!(c.classify("概要説明", 8.0), Some(HeadingLevel::H2));
        assert_eq!(c.classify("概要", 8.0), Some(HeadingLevel::H3));
        assert_eq!(c.classify("see 表", 8.0), Some(HeadingLevel::H2));
        // Kana alone is not an ideograph.
        assert_eq!(c.classify("ひらがな", 8.0), None);
        assert_eq!(c.classify("한국어", 8.0), None);
    }

    #[test]
    fn test_precedence_size_over_numbering_over_script() {
        let c = classifier("");

        let m = c.classify_detailed("1.2.3 Scope", 17.0).unwrap();
        assert_eq!(m.rule, HeadingRule::FontSize);
        assert_eq!(m.level, HeadingLevel::H1);

        let m = c.classify_detailed("3 概要説明", 8.0).unwrap();
        assert_eq!(m.rule, HeadingRule::Numbering);
        assert_eq!(m.level, HeadingLevel::H1);

        let m = c.classify_detailed("概要", 12.0).unwrap();
        assert_eq!(m.rule, HeadingRule::FontSize);
        assert_eq!(m.level, HeadingLevel::H3);
    }

    #[test]
    fn test_free_function() {
        let rank = FontHistogram::new().size_rank();
        let level = classify("Introduction", 14.0, &rank, &HeadingThresholds::default(), "Guide");
        assert_eq!(level, Some(HeadingLevel::H2));
    }

    #[test]
    fn test_is_cjk_char() {
        assert!(is_cjk_char('中'));
        assert!(is_cjk_char('\u{F900}'));
        assert!(is_cjk_char('\u{20000}'));
        assert!(is_cjk_char('\u{2E80}'));
        assert!(is_cjk_char('\u{1F22F}'));
        assert!(!is_cjk_char('\u{2E9A}'));
        assert!(!is_cjk_char('\u{2EF4}'));
        assert!(!is_cjk_char('\u{FA6E}'));
        assert!(!is_cjk_char('\u{FADA}'));
        assert!(!is_cjk_char('\u{1F213}'));
        assert!(!is_cjk_char('あ'));
        assert!(!is_cjk_char('。'));
        assert!(!is_cjk_char('a'));
    }
}
