//! Title extraction from the first page.

use crate::model::TextLine;

/// Collects the first page's largest-size lines into a title.
#[derive(Debug, Clone, Copy)]
pub struct TitleExtractor {
    tolerance: f32,
}

impl TitleExtractor {
    /// Create an extractor accepting lines within `tolerance` of the largest size.
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }

    /// Join every line sized like the page maximum, in traversal order.
    ///
    /// Returns an empty string for a page without text.
    pub fn extract(&self, first_page: &[TextLine]) -> String {
        let largest = first_page
            .iter()
            .map(|l| l.font_size)
            .fold(0.0f32, f32::max);

        first_page
            .iter()
            .filter(|l| !l.is_blank() && (l.font_size - largest).abs() < self.tolerance)
            .map(|l| l.trimmed())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self::new(0.1)
    }
}
