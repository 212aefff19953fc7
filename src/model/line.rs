//! Visual text lines.

use serde::{Deserialize, Serialize};

/// One visual line of a page: its fragments joined, sized by the largest fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Rendered text of the line
    pub text: String,

    /// Representative font size (maximum over the line's fragments)
    pub font_size: f32,

    /// 0-based index of the page the line sits on
    pub page_index: u32,
}

impl TextLine {
    /// Create a new line.
    pub fn new(text: impl Into<String>, font_size: f32, page_index: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            page_index,
        }
    }

    /// Build a line from `(text, size)` fragments in visual order.
    ///
    /// Each fragment is trimmed and the pieces are joined with one space.
    pub fn from_fragments<'a, I>(fragments: I, page_index: u32) -> Self
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        let mut text = String::new();
        let mut font_size = 0.0f32;
        for (fragment, size) in fragments {
            text.push_str(fragment.trim());
            text.push(' ');
            font_size = font_size.max(size);
        }
        Self {
            text: text.trim().to_string(),
            font_size,
            page_index,
        }
    }

    /// The line text without surrounding whitespace.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether the line carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}
