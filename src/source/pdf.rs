//! PDF page source backed by lopdf.
//!
//! Text is recovered by walking each page's content stream. Every text
//! showing operator yields a fragment positioned by the text matrix composed
//! with the current transformation matrix (`q`/`Q`/`cm`), so pages that flip
//! or scale the user space still read top to bottom. Consecutive shows
//! without repositioning or a font change extend the same fragment.
//! Fragments are then grouped into visual lines by baseline.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document as LopdfDocument, Object, ObjectId};

use super::{PageSource, SourceLoader};
use crate::detect::{check_pdf_file, sniff_pdf_version};
use crate::error::{Error, Result};
use crate::model::TextLine;
use crate::outline::is_cjk_char;

/// Page fonts as returned by lopdf: resource name → font dictionary.
type PageFonts<'a> = BTreeMap<Vec<u8>, &'a lopdf::Dictionary>;

/// TJ displacement (thousandths of text space) treated as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Baseline distance, relative to font size, still counted as the same line.
const LINE_Y_TOLERANCE: f32 = 0.3;

/// A PDF document opened for text access.
pub struct PdfSource {
    doc: LopdfDocument,
    pages: Vec<ObjectId>,
    version: String,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let version = check_pdf_file(path)?;
        let doc = LopdfDocument::load(path)?;
        Ok(Self::from_document(doc, version))
    }

    /// Open a PDF held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let version = sniff_pdf_version(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc, version))
    }

    fn from_document(doc: LopdfDocument, version: String) -> Self {
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may not decode");
        }
        let pages = doc.get_pages().into_values().collect();
        Self {
            doc,
            pages,
            version,
        }
    }

    /// PDF version from the file header (e.g. "1.7").
    pub fn version(&self) -> &str {
        &self.version
    }

    fn page_id(&self, page_index: u32) -> Result<ObjectId> {
        self.pages
            .get(page_index as usize)
            .copied()
            .ok_or(Error::PageOutOfRange(page_index, self.page_count()))
    }

    /// Walk a page's content stream and collect positioned fragments.
    fn page_fragments(&self, page_id: ObjectId) -> Result<Vec<Fragment>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let data = self.doc.get_page_content(page_id)?;
        let content =
            Content::decode(&data).map_err(|e| Error::TextExtract(e.to_string()))?;

        let mut fragments: Vec<Fragment> = Vec::new();
        let mut ctm = Matrix::IDENTITY;
        let mut saved: Vec<Matrix> = Vec::new();
        let mut matrix = TextMatrix::default();
        let mut font_name: Vec<u8> = Vec::new();
        let mut font_size: f32 = 12.0;
        // Whether the next show continues the previous fragment.
        let mut continues = false;

        for op in &content.operations {
            match op.operator.as_str() {
                "q" => saved.push(ctm),
                "Q" => {
                    // Unbalanced Q keeps the current state.
                    if let Some(previous) = saved.pop() {
                        ctm = previous;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(&op.operands) {
                        ctm = m.multiply(&ctm);
                    }
                }
                "BT" => {
                    matrix = TextMatrix {
                        leading: matrix.leading,
                        ..TextMatrix::default()
                    };
                    continues = false;
                }
                "Tf" => {
                    if let [Object::Name(name), size, ..] = op.operands.as_slice() {
                        font_name = name.clone();
                        font_size = get_number(size).unwrap_or(font_size);
                    }
                    continues = false;
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        matrix.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let [tx, ty, ..] = op.operands.as_slice() {
                        let tx = get_number(tx).unwrap_or(0.0);
                        let ty = get_number(ty).unwrap_or(0.0);
                        if op.operator == "TD" {
                            matrix.leading = -ty;
                        }
                        matrix.translate(tx, ty);
                    }
                    continues = false;
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(&op.operands) {
                        matrix.set(m);
                    }
                    continues = false;
                }
                "T*" => {
                    matrix.next_line();
                    continues = false;
                }
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator != "Tj" && op.operator != "TJ" {
                        matrix.next_line();
                        continues = false;
                    }
                    let text = self.shown_text(op, &fonts, &font_name);
                    if continues {
                        if let Some(last) = fragments.last_mut() {
                            last.text.push_str(&text);
                            continue;
                        }
                    }
                    if text.trim().is_empty() {
                        continue;
                    }
                    let device = matrix.m.multiply(&ctm);
                    fragments.push(Fragment {
                        text,
                        x: device.e,
                        y: device.f,
                        size: font_size * device.vertical_scale(),
                    });
                    continues = true;
                }
                _ => {}
            }
        }

        Ok(fragments)
    }

    /// Decode the string operand(s) of a text showing operator.
    fn shown_text(&self, op: &Operation, fonts: &PageFonts<'_>, font_name: &[u8]) -> String {
        let operand = match op.operator.as_str() {
            "\"" => op.operands.get(2),
            _ => op.operands.first(),
        };

        match operand {
            Some(Object::String(bytes, _)) => self.decode(fonts, font_name, bytes),
            Some(Object::Array(items)) => {
                let mut combined = String::new();
                for item in items {
                    match item {
                        Object::String(bytes, _) => {
                            combined.push_str(&self.decode(fonts, font_name, bytes))
                        }
                        other => {
                            // Large negative displacement moves right: a word gap.
                            let gap = get_number(other).map(|n| -n).unwrap_or(0.0);
                            let needs_space = gap > TJ_SPACE_THRESHOLD
                                && combined
                                    .chars()
                                    .last()
                                    .map_or(false, |c| !c.is_whitespace() && !is_spaceless_script_char(c));
                            if needs_space {
                                combined.push(' ');
                            }
                        }
                    }
                }
                combined
            }
            _ => String::new(),
        }
    }

    fn decode(&self, fonts: &PageFonts<'_>, font_name: &[u8], bytes: &[u8]) -> String {
        fonts
            .get(font_name)
            .and_then(|font| font.get_font_encoding(&self.doc).ok())
            .and_then(|encoding| LopdfDocument::decode_text(&encoding, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }
}

impl PageSource for PdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_lines(&self, page_index: u32) -> Result<Vec<TextLine>> {
        let page_id = self.page_id(page_index)?;
        let fragments = self.page_fragments(page_id)?;
        log::debug!(
            "Page {}: {} text fragments",
            page_index + 1,
            fragments.len()
        );
        Ok(group_into_lines(fragments, page_index))
    }
}

/// Opens PDF files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader;

impl SourceLoader for PdfLoader {
    fn open(&self, path: &Path) -> Result<Box<dyn PageSource>> {
        Ok(Box::new(PdfSource::open(path)?))
    }
}

/// A run of text drawn at one position with one font.
#[derive(Debug, Clone)]
struct Fragment {
    text: String,
    x: f32,
    y: f32,
    size: f32,
}

/// Sort fragments top-to-bottom and merge those sharing a baseline.
fn group_into_lines(mut fragments: Vec<Fragment>, page_index: u32) -> Vec<TextLine> {
    // PDF y grows upwards.
    fragments.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines = Vec::new();
    let mut current: Vec<Fragment> = Vec::new();

    for fragment in fragments {
        let same_line = current.first().map_or(false, |first| {
            (fragment.y - first.y).abs() <= fragment.size.max(first.size) * LINE_Y_TOLERANCE
        });
        if !same_line && !current.is_empty() {
            lines.push(finish_line(std::mem::take(&mut current), page_index));
        }
        current.push(fragment);
    }
    if !current.is_empty() {
        lines.push(finish_line(current, page_index));
    }

    lines.retain(|l| !l.is_blank());
    lines
}

fn finish_line(mut fragments: Vec<Fragment>, page_index: u32) -> TextLine {
    fragments.sort_by(|a, b| a.x.total_cmp(&b.x));
    TextLine::from_fragments(
        fragments.iter().map(|f| (f.text.as_str(), f.size)),
        page_index,
    )
}

/// Affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Matrix from the six numeric operands of `cm` or `Tm`.
    fn from_operands(operands: &[Object]) -> Option<Self> {
        let values: Vec<f32> = operands.iter().filter_map(get_number).collect();
        match values[..] {
            [a, b, c, d, e, f] => Some(Self { a, b, c, d, e, f }),
            _ => None,
        }
    }

    /// `self × other`: apply `self`, then `other`.
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Length of the transformed y axis: how much glyphs are scaled vertically.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text matrix state inside a BT/ET block.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    m: Matrix,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            m: Matrix::IDENTITY,
            leading: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: Matrix) {
        self.m = m;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.m.e += tx * self.m.a + ty * self.m.c;
        self.m.f += tx * self.m.b + ty * self.m.d;
    }

    fn next_line(&mut self) {
        let leading = if self.leading != 0.0 { self.leading } else { 12.0 };
        self.translate(0.0, -leading);
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Scripts written without spaces between words.
fn is_spaceless_script_char(c: char) -> bool {
    is_cjk_char(c)
        || matches!(
            c as u32,
            0x3040..=0x309F // Hiragana
                | 0x30A0..=0x30FF // Katakana
                | 0x3000..=0x303F // CJK symbols and punctuation
        )
}

/// Decode string bytes when the font gives no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
