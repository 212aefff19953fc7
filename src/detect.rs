//! PDF header sniffing and file-name checks used before handing a file to the parser.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Readers accept the header anywhere in the first kilobyte.
const HEADER_WINDOW: usize = 1024;

/// Locate the `%PDF-x.y` header in `data` and return the version string.
///
/// ```
/// use docsift::detect::sniff_pdf_version;
///
/// assert_eq!(sniff_pdf_version(b"%PDF-1.7\n").unwrap(), "1.7");
/// ```
pub fn sniff_pdf_version(data: &[u8]) -> Result<String> {
    let window = &data[..data.len().min(HEADER_WINDOW)];
    let start = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let version = data
        .get(start + PDF_MAGIC.len()..start + PDF_MAGIC.len() + 3)
        .ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version).to_string();

    match version.as_bytes() {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => Ok(version),
        _ => Err(Error::UnsupportedVersion(version)),
    }
}

/// Read the head of a file and verify it carries a PDF header.
pub fn check_pdf_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut head = Vec::with_capacity(HEADER_WINDOW + 8);
    File::open(path)?
        .take((HEADER_WINDOW + 8) as u64)
        .read_to_end(&mut head)?;
    sniff_pdf_version(&head)
}

/// Whether a path names a PDF by extension (case-insensitive).
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
