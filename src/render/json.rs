//! JSON rendering for outlines and ranking reports.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Indented with 2 spaces
    #[default]
    Pretty,
    /// Indented with 4 spaces
    Wide,
    /// No extra whitespace
    Compact,
}

impl JsonFormat {
    fn indent(self) -> Option<&'static [u8]> {
        match self {
            JsonFormat::Pretty => Some(b"  "),
            JsonFormat::Wide => Some(b"    "),
            JsonFormat::Compact => None,
        }
    }
}

/// Serialize a value to a JSON string. Non-ASCII text is written as-is.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let mut buf = Vec::new();
    let result = match format.indent() {
        Some(indent) => {
            let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
            value.serialize(&mut ser)
        }
        None => value.serialize(&mut Serializer::new(&mut buf)),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;

    String::from_utf8(buf).map_err(|e| Error::Render(format!("JSON is not UTF-8: {}", e)))
}

/// Write a value as JSON to `path`.
///
/// The file is written next to its destination and renamed into place, so a
/// failed run never leaves a truncated file behind.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, format: JsonFormat) -> Result<()> {
    let json = to_json(value, format)?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let written = fs::File::create(&tmp_path).and_then(|mut file| {
        file.write_all(json.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|_| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentOutline, HeadingLevel, OutlineEntry};

    fn outline() -> DocumentOutline {
        let mut outline = DocumentOutline::new("Café Guide");
        outline.push(OutlineEntry::new(HeadingLevel::H1, "Menus", 0));
        outline
    }

    #[test]
    fn test_pretty_uses_two_spaces() {
        let json = to_json(&outline(), JsonFormat::Pretty).unwrap();
        assert!(json.starts_with("{\n  \"title\": \"Café Guide\""));
        assert!(json.contains("\n      \"level\": \"H1\""));
    }

    #[test]
    fn test_wide_uses_four_spaces() {
        let json = to_json(&outline(), JsonFormat::Wide).unwrap();
        assert!(json.starts_with("{\n    \"title\""));
    }

    #[test]
    fn test_compact() {
        let json = to_json(&outline(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert_eq!(
            json,
            r#"{"title":"Café Guide","outline":[{"level":"H1","text":"Menus","page":0}]}"#
        );
    }

    #[test]
    fn test_write_json_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.json");
        fs::write(&path, "stale").unwrap();

        write_json(&path, &outline(), JsonFormat::Pretty).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_json(&outline(), JsonFormat::Pretty).unwrap());
        assert!(!dir.path().join("guide.json.tmp").exists());
    }

    #[test]
    fn test_write_json_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("guide.json");
        assert!(matches!(
            write_json(&path, &outline(), JsonFormat::Compact),
            Err(Error::Io(_))
        ));
    }
}
