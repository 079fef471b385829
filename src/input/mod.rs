pub mod csv;

pub use self::csv::{parse, parse_report, ParseReport};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Load a telemetry log from disk.
///
/// Fails if the file cannot be read or is not UTF-8 text; the CSV parser is
/// only invoked on readable text.
pub fn load_file(path: impl AsRef<Path>) -> Result<ParseReport> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read telemetry log {}", path.display()))?;

    let text = String::from_utf8(data)
        .with_context(|| format!("Telemetry log {} is not UTF-8 text", path.display()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let report = parse_report(text);
    info!(
        "Loaded {}: {} rows ({} dropped)",
        path.display(),
        report.rows.len(),
        report.dropped
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\u{feff}time,speed\n0,10\n1,\n,5\n").unwrap();

        let report = load_file(file.path()).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.dropped, 1);
        assert_eq!(report.rows[0].number("speed"), Some(10.0));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(dir.path().join("nope.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to read telemetry log"));
    }

    #[test]
    fn test_load_binary_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x9f]).unwrap();
        assert!(load_file(file.path()).is_err());
    }
}
