use crate::core::{Channel, FieldValue, RawRow};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Result of parsing a telemetry CSV
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Rows that carry a `time` value, in file order
    pub rows: Vec<RawRow>,
    /// Data lines dropped because they had no `time` or could not be read
    pub dropped: usize,
}

/// Parse telemetry CSV text into rows.
///
/// Rows without a `time` value are dropped silently.
pub fn parse(text: &str) -> Vec<RawRow> {
    parse_report(text).rows
}

/// Parse telemetry CSV text, also counting dropped rows.
///
/// Expected layout:
/// - first line is a header naming the columns (`time,throttle,speed,rpm,lat,long,...`)
/// - one sample per line, comma separated
///
/// Short lines leave trailing columns absent; fields past the header width
/// are ignored.
pub fn parse_report(text: &str) -> ParseReport {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = match rdr.headers() {
        Ok(h) => unique_headers(h.iter().map(|name| name.trim().to_string()).collect()),
        Err(e) => {
            warn!("Failed to read CSV header: {}", e);
            return ParseReport::default();
        }
    };

    if find_column(&headers, Channel::Time).is_none() {
        warn!("CSV header has no '{}' column, every row will be dropped", Channel::Time);
    }

    let mut report = ParseReport::default();

    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping unreadable CSV record {}: {}", line + 1, e);
                report.dropped += 1;
                continue;
            }
        };

        if record.len() > headers.len() {
            debug!(
                "Record {} has {} fields, ignoring {} past the header",
                line + 1,
                record.len(),
                record.len() - headers.len()
            );
        }

        let mut row = RawRow::new();
        for (name, raw) in headers.iter().zip(record.iter()) {
            if let Some(value) = FieldValue::from_field(raw) {
                row.insert(name, value);
            }
        }

        if row.has_time() {
            report.rows.push(row);
        } else {
            report.dropped += 1;
        }
    }

    debug!(
        "Parsed {} rows, dropped {} without a time value",
        report.rows.len(),
        report.dropped
    );

    report
}

/// Rename repeated header names to `name_1`, `name_2`, ... so every column
/// keeps its own field. The first occurrence keeps the plain name.
fn unique_headers(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());

    for (idx, name) in names.iter().enumerate() {
        if seen.insert(name.clone()) {
            out.push(name.clone());
            continue;
        }

        // Skip suffixes that an original column already uses
        let mut n = 1;
        let renamed = loop {
            let candidate = format!("{}_{}", name, n);
            if !seen.contains(&candidate) && !names[idx + 1..].contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        warn!("Duplicate CSV column '{}' renamed to '{}'", name, renamed);
        seen.insert(renamed.clone());
        out.push(renamed);
    }

    out
}

/// Index of a recognized channel in the header
fn find_column(headers: &[String], channel: Channel) -> Option<usize> {
    headers.iter().position(|h| h == channel.column())
}
