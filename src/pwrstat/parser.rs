//! pwrstat Report Parser
//!
//! Turns the indented, dot-leader report printed by `pwrstat -status` into a
//! [`StatusRecord`]:
//!
//! ```text
//! 	Current UPS status:
//! 			State........................ Normal
//! 			Battery Capacity............. 100 %
//! ```
//!
//! Each line has its surrounding tabs stripped, every `". "` becomes the field
//! separator and the remaining dots are dropped, so the line above yields the
//! tokens `["Battery Capacity", "100 %"]`. Tokens from all lines are collected
//! into one sequence which is then read as alternating key/value pairs.
//!
//! Parsing never fails. Headings and blank lines produce a single token and are
//! skipped; a trailing key without a value is dropped.

use super::types::StatusRecord;

const FIELD_SEPARATOR: &str = ";";

/// Parse a raw pwrstat report
pub fn parse(text: &str) -> StatusRecord {
    let mut tokens: Vec<String> = Vec::new();

    for line in text.split('\n') {
        if line.is_empty() {
            continue;
        }

        let line = line
            .trim_matches('\t')
            .replace(". ", FIELD_SEPARATOR)
            .replace('.', "");

        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() > 1 {
            tokens.extend(fields.into_iter().map(str::to_owned));
        }
    }

    tokens
        .chunks_exact(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect()
}
