//! One extraction rule per simple field.
//!
//! Every rule scans the flattened page text for a recognizable label and
//! yields the raw value string. A missing optional label never aborts a
//! record; the caller falls back to the N/A sentinel and keeps going.

use anyhow::{bail, Context};

/// Value of the first line whose text before the `:` equals `label`.
/// Returns `None` when the label is absent or its value is empty.
pub fn labeled_field(lines: &[String], label: &str) -> Option<String> {
    lines.iter().find_map(|line| {
        let mut parts = line.splitn(2, ':');
        if parts.next()?.trim() != label {
            return None;
        }
        let value = parts.next()?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}

/// Like [`labeled_field`], but the label may appear anywhere in the line.
/// Used for labels embedded in prose paragraphs ("CPU First Seen on Charts:").
pub fn containing_field(lines: &[String], label: &str) -> Option<String> {
    lines.iter().find_map(|line| {
        let start = line.find(label)?;
        let value = line[start + label.len()..].trim_start_matches(':').trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}

/// Overall Score rule: the value follows a fixed heading instead of a
/// `Label:` pair. The score is the trimmed text after the marker on the same
/// line, or the next non-empty line when the heading stands alone.
///
/// # Errors
/// Unlike the labeled rules, a missing marker is a hard input-shape error -
/// the page cannot be a CPU spec page without its score heading - as is a
/// non-numeric value where the score should be.
pub fn marker_field(lines: &[String], marker: &str) -> anyhow::Result<String> {
    let at = lines
        .iter()
        .position(|line| line.contains(marker))
        .with_context(|| format!("page has no \"{}\" heading", marker))?;

    let offset = lines[at].find(marker).unwrap() + marker.len();
    let mut value = lines[at][offset..].trim();
    if value.is_empty() {
        value = lines[at + 1..]
            .iter()
            .map(|l| l.trim())
            .find(|l| !l.is_empty())
            .with_context(|| format!("no value follows the \"{}\" heading", marker))?;
    }

    let value = value.split_whitespace().next().unwrap_or("");
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        bail!("\"{}\" is not a numeric value for \"{}\"", value, marker);
    }
    Ok(value.to_string())
}
