//! Reclassifies the page's detail paragraphs into independent key/value
//! lines before generic assignment happens.
//!
//! The site has rendered these paragraphs in at least four shapes over the
//! years: plain `"Cores: 8 Threads: 16"`, the comma-separated variant,
//! hybrid-chip `"Total Cores: 14, Threads: 20"` blocks, and per-core-type
//! blocks (`"Performance Cores: 8 Cores, 16 Threads, 3.2 GHz Base, 5.0 GHz
//! Turbo"`) that bury the clock speeds inside a single paragraph. All of
//! them are normalized here into separate `Cores` / `Threads` /
//! `Clockspeed` / `Turbo Speed` / `TDP` pairs.

use anyhow::{bail, Context};
use lazy_static::lazy_static;

use crate::common::{parse_locale_number, NOT_AVAILABLE};

/// Paragraphs longer than this that match no known shape are marketing
/// prose, not data, and are dropped rather than passed through.
const NOISE_THRESHOLD: usize = 30;

pub struct DetailParser {
    multiplier: u32,
}

impl DetailParser {
    pub fn new(multiplier: u32) -> Self {
        Self { multiplier }
    }

    /// Normalize every detail paragraph into `(key, value)` pairs.
    ///
    /// Cores, threads and TDP come out already scaled by the physical-CPU
    /// multiplier; clock speeds come out rendered to one decimal place.
    ///
    /// # Errors
    /// Errors when a cores paragraph or a short pass-through line does not
    /// tokenize - that shape of input means the page layout has changed and
    /// continuing would emit garbage rows.
    pub fn parse(&self, paragraphs: &[String]) -> anyhow::Result<Vec<(String, String)>> {
        let mut pairs = Vec::new();

        if let Some(tdp) = self.typical_tdp(paragraphs) {
            pairs.push(("TDP".to_string(), tdp));
        }

        for text in paragraphs {
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            let label = text.splitn(2, ':').next().unwrap_or("").trim();
            if label.contains("TDP") {
                /* Typical TDP handled above; TDP Down / TDP Up variants dropped */
                continue;
            }
            match label {
                "Cores" | "Total Cores" => pairs.extend(self.cores_and_threads(text)?),
                "Performance Cores" | "Primary Cores" => pairs.extend(clockspeed_triple(text)),
                "Secondary Cores" | "Efficient Cores" => {
                    /* efficiency-core clock data is not modeled */
                }
                "Clockspeed" | "Turbo Speed" => {
                    pairs.push((label.to_string(), simple_speed(text)));
                }
                _ => {
                    if text.len() <= NOISE_THRESHOLD {
                        pairs.push(split_pair(text)?);
                    }
                }
            }
        }

        Ok(pairs)
    }

    /// `"Cores: N Threads: M"` and its comma / `Total`-prefixed variants.
    /// A paragraph with no Threads clause reports as many threads as cores.
    /// Each count is scaled to the system total across physical packages.
    fn cores_and_threads(&self, text: &str) -> anyhow::Result<Vec<(String, String)>> {
        lazy_static! {
            static ref RE_CORES: regex::Regex = regex::Regex::new(
                r"^(?:Total\s+)?Cores:\s*(\d+)\s*(?:,?\s*Threads:\s*(\d+))?$"
            )
            .unwrap();
        }

        let caps = RE_CORES
            .captures(text)
            .with_context(|| format!("unrecognized cores paragraph: \"{}\"", text))?;
        let cores: u32 = caps[1].parse()?;
        let threads: u32 = match caps.get(2) {
            Some(m) => m.as_str().parse()?,
            None => cores,
        };

        Ok(vec![
            ("Cores".to_string(), (cores * self.multiplier).to_string()),
            (
                "Threads".to_string(),
                (threads * self.multiplier).to_string(),
            ),
        ])
    }

    /// Nominal package power. Configurable-TDP lines ("TDP Down", "TDP Up")
    /// are excluded; only the "Typical TDP" paragraph counts. Wattage is
    /// rounded to the nearest integer, scaled, and the unit token kept.
    fn typical_tdp(&self, paragraphs: &[String]) -> Option<String> {
        for text in paragraphs {
            if text.contains("TDP Down") || text.contains("TDP Up") {
                continue;
            }
            if !text.contains("Typical TDP") {
                continue;
            }
            let value = text.splitn(2, ':').nth(1)?.trim();
            let mut tokens = value.split_whitespace();
            /* some Apple parts list fractional wattages */
            let watts = parse_locale_number(tokens.next()?)?;
            let unit = tokens.next()?;
            let scaled = watts.round() as i64 * i64::from(self.multiplier);
            return Some(format!("{} {}", scaled, unit));
        }
        None
    }
}

/// `"Clockspeed: 3.6 GHz"` / `"Turbo Speed: 5,0 GHz"`. The speed is the
/// first token of the value; anything non-numeric degrades to N/A.
fn simple_speed(text: &str) -> String {
    let value = match text.splitn(2, ':').nth(1) {
        Some(v) => v.trim(),
        None => return NOT_AVAILABLE.to_string(),
    };
    match value.split_whitespace().next().and_then(parse_locale_number) {
        Some(speed) => format!("{:.1} GHz", speed),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Pull `Clockspeed` / `Turbo Speed` back out of a per-core-type paragraph:
/// the base speed sits between the "Threads" clause and "Base", the turbo
/// speed between "Base" and "Turbo".
fn clockspeed_triple(text: &str) -> Vec<(String, String)> {
    let rest = match text
        .find("Threads")
        .map(|at| &text[at..])
        .and_then(|tail| tail.find(',').map(|comma| &tail[comma + 1..]))
    {
        Some(rest) => rest,
        None => return Vec::new(),
    };

    let mut segments = rest.splitn(2, ',');
    let base = segment_speed(segments.next());
    let turbo = segment_speed(segments.next());

    vec![
        ("Clockspeed".to_string(), base),
        ("Turbo Speed".to_string(), turbo),
    ]
}

/// One segment of the triple, e.g. `" 3.2 GHz Base"`. A segment with only
/// two whitespace tokens carries no number and renders as N/A.
fn segment_speed(segment: Option<&str>) -> String {
    let tokens: Vec<&str> = match segment {
        Some(s) => s.split_whitespace().collect(),
        None => return NOT_AVAILABLE.to_string(),
    };
    if tokens.len() == 2 {
        return NOT_AVAILABLE.to_string();
    }
    match (tokens.get(0).and_then(|t| parse_locale_number(t)), tokens.get(1)) {
        (Some(speed), Some(unit)) => format!("{:.1} {}", speed, unit),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Short unmatched lines pass through verbatim as candidate pairs.
fn split_pair(text: &str) -> anyhow::Result<(String, String)> {
    let mut parts = text.splitn(2, ':');
    let key = parts.next().unwrap_or("").trim();
    match parts.next() {
        Some(value) => Ok((key.to_string(), value.trim().to_string())),
        None => bail!("detail line \"{}\" is not a key: value pair", text),
    }
}
