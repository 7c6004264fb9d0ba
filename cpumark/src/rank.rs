//! Dense-ish rankings over the assembled dataset.
//!
//! Rank = 1 + position of the first occurrence of the record's score in the
//! descending-sorted score list. Tied scores share the rank of the
//! best-positioned equal entry. This first-occurrence lookup is the site
//! tool's historical behavior and is kept bit-for-bit, even though it is not
//! a statistically dense rank.

use crate::common::NOT_AVAILABLE;
use crate::record::CpuRecord;

/// Annotate every record with OverallRank and SingleThreadedRank.
/// Must run only after the whole dataset is assembled; records with an N/A
/// score keep an N/A rank (they sort as 0 internally but that value never
/// appears in the output).
pub fn apply_rankings(records: &mut [CpuRecord]) {
    let overall = ranks(records, |r| &r.overall_score);
    let single = ranks(records, |r| &r.single_thread_rating);
    for (record, (o, s)) in records.iter_mut().zip(overall.into_iter().zip(single)) {
        record.overall_rank = o;
        record.single_threaded_rank = s;
    }
}

fn ranks<F>(records: &[CpuRecord], score_of: F) -> Vec<String>
where
    F: Fn(&CpuRecord) -> &str,
{
    let scores: Vec<i64> = records
        .iter()
        .map(|r| score_of(r).parse().unwrap_or(0))
        .collect();
    let mut sorted = scores.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    records
        .iter()
        .zip(&scores)
        .map(|(record, score)| {
            if score_of(record) == NOT_AVAILABLE {
                NOT_AVAILABLE.to_string()
            } else {
                let first = sorted.iter().position(|s| s == score).unwrap();
                (first + 1).to_string()
            }
        })
        .collect()
}
