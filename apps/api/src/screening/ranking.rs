use serde::Serialize;

use crate::models::record::ResumeSummary;

/// Minimum final score (inclusive) for the shortlist.
pub const SHORTLIST_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedResults {
    pub shortlisted: Vec<ResumeSummary>,
    pub rejected: Vec<ResumeSummary>,
}

/// Sorts descending by final score (stable, so ties keep input order) and splits
/// at the shortlist threshold.
pub fn rank(mut summaries: Vec<ResumeSummary>) -> RankedResults {
    summaries.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    let (shortlisted, rejected) = summaries
        .into_iter()
        .partition(|s| s.final_score >= SHORTLIST_THRESHOLD);
    RankedResults {
        shortlisted,
        rejected,
    }
}
