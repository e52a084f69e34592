//! Score composition: turns a raw similarity score plus an experience signal into
//! the final 0–100 score.
//!
//! 1. clamp similarity to [0, 100], round to 2 decimals (base score)
//! 2. job + fresher: experience value 1 and base − 5
//! 3. one table adjustment for the resolved value: ≥10 +8, ≥5 +5, ≥3 +2, ≤1 −5
//! 4. clamp and round again
//!
//! A value of exactly 2 falls through every row of the table and is left as is.

use crate::models::record::{DetectedExperience, ExperienceBucket, RoleType};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Experience value assumed for a candidate flagged as fresher.
pub const FRESHER_EXPERIENCE_VALUE: u32 = 1;
const FRESHER_PENALTY: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub base_score: f64,
    pub experience_value: Option<u32>,
    pub final_score: f64,
}

/// Scores a freshly analyzed resume.
///
/// Experience only counts for job roles; internship runs always get `None`.
pub fn compose_score(similarity: f64, role: RoleType, detected: DetectedExperience) -> ScoreBreakdown {
    let base_score = clamp_round(similarity);
    let mut score = base_score;

    let experience_value = match (role, detected) {
        (RoleType::Job, DetectedExperience::Fresher) => {
            score -= FRESHER_PENALTY;
            Some(FRESHER_EXPERIENCE_VALUE)
        }
        (RoleType::Job, DetectedExperience::Years { years }) => Some(years),
        _ => None,
    };

    ScoreBreakdown {
        base_score,
        experience_value,
        final_score: finalize(score, experience_value),
    }
}

/// Scores a resume against a manually chosen bucket. The fresher penalty never applies here.
pub fn rescore_score(similarity: f64, bucket: Option<ExperienceBucket>) -> ScoreBreakdown {
    let base_score = clamp_round(similarity);
    let experience_value = bucket.map(ExperienceBucket::value);
    ScoreBreakdown {
        base_score,
        experience_value,
        final_score: finalize(base_score, experience_value),
    }
}

/// Table adjustment for a resolved experience value. First matching row wins.
pub fn experience_adjustment(value: u32) -> f64 {
    match value {
        v if v >= 10 => 8.0,
        v if v >= 5 => 5.0,
        v if v >= 3 => 2.0,
        v if v <= 1 => -5.0,
        _ => 0.0,
    }
}

fn finalize(score: f64, experience_value: Option<u32>) -> f64 {
    clamp_round(score + experience_value.map_or(0.0, experience_adjustment))
}

/// Clamps to [0, 100] and rounds to 2 decimals. NaN becomes 0.
pub fn clamp_round(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    round2(score.clamp(MIN_SCORE, MAX_SCORE))
}

// Decimal formatting rounds the exact binary value half-to-even, same as a
// correctly rounded `round(x, 2)`.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(similarity: f64, detected: DetectedExperience) -> ScoreBreakdown {
        compose_score(similarity, RoleType::Job, detected)
    }

    fn years(n: u32) -> DetectedExperience {
        DetectedExperience::Years { years: n }
    }

    #[test]
    fn test_clamp_round_bounds_and_nan() {
        assert_eq!(clamp_round(-12.5), 0.0);
        assert_eq!(clamp_round(104.2), 100.0);
        assert_eq!(clamp_round(f64::NAN), 0.0);
        assert_eq!(clamp_round(f64::INFINITY), 100.0);
        assert_eq!(clamp_round(76.98765), 76.99);
    }

    #[test]
    fn test_rounding_uses_exact_binary_value() {
        assert_eq!(clamp_round(0.125), 0.12);
        assert_eq!(clamp_round(0.375), 0.38);
        assert_eq!(clamp_round(2.675), 2.67);
    }

    #[test]
    fn test_fresher_job_loses_ten_points() {
        let result = job(80.0, DetectedExperience::Fresher);
        assert_eq!(result.experience_value, Some(1));
        assert_eq!(result.final_score, 70.0);
    }

    #[test]
    fn test_fresher_floor_is_zero() {
        assert_eq!(job(3.0, DetectedExperience::Fresher).final_score, 0.0);
    }

    #[test]
    fn test_value_two_has_no_adjustment() {
        assert_eq!(experience_adjustment(2), 0.0);
        assert_eq!(job(61.37, years(2)).final_score, 61.37);
    }

    #[test]
    fn test_adjustment_table_boundaries() {
        assert_eq!(experience_adjustment(0), -5.0);
        assert_eq!(experience_adjustment(1), -5.0);
        assert_eq!(experience_adjustment(3), 2.0);
        assert_eq!(experience_adjustment(4), 2.0);
        assert_eq!(experience_adjustment(5), 5.0);
        assert_eq!(experience_adjustment(9), 5.0);
        assert_eq!(experience_adjustment(10), 8.0);
        assert_eq!(experience_adjustment(40), 8.0);
    }

    #[test]
    fn test_ten_years_gets_bonus_once() {
        assert_eq!(job(50.0, years(10)).final_score, 58.0);
        assert_eq!(job(50.0, years(9)).final_score, 55.0);
    }

    #[test]
    fn test_bonus_is_capped() {
        assert_eq!(job(97.5, years(12)).final_score, 100.0);
    }

    #[test]
    fn test_unknown_or_internship_has_no_value() {
        let unknown = job(64.321, DetectedExperience::Unknown);
        assert_eq!(unknown.experience_value, None);
        assert_eq!(unknown.final_score, 64.32);

        let intern = compose_score(64.321, RoleType::Internship, years(7));
        assert_eq!(intern.experience_value, None);
        assert_eq!(intern.final_score, 64.32);
    }

    #[test]
    fn test_final_score_always_in_range() {
        let similarities = [-1e9, -5.0, 0.0, 0.004, 33.335, 69.995, 99.999, 100.0, 250.0, f64::NAN];
        let signals = [
            DetectedExperience::Unknown,
            DetectedExperience::Fresher,
            years(0),
            years(2),
            years(3),
            years(15),
        ];
        for s in similarities {
            for d in signals {
                let score = job(s, d).final_score;
                assert!((0.0..=100.0).contains(&score), "{s} {d:?} -> {score}");
                assert_eq!(score, clamp_round(score));
            }
        }
    }

    #[test]
    fn test_rescore_ten_plus_and_no_fresher_penalty() {
        let result = rescore_score(60.0, ExperienceBucket::parse("10+"));
        assert_eq!(result.experience_value, Some(12));
        assert_eq!(result.final_score, 68.0);

        let low = rescore_score(60.0, ExperienceBucket::parse("0-1"));
        assert_eq!(low.final_score, 55.0);
    }

    #[test]
    fn test_rescore_unknown_bucket_is_unadjusted() {
        let result = rescore_score(72.456, ExperienceBucket::parse("twenty"));
        assert_eq!(result.experience_value, None);
        assert_eq!(result.final_score, 72.46);
    }
}
