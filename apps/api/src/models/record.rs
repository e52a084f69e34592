use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    #[default]
    Internship,
    Job,
}

impl RoleType {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleType::Internship => "internship",
            RoleType::Job => "job",
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "internship" => Ok(RoleType::Internship),
            "job" => Ok(RoleType::Job),
            other => Err(format!(
                "Unknown role type '{other}', expected 'internship' or 'job'"
            )),
        }
    }
}

/// Outcome of scanning a resume for experience signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectedExperience {
    Years { years: u32 },
    Fresher,
    Unknown,
}

/// Manual experience bucket chosen by a reviewer on rescore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceBucket {
    UpToOne,
    OneToThree,
    ThreeToFive,
    FiveToTen,
    TenPlus,
}

impl ExperienceBucket {
    /// Unrecognized labels yield `None`; the caller still rescores without an adjustment.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "0-1" => Some(ExperienceBucket::UpToOne),
            "1-3" => Some(ExperienceBucket::OneToThree),
            "3-5" => Some(ExperienceBucket::ThreeToFive),
            "5-10" => Some(ExperienceBucket::FiveToTen),
            "10+" => Some(ExperienceBucket::TenPlus),
            _ => None,
        }
    }

    /// Representative years of experience for the bucket.
    pub fn value(self) -> u32 {
        match self {
            ExperienceBucket::UpToOne => 0,
            ExperienceBucket::OneToThree => 2,
            ExperienceBucket::ThreeToFive => 4,
            ExperienceBucket::FiveToTen => 7,
            ExperienceBucket::TenPlus => 12,
        }
    }
}

/// Everything known about one scored resume. Keyed by `filename` in the result store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub filename: String,
    pub run_id: Uuid,
    pub raw_text: String,
    pub cleaned_text: String,
    pub detected_experience: DetectedExperience,
    pub experience_value: Option<u32>,
    /// True only for job roles where detection found nothing.
    pub missing_experience: bool,
    /// Raw bucket label from the last rescore, kept even when unrecognized.
    pub experience_bucket: Option<String>,
    pub matched_keywords: Vec<String>,
    pub missed_keywords: Vec<String>,
    pub similarity_score: f64,
    pub final_score: f64,
    pub suggestions: Vec<String>,
    pub role_type: RoleType,
    pub job_description: String,
    pub analyzed_at: DateTime<Utc>,
}

/// The slice of a record shown in ranked listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub filename: String,
    pub final_score: f64,
    pub detected_experience: DetectedExperience,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_bucket: Option<String>,
    pub matched_keywords: Vec<String>,
    pub missed_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

impl From<&ResumeRecord> for ResumeSummary {
    fn from(record: &ResumeRecord) -> Self {
        Self {
            filename: record.filename.clone(),
            final_score: record.final_score,
            detected_experience: record.detected_experience,
            experience_bucket: record.experience_bucket.clone(),
            matched_keywords: record.matched_keywords.clone(),
            missed_keywords: record.missed_keywords.clone(),
            suggestions: record.suggestions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_type_parsing() {
        assert_eq!("job".parse::<RoleType>(), Ok(RoleType::Job));
        assert_eq!(" Internship ".parse::<RoleType>(), Ok(RoleType::Internship));
        assert!("contract".parse::<RoleType>().is_err());
        assert_eq!(RoleType::default(), RoleType::Internship);
    }

    #[test]
    fn test_detected_experience_serializes_tagged() {
        assert_eq!(
            serde_json::to_value(DetectedExperience::Years { years: 3 }).unwrap(),
            json!({"kind": "years", "years": 3})
        );
        assert_eq!(
            serde_json::to_value(DetectedExperience::Fresher).unwrap(),
            json!({"kind": "fresher"})
        );
    }

    #[test]
    fn test_bucket_values() {
        let expected = [("0-1", 0), ("1-3", 2), ("3-5", 4), ("5-10", 7), ("10+", 12)];
        for (label, value) in expected {
            let bucket = ExperienceBucket::parse(label).unwrap();
            assert_eq!(bucket.value(), value);
        }
        assert_eq!(ExperienceBucket::parse("20+"), None);
    }
}
