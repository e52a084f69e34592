use crate::models::record::{DetectedExperience, RoleType};

/// How many missed keywords the keyword suggestion lists.
const MAX_LISTED_KEYWORDS: usize = 8;

const PROJECTS_INTERNSHIP: &str =
    "Add details about academic/projects or internships showing hands-on work.";
const PROJECTS_JOB: &str =
    "Add 1-2 projects with outcomes (metrics, scale) to show practical experience.";
const FRESHER_ADVICE: &str =
    "Resume indicates 'fresher'; for experienced roles, mention internships, contracts, or freelance work.";
const UNKNOWN_EXPERIENCE_ADVICE: &str =
    "Specify total years of professional experience clearly (e.g., '3 years of experience').";
const SHORT_TENURE_ADVICE: &str =
    "If applying to mid-level roles, highlight longer-tenure projects or lead responsibilities.";
const ACHIEVEMENTS_ADVICE: &str =
    "Add specific achievements with numbers (e.g., 'reduced load time by 30%', 'handled 1000 users').";

/// What the rules look at for one resume.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionInput<'a> {
    pub role: RoleType,
    pub missed_keywords: &'a [String],
    /// Normalized resume text.
    pub text: &'a str,
    pub detected: DetectedExperience,
}

type Rule = fn(&SuggestionInput<'_>, &str) -> Option<String>;

/// Evaluated in order; every rule that fires contributes one message.
/// The second argument is the lowercased text.
const RULES: &[Rule] = &[
    missing_keywords,
    internship_projects,
    job_projects,
    job_experience,
    job_achievements,
];

/// Runs every rule and drops repeated messages, keeping first occurrences.
pub fn generate_suggestions(input: &SuggestionInput<'_>) -> Vec<String> {
    let lower = input.text.to_lowercase();
    let mut suggestions: Vec<String> = Vec::new();
    for rule in RULES {
        if let Some(message) = rule(input, &lower) {
            if !suggestions.contains(&message) {
                suggestions.push(message);
            }
        }
    }
    suggestions
}

fn missing_keywords(input: &SuggestionInput<'_>, _lower: &str) -> Option<String> {
    if input.missed_keywords.is_empty() {
        return None;
    }
    let listed = &input.missed_keywords[..input.missed_keywords.len().min(MAX_LISTED_KEYWORDS)];
    Some(format!("Add or emphasize these keywords: {}", listed.join(", ")))
}

fn internship_projects(input: &SuggestionInput<'_>, lower: &str) -> Option<String> {
    (input.role == RoleType::Internship && !lower.contains("project"))
        .then(|| PROJECTS_INTERNSHIP.to_string())
}

fn job_projects(input: &SuggestionInput<'_>, lower: &str) -> Option<String> {
    (input.role == RoleType::Job && !lower.contains("project")).then(|| PROJECTS_JOB.to_string())
}

fn job_experience(input: &SuggestionInput<'_>, _lower: &str) -> Option<String> {
    if input.role != RoleType::Job {
        return None;
    }
    let advice = match input.detected {
        DetectedExperience::Fresher => FRESHER_ADVICE,
        DetectedExperience::Unknown => UNKNOWN_EXPERIENCE_ADVICE,
        DetectedExperience::Years { years } if years < 2 => SHORT_TENURE_ADVICE,
        DetectedExperience::Years { .. } => return None,
    };
    Some(advice.to_string())
}

fn job_achievements(input: &SuggestionInput<'_>, lower: &str) -> Option<String> {
    (input.role == RoleType::Job && !lower.contains("achiev") && !lower.contains("result"))
        .then(|| ACHIEVEMENTS_ADVICE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keyword_message_lists_first_eight() {
        let missed = strings(&["a1", "b2", "c3", "d4", "e5", "f6", "g7", "h8", "i9", "j10"]);
        let out = generate_suggestions(&SuggestionInput {
            role: RoleType::Internship,
            missed_keywords: &missed,
            text: "Project work",
            detected: DetectedExperience::Unknown,
        });
        assert_eq!(
            out,
            vec!["Add or emphasize these keywords: a1, b2, c3, d4, e5, f6, g7, h8".to_string()]
        );
    }

    #[test]
    fn test_internship_without_projects() {
        let out = generate_suggestions(&SuggestionInput {
            role: RoleType::Internship,
            missed_keywords: &[],
            text: "Coursework in algorithms",
            detected: DetectedExperience::Unknown,
        });
        assert_eq!(out, vec![PROJECTS_INTERNSHIP.to_string()]);
    }

    #[test]
    fn test_job_rules_fire_in_order() {
        let missed = strings(&["kafka"]);
        let out = generate_suggestions(&SuggestionInput {
            role: RoleType::Job,
            missed_keywords: &missed,
            text: "Backend developer",
            detected: DetectedExperience::Fresher,
        });
        assert_eq!(
            out,
            vec![
                "Add or emphasize these keywords: kafka".to_string(),
                PROJECTS_JOB.to_string(),
                FRESHER_ADVICE.to_string(),
                ACHIEVEMENTS_ADVICE.to_string(),
            ]
        );
    }

    #[test]
    fn test_experience_message_by_detection() {
        let advice = |detected| {
            generate_suggestions(&SuggestionInput {
                role: RoleType::Job,
                missed_keywords: &[],
                text: "Projects with measurable RESULTS",
                detected,
            })
        };
        assert_eq!(advice(DetectedExperience::Unknown), vec![UNKNOWN_EXPERIENCE_ADVICE]);
        assert_eq!(
            advice(DetectedExperience::Years { years: 1 }),
            vec![SHORT_TENURE_ADVICE]
        );
        assert!(advice(DetectedExperience::Years { years: 2 }).is_empty());
    }

    #[test]
    fn test_achiev_prefix_suppresses_metrics_advice() {
        let out = generate_suggestions(&SuggestionInput {
            role: RoleType::Job,
            missed_keywords: &[],
            text: "Achieved 40% faster builds across three projects",
            detected: DetectedExperience::Years { years: 4 },
        });
        assert!(out.is_empty());
    }
}
