//! Learner context service
//!
//! There is no profile storage yet: every learner gets the same demo snapshot with
//! their id echoed back.

use chrono::Utc;

use crate::{
    constants::USER_CONTEXT_VERSION,
    models::{LanguageProficiency, LearningPreference, ProficiencyLevel, UserContext, UserProfile},
};

/// Learner context service
pub struct UserContextService;

impl UserContextService {
    /// Snapshot for `user_id`, stamped with the current time
    pub fn get_context(user_id: &str) -> UserContext {
        UserContext {
            user_id: user_id.to_string(),
            profile: UserProfile {
                role: "self-directed learner".to_string(),
                age_range: Some("25-34".to_string()),
                timezone: Some("UTC".to_string()),
                preferred_languages: strings(&["en"]),
                learning_preferences: vec![
                    LearningPreference {
                        modality: "project-based".to_string(),
                        notes: Some("Prefers building small tools and scripts.".to_string()),
                    },
                    LearningPreference {
                        modality: "reading".to_string(),
                        notes: Some(
                            "Enjoys concise reference material alongside examples.".to_string(),
                        ),
                    },
                ],
            },
            languages: vec![
                LanguageProficiency {
                    name: "python".to_string(),
                    proficiency: ProficiencyLevel::Advanced,
                    years_experience: Some(5.0),
                    primary_frameworks: strings(&["fastapi", "pydantic", "pytest"]),
                },
                LanguageProficiency {
                    name: "javascript".to_string(),
                    proficiency: ProficiencyLevel::Intermediate,
                    years_experience: Some(3.0),
                    primary_frameworks: strings(&["react", "node"]),
                },
            ],
            learning_goals: strings(&[
                "Strengthen debugging workflows",
                "Prepare for technical interviews focused on system design",
                "Improve code readability and documentation habits",
            ]),
            strengths: strings(&["Problem decomposition", "Python tooling", "Testing mindset"]),
            opportunities: strings(&[
                "Low-level systems knowledge",
                "Advanced TypeScript patterns",
            ]),
            last_updated: Utc::now(),
            version: USER_CONTEXT_VERSION.to_string(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_is_echoed() {
        for id in ["demo-user", "alice", "  spaced id  ", ""] {
            assert_eq!(UserContextService::get_context(id).user_id, id);
        }
    }

    #[test]
    fn test_shape_is_identical_across_users() {
        let mut a = UserContextService::get_context("a");
        let mut b = UserContextService::get_context("b");
        a.user_id.clear();
        b.user_id.clear();
        b.last_updated = a.last_updated;
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(UserContextService::get_context("demo-user")).unwrap();
        assert_eq!(json["version"], "v1");
        assert_eq!(json["profile"]["role"], "self-directed learner");
        assert_eq!(json["languages"][0]["proficiency"], "advanced");
        assert_eq!(json["languages"][1]["primary_frameworks"][0], "react");
        assert_eq!(json["learning_goals"].as_array().unwrap().len(), 3);
    }
}
