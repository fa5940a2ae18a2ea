//! Learner context model
//!
//! A snapshot of what the backend knows about a learner. It is built on demand and
//! never stored; clients merge it with transient UI state before talking to a tutor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Self-reported proficiency in a programming language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageProficiency {
    pub name: String,
    pub proficiency: ProficiencyLevel,
    pub years_experience: Option<f64>,
    #[serde(default)]
    pub primary_frameworks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPreference {
    /// e.g. "reading", "project-based"
    pub modality: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub role: String,
    pub age_range: Option<String>,
    pub timezone: Option<String>,
    /// Natural languages the learner prefers for explanations
    #[serde(default)]
    pub preferred_languages: Vec<String>,
    #[serde(default)]
    pub learning_preferences: Vec<LearningPreference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: String,
    pub profile: UserProfile,
    #[serde(default)]
    pub languages: Vec<LanguageProficiency>,
    #[serde(default)]
    pub learning_goals: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub version: String,
}
