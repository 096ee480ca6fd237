use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_AVAILABILITY: &str = "Not specified";

/// Trims skills and drops blanks and case-insensitive repeats, keeping the
/// first spelling.
pub fn normalize_skills<'a>(skills: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Classification of an achievement line. Serialized with its variant name
/// ("Award", "Certification", ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AchievementKind {
    Award,
    Certification,
    Recognition,
    Scholarship,
    Ranking,
    #[default]
    Achievement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: AchievementKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: BTreeSet<String>,
    /// Raw date/timespan token found on the title line; empty when none.
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

/// A stored user profile. Owned by the `ProfileRepository`; the extraction
/// core only reads it as roster input and produces its feature fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub bio: String,
    pub availability: String,
    pub skills: Vec<String>,
    pub github_links: Vec<String>,
    pub projects: Vec<Project>,
    pub achievements: Vec<Achievement>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub bio: String,
    pub availability: String,
    pub skills: Vec<String>,
    pub github_links: Vec<String>,
    pub projects: Json<Vec<Project>>,
    pub achievements: Json<Vec<Achievement>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        UserProfile {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            bio: row.bio,
            availability: row.availability,
            skills: row.skills,
            github_links: row.github_links,
            projects: row.projects.0,
            achievements: row.achievements.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Everything needed to insert a profile. Email is expected lower-cased.
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub full_name: String,
    pub email: String,
    pub bio: String,
    pub availability: String,
    pub skills: Vec<String>,
    pub github_links: Vec<String>,
    pub projects: Vec<Project>,
    pub achievements: Vec<Achievement>,
}

impl NewProfile {
    pub fn into_profile(self, id: Uuid) -> UserProfile {
        UserProfile {
            id,
            full_name: self.full_name,
            email: self.email,
            bio: self.bio,
            availability: self.availability,
            skills: self.skills,
            github_links: self.github_links,
            projects: self.projects,
            achievements: self.achievements,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub availability: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.bio.is_none()
            && self.skills.is_none()
            && self.availability.is_none()
    }

    /// Trimmed new name; blank names are ignored.
    pub fn full_name(&self) -> Option<&str> {
        non_blank(self.full_name.as_deref())
    }

    /// New skill list, normalized with `normalize_skills`.
    pub fn skills(&self) -> Option<Vec<String>> {
        self.skills
            .as_ref()
            .map(|skills| normalize_skills(skills.iter().map(String::as_str)))
    }

    /// Trimmed new availability; blank values are ignored.
    pub fn availability(&self) -> Option<&str> {
        non_blank(self.availability.as_deref())
    }

    pub fn apply(&self, profile: &mut UserProfile) {
        if let Some(name) = self.full_name() {
            profile.full_name = name.to_string();
        }
        if let Some(bio) = &self.bio {
            profile.bio = bio.clone();
        }
        if let Some(skills) = self.skills() {
            profile.skills = skills;
        }
        if let Some(availability) = self.availability() {
            profile.availability = availability.to_string();
        }
        profile.updated_at = Some(Utc::now());
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        NewProfile {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            availability: DEFAULT_AVAILABILITY.to_string(),
            ..Default::default()
        }
        .into_profile(Uuid::new_v4())
    }

    #[test]
    fn test_achievement_kind_serializes_as_variant_name() {
        let a = Achievement {
            title: "Won first prize at HackMIT".to_string(),
            kind: AchievementKind::Award,
        };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["type"], "Award");
        assert_eq!(json["title"], "Won first prize at HackMIT");
    }

    #[test]
    fn test_project_omits_missing_github_url() {
        let p = Project {
            name: "Chat App".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("githubUrl").is_none());
        assert_eq!(json["technologies"], serde_json::json!([]));
    }

    #[test]
    fn test_update_ignores_blank_name() {
        let mut p = profile();
        let update = ProfileUpdate {
            full_name: Some("   ".to_string()),
            bio: Some("Rustacean".to_string()),
            ..Default::default()
        };
        update.apply(&mut p);
        assert_eq!(p.full_name, "Ada Lovelace");
        assert_eq!(p.bio, "Rustacean");
        assert!(p.updated_at.is_some());
    }

    #[test]
    fn test_update_normalizes_skills() {
        let mut p = profile();
        let update = ProfileUpdate {
            skills: Some(vec![
                "Python".to_string(),
                " python ".to_string(),
                "".to_string(),
                "Rust".to_string(),
            ]),
            ..Default::default()
        };
        update.apply(&mut p);
        assert_eq!(p.skills, vec!["Python", "Rust"]);
    }

    #[test]
    fn test_empty_update_detected() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            skills: Some(vec![]),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
