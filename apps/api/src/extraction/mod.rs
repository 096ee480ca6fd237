//! Resume feature extraction: skills, GitHub links, projects and achievements
//! from raw resume text. Everything here is pure and synchronous.

pub mod achievements;
pub mod linking;
pub mod links;
pub mod projects;
pub mod sections;
pub mod skills;
pub mod taxonomy;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::profile::{Achievement, Project};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No resume text provided")]
    MissingText,
}

/// Structured features extracted from one resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFeatures {
    pub skills: BTreeSet<String>,
    pub github_links: Vec<String>,
    pub projects: Vec<Project>,
    pub achievements: Vec<Achievement>,
}

/// Runs every extractor over `text` and joins links onto projects.
///
/// Empty or whitespace-only input is rejected with `MissingText`; any other
/// input succeeds, possibly with empty results.
pub fn extract_resume(text: &str) -> Result<ResumeFeatures, ExtractionError> {
    if text.trim().is_empty() {
        return Err(ExtractionError::MissingText);
    }

    let skills = skills::extract_skills(text);
    let github_links = links::extract_github_links(text);
    let mut projects = projects::extract_projects(text);
    let achievements = achievements::extract_achievements(text);
    linking::attach_links(&mut projects, &github_links);

    debug!(
        "Resume features: {} skills, {} links, {} projects, {} achievements",
        skills.len(),
        github_links.len(),
        projects.len(),
        achievements.len()
    );

    Ok(ResumeFeatures {
        skills,
        github_links,
        projects,
        achievements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::AchievementKind;

    const RESUME: &str = "\
Jane Doe
jane@example.com | GitHub: janedoe
Awarded Best Intern 2022

SKILLS
Python, Django, React, Docker

PROJECTS
Chat App | 2021 - 2022
• Implemented realtime messaging using React and MongoDB
• Code: github.com/janedoe/chat-app
Expense Tracker
• Developed with Flask and PostgreSQL

ACHIEVEMENTS
• First place, Smart India Hackathon 2021
";

    #[test]
    fn test_missing_text_rejected() {
        assert_eq!(extract_resume(""), Err(ExtractionError::MissingText));
        assert_eq!(extract_resume(" \n\t "), Err(ExtractionError::MissingText));
    }

    #[test]
    fn test_full_resume() {
        let features = extract_resume(RESUME).unwrap();

        for skill in ["python", "django", "react", "docker", "mongodb", "flask", "postgresql"] {
            assert!(features.skills.contains(skill), "missing skill {skill}");
        }
        assert_eq!(
            features.github_links,
            vec![
                "https://github.com/janedoe",
                "https://github.com/janedoe/chat-app",
            ]
        );

        let names: Vec<&str> = features.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Chat App", "Expense Tracker"]);
        assert_eq!(features.projects[0].duration, "2021 - 2022");
        assert_eq!(
            features.projects[0].github_url.as_deref(),
            Some("https://github.com/janedoe/chat-app")
        );
        assert!(features.projects[1].technologies.contains("flask"));

        let kinds: Vec<AchievementKind> = features.achievements.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AchievementKind::Award, AchievementKind::Ranking]);
    }

    #[test]
    fn test_plain_text_without_sections() {
        let features = extract_resume("Just some notes about gardening.").unwrap();
        assert_eq!(features, ResumeFeatures::default());
    }
}
