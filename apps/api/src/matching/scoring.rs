//! Match Scoring: pluggable, trait-based scorer that ranks a roster of
//! stored profiles against one user's extracted features.
//!
//! Default: `SharedFeatureScorer` (shared skills and technology-overlapping
//! projects). `AppState` holds an `Arc<dyn MatchScorer>`.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::{Project, UserProfile};

const SKILL_WEIGHT: u32 = 2;
const PROJECT_WEIGHT: u32 = 3;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedProject {
    pub name: String,
    pub technologies: BTreeSet<String>,
}

/// One ranked roster entry. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub user_id: Uuid,
    pub name: String,
    pub shared_skills: Vec<String>,
    pub shared_projects: Vec<SharedProject>,
    pub skills_count: usize,
    pub projects_count: usize,
    pub match_score: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap the ranking backend without touching handlers.
pub trait MatchScorer: Send + Sync {
    fn score(
        &self,
        my_skills: &BTreeSet<String>,
        my_projects: &[Project],
        roster: &[UserProfile],
    ) -> Vec<MatchResult>;
}

/// Score = 2 × shared skills + 3 × shared projects.
pub struct SharedFeatureScorer;

impl MatchScorer for SharedFeatureScorer {
    fn score(
        &self,
        my_skills: &BTreeSet<String>,
        my_projects: &[Project],
        roster: &[UserProfile],
    ) -> Vec<MatchResult> {
        score_matches(my_skills, my_projects, roster)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Ranks `roster` by descending match score. Zero-score entries are dropped;
/// ties keep roster order.
pub fn score_matches(
    my_skills: &BTreeSet<String>,
    my_projects: &[Project],
    roster: &[UserProfile],
) -> Vec<MatchResult> {
    let skills_lower: HashSet<String> = my_skills.iter().map(|s| s.to_lowercase()).collect();
    let my_technologies: HashSet<String> = my_projects
        .iter()
        .flat_map(|p| p.technologies.iter())
        .map(|t| t.to_lowercase())
        .collect();

    let mut matches: Vec<MatchResult> = roster
        .iter()
        .filter_map(|profile| score_profile(&skills_lower, &my_technologies, profile))
        .collect();

    // sort_by is stable, so equal scores keep roster order
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches
}

fn score_profile(
    my_skills: &HashSet<String>,
    my_technologies: &HashSet<String>,
    profile: &UserProfile,
) -> Option<MatchResult> {
    // roster skills are a set: case variants count once, first spelling kept
    let mut seen = HashSet::new();
    let shared_skills: Vec<String> = profile
        .skills
        .iter()
        .filter(|s| {
            let lower = s.to_lowercase();
            my_skills.contains(&lower) && seen.insert(lower)
        })
        .cloned()
        .collect();

    let shared_projects: Vec<SharedProject> = profile
        .projects
        .iter()
        .filter(|p| {
            p.technologies
                .iter()
                .any(|t| my_technologies.contains(&t.to_lowercase()))
        })
        .map(|p| SharedProject {
            name: p.name.clone(),
            technologies: p.technologies.clone(),
        })
        .collect();

    let match_score = SKILL_WEIGHT * shared_skills.len() as u32
        + PROJECT_WEIGHT * shared_projects.len() as u32;
    if match_score == 0 {
        return None;
    }

    Some(MatchResult {
        user_id: profile.id,
        name: profile.full_name.clone(),
        skills_count: shared_skills.len(),
        projects_count: shared_projects.len(),
        shared_skills,
        shared_projects,
        match_score,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::NewProfile;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn member(name: &str, skills: &[&str], projects: Vec<Project>) -> UserProfile {
        NewProfile {
            full_name: name.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            projects,
            ..Default::default()
        }
        .into_profile(Uuid::new_v4())
    }

    fn project(name: &str, technologies: &[&str]) -> Project {
        Project {
            name: name.to_string(),
            technologies: set(technologies),
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_score_entries_excluded() {
        let roster = vec![member("Ada", &["python"], vec![]), member("Bob", &[], vec![])];
        let matches = score_matches(&set(&["python", "react"]), &[], &roster);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Ada");
        assert_eq!(matches[0].shared_skills, vec!["python"]);
        assert_eq!(matches[0].match_score, 2);
    }

    #[test]
    fn test_case_variant_roster_skills_count_once() {
        let roster = vec![member("Ada", &["Python", "python", "PYTHON"], vec![])];
        let matches = score_matches(&set(&["python"]), &[], &roster);
        assert_eq!(matches[0].shared_skills, vec!["Python"]);
        assert_eq!(matches[0].skills_count, 1);
        assert_eq!(matches[0].match_score, 2);
    }

    #[test]
    fn test_ranked_by_weighted_score() {
        let mine = vec![project("Chat App", &["react", "mongodb"])];
        let roster = vec![
            member("Skills Only", &["python", "react"], vec![]),
            member(
                "Projects Too",
                &["react"],
                vec![
                    project("Shop", &["mongodb"]),
                    project("Blog", &["react", "css"]),
                    project("Game", &["swift"]),
                ],
            ),
        ];
        let matches = score_matches(&set(&["python", "react"]), &mine, &roster);

        assert_eq!(matches[0].name, "Projects Too");
        assert_eq!(matches[0].match_score, 2 + 3 * 2);
        assert_eq!(matches[0].projects_count, 2);
        let shared: Vec<&str> = matches[0]
            .shared_projects
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(shared, vec!["Shop", "Blog"]);

        assert_eq!(matches[1].name, "Skills Only");
        assert_eq!(matches[1].match_score, 4);
        assert_eq!(matches[1].skills_count, 2);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let roster = vec![
            member("First", &["aws"], vec![]),
            member("Second", &["docker", "aws"], vec![]),
            member("Third", &["docker"], vec![]),
        ];
        let matches = score_matches(&set(&["aws", "docker"]), &[], &roster);
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First", "Third"]);
    }

    #[test]
    fn test_skill_comparison_ignores_case() {
        let roster = vec![member("Alice", &["Python", "Machine Learning"], vec![])];
        let matches = score_matches(&set(&["python", "machine learning"]), &[], &roster);
        assert_eq!(matches[0].shared_skills, vec!["Python", "Machine Learning"]);
    }

    #[test]
    fn test_empty_roster() {
        assert!(score_matches(&set(&["python"]), &[], &[]).is_empty());
    }

    #[test]
    fn test_scorer_trait_delegates() {
        let scorer: &dyn MatchScorer = &SharedFeatureScorer;
        let roster = vec![member("Ada", &["sql"], vec![])];
        assert_eq!(scorer.score(&set(&["sql"]), &[], &roster).len(), 1);
    }
}
