use serde::Serialize;
use uuid::Uuid;

use crate::models::profile::{Achievement, Project, UserProfile};

/// Sentinel sent by the search form meaning "no availability filter".
pub const ANY_AVAILABILITY: &str = "Any Availability";

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Skill is a case-insensitive substring of any profile skill; availability
/// is a case-insensitive exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeammateFilter {
    pub skill: Option<String>,
    pub availability: Option<String>,
}

impl TeammateFilter {
    pub fn new(skill: Option<&str>, availability: Option<&str>) -> Self {
        let clean = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        TeammateFilter {
            skill: clean(skill),
            availability: clean(availability).filter(|a| a != ANY_AVAILABILITY),
        }
    }

    pub fn matches(&self, profile: &UserProfile) -> bool {
        let skill_ok = self.skill.as_deref().map_or(true, |wanted| {
            let wanted = wanted.to_lowercase();
            profile
                .skills
                .iter()
                .any(|s| s.to_lowercase().contains(&wanted))
        });
        let availability_ok = self
            .availability
            .as_deref()
            .map_or(true, |a| profile.availability.eq_ignore_ascii_case(a));
        skill_ok && availability_ok
    }

    /// `ILIKE` pattern for the skill filter, with LIKE metacharacters escaped.
    pub fn skill_pattern(&self) -> Option<String> {
        self.skill.as_deref().map(|skill| {
            let escaped = skill
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{escaped}%")
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    /// Page numbers start at 1; the limit is clamped to `1..=MAX_PAGE_LIMIT`.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Page {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u64,
}

impl Pagination {
    pub fn new(total: u64, page: Page) -> Self {
        Pagination {
            total,
            page: page.page,
            limit: page.limit,
            pages: total.div_ceil(u64::from(page.limit)),
        }
    }
}

/// Public view of a profile in search results (no email).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeammateCard {
    pub id: Uuid,
    pub name: String,
    pub skills: Vec<String>,
    pub availability: String,
    pub bio: String,
    pub github_links: Vec<String>,
    pub projects: Vec<Project>,
    pub achievements: Vec<Achievement>,
}

impl From<UserProfile> for TeammateCard {
    fn from(p: UserProfile) -> Self {
        TeammateCard {
            id: p.id,
            name: p.full_name,
            skills: p.skills,
            availability: p.availability,
            bio: p.bio,
            github_links: p.github_links,
            projects: p.projects,
            achievements: p.achievements,
        }
    }
}
