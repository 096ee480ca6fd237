//! Achievement extraction: lines inside achievement sections, plus lines
//! anywhere that carry an achievement indicator word.

use std::collections::HashSet;

use tracing::debug;

use crate::extraction::sections::{segment, SectionVocabulary};
use crate::models::profile::{Achievement, AchievementKind};

pub const ACHIEVEMENT_SECTIONS: SectionVocabulary = SectionVocabulary {
    openers: &[
        "achievements",
        "accomplishments",
        "awards",
        "honors",
        "recognition",
        "certifications",
        "certificates",
        "notable achievements",
        "accolades",
    ],
    closers: &[
        "education",
        "skills",
        "skill summary",
        "contact",
        "summary",
        "objective",
        "projects",
        "experience",
        "work experience",
        "volunteer",
    ],
    caps_headings_close: true,
};

const INDICATORS: &[&str] = &[
    "awarded",
    "recognized",
    "achieved",
    "accomplished",
    "received",
    "earned",
    "won",
    "ranked",
    "scored",
    "selected",
    "nominated",
    "certified",
    "placed",
];

/// Evaluated in order; the first rule with a matching cue wins.
const KIND_RULES: &[(AchievementKind, &[&str])] = &[
    (AchievementKind::Award, &["award", "prize"]),
    (
        AchievementKind::Certification,
        &["certification", "certified", "certificate"],
    ),
    (AchievementKind::Recognition, &["recognition", "recognized"]),
    (AchievementKind::Scholarship, &["scholarship", "grant"]),
    (AchievementKind::Ranking, &["rank", "position", "place"]),
];

/// Title fragments that mark project-section leakage.
const LEAKAGE: &[&str] = &["project", "developed", "built"];

const SECTION_LINE_CHARS: std::ops::RangeInclusive<usize> = 10..=200;
const LOOSE_LINE_CHARS: std::ops::RangeInclusive<usize> = 15..=200;
const MIN_TITLE_CHARS: usize = 10;

pub fn extract_achievements(text: &str) -> Vec<Achievement> {
    let mut seen = HashSet::new();
    let achievements: Vec<Achievement> = segment(text, &ACHIEVEMENT_SECTIONS)
        .into_iter()
        .filter(|line| is_candidate(line.text, line.inside()))
        .map(|line| Achievement {
            title: strip_bullet(line.text).to_string(),
            kind: classify_achievement(line.text),
        })
        .filter(is_valid_achievement)
        .filter(|a| seen.insert(a.title.clone()))
        .collect();

    debug!("Extracted {} achievement(s)", achievements.len());
    achievements
}

/// Case-insensitive first-match classification, defaulting to `Achievement`.
pub fn classify_achievement(text: &str) -> AchievementKind {
    let lower = text.to_lowercase();
    KIND_RULES
        .iter()
        .find(|(_, cues)| cues.iter().any(|cue| lower.contains(cue)))
        .map(|(kind, _)| *kind)
        .unwrap_or_default()
}

fn is_candidate(line: &str, inside_section: bool) -> bool {
    let chars = line.chars().count();
    if inside_section {
        return SECTION_LINE_CHARS.contains(&chars);
    }
    let lower = line.to_lowercase();
    LOOSE_LINE_CHARS.contains(&chars) && INDICATORS.iter().any(|w| lower.contains(w))
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(['•', '-', '*', '▪', '◦', '·'])
        .trim()
}

fn is_valid_achievement(achievement: &Achievement) -> bool {
    let lower = achievement.title.to_lowercase();
    achievement.title.chars().count() >= MIN_TITLE_CHARS
        && !LEAKAGE.iter().any(|w| lower.contains(w))
}
