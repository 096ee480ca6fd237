//! Project extraction from resume project sections.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::extraction::sections::{segment, SectionVocabulary};
use crate::extraction::skills::extract_skills;
use crate::models::profile::Project;

pub const PROJECT_SECTIONS: SectionVocabulary = SectionVocabulary {
    openers: &[
        "projects",
        "project",
        "portfolio",
        "work experience",
        "experience",
        "applications",
        "development",
        "technical projects",
        "personal projects",
        "academic projects",
    ],
    closers: &[
        "education",
        "skills",
        "skill summary",
        "certifications",
        "contact",
        "summary",
        "objective",
        "achievements",
        "accomplishments",
        "volunteer",
        "awards",
        "honors",
    ],
    caps_headings_close: true,
};

/// Lines opening with these verbs describe the current project.
const DESCRIPTION_LEAD_VERBS: &[&str] = &[
    "used",
    "implemented",
    "developed",
    "created",
    "built",
    "using",
    "utilized",
];

const BULLETS: &[char] = &['•', '-', '*', '▪', '◦', '·', '–', '>'];

const MIN_NAME_CHARS: usize = 4;
const MAX_NAME_CHARS: usize = 200;
const TITLE_CHARS: std::ops::RangeInclusive<usize> = 5..=80;
const MAX_TITLE_WORDS: usize = 8;
const MIN_DESCRIPTION_CHARS: usize = 11;

const MONTHS: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";
const OPEN_ENDED: &str = "present|current|now|ongoing|today|date";

static MONTH_OR_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{MONTHS}|\d{{4}})\b")).expect("month/year pattern is valid")
});

static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{MONTHS})\.?\s*\d{{4}}\b")).expect("month-year pattern is valid")
});

/// Duration patterns in priority order.
static DURATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"(?i)\b\d{{4}}\s*[-–—]\s*(?:\d{{4}}|{OPEN_ENDED})\b"),
        format!(
            r"(?i)\b(?:{MONTHS})\.?\s+\d{{4}}\s*[-–—]\s*(?:(?:{MONTHS})\.?\s+\d{{4}}|{OPEN_ENDED})\b"
        ),
        r"(?i)\b\d+\s+(?:months?|years?|weeks?)\b".to_string(),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("duration pattern is valid"))
    .collect()
});

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}[.)]\s+").expect("numbering pattern is valid"));

static TECH_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z\s,]+github").expect("tech list pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Title,
    Description,
    Skip,
}

/// Extracts projects from every project section of `text`.
pub fn extract_projects(text: &str) -> Vec<Project> {
    let mut projects = Vec::new();
    let mut current: Option<Project> = None;

    for line in segment(text, &PROJECT_SECTIONS) {
        if !line.inside() || line.starts_section {
            finalize(current.take(), &mut projects);
        }
        if !line.inside() {
            continue;
        }
        match classify_line(line.text, current.is_some()) {
            LineKind::Title => {
                finalize(current.take(), &mut projects);
                current = Some(start_project(line.text));
            }
            LineKind::Description => {
                if let Some(project) = current.as_mut() {
                    extend_project(project, line.text);
                }
            }
            LineKind::Skip => {}
        }
    }
    finalize(current, &mut projects);

    projects.retain(is_valid_project);
    debug!("Extracted {} project(s)", projects.len());
    projects
}

/// First duration token in priority order, or an empty string. A
/// lower-priority match that encloses the chosen one wins, so the month in
/// "Jan 2022 - Present" stays part of the duration.
pub fn extract_duration(text: &str) -> String {
    let mut found = DURATION_PATTERNS.iter().filter_map(|re| re.find(text));
    let Some(mut best) = found.next() else {
        return String::new();
    };
    for m in found {
        if m.start() <= best.start() && m.end() >= best.end() {
            best = m;
        }
    }
    best.as_str().to_string()
}

fn classify_line(line: &str, has_open_project: bool) -> LineKind {
    let chars = line.chars().count();
    if is_tech_list(line) {
        return if has_open_project {
            LineKind::Description
        } else {
            LineKind::Skip
        };
    }
    if looks_like_title(line) {
        return LineKind::Title;
    }
    if !has_open_project {
        // Nothing to describe yet: a short non-bullet line opens a project.
        return if TITLE_CHARS.contains(&chars) && !starts_with_bullet(line) {
            LineKind::Title
        } else {
            LineKind::Skip
        };
    }
    if chars >= MIN_DESCRIPTION_CHARS {
        LineKind::Description
    } else {
        LineKind::Skip
    }
}

fn looks_like_title(line: &str) -> bool {
    if !TITLE_CHARS.contains(&line.chars().count())
        || starts_with_bullet(line)
        || line.ends_with('.')
        || starts_with_lead_verb(line)
    {
        return false;
    }
    let starts_capitalized = line
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit());
    if !starts_capitalized {
        return false;
    }
    if MONTH_OR_YEAR.is_match(line) {
        return true;
    }
    let padded = format!(" {} ", line.to_lowercase());
    line.split_whitespace().count() <= MAX_TITLE_WORDS
        && !padded.contains(" a ")
        && !padded.contains(" the ")
}

/// "React, Node Github — repo" style attribution lines.
fn is_tech_list(line: &str) -> bool {
    let lower = line.to_lowercase();
    TECH_LIST.is_match(line) || lower.contains("github —") || lower.contains("github -")
}

fn starts_with_bullet(line: &str) -> bool {
    line.starts_with(BULLETS)
}

fn starts_with_lead_verb(line: &str) -> bool {
    let first = line
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    DESCRIPTION_LEAD_VERBS.contains(&first.as_str())
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(BULLETS).trim_start()
}

fn start_project(line: &str) -> Project {
    let duration = extract_duration(line);
    let date = if duration.is_empty() {
        MONTH_YEAR
            .find(line)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    } else {
        duration.clone()
    };

    let mut name = line.to_string();
    if !duration.is_empty() {
        name = name.replacen(&duration, " ", 1);
    }
    name = MONTH_YEAR.replace_all(&name, " ").into_owned();
    name = LEADING_NUMBER.replace(name.trim(), "").into_owned();
    let name = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| matches!(c, '|' | '-' | '–' | '—' | ',' | ':' | '(' | ')' | '[' | ']') || c.is_whitespace())
        .to_string();

    Project {
        name,
        duration: date,
        ..Default::default()
    }
}

fn extend_project(project: &mut Project, line: &str) {
    project.technologies.extend(extract_skills(line));
    if is_tech_list(line) {
        return;
    }
    let text = strip_bullet(line);
    if text.is_empty() {
        return;
    }
    if !project.description.is_empty() {
        project.description.push(' ');
    }
    project.description.push_str(text);
}

fn finalize(project: Option<Project>, out: &mut Vec<Project>) {
    if let Some(project) = project {
        if project.name.chars().count() >= MIN_NAME_CHARS {
            out.push(project);
        }
    }
}

fn is_valid_project(project: &Project) -> bool {
    let chars = project.name.chars().count();
    let lower = project.name.to_lowercase();
    (MIN_NAME_CHARS..MAX_NAME_CHARS).contains(&chars)
        && !lower.contains("achieved")
        && !lower.contains("awarded")
}
