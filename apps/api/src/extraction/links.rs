//! GitHub link extraction and normalization.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

const GITHUB_BASE: &str = "https://github.com/";

/// Patterns are applied independently over the raw text; all matches are
/// ordered by position before deduplication.
static LINK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // https://github.com/owner/repo, www.github.com/owner, github.com/owner/repo,
        // including forms wrapped in () or []
        r"(?i)(?:https?://)?(?:www\.)?github\.com/[\w.\-]+(?:/[\w.\-]+)?",
        // git@github.com:owner/repo.git
        r"(?i)\bgit@(?:www\.)?github\.com:[\w.\-]+/[\w.\-]+",
        // GitHub: owner/repo, GitHub: https://github.com/owner
        r"(?i)\bgithub:\s*(?:https?://)?(?:www\.)?(?:github\.com/)?[\w.\-]+(?:/[\w.\-]+)?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("link pattern is valid"))
    .collect()
});

static LABEL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^github:\s*").expect("label pattern is valid"));

static HOST_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.)?github\.com/").expect("host pattern is valid")
});

static SSH_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^git@(?:www\.)?github\.com:").expect("ssh pattern is valid")
});

/// Extracts GitHub profile/repository links as `https://github.com/owner[/repo]`,
/// deduplicated and in order of first appearance.
pub fn extract_github_links(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = LINK_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text))
        .filter_map(|m| normalize_github_link(m.as_str()).map(|link| (m.start(), link)))
        .collect();
    found.sort_by_key(|(start, _)| *start);

    let mut seen = HashSet::new();
    let links: Vec<String> = found
        .into_iter()
        .filter_map(|(_, link)| seen.insert(link.clone()).then_some(link))
        .collect();

    tracing::debug!("Extracted {} GitHub link(s)", links.len());
    links
}

/// Normalizes one raw match. Returns `None` when no owner path remains.
pub fn normalize_github_link(raw: &str) -> Option<String> {
    let unlabeled = LABEL_PREFIX.replace(raw.trim(), "");
    let cleaned: String = unlabeled
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '[' | ']' | '<' | '>'))
        .collect();

    let path = if SSH_PREFIX.is_match(&cleaned) {
        SSH_PREFIX.replace(&cleaned, "").into_owned()
    } else {
        HOST_PREFIX.replace(&cleaned, "").into_owned()
    };

    let mut path = path.trim().trim_end_matches(['.', ',', ';', ':']);
    path = path.strip_suffix('/').unwrap_or(path);
    if path.to_ascii_lowercase().ends_with(".git") {
        path = &path[..path.len() - 4];
    }
    let path = path.trim_end_matches('.');

    if path.is_empty() || path.starts_with('/') {
        return None;
    }
    Some(format!("{GITHUB_BASE}{path}"))
}

/// Repository name of a normalized `owner/repo` link; `None` for profile links.
pub fn repository_name(link: &str) -> Option<&str> {
    let path = link.strip_prefix(GITHUB_BASE)?.trim_end_matches('/');
    match path.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Some(repo)
        }
        _ => None,
    }
}
