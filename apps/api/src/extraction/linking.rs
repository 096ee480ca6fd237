//! Best-effort pairing of extracted GitHub links with extracted projects.

use std::collections::HashSet;

use crate::extraction::links::repository_name;
use crate::models::profile::Project;

/// Assigns each project the first unclaimed link that matches it. Projects
/// are visited in emission order, so the earlier project wins a contested link.
pub fn attach_links(projects: &mut [Project], links: &[String]) {
    let mut claimed: HashSet<&str> = HashSet::new();

    for project in projects.iter_mut() {
        let found = links
            .iter()
            .find(|link| !claimed.contains(link.as_str()) && link_matches(project, link));
        if let Some(link) = found {
            claimed.insert(link.as_str());
            project.github_url = Some(link.clone());
        }
    }
}

fn link_matches(project: &Project, link: &str) -> bool {
    // profile links (no repository) only match through the description
    if let Some(repo) = repository_name(link) {
        let repo = squash(repo);
        let name = squash(&project.name);
        if !repo.is_empty() && !name.is_empty() && (name.contains(&repo) || repo.contains(&name)) {
            return true;
        }
    }

    let description = project.description.to_lowercase();
    let link = link.to_lowercase();
    !description.is_empty() && (description.contains(&link) || link.contains(&description))
}

/// Lowercase with spaces, hyphens and underscores removed.
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
