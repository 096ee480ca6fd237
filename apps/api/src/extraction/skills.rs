//! Skill extraction against the keyword taxonomy.
//!
//! Matching policy: keywords made of ASCII letters, digits and spaces must
//! appear as whole words (`\bkeyword\b`, with any whitespace run standing in
//! for a space). Keywords carrying symbols (`c++`, `ui/ux`, `next.js`,
//! `scikit-learn`) are matched as plain substrings.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::extraction::taxonomy;

enum KeywordMatcher {
    WordBoundary(Regex),
    Substring,
}

struct CompiledKeyword {
    keyword: &'static str,
    matcher: KeywordMatcher,
}

impl CompiledKeyword {
    fn matches(&self, text_lower: &str) -> bool {
        match &self.matcher {
            KeywordMatcher::WordBoundary(re) => re.is_match(text_lower),
            KeywordMatcher::Substring => text_lower.contains(self.keyword),
        }
    }
}

static MATCHERS: Lazy<Vec<CompiledKeyword>> = Lazy::new(|| {
    taxonomy::keywords()
        .map(|keyword| {
            let matcher = if is_word_keyword(keyword) {
                let pattern = format!(r"\b{}\b", regex::escape(keyword).replace(' ', r"\s+"));
                KeywordMatcher::WordBoundary(
                    Regex::new(&pattern).expect("taxonomy keyword pattern is valid"),
                )
            } else {
                KeywordMatcher::Substring
            };
            CompiledKeyword { keyword, matcher }
        })
        .collect()
});

fn is_word_keyword(keyword: &str) -> bool {
    keyword
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ')
}

/// Returns the taxonomy keywords present in `text`, spelled as in the taxonomy.
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    if text.trim().is_empty() {
        return BTreeSet::new();
    }
    let text_lower = text.to_lowercase();
    let skills: BTreeSet<String> = MATCHERS
        .iter()
        .filter(|k| k.matches(&text_lower))
        .map(|k| k.keyword.to_string())
        .collect();
    debug!(
        "Matched {} skill(s) in categories {:?}",
        skills.len(),
        taxonomy::categories_of(&skills)
    );
    skills
}
