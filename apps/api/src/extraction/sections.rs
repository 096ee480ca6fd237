//! Resume section segmentation.
//!
//! A two-state machine per vocabulary: `Outside` → `Inside` on an opener
//! heading, `Inside` → `Outside` on a closer heading (or, when enabled, on
//! an all-caps heading that is not an opener). `transition` is pure so the
//! heading rules can be tested without any extraction logic.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Outside,
    Inside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    Entered,
    Exited,
    Content,
}

/// Heading vocabulary for one kind of section.
#[derive(Debug, Clone, Copy)]
pub struct SectionVocabulary {
    pub openers: &'static [&'static str],
    pub closers: &'static [&'static str],
    pub caps_headings_close: bool,
}

/// A content line, trimmed, with the section state it was read in.
/// `starts_section` marks the first content line after an opener heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLine<'a> {
    pub text: &'a str,
    pub state: SectionState,
    pub starts_section: bool,
}

impl SectionLine<'_> {
    pub fn inside(&self) -> bool {
        self.state == SectionState::Inside
    }
}

/// True when `line_lower` is `word`, its plural, or starts with `word:`.
pub fn is_heading(line_lower: &str, word: &str) -> bool {
    if line_lower == word {
        return true;
    }
    match line_lower.strip_prefix(word) {
        Some("s") => true,
        Some(rest) => rest.starts_with(':'),
        None => false,
    }
}

/// Short all-caps line such as "WORK HISTORY".
pub fn is_caps_heading(line: &str) -> bool {
    let letters = line.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 4
        && line.split_whitespace().count() <= 3
        && !line.chars().any(|c| c.is_ascii_digit())
        && line
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase())
}

/// Pure transition over one trimmed, non-trivial line.
pub fn transition(
    state: SectionState,
    line: &str,
    vocabulary: &SectionVocabulary,
) -> (SectionState, LineEvent) {
    let lower = line.to_lowercase();
    if vocabulary.openers.iter().any(|w| is_heading(&lower, w)) {
        return (SectionState::Inside, LineEvent::Entered);
    }
    if vocabulary.closers.iter().any(|w| is_heading(&lower, w)) {
        return (SectionState::Outside, LineEvent::Exited);
    }
    if vocabulary.caps_headings_close && is_caps_heading(line) {
        return (SectionState::Outside, LineEvent::Exited);
    }
    (state, LineEvent::Content)
}

/// Lines that are empty or at most two characters long carry no content.
pub fn is_trivial(line: &str) -> bool {
    line.chars().count() <= 2
}

/// Runs the state machine over `text` and returns its content lines.
///
/// An opener written as `Heading: rest` also yields `rest` as the first
/// line inside the section.
pub fn segment<'a>(text: &'a str, vocabulary: &SectionVocabulary) -> Vec<SectionLine<'a>> {
    let mut state = SectionState::Outside;
    let mut fresh_section = false;
    let mut lines = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if is_trivial(line) {
            continue;
        }
        let (next, event) = transition(state, line, vocabulary);
        state = next;
        let text = match event {
            LineEvent::Content => line,
            LineEvent::Entered => {
                fresh_section = true;
                match line.split_once(':') {
                    Some((_, rest)) if !is_trivial(rest.trim()) => rest.trim(),
                    _ => continue,
                }
            }
            LineEvent::Exited => {
                fresh_section = false;
                continue;
            }
        };
        lines.push(SectionLine {
            text,
            state,
            starts_section: fresh_section,
        });
        fresh_section = false;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOCAB: SectionVocabulary = SectionVocabulary {
        openers: &["project", "projects", "portfolio"],
        closers: &["education", "skills"],
        caps_headings_close: true,
    };

    #[test]
    fn test_heading_forms() {
        assert!(is_heading("projects", "projects"));
        assert!(is_heading("projects", "project"));
        assert!(is_heading("skills: rust, go", "skills"));
        assert!(!is_heading("skillset overview", "skills"));
        assert!(!is_heading("projection of sales", "project"));
    }

    #[test]
    fn test_transition_enters_and_exits() {
        let (s, e) = transition(SectionState::Outside, "PROJECTS", &VOCAB);
        assert_eq!((s, e), (SectionState::Inside, LineEvent::Entered));

        let (s, e) = transition(SectionState::Inside, "Education", &VOCAB);
        assert_eq!((s, e), (SectionState::Outside, LineEvent::Exited));

        let (s, e) = transition(SectionState::Inside, "Chat App", &VOCAB);
        assert_eq!((s, e), (SectionState::Inside, LineEvent::Content));
    }

    #[test]
    fn test_caps_heading_closes_when_enabled() {
        let (s, _) = transition(SectionState::Inside, "WORK HISTORY", &VOCAB);
        assert_eq!(s, SectionState::Outside);

        let strict = SectionVocabulary {
            caps_headings_close: false,
            ..VOCAB
        };
        let (s, _) = transition(SectionState::Inside, "WORK HISTORY", &strict);
        assert_eq!(s, SectionState::Inside);
    }

    #[test]
    fn test_caps_heading_shape() {
        assert!(is_caps_heading("WORK HISTORY"));
        assert!(!is_caps_heading("AWS"));
        assert!(!is_caps_heading("HACKATHON 2023"));
        assert!(!is_caps_heading("Work History"));
        assert!(!is_caps_heading("A VERY LONG ALL CAPS LINE"));
    }

    #[test]
    fn test_segment_tracks_state_and_skips_headings() {
        let text = "Jane Doe\n\nProjects\nChat App\n- realtime chat\nok\nSkills\nRust";
        let lines = segment(text, &VOCAB);
        let view: Vec<(&str, bool)> = lines.iter().map(|l| (l.text, l.inside())).collect();
        assert_eq!(
            view,
            vec![
                ("Jane Doe", false),
                ("Chat App", true),
                ("- realtime chat", true),
                ("Rust", false),
            ]
        );
    }

    #[test]
    fn test_segment_keeps_inline_heading_remainder() {
        let lines = segment("Projects: Weather Dashboard\nBuilt with React", &VOCAB);
        assert_eq!(lines[0].text, "Weather Dashboard");
        assert!(lines[0].inside());
        assert!(lines[0].starts_section);
        assert!(!lines[1].starts_section);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_reentering_marks_new_section() {
        let lines = segment("Projects\nChat App\nPortfolio\nGame Engine", &VOCAB);
        let starts: Vec<bool> = lines.iter().map(|l| l.starts_section).collect();
        assert_eq!(starts, vec![true, true]);
    }
}
