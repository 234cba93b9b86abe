//! Keyword extraction — turns a raw job description into a weighted keyword
//! inventory without calling any external service.
//!
//! Lines are assigned to zones by the headings above them. A keyword's
//! position weight is the highest zone weight it appears in, and its score is
//! `frequency × position_weight`. Ties break alphabetically so the inventory is
//! identical across runs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single keyword from the JD, weighted by position and frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordEntry {
    pub keyword: String,
    pub frequency: u32,
    /// title=1.0, requirements=0.8, responsibilities=0.6, other=0.5, about=0.3
    pub position_weight: f32,
    /// frequency * position_weight
    pub weighted_score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Title,
    Requirements,
    Responsibilities,
    Other,
    About,
}

impl Zone {
    fn weight(&self) -> f32 {
        match self {
            Zone::Title => 1.0,
            Zone::Requirements => 0.8,
            Zone::Responsibilities => 0.6,
            Zone::Other => 0.5,
            Zone::About => 0.3,
        }
    }
}

const REQUIREMENT_HEADINGS: &[&str] = &[
    "requirements",
    "required",
    "qualifications",
    "minimum qualifications",
    "preferred",
    "nice to have",
    "must have",
    "skills",
    "what you bring",
    "what you'll need",
];

const RESPONSIBILITY_HEADINGS: &[&str] = &[
    "responsibilities",
    "duties",
    "the role",
    "your role",
    "what you'll do",
    "what you will do",
    "in this role",
];

const ABOUT_HEADINGS: &[&str] = &[
    "about",
    "benefits",
    "perks",
    "compensation",
    "why join",
    "who we are",
    "equal opportunity",
];

const STOPWORDS: &[&str] = &[
    "a", "about", "across", "all", "also", "an", "and", "any", "are", "as", "at", "be",
    "been", "being", "both", "but", "by", "can", "candidate", "candidates", "do", "does",
    "each", "etc", "every", "experience", "for", "from", "has", "have", "help", "high",
    "if", "in", "including", "into", "is", "it", "its", "join", "just", "knowledge", "least",
    "like", "looking", "make", "more", "most", "must", "new", "not", "of", "on", "one", "or",
    "other", "our", "out", "over", "own", "part", "plus", "preferred", "required",
    "requirements", "responsibilities", "role", "should", "so", "some", "strong", "such",
    "team", "teams", "than", "that", "the", "their", "them", "there", "these", "they",
    "this", "those", "through", "to", "understanding", "up", "us", "use", "using", "very",
    "want", "we", "well", "what", "when", "where", "which", "while", "who", "will", "with",
    "within", "work", "working", "would", "year", "years", "you", "your", "you'll",
    "we're", "ability",
];

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Splits text into lowercase keyword tokens. Keeps technology spellings such
/// as `c++`, `c#`, `node.js` and `ci/cd` intact.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| c.is_whitespace() || ",;:()[]{}!?\"|".contains(c))
        .map(|raw| {
            raw.trim_matches(|c: char| matches!(c, '.' | '-' | '/' | '\'' | '*' | '•'))
                .to_lowercase()
        })
        .filter(|t| !t.is_empty() && t.chars().any(|c| c.is_alphabetic()))
}

/// Detects a heading at the start of `line`. Returns the zone and whatever
/// content follows the heading on the same line.
///
/// `Requirements: Rust, Go` is a heading with inline content. Without a
/// colon only a short line (four words or fewer) counts.
fn detect_heading(line: &str) -> Option<(Zone, &str)> {
    let stripped = line.trim_start_matches(|c: char| c == '#' || c == '*' || c.is_whitespace());
    let (head, rest) = stripped.split_once(':').unwrap_or((stripped, ""));
    let head = head.trim().trim_end_matches('*').to_lowercase();
    if head.is_empty() || head.split_whitespace().count() > 4 {
        return None;
    }

    let matches = |list: &[&str]| list.iter().any(|h| head.starts_with(h));
    let zone = if matches(REQUIREMENT_HEADINGS) {
        Zone::Requirements
    } else if matches(RESPONSIBILITY_HEADINGS) {
        Zone::Responsibilities
    } else if matches(ABOUT_HEADINGS) {
        Zone::About
    } else {
        return None;
    };
    Some((zone, rest))
}

/// Extracts at most `max` keywords from `jd_text`, highest score first.
pub fn extract_keywords(jd_text: &str, max: usize) -> Vec<KeywordEntry> {
    let mut tally: HashMap<String, (u32, f32)> = HashMap::new();
    let mut record = |text: &str, zone: Zone| {
        for token in tokenize(text) {
            if is_stopword(&token) {
                continue;
            }
            let slot = tally.entry(token).or_insert((0, 0.0));
            slot.0 += 1;
            slot.1 = slot.1.max(zone.weight());
        }
    };

    let mut lines = jd_text.lines().map(str::trim).filter(|l| !l.is_empty());
    if let Some(title) = lines.next() {
        record(title, Zone::Title);
    }

    let mut zone = Zone::Other;
    for line in lines {
        match detect_heading(line) {
            Some((next, rest)) => {
                zone = next;
                record(rest, zone);
            }
            None => record(line, zone),
        }
    }

    let mut entries: Vec<KeywordEntry> = tally
        .into_iter()
        .map(|(keyword, (frequency, position_weight))| KeywordEntry {
            keyword,
            frequency,
            position_weight,
            weighted_score: frequency as f32 * position_weight,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.weighted_score
            .total_cmp(&a.weighted_score)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    entries.truncate(max);
    entries
}
