// src/labeling/annotator.rs
//
// Highlights condition keywords in a listing description. Display only.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCategory {
    Distressed,
    Maintained,
    Updated,
}

impl KeywordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Distressed => "distressed",
            KeywordCategory::Maintained => "maintained",
            KeywordCategory::Updated => "updated",
        }
    }
}

const DISTRESSED: &[&str] = &[
    "fix", "tlc", "as-is", "investor", "repair", "rehab", "handyman", "potential",
    "sweat", "needs", "bring", "cash", "estate", "foreclos", "distress", "damage", "vacant",
    "opportunity", "rough", "gut",
];

const MAINTAINED: &[&str] = &[
    "maintain", "well-kept", "cared", "clean", "pristine", "immaculate", "move-in", "mint",
    "charming", "original", "solid",
];

const UPDATED: &[&str] = &[
    "updat", "renovat", "remodel", "upgrad", "new", "modern", "granite", "quartz",
    "stainless", "refinish", "luxury",
];

// Substrings that look distressed ("fix" in "fixtures") but are not.
const DISTRESSED_EXCLUSIONS: &[&str] = &["fixture"];

/// One whitespace-separated word of the description, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedToken {
    pub text: String,
    pub category: Option<KeywordCategory>,
}

pub fn classify_token(token: &str) -> Option<KeywordCategory> {
    let folded = token.to_lowercase();
    let hit = |list: &[&str]| list.iter().any(|k| folded.contains(k));

    if hit(DISTRESSED) && !hit(DISTRESSED_EXCLUSIONS) {
        Some(KeywordCategory::Distressed)
    } else if hit(MAINTAINED) {
        Some(KeywordCategory::Maintained)
    } else if hit(UPDATED) {
        Some(KeywordCategory::Updated)
    } else {
        None
    }
}

pub fn annotate(description: &str) -> Vec<AnnotatedToken> {
    description
        .split_whitespace()
        .map(|t| AnnotatedToken {
            text: t.to_string(),
            category: classify_token(t),
        })
        .collect()
}
