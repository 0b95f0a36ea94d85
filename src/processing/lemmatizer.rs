//! Dictionary-free noun lemmatizer
//!
//! Reduces plural nouns to their singular base form with an irregular-plural
//! table and ordered suffix rules. No part-of-speech disambiguation is done:
//! every token is treated as a noun, so verb forms like "running" pass
//! through unchanged.
//!
//! `lemmatize` is a fixed point on its own output. Table values never end in
//! a rule-triggering suffix, and rule outputs never end in a lone `s`.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Shortest token the suffix rules touch.
const MIN_RULE_LEN: usize = 4;

static IRREGULAR_PLURALS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("people", "person"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("data", "datum"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("curricula", "curriculum"),
        ("alumni", "alumnus"),
        ("analyses", "analysis"),
        ("theses", "thesis"),
        ("diagnoses", "diagnosis"),
        ("hypotheses", "hypothesis"),
        ("crises", "crisis"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("vertices", "vertex"),
        ("appendices", "appendix"),
        ("caches", "cache"),
        ("niches", "niche"),
        ("headaches", "headache"),
        ("leaves", "leaf"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("halves", "half"),
        ("shelves", "shelf"),
    ]
    .into_iter()
    .collect()
});

/// Words that end in `s` but are already singular (or have no singular).
static INVARIANT_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "series", "species", "news", "means", "physics", "mathematics", "economics", "analytics",
        "statistics", "logistics", "ethics", "graphics", "electronics", "robotics", "linguistics",
        "genetics", "politics", "athletics", "aerobics", "metrics", "kubernetes", "jenkins", "pandas",
        "sales", "chaos", "canvas", "atlas", "lens", "aws", "ios", "macos", "postgres", "redis",
        "windows", "ads", "devops", "mlops", "sas", "sms", "dns", "gps", "cms", "ecs", "eks", "gis",
    ]
    .into_iter()
    .collect()
});

/// Singular suffixes that end in `s` and must never be stripped.
const PROTECTED_ENDINGS: [&str; 3] = ["ss", "us", "is"];

/// Lemmatize one lower-cased token.
pub fn lemmatize(word: &str) -> String {
    if let Some(lemma) = IRREGULAR_PLURALS.get(word) {
        return (*lemma).to_string();
    }

    let stem = strip_plural(word);
    match IRREGULAR_PLURALS.get(stem.as_str()) {
        Some(lemma) => (*lemma).to_string(),
        None => stem,
    }
}

fn strip_plural(word: &str) -> String {
    if word.len() < MIN_RULE_LEN || !word.ends_with('s') || INVARIANT_WORDS.contains(word) {
        return word.to_string();
    }
    if PROTECTED_ENDINGS.iter().any(|ending| word.ends_with(ending)) {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{}ss", stem);
    }
    if word.len() > MIN_RULE_LEN {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{}y", stem);
        }
    }
    for suffix in ["xes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    word[..word.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        assert_eq!(lemmatize("systems"), "system");
        assert_eq!(lemmatize("skills"), "skill");
        assert_eq!(lemmatize("technologies"), "technology");
        assert_eq!(lemmatize("classes"), "class");
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("approaches"), "approach");
        assert_eq!(lemmatize("experiences"), "experience");
    }

    #[test]
    fn test_irregular_and_invariant() {
        assert_eq!(lemmatize("children"), "child");
        assert_eq!(lemmatize("data"), "datum");
        assert_eq!(lemmatize("analyses"), "analysis");
        assert_eq!(lemmatize("caches"), "cache");
        assert_eq!(lemmatize("kubernetes"), "kubernetes");
        assert_eq!(lemmatize("analytics"), "analytics");
    }

    #[test]
    fn test_singulars_untouched() {
        for word in ["business", "status", "analysis", "python", "running", "sql", "bus", "gas"] {
            assert_eq!(lemmatize(word), word);
        }
    }

    #[test]
    fn test_fixed_point() {
        for word in [
            "systems", "technologies", "processes", "datas", "matches", "ties", "lives", "women", "designers",
            "glasses", "species", "crises", "quizzes",
        ] {
            let once = lemmatize(word);
            assert_eq!(lemmatize(&once), once, "not a fixed point for {}", word);
        }
    }

    #[test]
    fn test_non_ascii_tokens() {
        assert_eq!(lemmatize("cafés"), "café");
        assert_eq!(lemmatize("naïve"), "naïve");
    }
}
