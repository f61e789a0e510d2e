//! Symptom Normalizer: maps clinical terms produced by the report diagnoser
//! onto the symptom identifiers used in the reference dataset.

use std::collections::BTreeSet;

/// Canonical clinical term -> dataset symptom identifiers.
const SYMPTOM_SYNONYMS: &[(&str, &[&str])] = &[
    ("fever", &["high_fever"]),
    ("fatigue", &["lethargy"]),
    ("weakness", &["weakness_in_limbs"]),
    ("pallor", &["pallor"]),
    ("frequent_urination", &["frequent_urination"]),
    ("excessive_thirst", &["excessive_thirst"]),
];

/// Expand one raw symptom. Terms absent from the synonym table pass through.
pub fn normalize(raw: &str) -> Vec<String> {
    match SYMPTOM_SYNONYMS.iter().find(|(term, _)| *term == raw) {
        Some((_, canonical)) => canonical.iter().map(|s| s.to_string()).collect(),
        None => vec![raw.to_string()],
    }
}

/// Expand many raw symptoms, flattened and de-duplicated.
pub fn normalize_all<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .flat_map(|s| normalize(s.as_ref()))
        .collect()
}
