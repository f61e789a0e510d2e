use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Marker, MarkerReading};

/// A compiled marker pattern with its trigger rule and implied symptoms.
struct MarkerRule {
    marker: Marker,
    regex: Regex,
    /// Capture group holding the numeric value.
    group: usize,
    triggers: fn(f64) -> bool,
    symptoms: &'static [&'static str],
}

static MARKER_RULES: LazyLock<Vec<MarkerRule>> = LazyLock::new(|| {
    vec![
        rule(
            Marker::Hemoglobin,
            r"hemoglobin[:\s]*([0-9.]+)",
            1,
            |v| v < 13.0,
            &["fatigue", "weakness", "pallor"],
        ),
        rule(
            Marker::WhiteCellCount,
            r"wbc[:\s]*([0-9.]+)",
            1,
            |v| v > 11000.0,
            &["fever"],
        ),
        rule(
            Marker::Glucose,
            r"(glucose|blood sugar)[:\s]*([0-9.]+)",
            2,
            |v| v > 140.0,
            &["frequent_urination", "excessive_thirst"],
        ),
    ]
});

fn rule(
    marker: Marker,
    pattern: &str,
    group: usize,
    triggers: fn(f64) -> bool,
    symptoms: &'static [&'static str],
) -> MarkerRule {
    MarkerRule {
        marker,
        regex: Regex::new(pattern).expect("invalid marker regex"),
        group,
        triggers,
        symptoms,
    }
}

/// Read every marker present in already lower-cased text. Only the first
/// match of each marker counts; a capture that is not a number (e.g. "1.2.3")
/// means the marker is absent.
pub fn read_markers(lowered: &str) -> Vec<MarkerReading> {
    MARKER_RULES
        .iter()
        .filter_map(|rule| {
            let captured = rule.regex.captures(lowered)?.get(rule.group)?.as_str();
            let value: f64 = captured.parse().ok()?;
            Some(MarkerReading {
                marker: rule.marker,
                value,
                triggered: (rule.triggers)(value),
            })
        })
        .collect()
}

/// Raw symptoms implied by a marker reading. Empty unless it triggered.
pub fn implied_symptoms(reading: &MarkerReading) -> &'static [&'static str] {
    if !reading.triggered {
        return &[];
    }
    MARKER_RULES
        .iter()
        .find(|rule| rule.marker == reading.marker)
        .map(|rule| rule.symptoms)
        .unwrap_or_default()
}
