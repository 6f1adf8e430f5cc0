//! Presentation logic for analysis results
//!
//! Derives the fields the dashboard renders from the analysis service's
//! opaque JSON: a credibility percentage, a True/False/Uncertain verdict,
//! and pass-through text fields with placeholders for anything missing.

use serde::{Deserialize, Serialize};

/// Scores above this (0-1 scale) render as "True"
pub const CREDIBLE_THRESHOLD: f64 = 0.7;

/// Scores below this (0-1 scale) render as "False"
pub const SUSPICIOUS_THRESHOLD: f64 = 0.3;

/// Verdict derived from the credibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    True,
    False,
    Uncertain,
}

impl Verdict {
    /// Short hint shown next to the verdict
    pub fn hint(self) -> &'static str {
        match self {
            Verdict::True => "Credible",
            Verdict::False => "Suspicious",
            Verdict::Uncertain => "Check Details",
        }
    }
}

/// Normalize a raw credibility score to the 0-1 scale.
///
/// The analysis service reports either a 0-1 fraction or a 0-100
/// percentage; anything above 1.0 is taken to be the latter.
pub fn normalized_score(raw: f64) -> f64 {
    let score = if raw > 1.0 { raw / 100.0 } else { raw };
    score.clamp(0.0, 1.0)
}

/// Credibility percentage for display (whole percent)
pub fn credibility_percent(raw: f64) -> u32 {
    (normalized_score(raw) * 100.0).round() as u32
}

/// Verdict from a raw credibility score via fixed thresholds
pub fn verdict(raw: f64) -> Verdict {
    let score = normalized_score(raw);
    if score > CREDIBLE_THRESHOLD {
        Verdict::True
    } else if score < SUSPICIOUS_THRESHOLD {
        Verdict::False
    } else {
        Verdict::Uncertain
    }
}

/// Everything the dashboard renders for one analysis result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultView {
    pub verdict: Verdict,
    pub verdict_hint: String,
    pub credibility_percent: u32,
    pub credibility_score: f64,
    pub sentiment: String,
    pub analysis: String,
    pub num_mistakes: i64,
    pub cross_reference: String,
    pub corrected_data: String,
    /// True when this view is the fixed substitute shown because the
    /// backend was unreachable.
    pub placeholder: bool,
}

impl ResultView {
    /// Derive the view from an analysis result.
    ///
    /// Missing fields render as placeholders; a missing score counts as 0
    /// (suspicious), matching the original dashboard's defaults.
    pub fn from_analysis(result: &serde_json::Value) -> Self {
        let raw_score = result["credibility_score"].as_f64().unwrap_or(0.0);
        let verdict = verdict(raw_score);

        Self {
            verdict,
            verdict_hint: verdict.hint().to_string(),
            credibility_percent: credibility_percent(raw_score),
            credibility_score: normalized_score(raw_score),
            sentiment: text_field(result, "sentiment", "N/A"),
            analysis: text_field(result, "analysis", "No analysis available"),
            num_mistakes: result["num_mistakes"].as_i64().unwrap_or(0),
            cross_reference: text_field(result, "cross_reference", "N/A"),
            corrected_data: text_field(result, "corrected_data", "N/A"),
            placeholder: false,
        }
    }

    /// Fixed substitute shown when the backend is unreachable
    pub fn backend_unavailable() -> Self {
        Self {
            verdict: Verdict::Uncertain,
            verdict_hint: Verdict::Uncertain.hint().to_string(),
            credibility_percent: 0,
            credibility_score: 0.0,
            sentiment: "N/A".to_string(),
            analysis: "Backend not available. Please ensure the server is running.".to_string(),
            num_mistakes: 0,
            cross_reference: "N/A".to_string(),
            corrected_data: "N/A".to_string(),
            placeholder: true,
        }
    }
}

fn text_field(result: &serde_json::Value, key: &str, default: &str) -> String {
    result[key]
        .as_str()
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}
