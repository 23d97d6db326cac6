//! Structured audit results.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FormFactor;

/// The outcome of auditing one page.
///
/// Tied to exactly one [`BuildArtifact`](crate::BuildArtifact) and consumed once
/// by the report writer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AuditResult {
    pub requested_url: String,
    pub final_url: String,
    pub fetch_time: DateTime<Utc>,
    /// Version string reported by the audit tool.
    pub tool_version: String,
    pub form_factor: FormFactor,
    pub categories: Vec<CategoryScore>,
    pub metrics: Vec<Metric>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AuditResult {
    /// Score of the category with the given id, if it was audited and scored.
    #[must_use]
    pub fn category_score(&self, id: &str) -> Option<f64> {
        self.categories
            .iter()
            .find(|category| category.id == id)
            .and_then(|category| category.score)
    }
}

/// Everything one audit produced.
///
/// `native_html` is the audit tool's own full HTML report for the page, when
/// the tool wrote one. It is not part of the serialized result.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditOutput {
    pub result: AuditResult,
    pub native_html: Option<String>,
}

impl AuditOutput {
    #[must_use]
    pub const fn new(result: AuditResult) -> Self {
        Self {
            result,
            native_html: None,
        }
    }

    #[must_use]
    pub fn with_native_html(mut self, html: impl Into<String>) -> Self {
        self.native_html = Some(html.into());
        self
    }
}

/// Score for one audited category (performance, accessibility, ...).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CategoryScore {
    pub id: String,
    pub title: String,
    /// `0.0..=1.0`, or `None` when the category could not be scored.
    pub score: Option<f64>,
}

impl CategoryScore {
    /// Score scaled to `0..=100`.
    #[must_use]
    pub fn percent(&self) -> Option<u32> {
        self.score.map(to_percent)
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::of(self.score)
    }
}

/// A lab metric such as first contentful paint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Metric {
    pub id: String,
    pub title: String,
    pub numeric_value: Option<f64>,
    pub numeric_unit: Option<String>,
    pub display_value: Option<String>,
    pub score: Option<f64>,
}

/// A failing or improvable check surfaced by the audit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Diagnostic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub display_value: Option<String>,
    pub score: Option<f64>,
}

/// Coarse rating of a score, used for report colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Pass,
    Average,
    Fail,
    Unscored,
}

impl ScoreBand {
    #[must_use]
    pub fn of(score: Option<f64>) -> Self {
        match score {
            None => Self::Unscored,
            Some(s) if s >= 0.9 => Self::Pass,
            Some(s) if s >= 0.5 => Self::Average,
            Some(_) => Self::Fail,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Average => "average",
            Self::Fail => "fail",
            Self::Unscored => "unscored",
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percent(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}
