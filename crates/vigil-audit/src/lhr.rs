//! Lighthouse result (LHR) parsing.
//!
//! Only the fields the reports need are modelled; serde ignores the rest of
//! the (large) document.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use vigil_config::KNOWN_CATEGORIES;
use vigil_core::{AuditResult, CategoryScore, Diagnostic, FormFactor, Metric};

/// Audits scoring at or above this are not worth listing as diagnostics.
const DIAGNOSTIC_THRESHOLD: f64 = 0.9;

/// Score modes that represent a pass/fail judgement (as opposed to
/// informative or not-applicable audits).
const SCORED_MODES: [&str; 3] = ["binary", "numeric", "metricSavings"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lhr {
    pub lighthouse_version: String,
    pub requested_url: Option<String>,
    pub final_displayed_url: Option<String>,
    pub final_url: Option<String>,
    pub fetch_time: DateTime<Utc>,
    pub runtime_error: Option<RuntimeError>,
    #[serde(default)]
    pub config_settings: ConfigSettings,
    #[serde(default)]
    pub categories: BTreeMap<String, LhrCategory>,
    #[serde(default)]
    pub audits: BTreeMap<String, LhrAudit>,
}

#[derive(Debug, Deserialize)]
pub struct RuntimeError {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSettings {
    pub form_factor: Option<FormFactor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LhrCategory {
    pub id: String,
    pub title: String,
    pub score: Option<f64>,
    #[serde(default)]
    pub audit_refs: Vec<AuditRef>,
}

#[derive(Debug, Deserialize)]
pub struct AuditRef {
    pub id: String,
    pub group: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LhrAudit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub score: Option<f64>,
    pub score_display_mode: Option<String>,
    pub numeric_value: Option<f64>,
    pub numeric_unit: Option<String>,
    pub display_value: Option<String>,
}

impl Lhr {
    /// Parse raw tool output.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the output is not a Lighthouse result.
    pub fn parse(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }

    /// Convert into the crate-neutral result, falling back to `requested_url`
    /// and `form_factor` where the document omits them.
    #[must_use]
    pub fn into_result(self, requested_url: &str, form_factor: FormFactor) -> AuditResult {
        let requested = self
            .requested_url
            .clone()
            .unwrap_or_else(|| requested_url.to_string());
        let final_url = self
            .final_displayed_url
            .clone()
            .or_else(|| self.final_url.clone())
            .unwrap_or_else(|| requested.clone());

        let metric_ids = self.metric_ids();
        let metrics = metric_ids
            .iter()
            .filter_map(|id| self.audits.get(id))
            .map(|audit| Metric {
                id: audit.id.clone(),
                title: audit.title.clone(),
                numeric_value: audit.numeric_value,
                numeric_unit: audit.numeric_unit.clone(),
                display_value: audit.display_value.clone(),
                score: audit.score,
            })
            .collect();

        let mut diagnostics: Vec<Diagnostic> = self
            .audits
            .values()
            .filter(|audit| !metric_ids.contains(&audit.id))
            .filter(|audit| {
                audit
                    .score_display_mode
                    .as_deref()
                    .is_some_and(|mode| SCORED_MODES.contains(&mode))
            })
            .filter(|audit| audit.score.is_some_and(|s| s < DIAGNOSTIC_THRESHOLD))
            .map(|audit| Diagnostic {
                id: audit.id.clone(),
                title: audit.title.clone(),
                description: audit.description.clone(),
                display_value: audit.display_value.clone(),
                score: audit.score,
            })
            .collect();
        diagnostics.sort_by(|a, b| {
            a.score
                .unwrap_or_default()
                .total_cmp(&b.score.unwrap_or_default())
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut categories: Vec<CategoryScore> = self
            .categories
            .into_values()
            .map(|category| CategoryScore {
                id: category.id,
                title: category.title,
                score: category.score,
            })
            .collect();
        categories.sort_by_key(|category| category_rank(&category.id));

        AuditResult {
            requested_url: requested,
            final_url,
            fetch_time: self.fetch_time,
            tool_version: self.lighthouse_version,
            form_factor: self.config_settings.form_factor.unwrap_or(form_factor),
            categories,
            metrics,
            diagnostics,
        }
    }

    /// Audit ids the performance category groups under `metrics`, in its order.
    fn metric_ids(&self) -> Vec<String> {
        self.categories
            .get("performance")
            .map(|category| {
                category
                    .audit_refs
                    .iter()
                    .filter(|r| r.group.as_deref() == Some("metrics"))
                    .map(|r| r.id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Known categories first in their conventional order, then the rest by id.
fn category_rank(id: &str) -> (usize, String) {
    let rank = KNOWN_CATEGORIES
        .iter()
        .position(|known| *known == id)
        .unwrap_or(KNOWN_CATEGORIES.len());
    (rank, id.to_string())
}
