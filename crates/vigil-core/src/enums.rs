//! Audit option enums and the pipeline state machine.
//!
//! Option enums serialize the way the audit tool spells them on its command
//! line (`mobile`, `simulate`, `html`), so config files and flags line up.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FormFactor
// ---------------------------------------------------------------------------

/// Device class the audit emulates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormFactor {
    #[default]
    Mobile,
    Desktop,
}

impl FormFactor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }

    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ThrottlingMethod
// ---------------------------------------------------------------------------

/// How network and CPU throttling is applied during the audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ThrottlingMethod {
    /// Simulated throttling computed from an unthrottled trace.
    #[default]
    Simulate,
    /// Throttling applied through the browser's devtools protocol.
    Devtools,
    /// No throttling; the environment is assumed to be throttled already.
    Provided,
}

impl ThrottlingMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simulate => "simulate",
            Self::Devtools => "devtools",
            Self::Provided => "provided",
        }
    }
}

impl fmt::Display for ThrottlingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReportFormat
// ---------------------------------------------------------------------------

/// Rendering used for persisted reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// The audit tool's own full HTML report.
    #[default]
    Html,
    /// Vigil's compact HTML page: scores, metrics, failing checks.
    Summary,
    /// The structured result as JSON.
    Json,
}

impl ReportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Summary => "summary",
            Self::Json => "json",
        }
    }

    /// File extension for reports in this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html | Self::Summary => "html",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// State of one audit run.
///
/// ```text
/// resetting → serving → discovering → auditing(0) → … → auditing(n-1) → opening → done
///                                   → opening (no pages)
/// any non-terminal state → failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Resetting,
    Serving,
    Discovering,
    /// Auditing the artifact at this zero-based index in discovery order.
    Auditing(usize),
    Opening,
    Done,
    Failed,
}

impl PipelineState {
    /// States reachable from this one.
    #[must_use]
    pub fn allowed_next_states(self) -> Vec<Self> {
        match self {
            Self::Resetting => vec![Self::Serving, Self::Failed],
            Self::Serving => vec![Self::Discovering, Self::Failed],
            Self::Discovering => vec![Self::Auditing(0), Self::Opening, Self::Failed],
            Self::Auditing(index) => vec![Self::Auditing(index + 1), Self::Opening, Self::Failed],
            Self::Opening => vec![Self::Done, Self::Failed],
            Self::Done | Self::Failed => Vec::new(),
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Done | Self::Failed, _) => false,
            (_, Self::Failed)
            | (Self::Resetting, Self::Serving)
            | (Self::Serving, Self::Discovering)
            | (Self::Discovering, Self::Auditing(0) | Self::Opening)
            | (Self::Auditing(_), Self::Opening)
            | (Self::Opening, Self::Done) => true,
            (Self::Auditing(current), Self::Auditing(next)) => next == current + 1,
            _ => false,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resetting => "resetting",
            Self::Serving => "serving",
            Self::Discovering => "discovering",
            Self::Auditing(_) => "auditing",
            Self::Opening => "opening",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auditing(index) => write!(f, "auditing({index})"),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PipelineState::Resetting, PipelineState::Serving, true)]
    #[case(PipelineState::Serving, PipelineState::Discovering, true)]
    #[case(PipelineState::Discovering, PipelineState::Auditing(0), true)]
    #[case(PipelineState::Discovering, PipelineState::Auditing(1), false)]
    #[case(PipelineState::Discovering, PipelineState::Opening, true)]
    #[case(PipelineState::Auditing(0), PipelineState::Auditing(1), true)]
    #[case(PipelineState::Auditing(2), PipelineState::Auditing(2), false)]
    #[case(PipelineState::Auditing(3), PipelineState::Opening, true)]
    #[case(PipelineState::Opening, PipelineState::Done, true)]
    #[case(PipelineState::Resetting, PipelineState::Discovering, false)]
    #[case(PipelineState::Serving, PipelineState::Failed, true)]
    #[case(PipelineState::Auditing(1), PipelineState::Failed, true)]
    #[case(PipelineState::Done, PipelineState::Failed, false)]
    #[case(PipelineState::Failed, PipelineState::Done, false)]
    fn transitions(#[case] from: PipelineState, #[case] to: PipelineState, #[case] ok: bool) {
        assert_eq!(from.can_transition_to(to), ok, "{from} -> {to}");
    }

    #[test]
    fn option_enums_use_tool_spelling() {
        assert_eq!(
            serde_json::to_string(&ThrottlingMethod::Devtools).unwrap(),
            "\"devtools\""
        );
        let parsed: FormFactor = serde_json::from_str("\"desktop\"").unwrap();
        assert_eq!(parsed, FormFactor::Desktop);
        assert_eq!(ReportFormat::Json.extension(), "json");
        assert_eq!(ReportFormat::Summary.extension(), "html");
        let parsed: ReportFormat = serde_json::from_str("\"summary\"").unwrap();
        assert_eq!(parsed, ReportFormat::Summary);
    }

    #[test]
    fn allowed_next_states_agree_with_transition_check() {
        let all = [
            PipelineState::Resetting,
            PipelineState::Serving,
            PipelineState::Discovering,
            PipelineState::Auditing(0),
            PipelineState::Auditing(1),
            PipelineState::Auditing(2),
            PipelineState::Opening,
            PipelineState::Done,
            PipelineState::Failed,
        ];
        for from in [
            PipelineState::Resetting,
            PipelineState::Serving,
            PipelineState::Discovering,
            PipelineState::Auditing(1),
            PipelineState::Opening,
            PipelineState::Done,
        ] {
            let allowed = from.allowed_next_states();
            for to in all {
                assert_eq!(allowed.contains(&to), from.can_transition_to(to), "{from} -> {to}");
            }
        }
        assert!(PipelineState::Failed.allowed_next_states().is_empty());
    }

    #[test]
    fn auditing_state_displays_index() {
        assert_eq!(PipelineState::Auditing(4).to_string(), "auditing(4)");
        assert_eq!(PipelineState::Done.to_string(), "done");
    }
}
