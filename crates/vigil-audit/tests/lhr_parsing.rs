use pretty_assertions::assert_eq;
use vigil_audit::lhr::Lhr;
use vigil_core::{FormFactor, ScoreBand};

const LHR: &str = include_str!("fixtures/lhr.json");
const LHR_RUNTIME_ERROR: &str = include_str!("fixtures/lhr_runtime_error.json");

#[test]
fn categories_follow_conventional_order() {
    let result = Lhr::parse(LHR.as_bytes())
        .expect("fixture parses")
        .into_result("http://127.0.0.1:3000/index.html", FormFactor::Desktop);

    let ids: Vec<&str> = result.categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["performance", "accessibility", "best-practices", "seo"]);
    assert_eq!(result.category_score("performance"), Some(0.67));
    assert_eq!(result.categories[2].band(), ScoreBand::Unscored);
}

#[test]
fn metrics_come_from_the_performance_metrics_group() {
    let result = Lhr::parse(LHR.as_bytes())
        .expect("fixture parses")
        .into_result("ignored", FormFactor::Mobile);

    let ids: Vec<&str> = result.metrics.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "first-contentful-paint",
            "largest-contentful-paint",
            "cumulative-layout-shift"
        ]
    );
    assert_eq!(result.metrics[0].display_value.as_deref(), Some("2.5 s"));
    assert_eq!(result.metrics[1].numeric_value, Some(4410.7));
}

#[test]
fn diagnostics_list_failing_scored_audits_worst_first() {
    let result = Lhr::parse(LHR.as_bytes())
        .expect("fixture parses")
        .into_result("ignored", FormFactor::Mobile);

    let ids: Vec<&str> = result.diagnostics.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["meta-description", "render-blocking-resources"]);
}

#[test]
fn document_fields_win_over_fallbacks() {
    let result = Lhr::parse(LHR.as_bytes())
        .expect("fixture parses")
        .into_result("http://elsewhere/", FormFactor::Desktop);

    assert_eq!(result.requested_url, "http://127.0.0.1:3000/index.html");
    assert_eq!(result.final_url, "http://127.0.0.1:3000/index.html");
    assert_eq!(result.form_factor, FormFactor::Mobile);
    assert_eq!(result.tool_version, "12.1.0");
    assert_eq!(result.fetch_time.to_rfc3339(), "2026-03-14T09:26:53+00:00");
}

#[test]
fn runtime_error_is_exposed() {
    let lhr = Lhr::parse(LHR_RUNTIME_ERROR.as_bytes()).expect("fixture parses");
    let runtime = lhr.runtime_error.expect("runtime error present");
    assert_eq!(runtime.code, "ERRORED_DOCUMENT_REQUEST");
    assert!(runtime.message.contains("404"));
}

#[test]
fn garbage_is_a_parse_error() {
    assert!(Lhr::parse(b"Lighthouse crashed\n").is_err());
}
