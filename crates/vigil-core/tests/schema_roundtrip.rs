//! Serde roundtrip and JsonSchema validation tests for persisted and printed types.

use chrono::{TimeZone, Utc};
use schemars::schema_for;
use vigil_core::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_result() -> AuditResult {
    AuditResult {
        requested_url: "http://127.0.0.1:3000/index.html".into(),
        final_url: "http://127.0.0.1:3000/index.html".into(),
        fetch_time: Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap(),
        tool_version: "12.1.0".into(),
        form_factor: FormFactor::Mobile,
        categories: vec![
            CategoryScore {
                id: "performance".into(),
                title: "Performance".into(),
                score: Some(0.93),
            },
            CategoryScore {
                id: "seo".into(),
                title: "SEO".into(),
                score: None,
            },
        ],
        metrics: vec![Metric {
            id: "first-contentful-paint".into(),
            title: "First Contentful Paint".into(),
            numeric_value: Some(1234.5),
            numeric_unit: Some("millisecond".into()),
            display_value: Some("1.2 s".into()),
            score: Some(0.97),
        }],
        diagnostics: vec![Diagnostic {
            id: "render-blocking-resources".into(),
            title: "Eliminate render-blocking resources".into(),
            description: "Resources are blocking the first paint of your page.".into(),
            display_value: Some("Potential savings of 300 ms".into()),
            score: Some(0.4),
        }],
    }
}

roundtrip_and_validate!(audit_result, AuditResult, sample_result());

roundtrip_and_validate!(
    run_summary_success,
    RunSummary,
    RunSummary {
        state: PipelineState::Done,
        failed_at: None,
        pages: vec!["index.html".into(), "about.html".into()],
        reports: vec!["reports/index.html".into(), "reports/about.html".into()],
        opened: 2,
        error: None,
        exit_code: 0,
    }
);

roundtrip_and_validate!(
    run_summary_failure,
    RunSummary,
    RunSummary {
        state: PipelineState::Failed,
        failed_at: Some(PipelineState::Auditing(0)),
        pages: vec!["index.html".into()],
        reports: vec![],
        opened: 0,
        error: Some("audit failed".into()),
        exit_code: 1,
    }
);

roundtrip_and_validate!(
    page_list,
    PageListResponse,
    PageListResponse {
        build_path: "dist".into(),
        pages: vec!["index.html".into()],
    }
);

#[test]
fn category_lookup_skips_unscored() {
    let result = sample_result();
    assert_eq!(result.category_score("performance"), Some(0.93));
    assert_eq!(result.category_score("seo"), None);
    assert_eq!(result.category_score("pwa"), None);
}
