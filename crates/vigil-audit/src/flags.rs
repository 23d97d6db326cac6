//! Lighthouse command-line construction.

use std::path::{Path, PathBuf};

use vigil_config::AuditConfig;

/// Arguments auditing `url` through the browser listening on `port`.
///
/// The tool writes both its JSON result and its HTML report next to
/// `output_base` (see [`output_file`]); everything else comes from `config`.
#[must_use]
pub fn lighthouse_args(
    config: &AuditConfig,
    url: &str,
    port: u16,
    output_base: &Path,
) -> Vec<String> {
    let mobile = config.form_factor.is_mobile();
    let mut args = vec![
        url.to_string(),
        format!("--port={port}"),
        "--output=json".to_string(),
        "--output=html".to_string(),
        format!("--output-path={}", output_base.display()),
        "--quiet".to_string(),
        format!("--only-categories={}", config.categories.join(",")),
        format!("--form-factor={}", config.form_factor),
        format!("--throttling-method={}", config.throttling_method),
        format!("--screenEmulation.mobile={mobile}"),
        format!("--screenEmulation.width={}", config.screen_width),
        format!("--screenEmulation.height={}", config.screen_height),
        format!(
            "--screenEmulation.deviceScaleFactor={}",
            config.device_scale_factor
        ),
    ];
    args.extend(config.extra_flags.iter().cloned());
    args
}

/// Where the tool puts the `kind` output (`json`, `html`) when asked for
/// several at once: `<base>.report.<kind>`.
#[must_use]
pub fn output_file(output_base: &Path, kind: &str) -> PathBuf {
    let mut name = output_base.as_os_str().to_os_string();
    name.push(format!(".report.{kind}"));
    PathBuf::from(name)
}
