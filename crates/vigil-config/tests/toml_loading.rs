//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directory and env var manipulation.

use std::path::PathBuf;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use vigil_config::VigilConfig;
use vigil_core::{FormFactor, ReportFormat, ThrottlingMethod};

#[test]
fn loads_site_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[site]
build_path = "public"
host = "0.0.0.0"
port = 8081
stop_timeout_ms = 500
"#,
        )?;

        let config: VigilConfig = Figment::from(Serialized::defaults(VigilConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.site.build_path, PathBuf::from("public"));
        assert_eq!(config.site.host, "0.0.0.0");
        assert_eq!(config.site.port, 8081);
        assert_eq!(config.site.stop_timeout_ms, 500);
        Ok(())
    });
}

#[test]
fn loads_audit_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[audit]
lighthouse_bin = "/opt/lh/bin/lighthouse"
categories = ["performance", "pwa"]
form_factor = "desktop"
throttling_method = "devtools"
screen_width = 1350
screen_height = 940
device_scale_factor = 1.0
extra_flags = ["--locale=ru"]
timeout_secs = 60
"#,
        )?;

        let config: VigilConfig = Figment::from(Serialized::defaults(VigilConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.audit.lighthouse_bin, "/opt/lh/bin/lighthouse");
        assert_eq!(config.audit.categories, vec!["performance", "pwa"]);
        assert_eq!(config.audit.form_factor, FormFactor::Desktop);
        assert_eq!(config.audit.throttling_method, ThrottlingMethod::Devtools);
        assert_eq!(config.audit.screen_width, 1350);
        assert_eq!(config.audit.extra_flags, vec!["--locale=ru"]);
        assert_eq!(config.audit.timeout_secs, 60);
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[report]
format = "json"
"#,
        )?;

        let config: VigilConfig = Figment::from(Serialized::defaults(VigilConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.report.format, ReportFormat::Json);
        assert_eq!(config.report.path, PathBuf::from("reports"));
        assert!(config.report.open);
        assert_eq!(config.site.port, 3000);
        assert!(config.browser.headless);
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".vigil")?;
        jail.create_file(
            ".vigil/config.toml",
            r#"
[browser]
chrome_path = "/usr/bin/chromium"
headless = false
chrome_flags = ["--no-sandbox"]
"#,
        )?;

        let config = VigilConfig::load().expect("config loads");
        assert_eq!(config.browser.explicit_path(), Some("/usr/bin/chromium"));
        assert!(!config.browser.headless);
        assert_eq!(config.browser.chrome_flags, vec!["--no-sandbox"]);
        Ok(())
    });
}

#[test]
fn invalid_enum_value_fails_extraction() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[audit]
form_factor = "tablet"
"#,
        )?;

        let result: Result<VigilConfig, _> =
            Figment::from(Serialized::defaults(VigilConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();

        assert!(result.is_err());
        Ok(())
    });
}
