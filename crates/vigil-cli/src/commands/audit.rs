use anyhow::Context;
use vigil_audit::LighthouseAuditor;
use vigil_browser::ChromeLauncher;
use vigil_config::VigilConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::opener::SystemOpener;
use crate::output::output;
use crate::pipeline::Pipeline;

/// Handle `vigil audit`.
pub async fn handle(
    args: &AuditArgs,
    flags: &GlobalFlags,
    mut config: VigilConfig,
) -> anyhow::Result<i32> {
    apply_overrides(&mut config, args);
    config.validate()?;

    let launcher = ChromeLauncher::from_config(&config.browser)
        .context("cannot audit without a Chrome/Chromium browser")?;
    let auditor = LighthouseAuditor::new(config.audit.clone());

    let outcome = Pipeline::new(&config, launcher, auditor, SystemOpener)
        .run()
        .await;
    output(&outcome.summary(), flags.format)?;

    let code = outcome.exit_code();
    if outcome.needs_forced_exit() {
        tracing::warn!(
            port = config.site.port,
            "static server did not stop in time; exiting to release the port"
        );
        std::process::exit(code);
    }
    Ok(code)
}

fn apply_overrides(config: &mut VigilConfig, args: &AuditArgs) {
    if let Some(build) = &args.build {
        config.site.build_path.clone_from(build);
    }
    if let Some(port) = args.port {
        config.site.port = port;
    }
    if let Some(out) = &args.out {
        config.report.path.clone_from(out);
    }
    if let Some(format) = args.report_format {
        config.report.format = format.into();
    }
    if !args.category.is_empty() {
        config.audit.categories.clone_from(&args.category);
    }
    if let Some(form_factor) = args.form_factor {
        config.audit.form_factor = form_factor.into();
    }
    if let Some(timeout) = args.timeout {
        config.audit.timeout_secs = timeout;
    }
    if args.no_open {
        config.report.open = false;
    }
}
