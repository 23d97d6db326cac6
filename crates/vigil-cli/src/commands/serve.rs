use anyhow::Context;
use serde::Serialize;
use vigil_config::VigilConfig;
use vigil_site::{StaticServer, StopOutcome};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ServeArgs;
use crate::output::{TextRender, output};

/// Printed once the server is listening.
#[derive(Debug, Serialize)]
struct ServeStarted {
    url: String,
    root: String,
}

impl TextRender for ServeStarted {
    fn render_text(&self) -> String {
        format!("serving {} at {} (Ctrl-C to stop)", self.root, self.url)
    }
}

/// Handle `vigil serve`.
pub async fn handle(
    args: &ServeArgs,
    flags: &GlobalFlags,
    mut config: VigilConfig,
) -> anyhow::Result<i32> {
    if let Some(build) = &args.build {
        config.site.build_path.clone_from(build);
    }
    if let Some(port) = args.port {
        config.site.port = port;
    }
    config.validate()?;

    let site = &config.site;
    let server = StaticServer::start(&site.build_path, &site.host, site.port)?;
    output(
        &ServeStarted {
            url: server.base_url(),
            root: server.root().display().to_string(),
        },
        flags.format,
    )?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    match server.stop(site.stop_timeout()).await {
        StopOutcome::Stopped => Ok(0),
        StopOutcome::TimedOut => {
            tracing::warn!("static server did not stop in time; exiting to release the port");
            std::process::exit(0);
        }
    }
}
