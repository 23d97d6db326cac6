//! Audit run orchestration.
//!
//! One run walks the state machine
//! `resetting → serving → discovering → auditing(i)… → opening → done`,
//! dropping to `failed` on the first error:
//! 1. Empty the report workspace, after checking it holds neither the build
//!    nor the working directory
//! 2. Serve the build directory
//! 3. Discover pages
//! 4. For each page, strictly one at a time: launch a browser session, audit,
//!    terminate the session (always), write the report
//! 5. Open every report, only when all pages succeeded
//!
//! There is no per-page error isolation: a failing page skips the rest.
//! Afterwards the server is stopped with a bounded wait; [`RunOutcome`] records
//! whether that wait expired so the caller can fall back to exiting the process.

mod error;
mod outcome;


use std::path::PathBuf;

use vigil_audit::{Auditor, run_with_deadline};
use vigil_browser::{Session, SessionLauncher};
use vigil_config::VigilConfig;
use vigil_core::{BuildArtifact, PipelineState};
use vigil_site::{StaticServer, discovery, workspace};

use crate::opener::ReportOpener;
use crate::progress::Progress;

pub use error::PipelineError;
pub use outcome::RunOutcome;

/// Orchestrates one audit run over the configured build directory.
pub struct Pipeline<'a, L, A, O> {
    config: &'a VigilConfig,
    launcher: L,
    auditor: A,
    opener: O,
}

/// Mutable bookkeeping for a run in progress.
struct RunState {
    state: PipelineState,
    pages: Vec<BuildArtifact>,
    reports: Vec<PathBuf>,
    opened: usize,
    server: Option<StaticServer>,
}

impl RunState {
    const fn new() -> Self {
        Self {
            state: PipelineState::Resetting,
            pages: Vec::new(),
            reports: Vec::new(),
            opened: 0,
            server: None,
        }
    }

    fn advance(&mut self, next: PipelineState) -> Result<(), PipelineError> {
        if !self.state.can_transition_to(next) {
            return Err(PipelineError::Transition {
                from: self.state,
                to: next,
            });
        }
        tracing::info!(from = %self.state, to = %next, "pipeline state");
        self.state = next;
        Ok(())
    }
}

impl<'a, L, A, O> Pipeline<'a, L, A, O>
where
    L: SessionLauncher,
    A: Auditor,
    O: ReportOpener,
{
    pub const fn new(config: &'a VigilConfig, launcher: L, auditor: A, opener: O) -> Self {
        Self {
            config,
            launcher,
            auditor,
            opener,
        }
    }

    /// Execute one run to a terminal state and shut the server down.
    pub async fn run(&self) -> RunOutcome {
        let mut run = RunState::new();
        tracing::info!(state = %run.state, "pipeline state");

        let (failed_at, error) = match self.execute(&mut run).await {
            Ok(()) => (None, None),
            Err(error) => {
                let failed_at = run.state;
                tracing::error!(state = %failed_at, %error, "audit run failed");
                // Every non-terminal state may fail; a terminal one is never reached here.
                if !run.state.is_terminal() {
                    run.state = PipelineState::Failed;
                }
                (Some(failed_at), Some(error))
            }
        };

        let server_stop = match run.server.take() {
            Some(server) => Some(server.stop(self.config.site.stop_timeout()).await),
            None => None,
        };

        RunOutcome {
            state: run.state,
            failed_at,
            pages: run.pages,
            reports: run.reports,
            opened: run.opened,
            error,
            server_stop,
        }
    }

    async fn execute(&self, run: &mut RunState) -> Result<(), PipelineError> {
        let site = &self.config.site;
        let report = &self.config.report;

        self.config.check_report_workspace()?;
        workspace::reset(&report.path)?;

        run.advance(PipelineState::Serving)?;
        let server = StaticServer::start(&site.build_path, &site.host, site.port)?;
        let base_url = server.base_url();
        run.server = Some(server);

        run.advance(PipelineState::Discovering)?;
        let pages = discovery::list(&site.build_path)?;
        tracing::info!(count = pages.len(), "discovered pages");
        run.pages.clone_from(&pages);

        if !pages.is_empty() {
            let progress = Progress::bar(pages.len() as u64, "auditing");
            for (index, artifact) in pages.iter().enumerate() {
                run.advance(PipelineState::Auditing(index))?;
                progress.set_message(&artifact.file_name);
                match self.audit_page(artifact, &base_url).await {
                    Ok(path) => {
                        run.reports.push(path);
                        progress.inc(1);
                    }
                    Err(error) => {
                        progress.finish_err(&format!("{artifact} failed"));
                        return Err(error);
                    }
                }
            }
            progress.finish_ok("all pages audited");
        }

        run.advance(PipelineState::Opening)?;
        if report.open {
            for path in &run.reports {
                self.opener
                    .open(path)
                    .map_err(|source| PipelineError::Open {
                        path: path.clone(),
                        source,
                    })?;
                run.opened += 1;
            }
        } else {
            tracing::debug!("report opening disabled");
        }

        run.advance(PipelineState::Done)
    }

    /// Audit one page in a fresh browser session and write its report.
    async fn audit_page(
        &self,
        artifact: &BuildArtifact,
        base_url: &str,
    ) -> Result<PathBuf, PipelineError> {
        let url = artifact.url(base_url);
        tracing::info!(page = %artifact, %url, "auditing page");

        let session = self.launcher.launch().await?;
        let audited =
            run_with_deadline(&self.auditor, &url, &session, self.config.audit.timeout()).await;
        let teardown = session.terminate().await;

        let output = match (audited, teardown) {
            (Ok(output), Ok(())) => output,
            (Ok(_), Err(error)) => return Err(error.into()),
            (Err(error), teardown) => {
                if let Err(teardown_error) = teardown {
                    tracing::warn!(%teardown_error, "browser teardown also failed");
                }
                return Err(error.into());
            }
        };

        let format = self.config.report.format;
        let dest = self.config.report.path.join(artifact.report_file_name(format));
        vigil_report::write(&output, &dest, format)?;
        Ok(dest)
    }
}
