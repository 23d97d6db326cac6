use std::future::Future;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use vigil_browser::Session;
use vigil_config::AuditConfig;
use vigil_core::AuditOutput;

use crate::error::AuditError;
use crate::flags::{lighthouse_args, output_file};
use crate::lhr::Lhr;

/// Stderr is trimmed to this many trailing bytes in error messages.
const STDERR_TAIL: usize = 2000;

/// File name stem the tool's outputs are written under.
const OUTPUT_BASE: &str = "lighthouse";

/// Audits one URL through a live browser session.
pub trait Auditor: Send + Sync {
    fn run<S: Session>(
        &self,
        url: &str,
        session: &S,
    ) -> impl Future<Output = Result<AuditOutput, AuditError>> + Send;
}

/// Run `auditor` against `url`, giving up after `deadline` if one is set.
///
/// On timeout the in-flight audit future is dropped, which kills any child
/// process it spawned and removes its scratch files. The session itself is
/// left for the caller to terminate.
///
/// # Errors
///
/// The auditor's own error, or [`AuditError::Timeout`].
pub async fn run_with_deadline<A, S>(
    auditor: &A,
    url: &str,
    session: &S,
    deadline: Option<Duration>,
) -> Result<AuditOutput, AuditError>
where
    A: Auditor,
    S: Session,
{
    let Some(limit) = deadline else {
        return auditor.run(url, session).await;
    };

    tokio::time::timeout(limit, auditor.run(url, session))
        .await
        .map_err(|_| AuditError::Timeout {
            url: url.to_string(),
            after: limit,
        })?
}

/// Drives the Lighthouse CLI. Configuration is fixed at construction.
#[derive(Debug, Clone)]
pub struct LighthouseAuditor {
    config: AuditConfig,
}

impl LighthouseAuditor {
    #[must_use]
    pub const fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &AuditConfig {
        &self.config
    }
}

impl Auditor for LighthouseAuditor {
    fn run<S: Session>(
        &self,
        url: &str,
        session: &S,
    ) -> impl Future<Output = Result<AuditOutput, AuditError>> + Send {
        self.audit(url.to_string(), session.port())
    }
}

impl LighthouseAuditor {
    async fn audit(&self, url: String, port: u16) -> Result<AuditOutput, AuditError> {
        let bin = &self.config.lighthouse_bin;
        let workdir = tempfile::Builder::new()
            .prefix("vigil-lighthouse-")
            .tempdir()
            .map_err(AuditError::Workdir)?;
        let output_base = workdir.path().join(OUTPUT_BASE);
        let args = lighthouse_args(&self.config, &url, port, &output_base);
        tracing::debug!(%bin, ?args, "running audit tool");

        let output = Command::new(bin)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| AuditError::Spawn {
                bin: bin.clone(),
                source,
            })?;

        let json_path = output_file(&output_base, "json");
        let parsed = read_if_present(&json_path)
            .await?
            .map(|raw| Lhr::parse(&raw));

        if let Some(Ok(Lhr {
            runtime_error: Some(runtime),
            ..
        })) = &parsed
        {
            return Err(AuditError::Runtime {
                url,
                code: runtime.code.clone(),
                message: runtime.message.clone(),
            });
        }

        if !output.status.success() {
            return Err(AuditError::Failed {
                url,
                status: output.status.to_string(),
                stderr: stderr_tail(&output.stderr),
            });
        }

        let lhr = match parsed {
            Some(Ok(lhr)) => lhr,
            Some(Err(source)) => return Err(AuditError::Parse { url, source }),
            None => {
                return Err(AuditError::MissingOutput {
                    url,
                    path: json_path,
                });
            }
        };

        let native_html = read_if_present(&output_file(&output_base, "html"))
            .await?
            .map(|raw| String::from_utf8_lossy(&raw).into_owned());
        if native_html.is_none() {
            tracing::warn!(%url, "audit tool wrote no HTML report");
        }

        tracing::info!(%url, version = %lhr.lighthouse_version, "audit complete");
        Ok(AuditOutput {
            result: lhr.into_result(&url, self.config.form_factor),
            native_html,
        })
    }
}

/// Read an output file the tool may not have written.
async fn read_if_present(path: &Path) -> Result<Option<Vec<u8>>, AuditError> {
    match tokio::fs::read(path).await {
        Ok(raw) => Ok(Some(raw)),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(AuditError::Output {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.len() <= STDERR_TAIL {
        return text.to_string();
    }
    let mut start = text.len() - STDERR_TAIL;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    format!("…{}", &text[start..])
}
