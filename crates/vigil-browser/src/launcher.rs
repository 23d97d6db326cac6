//! Browser process launch.

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use vigil_config::BrowserConfig;

use crate::SessionLauncher;
use crate::error::BrowserError;
use crate::finder::ChromeFinder;
use crate::session::ChromeSession;

const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);
const READY_CHECK_TIMEOUT: Duration = Duration::from_millis(500);

/// Flags that keep an automated browser quiet and free of cross-run state.
const DEFAULT_FLAGS: [&str; 19] = [
    "--disable-features=Translate,OptimizationHints,MediaRouter,DialMediaRouteProvider,CalculateNativeWinOcclusion,InterestFeedContentSuggestions,CertificateTransparencyComponentUpdater,AutofillServerCommunication,PrivacySandboxSettings4",
    "--disable-extensions",
    "--disable-component-extensions-with-background-pages",
    "--disable-background-networking",
    "--disable-component-update",
    "--disable-client-side-phishing-detection",
    "--disable-sync",
    "--metrics-recording-only",
    "--disable-default-apps",
    "--mute-audio",
    "--no-default-browser-check",
    "--no-first-run",
    "--disable-backgrounding-occluded-windows",
    "--disable-renderer-backgrounding",
    "--disable-background-timer-throttling",
    "--disable-ipc-flooding-protection",
    "--password-store=basic",
    "--use-mock-keychain",
    "--force-fieldtrials=*BackgroundTracing/default/",
];

/// Launches one isolated Chrome/Chromium process per call.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    binary: PathBuf,
    headless: bool,
    extra_flags: Vec<String>,
    startup_timeout: Duration,
}

impl ChromeLauncher {
    /// Launcher for an already-resolved binary with default settings.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self::with_settings(binary.into(), &BrowserConfig::default())
    }

    /// Resolve the binary from `config` (or auto-detect) and build a launcher.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::NotFound`] or [`BrowserError::InvalidBinary`]
    /// when no usable browser exists.
    pub fn from_config(config: &BrowserConfig) -> Result<Self, BrowserError> {
        let binary = ChromeFinder::from_env().find(config.explicit_path())?;
        tracing::debug!(binary = %binary.display(), "resolved browser binary");
        Ok(Self::with_settings(binary, config))
    }

    fn with_settings(binary: PathBuf, config: &BrowserConfig) -> Self {
        Self {
            binary,
            headless: config.headless,
            extra_flags: config.chrome_flags.clone(),
            startup_timeout: config.startup_timeout(),
        }
    }

    #[must_use]
    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Command-line arguments for a session on `port` using `profile_dir`.
    #[must_use]
    pub fn args(&self, port: u16, profile_dir: &Path) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={port}"),
            format!("--user-data-dir={}", profile_dir.display()),
        ];
        args.extend(DEFAULT_FLAGS.iter().map(|f| (*f).to_string()));
        if self.headless {
            args.push("--headless=new".to_string());
        }
        args.extend(self.extra_flags.iter().cloned());
        args.push("about:blank".to_string());
        args
    }

    async fn wait_until_ready(&self, child: &mut Child, port: u16) -> Result<(), BrowserError> {
        let started = Instant::now();
        let url = format!("http://127.0.0.1:{port}/json/version");
        let http = readiness_client()?;

        loop {
            if let Some(status) = child.try_wait().map_err(|source| BrowserError::Launch {
                binary: self.binary.clone(),
                source,
            })? {
                return Err(BrowserError::ExitedEarly {
                    status: status.to_string(),
                });
            }

            if endpoint_ready(&http, &url).await {
                tracing::debug!(port, waited_ms = started.elapsed().as_millis(), "browser ready");
                return Ok(());
            }

            if started.elapsed() >= self.startup_timeout {
                return Err(BrowserError::NotReady {
                    port,
                    waited_ms: started.elapsed().as_millis(),
                });
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }
}

impl SessionLauncher for ChromeLauncher {
    type Session = ChromeSession;

    async fn launch(&self) -> Result<ChromeSession, BrowserError> {
        let port = reserve_port().map_err(BrowserError::Profile)?;
        let profile = tempfile::Builder::new()
            .prefix("vigil-chrome-")
            .tempdir()
            .map_err(BrowserError::Profile)?;

        let mut child = Command::new(&self.binary)
            .args(self.args(port, profile.path()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BrowserError::Launch {
                binary: self.binary.clone(),
                source,
            })?;

        tracing::info!(port, pid = child.id(), "browser launched");

        // On failure the child is dropped here and killed.
        self.wait_until_ready(&mut child, port).await?;
        Ok(ChromeSession::new(child, port, profile))
    }
}

/// HTTP client for the readiness check. The endpoint is always local, so
/// `HTTP_PROXY`-style settings must not apply.
fn readiness_client() -> Result<reqwest::Client, BrowserError> {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .map_err(BrowserError::ReadinessClient)
}

async fn endpoint_ready(http: &reqwest::Client, url: &str) -> bool {
    http.get(url)
        .timeout(READY_CHECK_TIMEOUT)
        .send()
        .await
        .is_ok_and(|response| response.status().is_success())
}

/// Ask the OS for a free local port.
///
/// The listener is released before the browser binds the port; another
/// process could take it in between.
fn reserve_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}
