//! Launch behaviour against stand-in executables, plus a live check that runs
//! only when a real Chrome/Chromium is installed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use vigil_browser::{BrowserError, ChromeFinder, ChromeLauncher, Session, SessionLauncher};

#[cfg(unix)]
fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[tokio::test]
async fn missing_binary_is_launch_error() {
    let launcher = ChromeLauncher::new("/definitely/not/a/browser");
    let err = launcher.launch().await.unwrap_err();
    assert!(matches!(err, BrowserError::Launch { .. }), "{err}");
}

#[cfg(unix)]
#[tokio::test]
async fn early_exit_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let crashing = script(temp.path(), "crashing-browser", "exit 3");

    let launcher = ChromeLauncher::new(crashing).with_startup_timeout(Duration::from_secs(5));
    let err = launcher.launch().await.unwrap_err();
    assert!(matches!(err, BrowserError::ExitedEarly { .. }), "{err}");
}

#[cfg(unix)]
#[tokio::test]
async fn silent_browser_is_not_ready() {
    let temp = tempfile::tempdir().unwrap();
    let silent = script(temp.path(), "silent-browser", "exec sleep 30");

    let launcher = ChromeLauncher::new(silent).with_startup_timeout(Duration::from_millis(300));
    let err = launcher.launch().await.unwrap_err();
    assert!(matches!(err, BrowserError::NotReady { .. }), "{err}");
}

/// Requires Chrome/Chromium on this machine; skipped (not failed) otherwise.
#[tokio::test]
async fn live_session_launches_and_terminates() {
    let Ok(binary) = ChromeFinder::from_env().find(None) else {
        eprintln!("SKIP: no Chrome/Chromium installed");
        return;
    };

    let launcher = ChromeLauncher::new(binary).with_startup_timeout(Duration::from_secs(30));
    let session = match launcher.launch().await {
        Ok(session) => session,
        Err(error) => {
            // Sandboxed CI containers often cannot start Chrome at all.
            eprintln!("SKIP: browser could not start here: {error}");
            return;
        }
    };

    let port = session.port();
    let version = reqwest::get(format!("http://127.0.0.1:{port}/json/version"))
        .await
        .expect("debugging endpoint answers");
    assert!(version.status().is_success());

    session.terminate().await.expect("terminate succeeds");
    assert!(
        reqwest::get(format!("http://127.0.0.1:{port}/json/version"))
            .await
            .is_err()
    );
}
