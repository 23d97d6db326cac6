//! Static file server for the build directory.
//!
//! `tiny_http` accepts connections on its own threads; a single worker thread
//! pulls requests off the server and answers them from disk. Every response
//! carries `Access-Control-Allow-Origin: *` so audited pages can load
//! cross-origin-tagged resources.
//!
//! [`StaticServer::stop`] unblocks the worker and waits for it with a bounded
//! timeout. Callers fall back to ending the process when that wait expires.

use std::io::Cursor;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::error::SiteError;

/// Result of an explicit server shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The worker exited and the listening port was released.
    Stopped,
    /// The worker did not exit within the allowed time.
    TimedOut,
}

/// A running static server. Serves until [`StaticServer::stop`] or drop.
pub struct StaticServer {
    server: Arc<Server>,
    addr: SocketAddr,
    root: PathBuf,
    worker: Option<JoinHandle<()>>,
}

impl StaticServer {
    /// Bind `host:port` and start serving `root`.
    ///
    /// Binding is synchronous: once this returns the port accepts connections.
    /// Port `0` binds a free port; read it back with [`Self::addr`].
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Server`] if `root` is not a directory, the address
    /// cannot be bound, or the worker thread cannot be spawned.
    pub fn start(root: &Path, host: &str, port: u16) -> Result<Self, SiteError> {
        let requested = format!("{host}:{port}");
        let server_error = |reason: String| SiteError::Server {
            addr: requested.clone(),
            reason,
        };

        let root = root
            .canonicalize()
            .map_err(|e| server_error(format!("cannot serve '{}': {e}", root.display())))?;
        if !root.is_dir() {
            return Err(server_error(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }

        let server = Server::http((host, port)).map_err(|e| server_error(e.to_string()))?;
        let addr = server
            .server_addr()
            .to_ip()
            .ok_or_else(|| server_error("server has no IP address".into()))?;
        let server = Arc::new(server);

        let worker = {
            let server = Arc::clone(&server);
            let root = root.clone();
            std::thread::Builder::new()
                .name("vigil-static".into())
                .spawn(move || {
                    for request in server.incoming_requests() {
                        respond(&root, request);
                    }
                    tracing::debug!("static server worker exited");
                })
                .map_err(|e| server_error(format!("failed to spawn worker: {e}")))?
        };

        tracing::info!(%addr, root = %root.display(), "static server listening");
        Ok(Self {
            server,
            addr,
            root,
            worker: Some(worker),
        })
    }

    /// Address the server is bound to.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Directory being served.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Base URL for pages on this server, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting requests and wait up to `timeout` for the worker to exit.
    pub async fn stop(mut self, timeout: Duration) -> StopOutcome {
        self.server.unblock();
        let Some(worker) = self.worker.take() else {
            return StopOutcome::Stopped;
        };

        let join = tokio::task::spawn_blocking(move || worker.join());
        match tokio::time::timeout(timeout, join).await {
            Ok(Ok(Ok(()))) => {
                tracing::info!(addr = %self.addr, "static server stopped");
                StopOutcome::Stopped
            }
            Ok(_) => {
                tracing::warn!(addr = %self.addr, "static server worker panicked during shutdown");
                StopOutcome::Stopped
            }
            Err(_) => {
                tracing::warn!(
                    addr = %self.addr,
                    timeout_ms = timeout.as_millis(),
                    "static server did not stop in time"
                );
                StopOutcome::TimedOut
            }
        }
    }
}

impl Drop for StaticServer {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.server.unblock();
        }
    }
}

fn respond(root: &Path, request: Request) {
    let method = request.method().clone();
    let url = request.url().to_string();

    let response = match method {
        Method::Get | Method::Head => match resolve(root, &url) {
            Some(path) => match std::fs::read(&path) {
                Ok(bytes) => with_type(Response::from_data(bytes), content_type(&path)),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "failed to read file");
                    text(500, "Internal Server Error")
                }
            },
            None => text(404, "Not Found"),
        },
        Method::Options => preflight(),
        _ => text(405, "Method Not Allowed"),
    };

    let status = response.status_code().0;
    if let Err(error) = request.respond(with_cors(response)) {
        tracing::debug!(%url, %error, "client went away before response completed");
    } else {
        tracing::debug!(%method, %url, status, "served");
    }
}

/// Map a request URL onto a file under `root`.
///
/// Strips query and fragment, percent-decodes, rejects `..` segments, and maps
/// directories to their `index.html`. Returns `None` when nothing servable exists.
pub(crate) fn resolve(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = urlencoding::decode(path).ok()?;

    let mut resolved = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s if s.contains('\\') || s.contains('\0') => return None,
            s => resolved.push(s),
        }
    }

    if resolved.is_dir() {
        resolved.push("index.html");
    }
    resolved.is_file().then_some(resolved)
}

pub(crate) fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "webmanifest" => "application/manifest+json",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

type Body = Response<Cursor<Vec<u8>>>;

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

fn with_header(response: Body, name: &str, value: &str) -> Body {
    match header(name, value) {
        Some(h) => response.with_header(h),
        None => response,
    }
}

fn with_type(response: Body, mime: &str) -> Body {
    with_header(response, "Content-Type", mime)
}

fn with_cors(response: Body) -> Body {
    with_header(response, "Access-Control-Allow-Origin", "*")
}

fn text(status: u16, body: &str) -> Body {
    with_type(
        Response::from_string(body).with_status_code(StatusCode(status)),
        "text/plain; charset=utf-8",
    )
}

fn preflight() -> Body {
    let response = Response::from_data(Vec::new()).with_status_code(StatusCode(204));
    let response = with_header(response, "Access-Control-Allow-Methods", "GET, HEAD, OPTIONS");
    with_header(response, "Access-Control-Allow-Headers", "*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn site() -> tempfile::TempDir {
        let temp = tempfile::tempdir().expect("tempdir should create");
        std::fs::write(temp.path().join("index.html"), "<h1>home</h1>").unwrap();
        std::fs::write(temp.path().join("my page.html"), "<h1>spaced</h1>").unwrap();
        std::fs::create_dir(temp.path().join("blog")).unwrap();
        std::fs::write(temp.path().join("blog/index.html"), "<h1>blog</h1>").unwrap();
        temp
    }

    #[rstest]
    #[case("/index.html", Some("index.html"))]
    #[case("/index.html?utm=1#top", Some("index.html"))]
    #[case("/", Some("index.html"))]
    #[case("/blog", Some("blog/index.html"))]
    #[case("/blog/", Some("blog/index.html"))]
    #[case("/my%20page.html", Some("my page.html"))]
    #[case("/missing.html", None)]
    #[case("/../etc/passwd", None)]
    #[case("/blog/%2e%2e/index.html", None)]
    #[case("/..%5cindex.html", None)]
    fn resolves_urls(#[case] url: &str, #[case] expected: Option<&str>) {
        let temp = site();
        let resolved = resolve(temp.path(), url);
        assert_eq!(resolved, expected.map(|rel| temp.path().join(rel)));
    }

    #[rstest]
    #[case("a.html", "text/html; charset=utf-8")]
    #[case("a.CSS", "text/css; charset=utf-8")]
    #[case("a.woff2", "font/woff2")]
    #[case("a.svg", "image/svg+xml")]
    #[case("a", "application/octet-stream")]
    fn content_types(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(content_type(Path::new(name)), expected);
    }
}
