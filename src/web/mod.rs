//! Embedded web dashboard for wardroom.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The single-page executive dashboard (shell, KPI cards, module health
//!   matrix, systems inventory)
//! - JSON API endpoints backed by the same pure view functions as the CLI
//!
//! Launched via `wardroom web` (default: `http://127.0.0.1:9747`).

mod api;
mod frontend;

use std::io::Cursor;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::cli::Session;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web dashboard server on the given address.
///
/// Blocks the current thread and handles requests sequentially. The dataset
/// is read-only, so every request recomputes its view from the shared
/// session. Errors are reported per request without stopping the server.
pub fn serve(session: &Session, addr: &str, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("wardroom dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if open {
        let url = format!("http://{addr}");
        if let Err(e) = open_browser(&url) {
            session.log.warn("web", "shell", &format!("{e:#}"));
        }
    }

    for request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let response = match dispatch(session, &method, &url) {
            Ok(resp) => resp,
            Err(e) => {
                session.log.warn("web", "request", &format!("{method} {url}: {e:#}"));
                error_response(&e.to_string(), 500)
            }
        };
        let _ = request.respond(response);

        // Brief access log
        println!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(session: &Session, method: &Method, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        // Frontend
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),

        // API — dashboard views
        (&Method::Get, "/api/shell") => api::get_shell(session),
        (&Method::Get, "/api/summary") => api::get_summary(session),
        (&Method::Get, "/api/modules") => api::get_modules(session, url),
        (&Method::Get, "/api/systems") => api::get_systems(session, url),

        // API — configuration (read-only)
        (&Method::Get, "/api/config") => api::get_config(session),

        _ => Ok(error_response("not found", 404)),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page frontend.
fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

/// JSON `{"error": ...}` response with the given status.
fn error_response(message: &str, status: u16) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WardroomConfig;
    use crate::data::sample;
    use crate::logging::ActivityLog;

    fn session() -> Session {
        Session {
            config: WardroomConfig::default(),
            data: sample::dataset(),
            log: ActivityLog::disabled(),
        }
    }

    fn status(resp: Result<Response<Cursor<Vec<u8>>>>) -> u16 {
        resp.unwrap().status_code().0
    }

    #[test]
    fn routes_known_endpoints() {
        let s = session();
        assert_eq!(status(dispatch(&s, &Method::Get, "/")), 200);
        assert_eq!(status(dispatch(&s, &Method::Get, "/api/shell")), 200);
        assert_eq!(status(dispatch(&s, &Method::Get, "/api/summary")), 200);
        assert_eq!(status(dispatch(&s, &Method::Get, "/api/modules?width=600")), 200);
        assert_eq!(
            status(dispatch(&s, &Method::Get, "/api/systems?status=critical&toggle=name")),
            200
        );
        assert_eq!(status(dispatch(&s, &Method::Get, "/api/config")), 200);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        let s = session();
        assert_eq!(status(dispatch(&s, &Method::Get, "/api/nope")), 404);
        assert_eq!(status(dispatch(&s, &Method::Post, "/api/summary")), 404);
    }

    #[test]
    fn frontend_is_embedded() {
        assert!(frontend::INDEX_HTML.contains("/api/systems"));
        assert!(frontend::INDEX_HTML.contains("Module Health Matrix"));
    }
}
