//! Wire-level debugging via LOUD_WIRE environment variable.
//!
//! When `LOUD_WIRE` is set to any value, prints raw JSON of generation
//! requests and responses to stderr with pretty formatting and colors.
//!
//! ```bash
//! LOUD_WIRE=1 cargo test --test client_tests
//! ```
//!
//! - Green `>>>` for outgoing requests
//! - Red `<<<` for incoming responses
//! - Timestamps and request IDs for correlation
//!
//! Bearer tokens are never printed.

use colored::Colorize;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Request ID counter for correlating requests with responses
static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Cached check for whether LOUD_WIRE is enabled
static ENABLED: OnceLock<bool> = OnceLock::new();

/// Maximum bytes of a non-JSON body to print.
const RAW_BODY_LIMIT: usize = 1000;

/// Check if LOUD_WIRE debugging is enabled.
///
/// Cached after the first check, so `LOUD_WIRE` must be set before the first
/// request is made.
#[must_use]
pub(crate) fn is_enabled() -> bool {
    *ENABLED.get_or_init(|| std::env::var("LOUD_WIRE").is_ok())
}

/// Get the next request ID for correlation.
#[must_use]
pub(crate) fn next_request_id() -> usize {
    REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed)
}

fn timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

/// Log prefix with timestamp and request ID.
fn prefix(request_id: usize) -> String {
    format!(
        "{} {} {}",
        "[LOUD_WIRE]".bold(),
        timestamp().dimmed(),
        format!("[REQ#{}]", request_id).cyan()
    )
}

/// Renders JSON with colors, falling back to plain pretty-printing, or to the
/// raw text (capped) when `body` is not JSON.
fn render_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(parsed) => colored_json::to_colored_json_auto(&parsed)
            .ok()
            .or_else(|| serde_json::to_string_pretty(&parsed).ok())
            .unwrap_or_else(|| body.to_string()),
        Err(_) => truncate_raw(body),
    }
}

fn truncate_raw(body: &str) -> String {
    if body.len() <= RAW_BODY_LIMIT {
        return body.to_string();
    }
    let mut end = RAW_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

/// Log an outgoing HTTP request.
pub(crate) fn log_request(request_id: usize, method: &str, url: &str, body: Option<&str>) {
    if !is_enabled() {
        return;
    }

    let prefix = prefix(request_id);
    let direction = ">>>".green().bold();

    eprintln!("{prefix} {direction} {method} {url}");

    if let Some(body) = body {
        eprintln!("{prefix} {}:", "Body".green());
        for line in render_body(body).lines() {
            eprintln!("{prefix} {line}");
        }
    }
}

/// Log an incoming HTTP response status.
pub(crate) fn log_response_status(request_id: usize, status: u16) {
    if !is_enabled() {
        return;
    }

    let prefix = prefix(request_id);
    let direction = "<<<".red().bold();
    let status_text = if status < 300 {
        format!("{status} OK").green()
    } else {
        format!("{status} ERROR").red()
    };

    eprintln!("{prefix} {direction} {status_text}");
}

/// Log an incoming HTTP response body.
pub(crate) fn log_response_body(request_id: usize, body: &[u8]) {
    if !is_enabled() {
        return;
    }

    let prefix = prefix(request_id);
    let body = String::from_utf8_lossy(body);

    eprintln!("{prefix} {}:", "Response".red());
    for line in render_body(&body).lines() {
        eprintln!("{prefix} {line}");
    }
}
