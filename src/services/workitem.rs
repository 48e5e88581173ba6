//! Work-item fetcher — URL parsing, the tracking-service GET, field mapping.
//!
//! DESIGN
//! ======
//! `parse_work_item_url` recognizes two edit-link patterns tried in fixed
//! order, first match wins. The generic pattern also matches
//! `dev.azure.com` links, which leaves the explicit second pattern
//! unreachable in practice; the order is kept anyway so the set of
//! accepted links never shrinks.
//!
//! The fetch is one authenticated GET; the response JSON maps into a
//! small display record with fixed fallbacks for absent fields. A failed
//! fetch never disturbs the session's current item (see `state`).

use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use serde_json::Value;

use super::settings::Settings;
use crate::html;

pub const API_VERSION: &str = "7.0";
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "No description provided.";

/// Host substrings that mark pasted text as a tracking-service link.
const TRACKING_HOSTS: [&str; 2] = ["visualstudio.com", "dev.azure.com"];

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum WorkItemError {
    /// The input does not look like a work-item edit link.
    #[error("invalid work item URL format")]
    InvalidUrl,

    /// No access token configured for the tracking service.
    #[error("no access token configured for the tracking service")]
    MissingToken,

    /// The HTTP request failed before any response arrived.
    #[error("work item request failed: {0}")]
    Request(String),

    /// The tracking service returned a non-success status.
    #[error("work item fetch failed: HTTP {status} {status_text}")]
    Http { status: u16, status_text: String },

    /// The response body could not be decoded.
    #[error("work item response parse failed: {0}")]
    Parse(String),
}

/// Org/project/id extracted from a work-item edit deep link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWorkItemUrl {
    pub org: String,
    pub project: String,
    pub id: i64,
}

/// Normalized display record for the current work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub id: i64,
    pub kind: String,
    pub title: String,
    pub state: String,
    pub area_path: String,
    pub assigned_to: Option<String>,
    pub description_html: String,
}

impl WorkItem {
    /// Assignee for display; an absent assignee renders as "Unassigned".
    #[must_use]
    pub fn assigned_display(&self) -> &str {
        self.assigned_to.as_deref().unwrap_or("Unassigned")
    }

    /// Description stripped to plain text, shared by display and prompts.
    #[must_use]
    pub fn description_text(&self) -> String {
        html::strip_html(&self.description_html)
    }
}

// =============================================================================
// URL PARSING
// =============================================================================

fn url_patterns() -> &'static [Regex; 2] {
    static PATTERNS: OnceLock<[Regex; 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"https://([^/]+)/([^/]+)/_workitems/edit/(\d+)").expect("static pattern"),
            Regex::new(r"https://dev\.azure\.com/([^/]+)/([^/]+)/_workitems/edit/(\d+)")
                .expect("static pattern"),
        ]
    })
}

/// Extract org/project/id from a work-item edit link, or `None` when the
/// input matches neither pattern. The captured host is prefixed with
/// `https://` unless it already names `dev.azure.com`.
#[must_use]
pub fn parse_work_item_url(url: &str) -> Option<ParsedWorkItemUrl> {
    for pattern in url_patterns() {
        if let Some(caps) = pattern.captures(url) {
            let host = &caps[1];
            let org = if host.contains("dev.azure.com") {
                host.to_string()
            } else {
                format!("https://{host}")
            };
            let id = caps[3].parse().ok()?;
            return Some(ParsedWorkItemUrl { org, project: caps[2].to_string(), id });
        }
    }
    None
}

/// Yield the candidate link from dropped or pasted text, only when it
/// names a recognizable tracking-service host; anything else is ignored.
#[must_use]
pub fn extract_dropped_url(text: &str) -> Option<&str> {
    let text = text.trim();
    if !text.is_empty() && TRACKING_HOSTS.iter().any(|host| text.contains(host)) {
        Some(text)
    } else {
        None
    }
}

// =============================================================================
// FETCH
// =============================================================================

/// Fetch and normalize the work item behind an edit link.
///
/// # Errors
///
/// [`WorkItemError::InvalidUrl`] for unrecognized links,
/// [`WorkItemError::MissingToken`] when no access token is configured,
/// [`WorkItemError::Http`] for non-success responses.
pub async fn fetch_work_item(url: &str, settings: &Settings) -> Result<WorkItem, WorkItemError> {
    let parsed = parse_work_item_url(url).ok_or(WorkItemError::InvalidUrl)?;
    if settings.access_token.trim().is_empty() {
        return Err(WorkItemError::MissingToken);
    }

    let mut base_url = settings.org_url.trim().trim_end_matches('/').to_string();
    if !base_url.starts_with("http") {
        base_url = format!("https://{base_url}");
    }
    let api_url = format!(
        "{base_url}/{}/_apis/wit/workitems/{}?$expand=all&api-version={API_VERSION}",
        parsed.project, parsed.id
    );

    tracing::info!(project = %parsed.project, id = parsed.id, "fetching work item");
    let response = reqwest::Client::new()
        .get(&api_url)
        .header(reqwest::header::AUTHORIZATION, basic_auth(&settings.access_token))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .send()
        .await
        .map_err(|e| WorkItemError::Request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(WorkItemError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
        });
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| WorkItemError::Parse(e.to_string()))?;
    Ok(map_work_item(parsed.id, &body))
}

/// Basic scheme with an empty username and the PAT as password.
fn basic_auth(access_token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!(":{access_token}")))
}

/// Map the raw work-item JSON into the display record. Every absent field
/// has a fixed fallback; nothing here fails.
pub(crate) fn map_work_item(fallback_id: i64, body: &Value) -> WorkItem {
    let null = Value::Null;
    let fields = body.get("fields").unwrap_or(&null);
    let text = |key: &str, default: &str| -> String {
        fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    WorkItem {
        id: body.get("id").and_then(Value::as_i64).unwrap_or(fallback_id),
        kind: text("System.WorkItemType", "Bug"),
        title: text("System.Title", "Untitled"),
        state: text("System.State", "-"),
        area_path: text("System.AreaPath", "-"),
        assigned_to: fields
            .get("System.AssignedTo")
            .and_then(|assignee| assignee.get("displayName"))
            .and_then(Value::as_str)
            .map(str::to_owned),
        description_html: text("System.Description", NO_DESCRIPTION_PLACEHOLDER),
    }
}

#[cfg(test)]
#[path = "workitem_test.rs"]
mod tests;
