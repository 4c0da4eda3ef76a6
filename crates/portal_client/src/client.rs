//! Portal HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).

use std::time::Duration;

use placement_engine::{NormalizedStudent, StudentName};
use serde::{Deserialize, Serialize};

use crate::auth::AuthCredentials;
use crate::submit::StudentSink;

/// Shown when a failed upload comes back without a usable `message`.
pub const GENERIC_UPLOAD_FAILURE: &str = "Failed to upload students";

/// Placement portal API client (blocking).
#[derive(Clone)]
pub struct PortalClient {
    http: reqwest::blocking::Client,
    api_base: String,
    token: String,
}

/// Error type for portal operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// No auth credentials configured
    NotAuthenticated,
    /// Network error (connect, timeout, TLS)
    Network(String),
    /// Non-2xx response; message is the server's `message` or the generic fallback
    Http(u16, String),
    /// Response body was not the expected JSON
    Parse(String),
}

impl std::fmt::Display for PortalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortalError::NotAuthenticated => write!(f, "Not authenticated: run `placement login` first"),
            PortalError::Network(msg) => write!(f, "Network error: {}", msg),
            PortalError::Http(code, msg) => write!(f, "{} (HTTP {})", msg, code),
            PortalError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for PortalError {}

/// Body of a successful bulk upload: `{ message, data: { success, failed } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkAddResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: UploadResult,
}

/// Per-student breakdown returned by the portal. Displayed as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Accepted records, in whatever summary shape the server chose
    #[serde(default)]
    pub success: Vec<serde_json::Value>,
    #[serde(default)]
    pub failed: Vec<FailedStudent>,
}

/// A record the portal refused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedStudent {
    /// Plain string or `{ firstName, lastName }`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub error: String,
}

impl FailedStudent {
    /// Name if the server sent one, else roll number.
    pub fn label(&self) -> String {
        self.name
            .as_ref()
            .and_then(name_text)
            .or_else(|| self.roll_number.clone())
            .unwrap_or_else(|| "(unknown)".to_string())
    }
}

/// Short label for an accepted-record summary: name, roll number, email, or raw JSON.
pub fn describe_student(summary: &serde_json::Value) -> String {
    if let Some(name) = summary.get("name").and_then(name_text) {
        return name;
    }
    for key in ["rollNumber", "email"] {
        if let Some(s) = summary.get(key).and_then(|v| v.as_str()) {
            return s.to_string();
        }
    }
    match summary.as_str() {
        Some(s) => s.to_string(),
        None => summary.to_string(),
    }
}

fn name_text(name: &serde_json::Value) -> Option<String> {
    if let Some(s) = name.as_str() {
        return Some(s.to_string()).filter(|s| !s.trim().is_empty());
    }
    let full = serde_json::from_value::<StudentName>(name.clone()).ok()?.full_name();
    Some(full).filter(|s| !s.is_empty())
}

impl PortalClient {
    /// Create a new client with explicit credentials.
    pub fn new(creds: AuthCredentials, timeout: Duration) -> Result<Self, PortalError> {
        if creds.token.trim().is_empty() {
            return Err(PortalError::NotAuthenticated);
        }

        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("placement/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| PortalError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: creds.api_base.trim_end_matches('/').to_string(),
            token: creds.token,
        })
    }

    /// Endpoint for adding students to a college's roster.
    pub fn bulk_students_url(&self, college_id: &str) -> String {
        format!("{}/api/colleges/{}/students/bulk", self.api_base, college_id)
    }

    /// Submit the whole batch in one request.
    pub fn bulk_add_students(
        &self,
        college_id: &str,
        students: &[NormalizedStudent],
    ) -> Result<BulkAddResponse, PortalError> {
        let url = self.bulk_students_url(college_id);
        log::debug!("POST {} ({} students)", url, students.len());

        let body = serde_json::json!({ "students": students });
        let response = self.post_json(&url, &body)?;
        response
            .json::<BulkAddResponse>()
            .map_err(|e| PortalError::Parse(e.to_string()))
    }

    /// Bind this client to one college, for use as a `StudentSink`.
    pub fn college(&self, college_id: impl Into<String>) -> CollegeRoster<'_> {
        CollegeRoster { client: self, college_id: college_id.into() }
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, PortalError> {
        let response = self.http.post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .map_err(|e| PortalError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PortalError::Http(status, server_message(&body)));
        }

        Ok(response)
    }
}

/// A college's roster endpoint.
pub struct CollegeRoster<'a> {
    client: &'a PortalClient,
    college_id: String,
}

impl StudentSink for CollegeRoster<'_> {
    fn add_students(&self, students: &[NormalizedStudent]) -> Result<BulkAddResponse, PortalError> {
        self.client.bulk_add_students(&self.college_id, students)
    }
}

/// `message` from an error body, or the generic fallback.
fn server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["message"].as_str().map(str::trim).map(String::from))
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| GENERIC_UPLOAD_FAILURE.to_string())
}
