use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    session::Session,
    submission::{Assignment, SubmissionDraft},
};

const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("Failed to read response body: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Server returned an error: {status}")]
    ServerError { status: u16 },

    #[error("not logged in or session expired, run `tugas login` first")]
    Unauthorized,

    #[error("unexpected response body: {0}")]
    BodyError(#[from] serde_json::Error),

    #[error("failed to update session: {0}")]
    SessionError(anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl SubmissionReceipt {
    /// Receipt id as shown to the user, without JSON quoting.
    pub fn id_label(&self) -> Option<String> {
        self.id.as_ref().map(|id| match id.as_str() {
            Some(text) => text.to_string(),
            None => id.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "access_token", alias = "accessToken")]
    token: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Blocking client for the platform's REST API.
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().timeout(TIMEOUT).build(),
        }
    }

    pub fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let request = self.agent.post(&self.url("auth/login"));
        let payload = serde_json::to_value(LoginRequest { username, password })?;
        // a rejected login leaves the current session untouched
        let body = self.send(request, Some(payload))?;
        let response: LoginResponse = decode(body)?;

        session
            .store(response.token)
            .map_err(ApiError::SessionError)?;
        tracing::info!(username, "logged in");
        Ok(())
    }

    pub fn fetch_assignment(
        &self,
        session: &mut Session,
        assignment_id: &str,
    ) -> Result<Assignment, ApiError> {
        let request = self.agent.get(&self.url(&format!("tugas/{}", assignment_id)));
        let body = self.authorized(session, request, None)?;
        decode(body)
    }

    pub fn submit(
        &self,
        session: &mut Session,
        assignment_id: &str,
        draft: &SubmissionDraft,
    ) -> Result<SubmissionReceipt, ApiError> {
        let request = self
            .agent
            .post(&self.url(&format!("tugas/{}/submissions", assignment_id)));
        let body = self.authorized(session, request, Some(serde_json::to_value(draft)?))?;
        let receipt: SubmissionReceipt = decode(body)?;

        tracing::info!(assignment_id, status = ?receipt.status, "submission accepted");
        Ok(receipt)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorized(
        &self,
        session: &mut Session,
        request: ureq::Request,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let bearer = session.bearer().ok_or(ApiError::Unauthorized)?;
        let result = self.send(request.set("Authorization", &bearer), body);

        if matches!(result, Err(ApiError::Unauthorized)) {
            tracing::warn!("backend rejected the session token, clearing it");
            session.clear().map_err(ApiError::SessionError)?;
        }
        result
    }

    fn send(&self, request: ureq::Request, body: Option<Value>) -> Result<Value, ApiError> {
        tracing::debug!(method = request.method(), url = request.url(), "api request");

        let request = request.set("Accept", "application/json");
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(status_error(code)),
            Err(other) => return Err(ApiError::HttpError(other)),
        };

        let body: Value = response.into_json()?;
        Ok(unwrap_envelope(body))
    }
}

fn status_error(code: u16) -> ApiError {
    match code {
        401 => ApiError::Unauthorized,
        status => ApiError::ServerError { status },
    }
}

/// Responses come either bare or wrapped as `{ "data": ... }`.
fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    Ok(serde_json::from_value(body)?)
}
