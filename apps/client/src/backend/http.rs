use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{ResumeBackend, FIELD_DOCUMENT, FIELD_JOB_DESCRIPTION};
use crate::config::Config;
use crate::errors::BackendError;
use crate::models::{MatchResult, ParsedResume, UploadedFile};

const PROCESS_PATH: &str = "/process";
const MATCH_PATH: &str = "/match";
const SAMPLE_JD_PATH: &str = "/generate-sample-jd";

#[derive(Debug, Serialize)]
struct SampleJdRequest<'a> {
    resume: &'a ParsedResume,
}

#[derive(Debug, Deserialize)]
struct SampleJdResponse {
    job_description: Option<String>,
}

/// reqwest-backed client for the parsing/matching service.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn document_part(file: &UploadedFile) -> Result<Part, BackendError> {
        let body = reqwest::Body::from(file.bytes.clone());
        let part = Part::stream_with_length(body, file.size())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        Ok(part)
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, BackendError> {
        let url = self.url(path);
        debug!("POST {url} (multipart)");
        let response = self.client.post(&url).multipart(form).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl ResumeBackend for HttpBackend {
    async fn process(&self, file: &UploadedFile) -> Result<ParsedResume, BackendError> {
        let form = Form::new().part(FIELD_DOCUMENT, Self::document_part(file)?);
        self.post_form(PROCESS_PATH, form).await
    }

    async fn analyze_match(
        &self,
        file: &UploadedFile,
        job_description: &str,
    ) -> Result<MatchResult, BackendError> {
        let form = Form::new()
            .part(FIELD_DOCUMENT, Self::document_part(file)?)
            .text(FIELD_JOB_DESCRIPTION, job_description.to_string());
        self.post_form(MATCH_PATH, form).await
    }

    async fn generate_sample_job_description(
        &self,
        resume: &ParsedResume,
    ) -> Result<String, BackendError> {
        let url = self.url(SAMPLE_JD_PATH);
        debug!("POST {url} (json)");
        let response = self
            .client
            .post(&url)
            .json(&SampleJdRequest { resume })
            .send()
            .await?;

        let body: SampleJdResponse = read_json(response).await?;
        body.job_description
            .filter(|jd| !jd.trim().is_empty())
            .ok_or_else(|| BackendError::Malformed("response has no job_description".to_string()))
    }
}

/// Checks the status, unwraps `{"error": ...}` envelopes and decodes the body.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = error_message(&body).unwrap_or(body);
        warn!("Backend returned {status}: {message}");
        return Err(BackendError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let value: Value = serde_json::from_str(&body)?;
    if let Some(message) = envelope_error(&value) {
        warn!("Backend reported an error with status {status}: {message}");
        return Err(BackendError::Rejected(message));
    }

    Ok(serde_json::from_value(value)?)
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(envelope_error)
}

/// `{"error": "msg"}` or `{"error": "msg", "message": "detail"}`.
fn envelope_error(value: &Value) -> Option<String> {
    let error = value.get("error")?.as_str()?;
    match value.get("message").and_then(Value::as_str) {
        Some(detail) if !detail.is_empty() => Some(format!("{error}: {detail}")),
        _ => Some(error.to_string()),
    }
}
