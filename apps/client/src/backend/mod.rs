//! Backend: the single seam between the session and the parsing/matching service.
//!
//! The controller only talks to `dyn ResumeBackend`; `HttpBackend` is the
//! production implementation, tests substitute scripted fakes.

use async_trait::async_trait;

use crate::errors::BackendError;
use crate::models::{MatchResult, ParsedResume, UploadedFile};

pub mod http;

pub use http::HttpBackend;

/// Multipart field carrying the resume document.
pub const FIELD_DOCUMENT: &str = "pdf_doc";
/// Multipart field carrying the pasted job description.
pub const FIELD_JOB_DESCRIPTION: &str = "job_description";

#[async_trait]
pub trait ResumeBackend: Send + Sync {
    /// Extracts structured fields from the document.
    async fn process(&self, file: &UploadedFile) -> Result<ParsedResume, BackendError>;

    /// Scores the document against a job description.
    async fn analyze_match(
        &self,
        file: &UploadedFile,
        job_description: &str,
    ) -> Result<MatchResult, BackendError>;

    /// Asks the service to write a job description that fits the resume.
    async fn generate_sample_job_description(
        &self,
        resume: &ParsedResume,
    ) -> Result<String, BackendError>;
}
