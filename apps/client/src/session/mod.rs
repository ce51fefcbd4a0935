//! Session Controller: owns the client state and sequences backend calls.
//!
//! Each request kind runs in its own lane (see [`Lane`]). A lane allows one
//! request in flight, tags it with a sequence token and can abort it. A new
//! file selection supersedes every lane, so a slow response for an old file
//! never lands on the new one.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tracing::{debug, info, warn};

use crate::backend::{HttpBackend, ResumeBackend};
use crate::config::Config;
use crate::errors::{BackendError, SessionError, ValidationError};
use crate::models::{MatchResult, ParsedResume, UploadedFile};
use crate::templates::TemplateId;

mod lane;
mod state;

pub use lane::Lane;
pub use state::{Phase, SessionSnapshot};

use state::Inner;

/// Cheap-to-clone handle; clones share one session.
#[derive(Clone)]
pub struct SessionController {
    shared: Arc<Shared>,
}

struct Shared {
    backend: Arc<dyn ResumeBackend>,
    request_timeout: Duration,
    inner: Mutex<Inner>,
    updates: watch::Sender<SessionSnapshot>,
}

impl SessionController {
    pub fn new(backend: Arc<dyn ResumeBackend>, request_timeout: Duration) -> Self {
        let (updates, _) = watch::channel(SessionSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                backend,
                request_timeout,
                inner: Mutex::new(Inner::default()),
                updates,
            }),
        }
    }

    /// Controller talking HTTP to the configured service.
    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        let backend = HttpBackend::from_config(config)?;
        Ok(Self::new(Arc::new(backend), config.request_timeout))
    }

    pub fn state(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Receives a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.updates.subscribe()
    }

    /// Validates and adopts a new file, clearing all results derived from the old one.
    pub fn select_file(&self, file: UploadedFile) -> Result<(), SessionError> {
        if let Err(e) = file.validate() {
            warn!("Rejected file '{}': {e}", file.name);
            return Err(e.into());
        }

        let mut inner = self.lock();
        let superseded = inner.reset_results();
        if !superseded.is_empty() {
            debug!("New file supersedes in-flight requests: {superseded:?}");
        }
        info!("Selected '{}' ({} bytes)", file.name, file.size());
        inner.file = Some(file);
        self.publish(&inner);
        Ok(())
    }

    /// Drops the current file and everything derived from it.
    pub fn clear_file(&self) {
        let mut inner = self.lock();
        inner.reset_results();
        inner.file = None;
        self.publish(&inner);
    }

    /// Sends the selected file to the parsing service.
    pub async fn process_resume(&self) -> Result<ParsedResume, SessionError> {
        let (file, ticket) = {
            let mut inner = self.lock();
            let file = inner.file.clone().ok_or(SessionError::NoFileSelected)?;
            let ticket = inner
                .begin(Lane::Process)
                .ok_or(SessionError::Busy(Lane::Process))?;
            self.publish(&inner);
            (file, ticket)
        };
        let flight = InFlight::new(self, Lane::Process, ticket.seq);

        info!("Processing '{}' ({} bytes)", file.name, file.size());
        let outcome = self
            .race(ticket.abort, self.shared.backend.process(&file))
            .await
            .ok_or(SessionError::Superseded(Lane::Process))?;

        flight
            .settle(|inner| match outcome {
                Ok(resume) => {
                    info!(
                        "Resume processed: {} skills, {} experience entries",
                        resume.skills.len(),
                        resume.experience.len()
                    );
                    inner.commit_parsed(resume.clone());
                    Ok(resume)
                }
                Err(e) => {
                    warn!("Resume processing failed: {e}");
                    inner.restore(Lane::Process);
                    Err(SessionError::Processing(e))
                }
            })
            .unwrap_or(Err(SessionError::Superseded(Lane::Process)))
    }

    /// Resubmits the selected file with a job description to the matching service.
    /// Does not require a completed `process_resume`.
    pub async fn request_match(&self, job_description: &str) -> Result<MatchResult, SessionError> {
        if job_description.trim().is_empty() {
            return Err(ValidationError::EmptyJobDescription.into());
        }

        let (file, ticket) = {
            let mut inner = self.lock();
            let file = inner.file.clone().ok_or(SessionError::NoFileSelected)?;
            let ticket = inner
                .begin(Lane::Match)
                .ok_or(SessionError::Busy(Lane::Match))?;
            self.publish(&inner);
            (file, ticket)
        };
        let flight = InFlight::new(self, Lane::Match, ticket.seq);

        info!(
            "Analyzing '{}' against a {}-character job description",
            file.name,
            job_description.chars().count()
        );
        let outcome = self
            .race(
                ticket.abort,
                self.shared.backend.analyze_match(&file, job_description),
            )
            .await
            .ok_or(SessionError::Superseded(Lane::Match))?;

        flight
            .settle(|inner| match outcome {
                Ok(result) => {
                    for (name, value) in result.out_of_range_scores() {
                        warn!("Backend reported {name}={value}, outside 0-100");
                    }
                    info!("Match analysis complete: overall {}%", result.overall_match);
                    inner.commit_match(result.clone());
                    Ok(result)
                }
                Err(e) => {
                    warn!("Match analysis failed: {e}");
                    inner.restore(Lane::Match);
                    Err(SessionError::Match(e))
                }
            })
            .unwrap_or(Err(SessionError::Superseded(Lane::Match)))
    }

    /// Asks the service for a job description tailored to the parsed resume.
    /// Leaves the session's data untouched.
    pub async fn generate_sample_job_description(&self) -> Result<String, SessionError> {
        let (resume, ticket) = {
            let mut inner = self.lock();
            let resume = inner
                .parsed_resume
                .clone()
                .ok_or(SessionError::NoParsedResume)?;
            let ticket = inner
                .begin(Lane::Sample)
                .ok_or(SessionError::Busy(Lane::Sample))?;
            self.publish(&inner);
            (resume, ticket)
        };
        let flight = InFlight::new(self, Lane::Sample, ticket.seq);

        let outcome = self
            .race(
                ticket.abort,
                self.shared.backend.generate_sample_job_description(&resume),
            )
            .await
            .ok_or(SessionError::Superseded(Lane::Sample))?;

        flight
            .settle(|_| outcome.map_err(SessionError::SampleJobDescription))
            .unwrap_or(Err(SessionError::Superseded(Lane::Sample)))
    }

    /// Picks a layout from the catalog. Purely local.
    pub fn select_template(&self, id: &str) -> Result<TemplateId, SessionError> {
        let template: TemplateId = id.parse()?;
        let mut inner = self.lock();
        inner.selected_template = Some(template);
        self.publish(&inner);
        debug!("Selected template {template}");
        Ok(template)
    }

    /// Runs a backend call bounded by the request timeout.
    /// `None` means the lane was superseded before the call finished.
    async fn race<T>(
        &self,
        abort: oneshot::Receiver<()>,
        call: impl Future<Output = Result<T, BackendError>>,
    ) -> Option<Result<T, BackendError>> {
        let limit = self.shared.request_timeout;
        tokio::select! {
            _ = abort => None,
            outcome = tokio::time::timeout(limit, call) => {
                Some(outcome.unwrap_or(Err(BackendError::Timeout(limit))))
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // state stays consistent across a panicking writer; every write is a whole-field replace
        self.shared
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.shared.updates.send_replace(inner.snapshot());
    }
}

/// Releases a lane when its request ends, including when the caller drops
/// the future mid-flight, so a busy flag is never left set.
struct InFlight<'a> {
    session: &'a SessionController,
    lane: Lane,
    seq: u64,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn new(session: &'a SessionController, lane: Lane, seq: u64) -> Self {
        Self {
            session,
            lane,
            seq,
            settled: false,
        }
    }

    /// Applies the outcome if this request still owns its lane.
    fn settle<T>(mut self, apply: impl FnOnce(&mut Inner) -> T) -> Option<T> {
        self.settled = true;
        let mut inner = self.session.lock();
        if !inner.lane_mut(self.lane).finish(self.seq) {
            debug!("Discarding stale {} response", self.lane);
            return None;
        }
        let out = apply(&mut *inner);
        self.session.publish(&inner);
        Some(out)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = self.session.lock();
        if inner.lane_mut(self.lane).finish(self.seq) {
            warn!("{} request dropped before completion", self.lane);
            inner.restore(self.lane);
            self.session.publish(&inner);
        }
    }
}
