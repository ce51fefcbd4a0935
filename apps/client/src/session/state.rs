use crate::models::{FileInfo, MatchResult, ParsedResume, UploadedFile};
use crate::session::lane::{Lane, LaneSlot, Ticket};
use crate::templates::TemplateId;

/// Where the session stands, as a view would describe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FileSelected,
    Processing,
    Parsed,
    Matching,
    Matched,
}

/// Read-only view of the session handed to observers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub file: Option<FileInfo>,
    pub is_processing: bool,
    pub is_analyzing: bool,
    pub is_generating_sample: bool,
    pub parsed_resume: Option<ParsedResume>,
    pub match_result: Option<MatchResult>,
    pub selected_template: Option<TemplateId>,
}

impl SessionSnapshot {
    /// Matching outranks processing when both lanes are busy.
    pub fn phase(&self) -> Phase {
        if self.file.is_none() {
            Phase::Idle
        } else if self.is_analyzing {
            Phase::Matching
        } else if self.is_processing {
            Phase::Processing
        } else if self.match_result.is_some() {
            Phase::Matched
        } else if self.parsed_resume.is_some() {
            Phase::Parsed
        } else {
            Phase::FileSelected
        }
    }
}

/// Owned session state. Guarded by the controller's mutex.
#[derive(Debug, Default)]
pub(crate) struct Inner {
    pub file: Option<UploadedFile>,
    pub parsed_resume: Option<ParsedResume>,
    pub match_result: Option<MatchResult>,
    pub selected_template: Option<TemplateId>,
    /// Results cleared when a request started, restored if it fails.
    parsed_backup: Option<ParsedResume>,
    match_backup: Option<MatchResult>,
    process: LaneSlot,
    matching: LaneSlot,
    sample: LaneSlot,
}

impl Inner {
    pub fn lane_mut(&mut self, lane: Lane) -> &mut LaneSlot {
        match lane {
            Lane::Process => &mut self.process,
            Lane::Match => &mut self.matching,
            Lane::Sample => &mut self.sample,
        }
    }

    /// Claims `lane` and clears the result it is about to replace.
    pub fn begin(&mut self, lane: Lane) -> Option<Ticket> {
        let ticket = self.lane_mut(lane).begin()?;
        match lane {
            Lane::Process => self.parsed_backup = self.parsed_resume.take(),
            Lane::Match => self.match_backup = self.match_result.take(),
            Lane::Sample => {}
        }
        Some(ticket)
    }

    /// Puts back the result that was cleared when `lane` started.
    pub fn restore(&mut self, lane: Lane) {
        match lane {
            Lane::Process => self.parsed_resume = self.parsed_backup.take(),
            Lane::Match => self.match_result = self.match_backup.take(),
            Lane::Sample => {}
        }
    }

    pub fn commit_parsed(&mut self, resume: ParsedResume) {
        self.parsed_backup = None;
        self.parsed_resume = Some(resume);
    }

    pub fn commit_match(&mut self, result: MatchResult) {
        self.match_backup = None;
        self.match_result = Some(result);
    }

    /// Cuts off every in-flight request and drops all file-derived results.
    /// Returns the lanes that had a request in flight.
    pub fn reset_results(&mut self) -> Vec<Lane> {
        let superseded = [Lane::Process, Lane::Match, Lane::Sample]
            .into_iter()
            .filter(|&lane| self.lane_mut(lane).supersede())
            .collect();
        self.parsed_backup = None;
        self.match_backup = None;
        self.parsed_resume = None;
        self.match_result = None;
        superseded
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            file: self.file.as_ref().map(UploadedFile::info),
            is_processing: self.process.is_busy(),
            is_analyzing: self.matching.is_busy(),
            is_generating_sample: self.sample.is_busy(),
            parsed_resume: self.parsed_resume.clone(),
            match_result: self.match_result.clone(),
            selected_template: self.selected_template,
        }
    }
}
