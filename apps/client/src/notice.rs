//! Transient notifications a view shows after an operation finishes.

use crate::errors::{SessionError, ValidationError};
use crate::templates::TemplateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
}

impl Notice {
    fn success(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            level: NoticeLevel::Success,
        }
    }

    fn error(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            level: NoticeLevel::Error,
        }
    }

    pub fn resume_processed() -> Self {
        Self::success("Resume processed", "Successfully extracted resume information")
    }

    pub fn analysis_complete() -> Self {
        Self::success(
            "Analysis complete",
            "Resume has been analyzed against the job description",
        )
    }

    pub fn template_selected(id: TemplateId) -> Self {
        Self::success(
            "Template selected",
            format!("You've selected the {} template", id.template().name),
        )
    }

    /// `None` for outcomes the user does not need to hear about
    /// (a busy lane or a request replaced by a newer selection).
    pub fn from_error(err: &SessionError) -> Option<Self> {
        let notice = match err {
            SessionError::Validation(v) => match v {
                ValidationError::UnsupportedFileType { .. } => {
                    Self::error("Invalid file type", "Please upload a PDF or Word document")
                }
                ValidationError::FileTooLarge { .. } => {
                    Self::error("File too large", "Please upload a file smaller than 10MB")
                }
                ValidationError::EmptyJobDescription => {
                    Self::error("No job description", "Paste a job description to analyze")
                }
                ValidationError::UnknownTemplate(_) => {
                    Self::error("Unknown template", v.to_string())
                }
            },
            SessionError::NoFileSelected => {
                Self::error("No file selected", "Please upload a resume first")
            }
            SessionError::NoParsedResume => {
                Self::error("No resume data", "Please process a resume first")
            }
            SessionError::Processing(_) => Self::error(
                "Failed to process resume",
                "Please try again or check your backend.",
            ),
            SessionError::Match(_) => Self::error(
                "Failed to analyze match",
                "Please try again or check your backend.",
            ),
            SessionError::SampleJobDescription(_) => Self::error(
                "Failed to generate job description",
                "Error generating sample job description.",
            ),
            SessionError::Busy(_) | SessionError::Superseded(_) => return None,
        };
        Some(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BackendError;
    use crate::session::Lane;

    #[test]
    fn test_template_notice_uses_display_name() {
        let notice = Notice::template_selected(TemplateId::Modern);
        assert_eq!(notice.description, "You've selected the Modern template");
        assert_eq!(notice.level, NoticeLevel::Success);
    }

    #[test]
    fn test_validation_notices() {
        let notice = Notice::from_error(&SessionError::Validation(
            ValidationError::UnsupportedFileType {
                content_type: "image/png".into(),
            },
        ))
        .unwrap();
        assert_eq!(notice.title, "Invalid file type");
        assert_eq!(notice.level, NoticeLevel::Error);

        let notice =
            Notice::from_error(&ValidationError::UnknownTemplate("bogus".into()).into()).unwrap();
        assert_eq!(notice.description, "Unknown template 'bogus'");
    }

    #[test]
    fn test_backend_failures_are_generic() {
        let notice = Notice::from_error(&SessionError::Processing(BackendError::Timeout(
            std::time::Duration::from_secs(1),
        )))
        .unwrap();
        assert_eq!(notice.title, "Failed to process resume");
        assert_eq!(notice.description, "Please try again or check your backend.");
    }

    #[test]
    fn test_silent_outcomes() {
        assert!(Notice::from_error(&SessionError::Busy(Lane::Match)).is_none());
        assert!(Notice::from_error(&SessionError::Superseded(Lane::Process)).is_none());
    }
}
