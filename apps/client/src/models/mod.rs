pub mod lenient;
pub mod matching;
pub mod resume;
pub mod upload;

pub use matching::{MatchBand, MatchResult};
pub use resume::{EducationEntry, ExperienceEntry, ParsedResume, ProjectEntry};
pub use upload::{FileInfo, UploadedFile};
