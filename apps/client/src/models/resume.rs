use serde::{Deserialize, Serialize};

use crate::models::lenient::{entry_list, opt_string, string_list, FromBareString};

/// Structured resume returned by the parsing service.
///
/// Every field is optional. A response that omits all of them is still a
/// valid (empty) resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResumePayload")]
pub struct ParsedResume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExperienceWire")]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Free-form period when the backend does not split start and end.
    pub duration: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "EducationWire")]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProjectWire")]
pub struct ProjectEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Vec<String>,
}

// Alternate spellings are separate fields since one object may carry a key
// and its alias together. The canonical key wins, then aliases in order.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExperienceWire {
    #[serde(deserialize_with = "opt_string")]
    title: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    experience_title: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    role: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    company: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    start_date: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    end_date: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    duration: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    description: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    experience_detail: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    details: Option<String>,
}

impl From<ExperienceWire> for ExperienceEntry {
    fn from(w: ExperienceWire) -> Self {
        ExperienceEntry {
            title: w.title.or(w.experience_title).or(w.role),
            company: w.company,
            start_date: w.start_date,
            end_date: w.end_date,
            duration: w.duration,
            description: w.description.or(w.experience_detail).or(w.details),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EducationWire {
    #[serde(deserialize_with = "opt_string")]
    degree: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    institution: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    university: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    school: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    graduation_year: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    year: Option<String>,
}

impl From<EducationWire> for EducationEntry {
    fn from(w: EducationWire) -> Self {
        EducationEntry {
            degree: w.degree,
            institution: w.institution.or(w.university).or(w.school),
            graduation_year: w.graduation_year.or(w.year),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectWire {
    #[serde(deserialize_with = "opt_string")]
    title: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    project_title: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    name: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    description: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    project_detail: Option<String>,
    #[serde(deserialize_with = "string_list")]
    technologies: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    tech_stack: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    project_technologies: Vec<String>,
    #[serde(rename = "project technologies", deserialize_with = "string_list")]
    project_technologies_spaced: Vec<String>,
}

impl From<ProjectWire> for ProjectEntry {
    fn from(w: ProjectWire) -> Self {
        ProjectEntry {
            title: w.title.or(w.project_title).or(w.name),
            description: w.description.or(w.project_detail),
            technologies: first_non_empty([
                w.technologies,
                w.tech_stack,
                w.project_technologies,
                w.project_technologies_spaced,
            ]),
        }
    }
}

fn first_non_empty<T, const N: usize>(candidates: [Vec<T>; N]) -> Vec<T> {
    candidates
        .into_iter()
        .find(|list| !list.is_empty())
        .unwrap_or_default()
}

impl FromBareString for ExperienceEntry {
    fn from_bare_string(text: String) -> Self {
        ExperienceEntry {
            description: Some(text),
            ..Default::default()
        }
    }
}

impl FromBareString for EducationEntry {
    fn from_bare_string(text: String) -> Self {
        EducationEntry {
            degree: Some(text),
            ..Default::default()
        }
    }
}

impl FromBareString for ProjectEntry {
    fn from_bare_string(text: String) -> Self {
        ProjectEntry {
            title: Some(text),
            ..Default::default()
        }
    }
}

impl ParsedResume {
    /// True when the service extracted nothing at all.
    pub fn is_empty(&self) -> bool {
        *self == ParsedResume::default()
    }
}

/// Wire shape. Besides the nested lists, the service sometimes returns a
/// single experience/education/project flattened into top-level keys.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResumePayload {
    #[serde(deserialize_with = "opt_string")]
    name: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    email: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    phone: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    address: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    linkedin: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    portfolio: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    summary: Option<String>,
    #[serde(deserialize_with = "string_list")]
    skills: Vec<String>,
    #[serde(deserialize_with = "entry_list")]
    experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "entry_list")]
    education: Vec<EducationEntry>,
    #[serde(deserialize_with = "entry_list")]
    projects: Vec<ProjectEntry>,
    #[serde(rename = "Projects", deserialize_with = "entry_list")]
    projects_capitalised: Vec<ProjectEntry>,

    #[serde(deserialize_with = "opt_string")]
    experience_title: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    company: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    start_date: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    end_date: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    experience_detail: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    degree: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    university: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    graduation_year: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    project_title: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    project_detail: Option<String>,
    #[serde(deserialize_with = "string_list")]
    project_technologies: Vec<String>,
    #[serde(rename = "project technologies", deserialize_with = "string_list")]
    project_technologies_spaced: Vec<String>,
}

impl From<ResumePayload> for ParsedResume {
    fn from(p: ResumePayload) -> Self {
        let mut experience = p.experience;
        if experience.is_empty() {
            let flat = ExperienceEntry {
                title: p.experience_title,
                company: p.company,
                start_date: p.start_date,
                end_date: p.end_date,
                duration: None,
                description: p.experience_detail,
            };
            if flat != ExperienceEntry::default() {
                experience.push(flat);
            }
        }

        let mut education = p.education;
        if education.is_empty() {
            let flat = EducationEntry {
                degree: p.degree,
                institution: p.university,
                graduation_year: p.graduation_year,
            };
            if flat != EducationEntry::default() {
                education.push(flat);
            }
        }

        let mut projects = first_non_empty([p.projects, p.projects_capitalised]);
        if projects.is_empty() {
            let flat = ProjectEntry {
                title: p.project_title,
                description: p.project_detail,
                technologies: first_non_empty([
                    p.project_technologies,
                    p.project_technologies_spaced,
                ]),
            };
            if flat != ProjectEntry::default() {
                projects.push(flat);
            }
        }

        ParsedResume {
            name: p.name,
            email: p.email,
            phone: p.phone,
            address: p.address,
            linkedin: p.linkedin,
            portfolio: p.portfolio,
            summary: p.summary,
            skills: p.skills,
            experience,
            education,
            projects,
        }
    }
}
