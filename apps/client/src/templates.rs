//! Static catalog of resume layouts the user can pick from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Modern,
    Classic,
    Creative,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub thumbnail: &'static str,
}

pub static CATALOG: [Template; 4] = [
    Template {
        id: TemplateId::Modern,
        name: "Modern",
        description: "Clean and professional design with a modern touch",
        thumbnail: "/placeholder.svg",
    },
    Template {
        id: TemplateId::Classic,
        name: "Classic",
        description: "Traditional resume layout for conservative industries",
        thumbnail: "/placeholder.svg",
    },
    Template {
        id: TemplateId::Creative,
        name: "Creative",
        description: "Bold design for standing out in creative fields",
        thumbnail: "/placeholder.svg",
    },
    Template {
        id: TemplateId::Minimal,
        name: "Minimal",
        description: "Simple and elegant design with focus on content",
        thumbnail: "/placeholder.svg",
    },
];

impl TemplateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Creative => "creative",
            TemplateId::Minimal => "minimal",
        }
    }

    pub fn template(&self) -> &'static Template {
        // CATALOG is ordered by variant
        &CATALOG[*self as usize]
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .map(|t| t.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownTemplate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_round_trip_through_lookup() {
        for template in &CATALOG {
            assert_eq!(template.id.template(), template);
            assert_eq!(template.id.as_str().parse::<TemplateId>().unwrap(), template.id);
        }
    }

    #[test]
    fn test_unknown_id_rejected() {
        assert_eq!(
            "bogus".parse::<TemplateId>().unwrap_err(),
            ValidationError::UnknownTemplate("bogus".to_string())
        );
    }

    #[test]
    fn test_ids_are_case_sensitive() {
        assert!("Modern".parse::<TemplateId>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TemplateId::Creative.template().name, "Creative");
        assert_eq!(TemplateId::Minimal.to_string(), "minimal");
    }
}
