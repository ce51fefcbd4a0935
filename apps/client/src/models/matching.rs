use serde::de::{Deserializer, Error};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::lenient::string_list;

/// Score breakdown returned by the matching service.
///
/// Percentages are passed through exactly as received; values outside
/// 0-100 are not clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(deserialize_with = "percentage")]
    pub overall_match: f64,
    #[serde(deserialize_with = "percentage")]
    pub skills_match: f64,
    #[serde(deserialize_with = "percentage")]
    pub experience_match: f64,
    #[serde(deserialize_with = "percentage")]
    pub education_match: f64,
    #[serde(default, deserialize_with = "string_list")]
    pub missing_keywords: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub recommended_improvements: Vec<String>,
}

/// Display band for a percentage: ≥80 strong, ≥60 fair, otherwise weak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchBand {
    Strong,
    Fair,
    Weak,
}

impl MatchBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            MatchBand::Strong
        } else if score >= 60.0 {
            MatchBand::Fair
        } else {
            MatchBand::Weak
        }
    }
}

impl MatchResult {
    /// Named scores in display order.
    pub fn scores(&self) -> [(&'static str, f64); 4] {
        [
            ("overallMatch", self.overall_match),
            ("skillsMatch", self.skills_match),
            ("experienceMatch", self.experience_match),
            ("educationMatch", self.education_match),
        ]
    }

    /// Scores the service reported outside 0-100.
    pub fn out_of_range_scores(&self) -> Vec<(&'static str, f64)> {
        self.scores()
            .into_iter()
            .filter(|(_, v)| !(0.0..=100.0).contains(v))
            .collect()
    }

    pub fn overall_band(&self) -> MatchBand {
        MatchBand::for_score(self.overall_match)
    }
}

/// Accepts `78`, `78.5`, `"78"` or `"78%"`.
fn percentage<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom("percentage is not representable as f64")),
        Value::String(s) => {
            let trimmed = s.trim().trim_end_matches('%').trim();
            trimmed
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("invalid percentage '{s}'")))
        }
        other => Err(D::Error::custom(format!(
            "expected a percentage, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_copied_verbatim() {
        let result: MatchResult = serde_json::from_value(json!({
            "overallMatch": 78,
            "skillsMatch": 85,
            "experienceMatch": 70,
            "educationMatch": 80,
            "missingKeywords": ["GraphQL"],
            "recommendedImprovements": []
        }))
        .unwrap();

        assert_eq!(result.overall_match, 78.0);
        assert_eq!(result.skills_match, 85.0);
        assert_eq!(result.experience_match, 70.0);
        assert_eq!(result.education_match, 80.0);
        assert_eq!(result.missing_keywords, vec!["GraphQL"]);
        assert!(result.recommended_improvements.is_empty());
    }

    #[test]
    fn test_string_percentages() {
        let result: MatchResult = serde_json::from_value(json!({
            "overallMatch": "64%",
            "skillsMatch": "70",
            "experienceMatch": 55.5,
            "educationMatch": 90
        }))
        .unwrap();
        assert_eq!(result.overall_match, 64.0);
        assert_eq!(result.skills_match, 70.0);
        assert_eq!(result.experience_match, 55.5);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_missing_score_is_an_error() {
        let parsed = serde_json::from_value::<MatchResult>(json!({
            "overallMatch": 50,
            "skillsMatch": 50,
            "experienceMatch": 50
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let result: MatchResult = serde_json::from_value(json!({
            "overallMatch": 120,
            "skillsMatch": -5,
            "experienceMatch": 100,
            "educationMatch": 0
        }))
        .unwrap();
        assert_eq!(result.overall_match, 120.0);
        assert_eq!(
            result.out_of_range_scores(),
            vec![("overallMatch", 120.0), ("skillsMatch", -5.0)]
        );
    }

    #[test]
    fn test_bands() {
        assert_eq!(MatchBand::for_score(80.0), MatchBand::Strong);
        assert_eq!(MatchBand::for_score(79.9), MatchBand::Fair);
        assert_eq!(MatchBand::for_score(60.0), MatchBand::Fair);
        assert_eq!(MatchBand::for_score(12.0), MatchBand::Weak);
    }
}
