//! Serde helpers for backend payloads whose shape drifts between responses.
//!
//! The parsing service relays model output, so the same field may arrive as
//! `null`, a bare string, a number, a list or an object. Each helper maps the
//! variants onto one Rust shape instead of failing the whole response.

use serde::de::{DeserializeOwned, Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

/// Entries that may be sent as a bare string instead of an object.
pub trait FromBareString {
    fn from_bare_string(text: String) -> Self;
}

/// `null` / number / string / list-of-strings → `Option<String>`.
/// Blank strings count as absent.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string))
}

/// `null` / `"a, b"` / `["a", 1]` → `Vec<String>`, dropping blanks.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => split_list(&s),
        Some(Value::Array(items)) => items.into_iter().filter_map(value_to_string).collect(),
        Some(other) => value_to_string(other).into_iter().collect(),
    })
}

/// `null` / object / string / list → `Vec<T>`.
pub fn entry_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + FromBareString,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(single) => vec![single],
    };

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Null => {}
            Value::String(s) if s.trim().is_empty() => {}
            Value::String(s) => entries.push(T::from_bare_string(s.trim().to_string())),
            Value::Object(_) => entries.push(serde_json::from_value(item).map_err(D::Error::custom)?),
            other => {
                if let Some(text) = value_to_string(other) {
                    entries.push(T::from_bare_string(text));
                }
            }
        }
    }
    Ok(entries)
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.into_iter().filter_map(value_to_string).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "string_list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "entry_list")]
        items: Vec<Item>,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        #[serde(default, deserialize_with = "opt_string")]
        label: Option<String>,
    }

    impl FromBareString for Item {
        fn from_bare_string(text: String) -> Self {
            Item { label: Some(text) }
        }
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let p = probe(json!({}));
        assert_eq!(p.text, None);
        assert!(p.tags.is_empty());
        assert!(p.items.is_empty());
    }

    #[test]
    fn test_nulls_are_absent() {
        let p = probe(json!({"text": null, "tags": null, "items": null}));
        assert_eq!(p.text, None);
        assert!(p.tags.is_empty());
        assert!(p.items.is_empty());
    }

    #[test]
    fn test_number_becomes_string() {
        assert_eq!(probe(json!({"text": 2019})).text.as_deref(), Some("2019"));
    }

    #[test]
    fn test_blank_string_is_absent() {
        assert_eq!(probe(json!({"text": "   "})).text, None);
    }

    #[test]
    fn test_comma_separated_tags_split() {
        let p = probe(json!({"tags": "Rust, Go ,, SQL"}));
        assert_eq!(p.tags, vec!["Rust", "Go", "SQL"]);
    }

    #[test]
    fn test_tag_list_preserves_order_and_drops_blanks() {
        let p = probe(json!({"tags": ["C++", "", null, 3]}));
        assert_eq!(p.tags, vec!["C++", "3"]);
    }

    #[test]
    fn test_single_object_becomes_one_entry() {
        let p = probe(json!({"items": {"label": "only"}}));
        assert_eq!(p.items, vec![Item { label: Some("only".into()) }]);
    }

    #[test]
    fn test_bare_strings_become_entries() {
        let p = probe(json!({"items": ["first", {"label": "second"}, "  "]}));
        assert_eq!(
            p.items,
            vec![
                Item { label: Some("first".into()) },
                Item { label: Some("second".into()) },
            ]
        );
    }
}
