//! Link model: one reference URL, optionally paired with a DOI.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A reference URL found in an article, with its DOI when one is known.
///
/// Either side may be missing; a link with neither is still a valid value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// The referenced URL
    pub paperlink: Option<String>,

    /// Digital Object Identifier of the referenced work
    pub doi: Option<String>,
}

impl Link {
    /// Create a link from its two optional parts
    pub fn new(paperlink: Option<String>, doi: Option<String>) -> Self {
        Self { paperlink, doi }
    }

    /// Read a link from one element of an article's `urls` list.
    ///
    /// Non-object elements and non-string sub-fields resolve to `None`.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            paperlink: field("paperlink"),
            doi: field("doi"),
        }
    }

    /// Returns true if the link carries a DOI
    pub fn has_doi(&self) -> bool {
        self.doi.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_full() {
        let link = Link::from_value(&json!({"paperlink": "http://y", "doi": "10.1/z"}));
        assert_eq!(link.paperlink.as_deref(), Some("http://y"));
        assert_eq!(link.doi.as_deref(), Some("10.1/z"));
        assert!(link.has_doi());
    }

    #[test]
    fn test_from_value_partial_and_garbage() {
        let link = Link::from_value(&json!({"paperlink": "http://y", "doi": null}));
        assert_eq!(link, Link::new(Some("http://y".to_string()), None));

        assert_eq!(Link::from_value(&json!("http://y")), Link::default());
        assert_eq!(Link::from_value(&json!({"doi": 42})), Link::default());
    }

    #[test]
    fn test_serializes_nulls() {
        let value = serde_json::to_value(Link::default()).unwrap();
        assert_eq!(value, json!({"paperlink": null, "doi": null}));
    }
}
