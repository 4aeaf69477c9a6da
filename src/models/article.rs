//! Article model representing one published article and the links it cites.

use super::error::{json_type_name, CollectionError, Result};
use super::Link;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Candidate keys for the article URL, in priority order.
///
/// Older scrapes stored the article URL under `sciencealert`.
const URL_KEYS: &[&str] = &["url", "sciencealert"];

/// Candidate keys for nested links. `paperlinks` is what [`Article`] serializes to.
const LINK_KEYS: &[&str] = &["urls", "paperlinks"];

/// An article with its metadata and reference links
///
/// Every field is optional. List fields are plain `Vec`s, so an article read
/// from a record that lacks them holds empty lists rather than `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article title
    pub title: Option<String>,

    /// Canonical article URL
    pub url: Option<String>,

    /// Author name(s) as written by the source
    pub author: Option<String>,

    /// Reference URLs that resolve to a DOI
    #[serde(default)]
    pub doi_urls: Vec<String>,

    /// Reference URLs without a DOI
    #[serde(default)]
    pub non_doi_urls: Vec<String>,

    /// Position of the article in its source listing
    pub index: Option<i64>,

    /// Reference URLs paired with their DOIs
    #[serde(default)]
    pub paperlinks: Vec<Link>,

    /// Number of references
    pub count: Option<i64>,

    /// Raw DOI identifiers
    #[serde(default)]
    pub dois: Vec<String>,
}

impl Article {
    /// Start building an article
    pub fn builder() -> ArticleBuilder {
        ArticleBuilder::default()
    }

    /// Build an article from one per-article JSON object.
    ///
    /// Missing keys, `null`s and values of the wrong type all fall back to the
    /// field default. A record that is not a JSON object fails with
    /// [`CollectionError::UnsupportedRecord`].
    pub fn from_value(data: &Value) -> Result<Self> {
        if !data.is_object() {
            return Err(CollectionError::UnsupportedRecord(
                json_type_name(data).to_string(),
            ));
        }

        let paperlinks = first_present(data, LINK_KEYS, Value::as_array)
            .map(|urls| urls.iter().map(Link::from_value).collect())
            .unwrap_or_default();

        Ok(Self {
            title: string_field(data, &["title"]),
            url: string_field(data, URL_KEYS),
            author: string_field(data, &["author"]),
            doi_urls: string_list(data, "doi_urls"),
            non_doi_urls: string_list(data, "non_doi_urls"),
            index: integer_field(data, "index"),
            paperlinks,
            count: integer_field(data, "count"),
            dois: string_list(data, "dois"),
        })
    }

    /// Returns true if the article has any nested links
    pub fn has_links(&self) -> bool {
        !self.paperlinks.is_empty()
    }

    /// All DOIs known for this article: `dois` first, then those on links.
    pub fn all_dois(&self) -> Vec<&str> {
        self.dois
            .iter()
            .map(String::as_str)
            .chain(self.paperlinks.iter().filter_map(|l| l.doi.as_deref()))
            .collect()
    }
}

/// Return the first candidate key whose value converts with `extract`.
fn first_present<'a, T>(
    data: &'a Value,
    keys: &[&str],
    extract: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    keys.iter().find_map(|key| data.get(*key).and_then(&extract))
}

fn string_field(data: &Value, keys: &[&str]) -> Option<String> {
    first_present(data, keys, Value::as_str).map(str::to_string)
}

fn string_list(data: &Value, key: &str) -> Vec<String> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// Indices were sometimes written as strings ("3") or floats (3.0) by older tooling.
fn integer_field(data: &Value, key: &str) -> Option<i64> {
    match data.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Builder for constructing Article objects
#[derive(Debug, Clone, Default)]
pub struct ArticleBuilder {
    article: Article,
}

impl ArticleBuilder {
    /// Set title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.article.title = Some(title.into());
        self
    }

    /// Set canonical URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.article.url = Some(url.into());
        self
    }

    /// Set author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.article.author = Some(author.into());
        self
    }

    /// Set index
    pub fn index(mut self, index: i64) -> Self {
        self.article.index = Some(index);
        self
    }

    /// Set reference count
    pub fn count(mut self, count: i64) -> Self {
        self.article.count = Some(count);
        self
    }

    /// Add a DOI-bearing URL
    pub fn doi_url(mut self, url: impl Into<String>) -> Self {
        self.article.doi_urls.push(url.into());
        self
    }

    /// Add a URL without a DOI
    pub fn non_doi_url(mut self, url: impl Into<String>) -> Self {
        self.article.non_doi_urls.push(url.into());
        self
    }

    /// Add a raw DOI
    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        self.article.dois.push(doi.into());
        self
    }

    /// Add a nested link
    pub fn link(mut self, link: Link) -> Self {
        self.article.paperlinks.push(link);
        self
    }

    /// Build the Article
    pub fn build(self) -> Article {
        self.article
    }
}
