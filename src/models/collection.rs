//! Article collection: normalization from, and reconstruction to, JSON.

use super::error::{json_type_name, CollectionError, Result};
use super::Article;
use serde_json::{json, Map, Value};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// An ordered collection of articles
///
/// Order is the order records appeared in the source list, or the iteration
/// order of the source object. The collection is not synchronized; share it
/// across tasks only behind your own lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleCollection {
    articles: Vec<Article>,
}

impl ArticleCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing list of articles
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// Append an article
    pub fn add_article(&mut self, article: Article) {
        self.articles.push(article);
    }

    /// The articles, in order
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Iterate over the articles
    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.articles.iter()
    }

    /// Number of articles
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Returns true if the collection holds no articles
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Consume the collection, returning its articles
    pub fn into_articles(self) -> Vec<Article> {
        self.articles
    }

    /// Normalize a JSON value into a collection.
    ///
    /// Accepts either a list of article records or an object whose values are
    /// article records. Object keys are not kept. Any other JSON value fails
    /// with [`CollectionError::UnsupportedShape`], and a record that is not an
    /// object fails with [`CollectionError::UnsupportedRecord`].
    pub fn from_dict(data: &Value) -> Result<Self> {
        let records: Box<dyn Iterator<Item = &Value> + '_> = match data {
            Value::Object(map) => Box::new(map.values()),
            Value::Array(items) => Box::new(items.iter()),
            other => {
                return Err(CollectionError::UnsupportedShape(
                    json_type_name(other).to_string(),
                ))
            }
        };

        records
            .map(Article::from_value)
            .collect::<Result<Vec<_>>>()
            .map(Self::with_articles)
    }

    /// Reconstruct the collection as `{"articles": [...]}`.
    ///
    /// Every field of every article is written; absent scalars become `null`
    /// and empty lists `[]`.
    pub fn to_dict(&self) -> Value {
        json!({ "articles": self.articles })
    }

    /// Parse JSON text and normalize it.
    ///
    /// Text written by [`to_json_string`](Self::to_json_string) is read back
    /// through its `"articles"` list, so saved collections load unchanged.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let data: Value = serde_json::from_str(text)?;
        Self::from_dict(saved_articles(&data).unwrap_or(&data))
    }

    /// Render [`to_dict`](Self::to_dict) as JSON text with 2-space indentation
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_dict())?)
    }

    /// Read and normalize a JSON file.
    ///
    /// The file must be UTF-8; anything else surfaces as an IO error.
    pub async fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = {
            let mut file = tokio::fs::File::open(path).await?;
            let mut text = String::new();
            file.read_to_string(&mut text).await?;
            text
        };

        let collection = Self::from_json_str(&text)?;
        tracing::debug!(
            "Loaded {} articles from {}",
            collection.len(),
            path.display()
        );
        Ok(collection)
    }

    /// Write the collection to a file, replacing its contents.
    ///
    /// The JSON text is fully rendered before the file is opened. A failure
    /// part way through the write leaves a partial file behind.
    pub async fn to_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_json_string()?;

        let mut file = tokio::fs::File::create(path).await?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!("Saved {} articles to {}", self.len(), path.display());
        Ok(())
    }

    /// Number articles sequentially in collection order, starting at `start`
    pub fn reindex(&mut self, start: i64) {
        for (article, index) in self.articles.iter_mut().zip(start..) {
            article.index = Some(index);
        }
    }

    /// Key each article by its index.
    ///
    /// Articles without an index are keyed by their position. When two
    /// articles share a key the later one wins.
    pub fn to_indexed_dict(&self) -> Value {
        let mut map = Map::with_capacity(self.articles.len());
        for (position, article) in self.articles.iter().enumerate() {
            let key = article
                .index
                .map_or_else(|| position.to_string(), |index| index.to_string());
            map.insert(key, json!(article));
        }
        Value::Object(map)
    }
}

impl FromIterator<Article> for ArticleCollection {
    fn from_iter<I: IntoIterator<Item = Article>>(iter: I) -> Self {
        Self::with_articles(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ArticleCollection {
    type Item = &'a Article;
    type IntoIter = std::slice::Iter<'a, Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.iter()
    }
}

impl IntoIterator for ArticleCollection {
    type Item = Article;
    type IntoIter = std::vec::IntoIter<Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.into_iter()
    }
}

/// The article list of a `{"articles": [...]}` document, if `data` is one
fn saved_articles(data: &Value) -> Option<&Value> {
    let map = data.as_object().filter(|map| map.len() == 1)?;
    map.get("articles").filter(|articles| articles.is_array())
}
