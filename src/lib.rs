//! # Article Normalizer
//!
//! Normalizes heterogeneous JSON records describing published articles into a
//! single in-memory collection, and writes that collection back out as JSON.
//!
//! ## Architecture
//!
//! The library is organized into two modules:
//!
//! - [`models`]: Core data structures (Link, Article, ArticleCollection)
//! - [`config`]: Configuration management
//!
//! ## Example
//!
//! ```rust
//! use article_normalizer::ArticleCollection;
//! use serde_json::json;
//!
//! let data = json!({
//!     "a1": {"title": "T", "sciencealert": "http://x"}
//! });
//! let collection = ArticleCollection::from_dict(&data).unwrap();
//! assert_eq!(collection.articles()[0].url.as_deref(), Some("http://x"));
//! ```

pub mod config;
pub mod models;

// Re-export commonly used types
pub use models::{Article, ArticleCollection, CollectionError, Link};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
