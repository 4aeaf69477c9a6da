//! Core data models for articles, their links, and article collections.

mod article;
mod collection;
mod error;
mod link;

pub use article::{Article, ArticleBuilder};
pub use collection::ArticleCollection;
pub use error::{CollectionError, Result};
pub use link::Link;
