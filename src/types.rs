use serde::{Deserialize, Serialize};

/// An article held by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
}

impl Article {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into() }
    }

    /// Overlays the fields present in `changes`. The id never changes.
    pub fn apply(mut self, changes: ArticleChanges) -> Self {
        if let Some(title) = changes.title {
            self.title = title;
        }
        self
    }
}

// Request bodies. Neither type has an `id` field: serde skips unknown keys,
// so a client-supplied id is dropped on parse and the store stays the only
// source of ids.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewArticle {
    #[serde(default)]
    pub title: String,
}

impl From<NewArticle> for Article {
    fn from(new: NewArticle) -> Self {
        Article { id: String::new(), title: new.title }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleChanges {
    #[serde(default)]
    pub title: Option<String>,
}

/// A tax professional as reported by the external relational store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPro {
    pub efin: String,
    pub company_name: String,
    pub product_count: i64,
    pub premier_partner: bool,
}
