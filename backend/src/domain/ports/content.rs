//! Driving port for the static content catalogue.

use async_trait::async_trait;

use crate::domain::{Article, Error, HealthTip};

/// Domain use-case port for editorial content reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentCatalogue: Send + Sync {
    /// Every seeded article.
    async fn list_articles(&self) -> Result<Vec<Article>, Error>;

    /// One article by id; `NotFound` when absent.
    async fn get_article(&self, id: &str) -> Result<Article, Error>;

    /// Every seeded health tip.
    async fn list_health_tips(&self) -> Result<Vec<HealthTip>, Error>;
}
