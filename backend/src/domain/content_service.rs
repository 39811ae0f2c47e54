//! Content catalogue service: public reads over seeded articles and tips.

use async_trait::async_trait;

use crate::domain::ports::ContentCatalogue;
use crate::domain::{Article, Error, HealthTip};

use super::records::Records;

/// Content catalogue backed by the record store.
#[derive(Clone)]
pub struct ContentCatalogueImpl {
    records: Records,
}

impl ContentCatalogueImpl {
    /// Create a new content catalogue.
    pub fn new(records: Records) -> Self {
        Self { records }
    }
}

#[async_trait]
impl ContentCatalogue for ContentCatalogueImpl {
    async fn list_articles(&self) -> Result<Vec<Article>, Error> {
        self.records.articles().await
    }

    async fn get_article(&self, id: &str) -> Result<Article, Error> {
        self.records
            .article(id)
            .await?
            .ok_or_else(|| Error::not_found("article not found"))
    }

    async fn list_health_tips(&self) -> Result<Vec<HealthTip>, Error> {
        self.records.tips().await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::records::Records;
    use crate::outbound::store::MemoryRecordStore;

    fn catalogue() -> (ContentCatalogueImpl, Records) {
        let records = Records::new(Arc::new(MemoryRecordStore::new()));
        (ContentCatalogueImpl::new(records.clone()), records)
    }

    fn article(id: &str) -> Article {
        Article {
            id: id.to_owned(),
            title: "Understanding Heart Disease".to_owned(),
            category: "illness".to_owned(),
            image: "https://example.com/heart.jpg".to_owned(),
            excerpt: "Symptoms and prevention".to_owned(),
            content: "Heart disease remains one of the leading causes of death.".to_owned(),
            read_time: "5 min read".to_owned(),
            published_at: NaiveDate::from_ymd_opt(2025, 1, 15).expect("date"),
        }
    }

    #[tokio::test]
    async fn lists_seeded_articles() {
        let (service, records) = catalogue();
        records.put_article(&article("article_1")).await.expect("seed");
        records.put_article(&article("article_2")).await.expect("seed");
        let articles = service.list_articles().await.expect("list");
        assert_eq!(articles.len(), 2);
    }

    #[tokio::test]
    async fn get_article_misses_with_not_found() {
        let (service, _records) = catalogue();
        let err = service.get_article("article_9").await.expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn tips_scan_is_isolated_from_articles() {
        let (service, records) = catalogue();
        records.put_article(&article("article_1")).await.expect("seed");
        records
            .put_tip(&HealthTip {
                id: "tip_1".to_owned(),
                title: "Stay Hydrated".to_owned(),
                description: "Drink at least 8 glasses of water a day.".to_owned(),
                icon: "droplet".to_owned(),
                category: "Wellness".to_owned(),
            })
            .await
            .expect("seed");
        let tips = service.list_health_tips().await.expect("list");
        assert_eq!(tips.len(), 1);
        assert_eq!(tips.first().expect("tip").id, "tip_1");
    }
}
