//! Static editorial content: health articles and daily tips.
//!
//! Records are seeded once and read-only through the API, so the types stay
//! plain data carriers with no lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Editorial article stored under `article:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Stable identifier, e.g. `article_1`.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Editorial category: `illness`, `herbal`, or `wellness`.
    pub category: String,
    /// Hero image URL.
    pub image: String,
    /// Teaser shown in list views.
    pub excerpt: String,
    /// Full body text.
    pub content: String,
    /// Display reading-time label, e.g. `5 min read`.
    pub read_time: String,
    /// Publication date.
    #[schema(value_type = String, format = Date)]
    pub published_at: NaiveDate,
}

/// Short health tip stored under `tip:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthTip {
    /// Stable identifier, e.g. `tip_1`.
    pub id: String,
    /// Tip headline.
    pub title: String,
    /// One-paragraph body.
    pub description: String,
    /// Icon name rendered by the client.
    pub icon: String,
    /// Display category label.
    pub category: String,
}
