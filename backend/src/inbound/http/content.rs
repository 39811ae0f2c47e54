//! Editorial content API handlers.
//!
//! ```text
//! GET /api/v1/articles
//! GET /api/v1/articles/{id}
//! GET /api/v1/health-tips
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::domain::ports::ContentCatalogue;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List every seeded article.
#[utoipa::path(
    get,
    path = "/api/v1/articles",
    responses((status = 200, description = "All articles")),
    tags = ["content"],
    operation_id = "listArticles",
    security([])
)]
#[get("/articles")]
pub async fn list_articles(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let articles = state.content.list_articles().await?;
    Ok(HttpResponse::Ok().json(json!({ "articles": articles })))
}

/// Fetch one article.
#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    responses(
        (status = 200, description = "The article"),
        (status = 404, description = "No such article")
    ),
    tags = ["content"],
    operation_id = "getArticle",
    security([])
)]
#[get("/articles/{id}")]
pub async fn get_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let article = state.content.get_article(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "article": article })))
}

/// List every seeded health tip.
#[utoipa::path(
    get,
    path = "/api/v1/health-tips",
    responses((status = 200, description = "All health tips")),
    tags = ["content"],
    operation_id = "listHealthTips",
    security([])
)]
#[get("/health-tips")]
pub async fn list_health_tips(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let tips = state.content.list_health_tips().await?;
    Ok(HttpResponse::Ok().json(json!({ "tips": tips })))
}
