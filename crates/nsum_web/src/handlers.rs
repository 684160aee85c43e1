use axum::extract::{Query, State};
use axum::Json;
use nsum_core::{CacheStats, Error, ProcessedArticle};
use nsum_pipeline::GatewayResponse;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub url: String,
    #[serde(default)]
    pub force_refresh: bool,
    pub summary_words: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub article: ProcessedArticle,
    pub cache: &'static str,
    pub elapsed_secs: f64,
    pub persisted: bool,
}

impl From<GatewayResponse> for SummarizeResponse {
    fn from(response: GatewayResponse) -> Self {
        Self {
            article: response.article,
            cache: response.cache.as_str(),
            elapsed_secs: response.elapsed.as_secs_f64(),
            persisted: response.persisted,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SourceInfo {
    pub name: String,
    pub domain: String,
}

pub async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(Error::InvalidArticle("url is required".to_string()).into());
    }
    info!("📰 Summarize request for {}", url);
    let response = state
        .summarizer
        .summarize_url(url, request.force_refresh, request.summary_words)
        .await?;
    Ok(Json(response.into()))
}

pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ProcessedArticle>>, ApiError> {
    Ok(Json(state.summarizer.store().list(params.limit).await?))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<CacheStats>, ApiError> {
    Ok(Json(state.summarizer.store().stats().await?))
}

pub async fn clear_articles(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let deleted = state.summarizer.store().clear().await?;
    info!("🗑️ Cleared {} cached articles", deleted);
    Ok(Json(json!({ "deleted": deleted })))
}

pub async fn sources(State(state): State<AppState>) -> Json<Vec<SourceInfo>> {
    Json(
        state
            .summarizer
            .scrapers()
            .domains()
            .into_iter()
            .map(|(name, domain)| SourceInfo {
                name: name.to_string(),
                domain: domain.to_string(),
            })
            .collect(),
    )
}
