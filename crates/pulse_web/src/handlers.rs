use axum::{
    extract::{Query, State},
    Json,
};
use chrono::SecondsFormat;
use pulse_core::{ArticleSnapshot, CategoryTag, Error, ExtractedContent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ArticlesQuery {
    pub category: Option<String>,
}

impl ArticlesQuery {
    /// Parsed `category` filter. An empty value means no filter.
    pub fn category(&self) -> Result<Option<CategoryTag>, Error> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub cached_count: usize,
    pub extraction_cache_size: usize,
    pub last_fetch: Option<String>,
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArticlesQuery>,
) -> Result<Json<ArticleSnapshot>, ApiError> {
    let category = query.category().map_err(ApiError::Request)?;
    let snapshot = state
        .aggregator
        .get_articles()
        .await
        .map_err(ApiError::Feeds)?;

    let items = match category {
        Some(category) => snapshot
            .items
            .iter()
            .filter(|a| a.category == category)
            .cloned()
            .collect(),
        None => snapshot.items.clone(),
    };
    Ok(Json(ArticleSnapshot::new(items, snapshot.fetched_at)))
}

pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<ExtractedContent>, ApiError> {
    let url = query
        .url
        .ok_or(ApiError::Content(Error::MissingUrl))?;
    let content = state
        .extractor
        .extract_content(&url)
        .await
        .map_err(ApiError::Content)?;
    Ok(Json(content))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cached_count: state.cache.articles.len().await,
        extraction_cache_size: state.cache.extractions.len().await,
        last_fetch: state
            .cache
            .articles
            .last_fetch()
            .await
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    })
}
