use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use crate::entities::cache_entries;
use crate::services::cache_service::{PagedResult, ServiceResult};

use super::AppState;
use super::types::{PageQuery, SaveRequest, SearchQuery};

pub async fn list_all(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Json<ServiceResult<PagedResult<cache_entries::Model>>> {
    Json(
        state
            .cache_service
            .query_paged(None, params.page, params.page_size)
            .await,
    )
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Json<ServiceResult<PagedResult<cache_entries::Model>>> {
    Json(
        state
            .cache_service
            .query_paged(params.query.as_deref(), params.page, params.page_size)
            .await,
    )
}

pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveRequest>,
) -> Json<ServiceResult<cache_entries::Model>> {
    Json(state.cache_service.save_entry(&request).await)
}

pub async fn get_by_hash(
    State(state): State<Arc<AppState>>,
    Path(hash): Path<String>,
) -> Json<ServiceResult<cache_entries::Model>> {
    // Hash values may carry percent-encoded separators; decode explicitly
    // instead of relying on default path-segment decoding.
    let decoded = match urlencoding::decode(&hash) {
        Ok(d) => d.into_owned(),
        Err(_) => hash.clone(),
    };

    Json(state.cache_service.get_by_hash(&decoded).await)
}
