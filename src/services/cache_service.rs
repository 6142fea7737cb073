//! Domain service for the prompt/response cache.
//!
//! Every operation returns a [`ServiceResult`] envelope — validation
//! failures, missing entries and storage faults are all expressed as
//! `success: false` values, never as errors escaping to the transport.

use crate::api::types::SaveRequest;
use crate::entities::cache_entries;
use async_trait::async_trait;
use serde::Serialize;

/// Uniform result envelope returned by every service operation.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ServiceResult<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Failure with a safe diagnostic code. The underlying cause is
    /// logged, never carried in `message`.
    pub fn fail_with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: Some(error.into()),
        }
    }
}

/// One window of a larger ordered result set, newest entries first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> PagedResult<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total_count: u64, page: u64, page_size: u64) -> Self {
        let total_pages = total_count.div_ceil(page_size.max(1));
        Self {
            items,
            total_count,
            page,
            page_size,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }
}

/// Orchestrates validation, hashing, dedup-aware upsert and read-path
/// query construction over the record store.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Validate and persist a prompt/response pair. A prompt that hashes
    /// to an existing entry updates that entry in place (same id); the
    /// result message distinguishes creation from update.
    async fn save_entry(&self, request: &SaveRequest) -> ServiceResult<cache_entries::Model>;

    /// Point lookup by prompt hash. A missing entry is a normal outcome,
    /// surfaced as a failed envelope rather than an error.
    async fn get_by_hash(&self, hash: &str) -> ServiceResult<cache_entries::Model>;

    /// Paged listing, optionally restricted by a free-text query. A blank
    /// or missing query lists everything; an empty result set is success.
    async fn query_paged(
        &self,
        query: Option<&str>,
        page: u64,
        page_size: u64,
    ) -> ServiceResult<PagedResult<cache_entries::Model>>;
}
