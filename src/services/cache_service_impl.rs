//! `SeaORM` implementation of the `CacheService` trait.

use crate::api::types::SaveRequest;
use crate::constants::limits;
use crate::db::{NewCacheEntry, Store, StorageError};
use crate::entities::cache_entries;
use crate::hash;
use crate::normalize::{normalize_tag_list, truncate_chars};
use crate::services::cache_service::{CacheService, PagedResult, ServiceResult};
use async_trait::async_trait;
use tracing::{error, info};

pub struct SeaOrmCacheService {
    store: Store,
}

impl SeaOrmCacheService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn try_save(
        &self,
        request: &SaveRequest,
    ) -> Result<(cache_entries::Model, bool), StorageError> {
        // Hash the untruncated prompt; truncation only bounds storage.
        let prompt_hash = hash::sha256_hex(&request.prompt);

        let mut uow = self.store.begin_save().await?;

        let existing = uow.get_by_hash(&prompt_hash).await?;
        let created = existing.is_none();

        match &existing {
            Some(entry) => info!("Cache hit: updating entry {}", entry.id),
            None => info!("New cache entry: {}", request.file_name),
        }

        let input = NewCacheEntry {
            prompt_hash,
            prompt: truncate_chars(&request.prompt, limits::MAX_PROMPT_CHARS),
            response: truncate_chars(&request.response, limits::MAX_RESPONSE_CHARS),
            tags: normalize_tag_list(&request.tags),
            tech_stack: normalize_tag_list(&request.tech_stack),
            file_name: request.file_name.clone(),
        };

        let entry = uow.upsert(&input).await?;
        uow.commit().await?;

        Ok((entry, created))
    }
}

#[async_trait]
impl CacheService for SeaOrmCacheService {
    async fn save_entry(&self, request: &SaveRequest) -> ServiceResult<cache_entries::Model> {
        if request.response.trim().is_empty()
            || request.response.chars().count() < limits::MIN_RESPONSE_CHARS
        {
            return ServiceResult::fail("Response must be at least 10 characters");
        }

        if request.prompt.trim().is_empty() {
            return ServiceResult::fail("Prompt is required");
        }

        if request.file_name.trim().is_empty() {
            return ServiceResult::fail("File name is required");
        }

        match self.try_save(request).await {
            Ok((entry, true)) => ServiceResult::ok_with_message(entry, "Entry saved successfully"),
            Ok((entry, false)) => {
                ServiceResult::ok_with_message(entry, "Entry updated successfully")
            }
            Err(e) => {
                error!("Failed to save cache entry: {}", e);
                ServiceResult::fail_with_error("Internal server error", "internal_error")
            }
        }
    }

    async fn get_by_hash(&self, hash: &str) -> ServiceResult<cache_entries::Model> {
        match self.store.get_entry_by_hash(hash).await {
            Ok(Some(entry)) => ServiceResult::ok(entry),
            Ok(None) => ServiceResult::fail("Entry not found"),
            Err(e) => {
                error!("Failed to look up cache entry: {}", e);
                ServiceResult::fail_with_error("Internal server error", "internal_error")
            }
        }
    }

    async fn query_paged(
        &self,
        query: Option<&str>,
        page: u64,
        page_size: u64,
    ) -> ServiceResult<PagedResult<cache_entries::Model>> {
        let page = page.max(1);
        let page_size = page_size.max(1);

        let result = match query {
            Some(term) if !term.trim().is_empty() => {
                self.store.search_entries_paged(term, page, page_size).await
            }
            _ => self.store.list_entries_paged(page, page_size).await,
        };

        match result {
            Ok(paged) => ServiceResult::ok(paged),
            Err(e) => {
                error!("Failed to query cache entries: {}", e);
                ServiceResult::fail_with_error("Internal server error", "internal_error")
            }
        }
    }
}
