use crate::entities::{cache_entries, prelude::*};
use crate::services::cache_service::PagedResult;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    Select, Set, TransactionTrait,
};

use crate::db::StorageError;

/// Candidate entry built by the service after validation and
/// normalization. Whether it becomes an insert or an in-place update is
/// decided by the hash lookup inside [`CacheUnitOfWork::upsert`].
#[derive(Debug, Clone)]
pub struct NewCacheEntry {
    pub prompt_hash: String,
    pub prompt: String,
    pub response: String,
    pub tags: String,
    pub tech_stack: String,
    pub file_name: String,
}

pub struct CacheEntryRepository {
    conn: DatabaseConnection,
}

impl CacheEntryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<cache_entries::Model>, StorageError> {
        find_by_hash(&self.conn, hash).await
    }

    pub async fn list_paged(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<PagedResult<cache_entries::Model>, StorageError> {
        paginate(&self.conn, newest_first(CacheEntries::find()), page, page_size).await
    }

    pub async fn search_paged(
        &self,
        term: &str,
        page: u64,
        page_size: u64,
    ) -> Result<PagedResult<cache_entries::Model>, StorageError> {
        let pattern = format!("%{}%", term.to_lowercase());

        let filter = Condition::any()
            .add(lower_like(cache_entries::Column::Prompt, &pattern))
            .add(lower_like(cache_entries::Column::Response, &pattern))
            .add(lower_like(cache_entries::Column::Tags, &pattern))
            .add(lower_like(cache_entries::Column::TechStack, &pattern))
            .add(lower_like(cache_entries::Column::FileName, &pattern));

        let query = newest_first(CacheEntries::find().filter(filter));
        paginate(&self.conn, query, page, page_size).await
    }

    /// Open a transactional unit of work for the save path.
    pub async fn begin(&self) -> Result<CacheUnitOfWork, StorageError> {
        Ok(CacheUnitOfWork {
            txn: self.conn.begin().await?,
            affected: 0,
        })
    }
}

/// Unit of work wrapping a single database transaction. `upsert` stages
/// writes and nothing is durable until `commit`; dropping the value
/// without committing rolls everything back. Running the hash lookup and
/// the write inside one transaction keeps concurrent saves of the same
/// prompt from interleaving between read and write.
pub struct CacheUnitOfWork {
    txn: DatabaseTransaction,
    affected: u64,
}

impl CacheUnitOfWork {
    pub async fn get_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<cache_entries::Model>, StorageError> {
        find_by_hash(&self.txn, hash).await
    }

    /// Insert the entry, or overwrite response/tags/tech stack/file name
    /// in place when an entry with the same hash already exists. The
    /// surviving row keeps its id and `created_at`; `updated_at` is
    /// refreshed on both paths.
    pub async fn upsert(
        &mut self,
        input: &NewCacheEntry,
    ) -> Result<cache_entries::Model, StorageError> {
        let now = chrono::Utc::now().to_rfc3339();

        let saved = if let Some(existing) = find_by_hash(&self.txn, &input.prompt_hash).await? {
            let mut entry = existing.into_active_model();
            entry.response = Set(input.response.clone());
            entry.tags = Set(input.tags.clone());
            entry.tech_stack = Set(input.tech_stack.clone());
            entry.file_name = Set(input.file_name.clone());
            entry.updated_at = Set(now);
            entry.update(&self.txn).await?
        } else {
            let entry = cache_entries::ActiveModel {
                prompt_hash: Set(input.prompt_hash.clone()),
                prompt: Set(input.prompt.clone()),
                response: Set(input.response.clone()),
                tags: Set(input.tags.clone()),
                tech_stack: Set(input.tech_stack.clone()),
                file_name: Set(input.file_name.clone()),
                created_at: Set(now.clone()),
                updated_at: Set(now),
                ..Default::default()
            };
            entry.insert(&self.txn).await?
        };

        self.affected += 1;
        Ok(saved)
    }

    /// Flush the staged writes durably. Returns the number of rows
    /// written in this unit of work.
    pub async fn commit(self) -> Result<u64, StorageError> {
        self.txn.commit().await?;
        Ok(self.affected)
    }
}

async fn find_by_hash<C: ConnectionTrait>(
    conn: &C,
    hash: &str,
) -> Result<Option<cache_entries::Model>, StorageError> {
    Ok(CacheEntries::find()
        .filter(cache_entries::Column::PromptHash.eq(hash))
        .one(conn)
        .await?)
}

fn newest_first(query: Select<CacheEntries>) -> Select<CacheEntries> {
    // Id breaks ties between entries created in the same instant.
    query
        .order_by_desc(cache_entries::Column::CreatedAt)
        .order_by_desc(cache_entries::Column::Id)
}

fn lower_like(column: cache_entries::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}

async fn paginate<C: ConnectionTrait>(
    conn: &C,
    query: Select<CacheEntries>,
    page: u64,
    page_size: u64,
) -> Result<PagedResult<cache_entries::Model>, StorageError> {
    let paginator = query.paginate(conn, page_size);
    let total_count = paginator.num_items().await?;
    let items = paginator.fetch_page(page - 1).await?;

    Ok(PagedResult::new(items, total_count, page, page_size))
}
