use crate::entities::cache_entries;
use crate::services::cache_service::PagedResult;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::cache::{CacheUnitOfWork, NewCacheEntry};

/// Failures of the durable medium. The store never swallows or retries;
/// every error propagates to the service boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self, StorageError> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StorageError> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn cache_repo(&self) -> repositories::cache::CacheEntryRepository {
        repositories::cache::CacheEntryRepository::new(self.conn.clone())
    }

    pub async fn get_entry_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<cache_entries::Model>, StorageError> {
        self.cache_repo().get_by_hash(hash).await
    }

    pub async fn list_entries_paged(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<PagedResult<cache_entries::Model>, StorageError> {
        self.cache_repo().list_paged(page, page_size).await
    }

    pub async fn search_entries_paged(
        &self,
        query: &str,
        page: u64,
        page_size: u64,
    ) -> Result<PagedResult<cache_entries::Model>, StorageError> {
        self.cache_repo().search_paged(query, page, page_size).await
    }

    /// Begin a transactional unit of work for a save. Writes staged
    /// through it become durable only on [`CacheUnitOfWork::commit`].
    pub async fn begin_save(&self) -> Result<CacheUnitOfWork, StorageError> {
        self.cache_repo().begin().await
    }
}
