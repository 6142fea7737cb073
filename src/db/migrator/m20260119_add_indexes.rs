use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_cache_entries_tags")
                    .table(CacheEntries::Table)
                    .col(CacheEntries::Tags)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cache_entries_tech_stack")
                    .table(CacheEntries::Table)
                    .col(CacheEntries::TechStack)
                    .to_owned(),
            )
            .await?;

        // Both list and search order by recency.
        manager
            .create_index(
                Index::create()
                    .name("idx_cache_entries_created_at")
                    .table(CacheEntries::Table)
                    .col(CacheEntries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cache_entries_tags")
                    .table(CacheEntries::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cache_entries_tech_stack")
                    .table(CacheEntries::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cache_entries_created_at")
                    .table(CacheEntries::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum CacheEntries {
    Table,
    Tags,
    TechStack,
    CreatedAt,
}
