use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CacheEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CacheEntries::PromptHash)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CacheEntries::Prompt).text().not_null())
                    .col(ColumnDef::new(CacheEntries::Response).text().not_null())
                    .col(ColumnDef::new(CacheEntries::Tags).string().not_null())
                    .col(ColumnDef::new(CacheEntries::TechStack).string().not_null())
                    .col(ColumnDef::new(CacheEntries::FileName).string().not_null())
                    .col(
                        ColumnDef::new(CacheEntries::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CacheEntries::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Dedup lookups and the upsert check both go through this key.
        manager
            .create_index(
                Index::create()
                    .name("idx_cache_entries_prompt_hash")
                    .table(CacheEntries::Table)
                    .col(CacheEntries::PromptHash)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CacheEntries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CacheEntries {
    Table,
    Id,
    PromptHash,
    Prompt,
    Response,
    Tags,
    TechStack,
    FileName,
    CreatedAt,
    UpdatedAt,
}
