use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "cache_entries")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// SHA-256 of the untruncated prompt, lowercase hex. Dedup key.
    #[sea_orm(unique)]
    pub prompt_hash: String,

    #[sea_orm(column_type = "Text")]
    pub prompt: String,

    #[sea_orm(column_type = "Text")]
    pub response: String,

    /// Normalized comma-separated list, no empty segments.
    pub tags: String,

    pub tech_stack: String,

    pub file_name: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
