use serde::Deserialize;

use crate::constants::paging;

/// Body of a save request. Every field defaults to empty so missing
/// fields reach the service as blanks and fail validation inside the
/// result envelope instead of being rejected by the deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveRequest {
    pub prompt: String,
    pub response: String,
    pub tags: String,
    pub tech_stack: String,
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

const fn default_page() -> u64 {
    paging::DEFAULT_PAGE
}

const fn default_page_size() -> u64 {
    paging::DEFAULT_PAGE_SIZE
}
