pub mod cache_service;
pub use cache_service::{CacheService, PagedResult, ServiceResult};

pub mod cache_service_impl;
pub use cache_service_impl::SeaOrmCacheService;
