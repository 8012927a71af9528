use std::sync::Arc;

use blog_access_core::memory::{InMemoryPostStore, InMemoryUserStore};
use blog_access_core::ports::{PostStore, UserStore};

use crate::middleware::jwt::JwtConfig;
use crate::sitemap_cache::SitemapCache;

/// Shared router state. Cheap to clone: everything heavy is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub sitemap: Arc<SitemapCache>,
    pub jwt: JwtConfig,
    pub token_ttl_hours: i64,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
        jwt: JwtConfig,
        public_url: &str,
    ) -> Self {
        Self {
            users,
            posts,
            sitemap: Arc::new(SitemapCache::new(public_url)),
            jwt,
            token_ttl_hours: 24,
        }
    }

    /// State backed by empty in-memory stores.
    pub fn in_memory(jwt: JwtConfig, public_url: &str) -> Self {
        Self::new(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryPostStore::new()),
            jwt,
            public_url,
        )
    }

    pub fn with_token_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl_hours = hours;
        self
    }
}
