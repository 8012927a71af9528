//! Process-wide sitemap cache.
//!
//! Created empty at startup and owned by `AppState`. The first request
//! renders the XML; post writes call `invalidate` so the next request
//! re-renders. No TTL. The document is held as `Bytes`, so each response
//! shares the cached buffer.

use anyhow::Context;
use axum::body::Bytes;
use blog_access_core::ports::PostStore;
use blog_access_core::sitemap::{entries_for, render_sitemap};
use tokio::sync::RwLock;

#[derive(Debug)]
pub struct SitemapCache {
    base_url: String,
    cached: RwLock<Option<Bytes>>,
}

impl SitemapCache {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cached: RwLock::new(None),
        }
    }

    pub async fn get_or_build(
        &self,
        posts: &dyn PostStore,
    ) -> Result<Bytes, blog_access_core::error::BlogError> {
        if let Some(xml) = self.cached.read().await.as_ref() {
            return Ok(xml.clone());
        }

        let mut slot = self.cached.write().await;
        // Another request may have rebuilt while we waited for the write lock.
        if let Some(xml) = slot.as_ref() {
            return Ok(xml.clone());
        }

        let published = posts.list_published().await?;
        let xml = render_sitemap(&self.base_url, &entries_for(&published))
            .context("rendering sitemap")?;
        tracing::info!(urls = published.len(), "sitemap rebuilt");

        let xml = Bytes::from(xml);
        *slot = Some(xml.clone());
        Ok(xml)
    }

    pub async fn invalidate(&self) {
        if self.cached.write().await.take().is_some() {
            tracing::debug!("sitemap cache invalidated");
        }
    }

    pub async fn is_cached(&self) -> bool {
        self.cached.read().await.is_some()
    }
}
