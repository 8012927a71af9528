//! blog_access_server: REST server for the blog API with plan gating.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod sitemap_cache;
pub mod state;
