pub mod admin;
pub mod auth;
pub mod catalog;
pub mod gated;
pub mod health;
pub mod posts;
pub mod sitemap;
