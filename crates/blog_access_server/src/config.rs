//! Server configuration, read from env vars (after `.env` is loaded):
//!   BLOG_JWT_SECRET        JWT HMAC secret (required)
//!   BLOG_BIND_ADDR         listen address (default: 0.0.0.0:4200)
//!   BLOG_PUBLIC_URL        origin used in sitemap locations (default: http://localhost:4200)
//!   BLOG_ADMIN_EMAIL       default admin email (bootstrap skipped if unset)
//!   BLOG_ADMIN_PASSWORD    default admin password (bootstrap skipped if unset)
//!   BLOG_TOKEN_TTL_HOURS   issued token lifetime (default: 24)

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub public_url: String,
    pub admin: Option<AdminSeed>,
    pub token_ttl_hours: i64,
}

#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = lookup("BLOG_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .context("BLOG_JWT_SECRET must be set")?;
        let bind_addr = lookup("BLOG_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:4200".into());
        let public_url =
            lookup("BLOG_PUBLIC_URL").unwrap_or_else(|| "http://localhost:4200".into());

        let admin = match (lookup("BLOG_ADMIN_EMAIL"), lookup("BLOG_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminSeed { email, password })
            }
            _ => None,
        };

        let token_ttl_hours = match lookup("BLOG_TOKEN_TTL_HOURS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("BLOG_TOKEN_TTL_HOURS is not an integer: {v}"))?,
            None => 24,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            public_url,
            admin,
            token_ttl_hours,
        })
    }
}
