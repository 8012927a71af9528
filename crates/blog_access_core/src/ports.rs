//! Storage ports. The server wires these to concrete adapters; the core
//! only ever sees `Arc<dyn UserStore>` / `Arc<dyn PostStore>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BlogError;

pub type Result<T> = std::result::Result<T, BlogError>;

// ── Records ───────────────────────────────────────────────────

/// User document as stored. `plan` and `subscription_status` are raw
/// strings; resolving them is the principal's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub roles: Vec<String>,
    pub plan: Option<String>,
    pub subscription_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub tags: Vec<String>,
    /// Readable only by pro subscribers and above.
    pub premium: bool,
    pub published: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub slug: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub premium: bool,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl NewPost {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(BlogError::InvalidInput("title must not be empty".into()));
        }
        let slug_ok = !self.slug.is_empty()
            && self
                .slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !slug_ok {
            return Err(BlogError::InvalidInput(format!(
                "slug '{}' must be lowercase letters, digits and dashes",
                self.slug
            )));
        }
        Ok(())
    }
}

// ── Port traits ───────────────────────────────────────────────

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    async fn any_with_role(&self, role: &str) -> Result<bool>;

    /// Fails with `Conflict` when the email is already taken.
    async fn insert(&self, user: UserRecord) -> Result<()>;

    async fn set_plan(
        &self,
        id: Uuid,
        plan: Option<String>,
        subscription_status: Option<String>,
    ) -> Result<UserRecord>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>>;

    /// Published posts, newest first.
    async fn list_published(&self) -> Result<Vec<PostRecord>>;

    /// Fails with `Conflict` when the slug is already taken.
    async fn insert(&self, post: PostRecord) -> Result<()>;
}
