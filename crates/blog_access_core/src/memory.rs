//! In-memory store adapters. Used by the server binary and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::BlogError;
use crate::ports::{PostRecord, PostStore, Result, UserRecord, UserStore};

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn any_with_role(&self, role: &str) -> Result<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.roles.iter().any(|r| r == role)))
    }

    async fn insert(&self, user: UserRecord) -> Result<()> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(BlogError::Conflict(format!(
                "email {} already registered",
                user.email
            )));
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn set_plan(
        &self,
        id: Uuid,
        plan: Option<String>,
        subscription_status: Option<String>,
    ) -> Result<UserRecord> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| BlogError::NotFound(format!("user {id}")))?;
        user.plan = plan;
        user.subscription_status = subscription_status;
        Ok(user.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    posts: RwLock<HashMap<String, PostRecord>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>> {
        Ok(self.posts.read().await.get(slug).cloned())
    }

    async fn list_published(&self) -> Result<Vec<PostRecord>> {
        let posts = self.posts.read().await;
        let mut out: Vec<PostRecord> = posts.values().filter(|p| p.published).cloned().collect();
        out.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Ok(out)
    }

    async fn insert(&self, post: PostRecord) -> Result<()> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.slug) {
            return Err(BlogError::Conflict(format!(
                "slug {} already exists",
                post.slug
            )));
        }
        posts.insert(post.slug.clone(), post);
        Ok(())
    }
}
