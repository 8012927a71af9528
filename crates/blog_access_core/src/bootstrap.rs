//! Default-admin bootstrap, run once at startup before the listener binds.
//!
//! Idempotent: if any user already holds the `admin` role nothing is written.

use serde::Serialize;
use uuid::Uuid;

use crate::credentials::hash_password;
use crate::error::BlogError;
use crate::ports::{UserRecord, UserStore};
use crate::tier::{SubscriptionStatus, Tier};

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BootstrapOutcome {
    AlreadyPresent,
    Created { user_id: Uuid, email: String },
}

pub async fn bootstrap_admin(
    users: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<BootstrapOutcome, BlogError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(BlogError::InvalidInput(
            "admin email and password must be non-empty".into(),
        ));
    }

    if users.any_with_role(ADMIN_ROLE).await? {
        tracing::debug!("admin already present, bootstrap skipped");
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    let record = UserRecord {
        id: Uuid::new_v4(),
        email: email.trim().to_string(),
        password_hash: hash_password(password),
        roles: vec![ADMIN_ROLE.to_string()],
        plan: Some(Tier::Premium.as_str().to_string()),
        subscription_status: Some(SubscriptionStatus::Active.as_str().to_string()),
    };
    let user_id = record.id;
    let email = record.email.clone();
    users.insert(record).await?;

    tracing::info!(%user_id, %email, "default admin created");
    Ok(BootstrapOutcome::Created { user_id, email })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::verify_password;
    use crate::memory::InMemoryUserStore;
    use crate::principal::Principal;
    use crate::tier::Plan;

    #[tokio::test]
    async fn creates_premium_admin_once() {
        let store = InMemoryUserStore::new();
        let first = bootstrap_admin(&store, "admin@example.com", "s3cret")
            .await
            .unwrap();
        assert!(matches!(first, BootstrapOutcome::Created { .. }));

        let second = bootstrap_admin(&store, "admin@example.com", "s3cret")
            .await
            .unwrap();
        assert_eq!(second, BootstrapOutcome::AlreadyPresent);

        let rec = store
            .find_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(verify_password("s3cret", &rec.password_hash));
        let p = Principal::from_record(&rec);
        assert!(p.is_admin());
        assert_eq!(p.plan, Plan::Known(Tier::Premium));
        assert!(p.subscription_status.is_active());
    }

    #[tokio::test]
    async fn rejects_blank_credentials() {
        let store = InMemoryUserStore::new();
        let err = bootstrap_admin(&store, " ", "pw").await.unwrap_err();
        assert!(matches!(err, BlogError::InvalidInput(_)));
        assert!(!store.any_with_role(ADMIN_ROLE).await.unwrap());
    }
}
