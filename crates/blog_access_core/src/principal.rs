use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BlogError;
use crate::ports::UserRecord;
use crate::tier::{Plan, SubscriptionStatus, Tier};

/// The authenticated caller, resolved once per request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
    pub plan: Plan,
    pub subscription_status: SubscriptionStatus,
}

impl Principal {
    /// Build from the stored user record. Plan and status come from the
    /// record, not the token, so plan changes apply without re-login.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            user_id: record.id,
            email: record.email.clone(),
            roles: record.roles.clone(),
            plan: Plan::parse(record.plan.as_deref()),
            subscription_status: SubscriptionStatus::parse(record.subscription_status.as_deref()),
        }
    }

    /// Construct explicitly, e.g. for in-process callers and tests.
    pub fn new(
        email: impl Into<String>,
        plan: impl Into<Plan>,
        subscription_status: SubscriptionStatus,
    ) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email: email.into(),
            roles: Vec::new(),
            plan: plan.into(),
            subscription_status,
        }
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }

    pub fn require_admin(&self) -> Result<(), BlogError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(BlogError::Forbidden(format!("{} is not an admin", self.email)))
        }
    }

    /// Effective tier for feature lookups; unrecognized plans get the free catalog entry.
    pub fn effective_tier(&self) -> Tier {
        self.plan.tier().unwrap_or(Tier::Free)
    }
}

/// JWT claims issued by `/api/auth/login` and read by the server middleware.
/// Identity only: roles and plan are loaded from the user record per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: usize,
}

impl JwtClaims {
    pub fn user_id(&self) -> Result<Uuid, BlogError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| BlogError::Unauthorized("sub claim is not a user id".into()))
    }
}
