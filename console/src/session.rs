use crate::api::AccessApi;
use crate::error::Result;
use shared_http::api::{ADMIN_PRIVILEGE, INFRA_RESOURCE, ListGrantsQuery};
use tracing::{info, warn};

/// What the current user may do, passed explicitly to the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub is_admin: bool,
    pub loading: bool,
}

impl Session {
    pub fn loading() -> Self {
        Self {
            is_admin: false,
            loading: true,
        }
    }

    pub fn resolved(is_admin: bool) -> Self {
        Self {
            is_admin,
            loading: false,
        }
    }

    /// Admin-only controls stay hidden until the capability is known.
    pub fn can_manage(&self) -> bool {
        self.is_admin && !self.loading
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

/// Resolve the session; any failure yields a non-admin session.
pub async fn load_session<A: AccessApi + ?Sized>(api: &A) -> Session {
    match is_admin(api).await {
        Ok(is_admin) => Session::resolved(is_admin),
        Err(e) => {
            warn!("Could not resolve session capability: {}", e);
            Session::resolved(false)
        }
    }
}

/// Admin means holding `admin` on the `infra` resource.
async fn is_admin<A: AccessApi + ?Sized>(api: &A) -> Result<bool> {
    let me = api.current_user().await?;
    let query = ListGrantsQuery::for_user(&me.id)
        .resource(INFRA_RESOURCE)
        .privilege(ADMIN_PRIVILEGE);
    let grants = api.list_grants(&query).await?;

    info!("Session resolved for {}: admin={}", me.name, !grants.is_empty());
    Ok(!grants.is_empty())
}
