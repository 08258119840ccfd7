use serde::{Deserialize, Serialize};

/// Top-level view of the admin area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdminPage {
    /// Sign-in panel, shown to anonymous visitors.
    Login,
    /// Staff dashboard.
    Dashboard,
}

impl AdminPage {
    /// Pick the view for a session. Whether the session is authenticated is
    /// decided by the identity provider, not here.
    pub fn for_session(authenticated: bool) -> Self {
        if authenticated {
            Self::Dashboard
        } else {
            Self::Login
        }
    }
}
