//! # Session models
//!
//! Plain data carried by the session store and consumed by the request client and
//! the route guard.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Role`] | Closed set of account roles: `customer` or `vendor`. |
//! | [`UserIdentity`] | The `{id, username, role}` triple persisted under the `user` key. |
//! | [`Session`] | An active login: access token, optional refresh token, identity. |
//! | [`SessionGrant`] | What a successful login hands to [`crate::SessionStore::save`]. |
//! | [`SessionState`] | `Hydrating`, `Anonymous` or `Active(Session)`. |
//!
//! Tokens are opaque strings; nothing here inspects their contents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role attached to a user identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Vendor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Vendor => "vendor",
        }
    }

    /// Landing page for a freshly authenticated user of this role.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Customer => "/",
            Role::Vendor => "/vendor/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role tag is neither `customer` nor `vendor`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "vendor" => Ok(Role::Vendor),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Identity of the logged-in user, stored as JSON under the `user` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// An authenticated session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    /// Absent when only an access token survived in durable storage.
    pub refresh_token: Option<String>,
    pub user: UserIdentity,
}

/// Tokens and identity obtained from a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserIdentity,
}

impl From<SessionGrant> for Session {
    fn from(grant: SessionGrant) -> Self {
        Self {
            access_token: grant.access_token,
            refresh_token: Some(grant.refresh_token),
            user: grant.user,
        }
    }
}

/// Snapshot of the session store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Durable storage has not been read yet; no decision may be based on this.
    #[default]
    Hydrating,
    Anonymous,
    Active(Session),
}

impl SessionState {
    pub fn is_hydrating(&self) -> bool {
        matches!(self, SessionState::Hydrating)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.session().map(|s| &s.user)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session().map(|s| s.access_token.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.session().and_then(|s| s.refresh_token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let user = UserIdentity {
            id: 7,
            username: "mira".to_string(),
            role: Role::Vendor,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"id":7,"username":"mira","role":"vendor"}"#);
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert_eq!("customer".parse::<Role>(), Ok(Role::Customer));
        assert_eq!(
            "unknown".parse::<Role>(),
            Err(UnknownRole("unknown".to_string()))
        );
        let err: Box<dyn std::error::Error> = Box::new(UnknownRole("admin".to_string()));
        assert_eq!(err.to_string(), "unknown role: admin");
    }

    #[test]
    fn test_anonymous_state_has_no_tokens() {
        let state = SessionState::Anonymous;
        assert!(state.user().is_none());
        assert!(state.access_token().is_none());
        assert!(state.refresh_token().is_none());
        assert!(!state.is_hydrating());
    }
}
