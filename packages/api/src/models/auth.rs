//! Authentication payloads.

use serde::{Deserialize, Serialize};
use store::{Role, SessionGrant, UnknownRole, UserIdentity};

/// Body of `POST login/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Successful login: `{access, refresh, id, username, user_role}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub id: i64,
    pub username: String,
    pub user_role: String,
}

impl LoginResponse {
    /// Convert into what the session store keeps. Fails for roles other than
    /// `customer` and `vendor` (the server reports `"unknown"` for admins).
    pub fn into_grant(self) -> Result<SessionGrant, UnknownRole> {
        let role: Role = self.user_role.parse()?;
        Ok(SessionGrant {
            access_token: self.access,
            refresh_token: self.refresh,
            user: UserIdentity {
                id: self.id,
                username: self.username,
                role,
            },
        })
    }
}

/// Body of `POST token/refresh/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// `{access}`, plus a new `refresh` when the server rotates refresh tokens.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustomerRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VendorRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub shop_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Generic `{"message": ".."}` / `{"detail": ".."}` acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default, alias = "detail")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_into_grant() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"refresh":"r1","access":"a1","user_role":"customer","username":"neha","id":12}"#,
        )
        .unwrap();
        let grant = response.into_grant().unwrap();
        assert_eq!(grant.access_token, "a1");
        assert_eq!(grant.refresh_token, "r1");
        assert_eq!(grant.user.id, 12);
        assert_eq!(grant.user.role, Role::Customer);
    }

    #[test]
    fn test_login_response_unknown_role() {
        let response = LoginResponse {
            access: "a".into(),
            refresh: "r".into(),
            id: 1,
            username: "root".into(),
            user_role: "unknown".into(),
        };
        assert_eq!(response.into_grant(), Err(UnknownRole("unknown".into())));
    }

    #[test]
    fn test_refresh_response_optional_rotation() {
        let plain: RefreshResponse = serde_json::from_str(r#"{"access":"a2"}"#).unwrap();
        assert!(plain.refresh.is_none());
        let rotated: RefreshResponse =
            serde_json::from_str(r#"{"access":"a2","refresh":"r2"}"#).unwrap();
        assert_eq!(rotated.refresh.as_deref(), Some("r2"));
    }

    #[test]
    fn test_registration_omits_empty_optionals() {
        let body = serde_json::to_value(CustomerRegistration {
            username: "neha".into(),
            email: "neha@example.com".into(),
            password: "secret".into(),
            phone: None,
        })
        .unwrap();
        assert!(body.get("phone").is_none());
    }
}
