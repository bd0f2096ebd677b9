//! # Route guard decisions
//!
//! [`evaluate`] turns a [`SessionState`] plus a page's role requirement into a
//! [`GuardDecision`]. It is re-run on every navigation and on every session change;
//! it holds no state of its own.
//!
//! | Session | Requirement | Decision |
//! |---------|-------------|----------|
//! | `Hydrating` | any | [`GuardDecision::Wait`] |
//! | `Anonymous` | any | [`GuardDecision::RedirectToLogin`] (destination preserved in `?next=`) |
//! | `Active`, other role | `Some(role)` | [`GuardDecision::RedirectUnauthorized`] |
//! | `Active` | satisfied | [`GuardDecision::Render`] |
//!
//! A user holding the wrong role is sent to the neutral [`UNAUTHORIZED_PATH`], never
//! to their own role's area and never to the login page.

use crate::models::{Role, SessionState};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Outcome of a guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not hydrated yet: show a neutral placeholder, do not redirect.
    Wait,
    RedirectToLogin { to: String },
    RedirectUnauthorized { to: String },
    Render,
}

impl GuardDecision {
    /// Target path when this decision is a redirect.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::RedirectToLogin { to } | GuardDecision::RedirectUnauthorized { to } => {
                Some(to)
            }
            _ => None,
        }
    }
}

/// Decide whether the page at `destination` may render.
pub fn evaluate(state: &SessionState, required: Option<Role>, destination: &str) -> GuardDecision {
    match state {
        SessionState::Hydrating => GuardDecision::Wait,
        SessionState::Anonymous => GuardDecision::RedirectToLogin {
            to: login_redirect(destination),
        },
        SessionState::Active(session) => match required {
            Some(role) if session.user.role != role => GuardDecision::RedirectUnauthorized {
                to: UNAUTHORIZED_PATH.to_string(),
            },
            _ => GuardDecision::Render,
        },
    }
}

/// Login URL that brings the user back to `destination` afterwards.
pub fn login_redirect(destination: &str) -> String {
    if destination.is_empty() || destination == "/" || destination.starts_with(LOGIN_PATH) {
        return LOGIN_PATH.to_string();
    }
    format!("{LOGIN_PATH}?next={}", urlencoding::encode(destination))
}

/// Where to go after a successful login.
///
/// `next` is honoured only when it is a local absolute path; anything else
/// (empty, relative, protocol-relative `//host`, back to `/login`) falls back to
/// the role's home page.
pub fn safe_next(next: &str, role: Role) -> String {
    let decoded = urlencoding::decode(next)
        .map(|s| s.into_owned())
        .unwrap_or_default();
    let local = decoded.starts_with('/')
        && !decoded.starts_with("//")
        && !decoded.contains('\\')
        && !decoded.starts_with(LOGIN_PATH);
    if local {
        decoded
    } else {
        role.home_path().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, UserIdentity};

    fn active(role: Role) -> SessionState {
        SessionState::Active(Session {
            access_token: "a".to_string(),
            refresh_token: Some("r".to_string()),
            user: UserIdentity {
                id: 1,
                username: "u".to_string(),
                role,
            },
        })
    }

    #[test]
    fn test_hydrating_never_redirects() {
        assert_eq!(
            evaluate(&SessionState::Hydrating, Some(Role::Vendor), "/vendor/orders"),
            GuardDecision::Wait
        );
        assert_eq!(
            evaluate(&SessionState::Hydrating, None, "/cart"),
            GuardDecision::Wait
        );
        assert!(GuardDecision::Wait.redirect_target().is_none());
    }

    #[test]
    fn test_anonymous_goes_to_login_with_destination() {
        let decision = evaluate(&SessionState::Anonymous, Some(Role::Customer), "/cart");
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                to: "/login?next=%2Fcart".to_string()
            }
        );
    }

    #[test]
    fn test_vendor_on_customer_page_goes_to_neutral_page() {
        let decision = evaluate(&active(Role::Vendor), Some(Role::Customer), "/cart");
        assert_eq!(decision.redirect_target(), Some(UNAUTHORIZED_PATH));
        assert!(matches!(decision, GuardDecision::RedirectUnauthorized { .. }));
    }

    #[test]
    fn test_customer_on_vendor_page_goes_to_neutral_page() {
        let decision = evaluate(&active(Role::Customer), Some(Role::Vendor), "/vendor/dashboard");
        assert_eq!(decision.redirect_target(), Some(UNAUTHORIZED_PATH));
    }

    #[test]
    fn test_matching_role_renders() {
        assert_eq!(
            evaluate(&active(Role::Vendor), Some(Role::Vendor), "/vendor/products"),
            GuardDecision::Render
        );
        assert_eq!(
            evaluate(&active(Role::Customer), None, "/orders"),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_login_redirect_skips_trivial_destinations() {
        assert_eq!(login_redirect("/"), "/login");
        assert_eq!(login_redirect("/login?next=%2Fcart"), "/login");
        assert_eq!(
            login_redirect("/order?product=5"),
            "/login?next=%2Forder%3Fproduct%3D5"
        );
    }

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next("%2Fcart", Role::Customer), "/cart");
        assert_eq!(safe_next("/orders", Role::Customer), "/orders");
        assert_eq!(safe_next("", Role::Vendor), "/vendor/dashboard");
        assert_eq!(safe_next("//evil.example", Role::Customer), "/");
        assert_eq!(safe_next("https://evil.example", Role::Customer), "/");
        assert_eq!(safe_next("/login", Role::Vendor), "/vendor/dashboard");
    }
}
