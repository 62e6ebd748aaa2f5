use std::sync::Arc;

use shared_session::SessionStore;

/// A navigation target annotated with whether it requires authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    pub name: String,
    pub requires_auth: bool,
}

impl RouteTarget {
    pub fn public(name: &str) -> Self {
        Self {
            name: name.to_string(),
            requires_auth: false,
        }
    }

    pub fn protected(name: &str) -> Self {
        Self {
            name: name.to_string(),
            requires_auth: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    RedirectToLogin,
}

/// Evaluated synchronously on every navigation attempt, before the target
/// view mounts. Never mutates session state. A logged-in user heading to the
/// login view is deliberately not redirected here; that policy belongs to
/// the view.
pub struct RouteGuard {
    session: Arc<SessionStore>,
}

impl RouteGuard {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    pub fn evaluate(&self, target: &RouteTarget) -> NavigationDecision {
        if target.requires_auth && !self.session.is_logged_in() {
            NavigationDecision::RedirectToLogin
        } else {
            NavigationDecision::Allow
        }
    }
}
