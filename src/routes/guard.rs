//! Access decision taken before a route renders. UX-only: real access control
//! must live on the API.

use crate::routes::RouteMeta;

/// What the navigator should do with an attempted transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(String),
}

/// Session facts the guard needs. `has_credential` must be read from the
/// credential store at evaluation time, not from the cached session flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessSnapshot {
    pub has_credential: bool,
    pub is_admin: bool,
}

/// Paths the guard redirects to or treats specially.
#[derive(Clone, Copy, Debug)]
pub struct GuardPaths<'a> {
    pub login: &'a str,
    pub register: &'a str,
    pub default_authenticated: &'a str,
}

/// Evaluates the rules in order; the first match wins.
///
/// 1. Auth (or admin) required without a credential: go to login.
/// 2. Login or register with a credential: go to the default page.
/// 3. Admin required without the admin flag: go to the default page.
/// 4. Anything else is allowed.
pub fn evaluate(
    path: &str,
    meta: &RouteMeta,
    access: AccessSnapshot,
    paths: GuardPaths<'_>,
) -> Decision {
    if (meta.requires_auth || meta.requires_admin) && !access.has_credential {
        return Decision::RedirectTo(paths.login.to_string());
    }
    if (path == paths.login || path == paths.register) && access.has_credential {
        return Decision::RedirectTo(paths.default_authenticated.to_string());
    }
    if meta.requires_admin && !access.is_admin {
        return Decision::RedirectTo(paths.default_authenticated.to_string());
    }
    Decision::Allow
}

/// Title to display for a route, falling back to the application title.
pub fn title_for<'a>(meta: &'a RouteMeta, default_title: &'a str) -> &'a str {
    meta.title.as_deref().unwrap_or(default_title)
}
