//! Drives route transitions: resolves the target, applies the page title,
//! runs the guard and follows redirects until a route is allowed. Each
//! redirect is a fresh attempt that goes through the guard again.

use crate::{
    errors::AppError,
    features::auth::state::SessionContext,
    routes::{
        RouteTable, View,
        guard::{AccessSnapshot, Decision, GuardPaths, evaluate, title_for},
        normalize_path,
    },
};
use serde::Serialize;
use tracing::{debug, instrument};

/// Upper bound on redirects followed within one navigation.
pub const MAX_REDIRECTS: usize = 8;

/// Where a navigation ended up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub path: String,
    pub view: View,
    pub title: String,
    /// Paths that were attempted and redirected away from, in order.
    pub redirects: Vec<String>,
}

pub struct Navigator {
    table: RouteTable,
    session: SessionContext,
    default_title: String,
    title: String,
    current: Option<String>,
}

impl Navigator {
    pub fn new(table: RouteTable, session: SessionContext, default_title: &str) -> Self {
        Self {
            table,
            session,
            default_title: default_title.to_string(),
            title: default_title.to_string(),
            current: None,
        }
    }

    /// Title of the most recent navigation attempt.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Path of the last route that was allowed to render.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[instrument(skip(self))]
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, AppError> {
        let mut target = normalize_path(path);
        let mut redirects = Vec::new();

        for _ in 0..=MAX_REDIRECTS {
            let Some(route) = self.table.resolve(&target) else {
                self.title.clone_from(&self.default_title);
                return Ok(self.commit(target, View::NotFound, redirects));
            };

            if let Some(to) = route.redirect {
                debug!(from = %target, to = %to, "route redirect");
                redirects.push(target);
                target = to;
                continue;
            }

            self.title = title_for(&route.meta, &self.default_title).to_string();

            let access = AccessSnapshot {
                has_credential: self.session.store().has_credential()?,
                is_admin: self.session.is_admin(),
            };
            let paths = GuardPaths {
                login: self.table.login_path(),
                register: self.table.register_path(),
                default_authenticated: self.table.default_path(),
            };

            match evaluate(&route.path, &route.meta, access, paths) {
                Decision::Allow => return Ok(self.commit(route.path, route.view, redirects)),
                Decision::RedirectTo(next) => {
                    debug!(from = %target, to = %next, "guard redirect");
                    redirects.push(target);
                    target = normalize_path(&next);
                }
            }
        }

        Err(AppError::Navigation(format!(
            "Gave up on {path} after {MAX_REDIRECTS} redirects"
        )))
    }

    fn commit(&mut self, path: String, view: View, redirects: Vec<String>) -> Navigation {
        self.current = Some(path.clone());
        Navigation {
            path,
            view,
            title: self.title.clone(),
            redirects,
        }
    }
}
