//! Route surface of the application: which paths exist, which view each one
//! mounts, and the access policy and title declared on it. Nested routes
//! share their parent's path prefix and inherit its policy.

pub mod guard;
pub mod navigator;

use crate::errors::AppError;

pub mod paths {
    pub const ROOT: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const CHAT: &str = "/chat";
    pub const UPLOAD: &str = "/upload";
    pub const ADMIN: &str = "/admin";
    pub const ADMIN_USERS: &str = "/admin/users";
    pub const ADMIN_KB: &str = "/admin/kb";
    pub const ADMIN_STATS: &str = "/admin/stats";
}

/// Page mounted for a route. Rendering is up to the UI layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum View {
    Login,
    Register,
    Chat,
    Upload,
    AdminDashboard,
    AdminHome,
    UserManage,
    KnowledgeManage,
    HotStats,
    NotFound,
}

/// Access policy and title declared on a route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: Option<String>,
    pub public: bool,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

impl RouteMeta {
    pub fn public(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            public: true,
            ..Self::default()
        }
    }

    pub fn requires_auth(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            requires_auth: true,
            ..Self::default()
        }
    }

    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Layers a child's meta over its parent's. Flags are inherited, the
    /// child's title wins when it has one.
    fn merge(&self, child: &RouteMeta) -> RouteMeta {
        RouteMeta {
            title: child.title.clone().or_else(|| self.title.clone()),
            public: self.public || child.public,
            requires_auth: self.requires_auth || child.requires_auth,
            requires_admin: self.requires_admin || child.requires_admin,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Route {
    pub path: String,
    pub name: Option<String>,
    pub view: Option<View>,
    pub redirect: Option<String>,
    pub meta: RouteMeta,
    pub children: Vec<Route>,
}

impl Route {
    pub fn new(path: &str, name: &str, view: View, meta: RouteMeta) -> Self {
        Self {
            path: path.to_string(),
            name: Some(name.to_string()),
            view: Some(view),
            redirect: None,
            meta,
            children: Vec::new(),
        }
    }

    pub fn redirect(path: &str, to: &str) -> Self {
        Self {
            path: path.to_string(),
            name: None,
            view: None,
            redirect: Some(to.to_string()),
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Route>) -> Self {
        self.children = children;
        self
    }
}

/// Outcome of matching a path against the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub path: String,
    pub name: Option<String>,
    pub view: View,
    pub redirect: Option<String>,
    /// Policy merged along the matched chain, parent first.
    pub meta: RouteMeta,
}

#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    login_path: String,
    register_path: String,
    default_path: String,
}

impl RouteTable {
    /// Builds a table and checks that guard redirects cannot loop.
    pub fn new(
        routes: Vec<Route>,
        login_path: &str,
        register_path: &str,
        default_path: &str,
    ) -> Result<Self, AppError> {
        let table = Self {
            routes,
            login_path: normalize_path(login_path),
            register_path: normalize_path(register_path),
            default_path: normalize_path(default_path),
        };
        table.validate()?;
        Ok(table)
    }

    /// The application's routes.
    pub fn app_routes() -> Result<Self, AppError> {
        let routes = vec![
            Route::redirect(paths::ROOT, paths::LOGIN),
            Route::new(
                paths::LOGIN,
                "UserLogin",
                View::Login,
                RouteMeta::public("GadgetGuide AI - Login"),
            ),
            Route::new(
                paths::REGISTER,
                "UserRegister",
                View::Register,
                RouteMeta::public("GadgetGuide AI - Register"),
            ),
            Route::new(
                paths::CHAT,
                "ChatInterface",
                View::Chat,
                RouteMeta::requires_auth("GadgetGuide AI - Chat"),
            ),
            Route::new(
                paths::UPLOAD,
                "UploadDocuments",
                View::Upload,
                RouteMeta::requires_auth("GadgetGuide AI - Upload Documents"),
            ),
            Route::new(
                paths::ADMIN,
                "AdminDashboard",
                View::AdminDashboard,
                RouteMeta {
                    requires_auth: true,
                    requires_admin: true,
                    ..RouteMeta::default()
                },
            )
            .with_children(vec![
                Route::new(
                    "",
                    "AdminHome",
                    View::AdminHome,
                    RouteMeta::titled("GadgetGuide AI - Admin"),
                ),
                Route::new(
                    "users",
                    "UserManage",
                    View::UserManage,
                    RouteMeta::titled("GadgetGuide AI - User Management"),
                ),
                Route::new(
                    "kb",
                    "KnowledgeManage",
                    View::KnowledgeManage,
                    RouteMeta::titled("GadgetGuide AI - Knowledge Base"),
                ),
                Route::new(
                    "stats",
                    "HotStats",
                    View::HotStats,
                    RouteMeta::titled("GadgetGuide AI - Hot Topics"),
                ),
            ]),
        ];
        Self::new(routes, paths::LOGIN, paths::REGISTER, paths::CHAT)
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn register_path(&self) -> &str {
        &self.register_path
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }

    /// Matches `path` (query and fragment ignored) against the table.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let target = normalize_path(path);
        let mut chain = Vec::new();
        if !find_chain(&self.routes, "", &target, &mut chain) {
            return None;
        }

        let meta = chain
            .iter()
            .fold(RouteMeta::default(), |acc, route| acc.merge(&route.meta));
        let leaf = chain.last()?;

        Some(ResolvedRoute {
            path: target,
            name: leaf.name.clone(),
            view: leaf.view.unwrap_or(View::NotFound),
            redirect: leaf.redirect.as_deref().map(normalize_path),
            meta,
        })
    }

    fn validate(&self) -> Result<(), AppError> {
        let login = self.resolve(&self.login_path).ok_or_else(|| {
            AppError::Config(format!("Login route {} is not declared", self.login_path))
        })?;
        if login.redirect.is_some() || login.meta.requires_auth || login.meta.requires_admin {
            return Err(AppError::Config(format!(
                "Login route {} must be reachable without a credential",
                self.login_path
            )));
        }

        let default = self.resolve(&self.default_path).ok_or_else(|| {
            AppError::Config(format!(
                "Default route {} is not declared",
                self.default_path
            ))
        })?;
        if default.redirect.is_some() || default.meta.requires_admin {
            return Err(AppError::Config(format!(
                "Default route {} must be reachable by every signed-in user",
                self.default_path
            )));
        }
        if self.default_path == self.login_path || self.default_path == self.register_path {
            return Err(AppError::Config(
                "Default route must differ from the login and register routes".to_string(),
            ));
        }
        Ok(())
    }
}

/// Depth-first match collecting the route chain from root to leaf.
fn find_chain<'a>(
    routes: &'a [Route],
    prefix: &str,
    target: &str,
    chain: &mut Vec<&'a Route>,
) -> bool {
    for route in routes {
        let full = join_path(prefix, &route.path);
        if full == target {
            chain.push(route);
            // A parent renders through its empty-path child, if it has one.
            if let Some(index) = route.children.iter().find(|child| child.path.is_empty()) {
                chain.push(index);
            }
            return true;
        }
        let nested_prefix = format!("{}/", full.trim_end_matches('/'));
        if !route.children.is_empty() && target.starts_with(&nested_prefix) {
            chain.push(route);
            if find_chain(&route.children, &full, target, chain) {
                return true;
            }
            chain.pop();
        }
    }
    false
}

fn join_path(prefix: &str, path: &str) -> String {
    if path.starts_with('/') {
        return normalize_path(path);
    }
    if path.is_empty() {
        return normalize_path(prefix);
    }
    normalize_path(&format!("{}/{}", prefix.trim_end_matches('/'), path))
}

/// Strips query and fragment, collapses trailing slashes, forces a leading `/`.
pub fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::{Route, RouteMeta, RouteTable, View, normalize_path, paths};
    use crate::errors::AppError;

    #[test]
    fn normalize_path_strips_noise() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("chat"), "/chat");
        assert_eq!(normalize_path("/chat/"), "/chat");
        assert_eq!(normalize_path("/admin/users?page=2#top"), "/admin/users");
    }

    #[test]
    fn resolves_top_level_routes() {
        let table = RouteTable::app_routes().unwrap();

        let chat = table.resolve("/chat").unwrap();
        assert_eq!(chat.view, View::Chat);
        assert_eq!(chat.name.as_deref(), Some("ChatInterface"));
        assert!(chat.meta.requires_auth);
        assert_eq!(chat.meta.title.as_deref(), Some("GadgetGuide AI - Chat"));

        let login = table.resolve("/login/").unwrap();
        assert_eq!(login.view, View::Login);
        assert!(login.meta.public);
        assert!(!login.meta.requires_auth);
    }

    #[test]
    fn root_is_a_redirect_to_login() {
        let table = RouteTable::app_routes().unwrap();
        let root = table.resolve("/").unwrap();
        assert_eq!(root.redirect.as_deref(), Some(paths::LOGIN));
    }

    #[test]
    fn nested_admin_routes_inherit_parent_policy() {
        let table = RouteTable::app_routes().unwrap();

        let users = table.resolve("/admin/users").unwrap();
        assert_eq!(users.view, View::UserManage);
        assert!(users.meta.requires_auth);
        assert!(users.meta.requires_admin);
        assert_eq!(
            users.meta.title.as_deref(),
            Some("GadgetGuide AI - User Management")
        );

        let home = table.resolve("/admin").unwrap();
        assert_eq!(home.view, View::AdminHome);
        assert_eq!(home.name.as_deref(), Some("AdminHome"));
        assert!(home.meta.requires_admin);
        assert_eq!(home.meta.title.as_deref(), Some("GadgetGuide AI - Admin"));
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        let table = RouteTable::app_routes().unwrap();
        assert!(table.resolve("/nowhere").is_none());
        assert!(table.resolve("/admin/nowhere").is_none());
        assert!(table.resolve("/chatroom").is_none());
    }

    #[test]
    fn rejects_login_route_behind_auth() {
        let routes = vec![
            Route::new("/login", "Login", View::Login, RouteMeta::requires_auth("Login")),
            Route::new("/chat", "Chat", View::Chat, RouteMeta::requires_auth("Chat")),
        ];
        let err = RouteTable::new(routes, "/login", "/register", "/chat").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn rejects_admin_only_default_route() {
        let routes = vec![
            Route::new("/login", "Login", View::Login, RouteMeta::public("Login")),
            Route::new(
                "/admin",
                "Admin",
                View::AdminHome,
                RouteMeta {
                    requires_admin: true,
                    ..RouteMeta::default()
                },
            ),
        ];
        let err = RouteTable::new(routes, "/login", "/register", "/admin").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn rejects_missing_routes() {
        let routes = vec![Route::new("/chat", "Chat", View::Chat, RouteMeta::default())];
        assert!(RouteTable::new(routes, "/login", "/register", "/chat").is_err());

        let routes = vec![Route::new("/login", "Login", View::Login, RouteMeta::default())];
        assert!(RouteTable::new(routes, "/login", "/register", "/chat").is_err());
    }
}
