//! Static route table and path resolution

use crate::auth::Role;
use serde::Serialize;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Record redirects followed while resolving a single path
const MAX_RECORD_REDIRECTS: usize = 8;

/// Per-route access metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    /// `None` means "not declared"; only `Some(false)` disables the auth check
    pub requires_auth: Option<bool>,

    /// Any one of these roles (under role implication) grants access
    pub requires_role: Vec<Role>,

    pub title: Option<&'static str>,
}

impl RouteMeta {
    pub fn public() -> Self {
        Self {
            requires_auth: Some(false),
            ..Self::default()
        }
    }

    pub fn authenticated() -> Self {
        Self {
            requires_auth: Some(true),
            ..Self::default()
        }
    }

    pub fn titled(title: &'static str) -> Self {
        Self {
            title: Some(title),
            ..Self::default()
        }
    }

    pub fn with_roles(mut self, roles: &[Role]) -> Self {
        self.requires_role = roles.to_vec();
        self
    }

    pub fn auth_required(&self) -> bool {
        self.requires_auth != Some(false)
    }

    /// Child keys win; undeclared child keys inherit from the parent
    fn merged_over(&self, parent: &RouteMeta) -> RouteMeta {
        RouteMeta {
            requires_auth: self.requires_auth.or(parent.requires_auth),
            requires_role: if self.requires_role.is_empty() {
                parent.requires_role.clone()
            } else {
                self.requires_role.clone()
            },
            title: self.title.or(parent.title),
        }
    }
}

/// A declared route
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub meta: RouteMeta,
    pub redirect: Option<&'static str>,
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn new(path: &'static str, name: &'static str, meta: RouteMeta) -> Self {
        Self {
            path,
            name: Some(name),
            meta,
            redirect: None,
            children: Vec::new(),
        }
    }
}

/// The application's routes
pub fn route_table() -> Vec<RouteRecord> {
    let staff = [Role::Admin, Role::Librarian];

    vec![
        RouteRecord::new("/login", "Login", RouteMeta::public()),
        RouteRecord::new("/register", "Register", RouteMeta::public()),
        RouteRecord {
            path: "/",
            name: None,
            meta: RouteMeta::authenticated(),
            redirect: Some("/books"),
            children: vec![
                RouteRecord::new("books", "BookList", RouteMeta::titled("Books")),
                RouteRecord::new("ranking", "RankingList", RouteMeta::titled("Rankings")),
                RouteRecord::new(
                    "readers",
                    "ReaderList",
                    RouteMeta::titled("Readers").with_roles(&staff),
                ),
                RouteRecord::new(
                    "borrow",
                    "BorrowList",
                    RouteMeta::titled("Borrowing").with_roles(&staff),
                ),
                RouteRecord::new("my-borrow", "MyBorrowList", RouteMeta::titled("My borrowing")),
                RouteRecord::new(
                    "statistics",
                    "Statistics",
                    RouteMeta::titled("Statistics").with_roles(&staff),
                ),
                RouteRecord::new(
                    "system",
                    "System",
                    RouteMeta::titled("System").with_roles(&[Role::Admin]),
                ),
            ],
        },
    ]
}

/// A path matched against the table with its effective metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub path: String,
    pub name: Option<&'static str>,
    pub meta: RouteMeta,
    /// False when no record matched; meta is then empty (auth required)
    pub matched: bool,
}

/// Flattened view of the table: full path, name and effective meta
pub fn flatten(table: &[RouteRecord]) -> Vec<ResolvedRoute> {
    let mut out = Vec::new();
    for record in table {
        out.push(ResolvedRoute {
            path: record.path.to_string(),
            name: record.name,
            meta: record.meta.clone(),
            matched: true,
        });
        for child in &record.children {
            out.push(ResolvedRoute {
                path: join(record.path, child.path),
                name: child.name,
                meta: child.meta.merged_over(&record.meta),
                matched: true,
            });
        }
    }
    out
}

/// Resolve `path`, following record redirects
pub fn resolve(table: &[RouteRecord], path: &str) -> ResolvedRoute {
    let mut target = normalize(path);

    for _ in 0..MAX_RECORD_REDIRECTS {
        match find(table, &target) {
            Some((record, meta, full_path)) => match record.redirect {
                Some(redirect) => target = normalize(redirect),
                None => {
                    return ResolvedRoute {
                        path: full_path,
                        name: record.name,
                        meta,
                        matched: true,
                    }
                }
            },
            None => break,
        }
    }

    ResolvedRoute {
        path: target,
        name: None,
        meta: RouteMeta::default(),
        matched: false,
    }
}

fn find<'a>(table: &'a [RouteRecord], path: &str) -> Option<(&'a RouteRecord, RouteMeta, String)> {
    for record in table {
        if record.path == path {
            return Some((record, record.meta.clone(), record.path.to_string()));
        }
        for child in &record.children {
            let full = join(record.path, child.path);
            if full == path {
                return Some((child, child.meta.merged_over(&record.meta), full));
            }
        }
    }
    None
}

fn join(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        return child.to_string();
    }
    format!("{}/{}", parent.trim_end_matches('/'), child)
}

/// Drop query and fragment, ensure a leading slash, drop a trailing one
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return HOME_PATH.to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
