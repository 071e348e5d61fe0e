//! Client-side routing with role-based guards

pub mod guard;
pub mod routes;

pub use guard::{
    GuardDecision, LogNotifier, NavigationGuard, Notifier, RecordingNotifier, RedirectReason,
    PERMISSION_DENIED,
};
pub use routes::{route_table, ResolvedRoute, RouteMeta, RouteRecord, HOME_PATH, LOGIN_PATH};

use crate::error::{Error, Result};
use parking_lot::Mutex;
use serde::Serialize;

/// Guard redirects followed before giving up on a navigation
const MAX_REDIRECTS: usize = 10;

/// Something that can be told to move the user elsewhere
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// One guard redirect taken while settling a navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hop {
    pub from: String,
    pub to: String,
    pub reason: RedirectReason,
}

/// Where a navigation ended up and how it got there
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub requested: String,
    pub route: ResolvedRoute,
    pub hops: Vec<Hop>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        !self.hops.is_empty()
    }
}

pub struct Router {
    table: Vec<RouteRecord>,
    guard: NavigationGuard,
    current: Mutex<Option<Navigation>>,
}

impl Router {
    /// Router over the application's route table
    pub fn new(guard: NavigationGuard) -> Self {
        Self::with_table(route_table(), guard)
    }

    pub fn with_table(table: Vec<RouteRecord>, guard: NavigationGuard) -> Self {
        Self {
            table,
            guard,
            current: Mutex::new(None),
        }
    }

    pub fn table(&self) -> &[RouteRecord] {
        &self.table
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    pub fn resolve(&self, path: &str) -> ResolvedRoute {
        routes::resolve(&self.table, path)
    }

    /// Navigate to `path`, running the guard before every commit.
    ///
    /// Guard redirects start a fresh navigation that is guarded again.
    pub fn push(&self, path: &str) -> Result<Navigation> {
        let mut target = path.to_string();
        let mut hops = Vec::new();

        for _ in 0..MAX_REDIRECTS {
            let route = self.resolve(&target);
            match self.guard.check(&route) {
                GuardDecision::Allow => {
                    let navigation = Navigation {
                        requested: path.to_string(),
                        route,
                        hops,
                    };
                    tracing::debug!("Navigated to {}", navigation.route.path);
                    *self.current.lock() = Some(navigation.clone());
                    return Ok(navigation);
                }
                GuardDecision::Redirect { to, reason } => {
                    hops.push(Hop {
                        from: route.path,
                        to: to.to_string(),
                        reason,
                    });
                    target = to.to_string();
                }
            }
        }

        Err(Error::RedirectLoop(path.to_string()))
    }

    /// The last committed navigation
    pub fn current(&self) -> Option<Navigation> {
        self.current.lock().clone()
    }
}

impl Navigator for Router {
    fn redirect(&self, path: &str) {
        if let Err(e) = self.push(path) {
            tracing::warn!("Forced redirect to {} failed: {}", path, e);
        }
    }
}
