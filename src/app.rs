//! Application context: everything a command needs, built once

use std::sync::Arc;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{ApiClient, Pipeline, ReqwestTransport, Transport};
use crate::router::{Navigation, NavigationGuard, Notifier, RedirectReason, Router};

/// Session, router and API client wired together
pub struct App {
    pub config: Config,
    pub session: SessionStore,
    pub router: Arc<Router>,
    pub client: ApiClient,
}

impl App {
    /// Hydrate the session from disk and connect to the configured backend
    pub fn bootstrap(config: Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let session = SessionStore::open(&config.storage.path)?;
        let transport = ReqwestTransport::new(&config.api)?;
        tracing::debug!(
            "Bootstrapped with session file {}",
            config.storage.path.display()
        );
        Ok(Self::with_parts(config, session, notifier, Arc::new(transport)))
    }

    /// Assemble from explicit parts
    pub fn with_parts(
        config: Config,
        session: SessionStore,
        notifier: Arc<dyn Notifier>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let guard = NavigationGuard::new(session.clone(), notifier);
        let router = Arc::new(Router::new(guard));
        let pipeline = Pipeline::standard(session.clone(), router.clone());
        let client = ApiClient::new(transport, pipeline);

        Self {
            config,
            session,
            router,
            client,
        }
    }

    /// Navigate to `path` and fail unless the guard let us land there
    pub fn enter(&self, path: &str) -> Result<Navigation> {
        let wanted = self.router.resolve(path).path;
        let navigation = self.router.push(path)?;

        if navigation.route.path == wanted {
            return Ok(navigation);
        }

        match navigation.hops.first().map(|hop| hop.reason) {
            Some(RedirectReason::Forbidden) => Err(Error::Forbidden(wanted)),
            Some(RedirectReason::NotAuthenticated) | Some(RedirectReason::MissingUserInfo) => {
                Err(Error::NotLoggedIn)
            }
            _ => Err(Error::Other(format!(
                "Navigation to {} ended at {}",
                wanted, navigation.route.path
            ))),
        }
    }

    /// Drop the session
    pub fn teardown(&self) -> Result<()> {
        self.session.clear_session()
    }
}
