//! Request/response middleware and the pipeline that runs them

use crate::auth::SessionStore;
use crate::error::{Error, Result};
use crate::http::request::{ApiRequest, RawResponse};
use crate::http::transport::Transport;
use crate::router::{Navigator, LOGIN_PATH};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use std::sync::Arc;

/// Runs before a request leaves
pub trait RequestMiddleware: Send + Sync {
    fn on_request(&self, request: &mut ApiRequest) -> Result<()>;
}

/// Runs on every response, in order; may replace it or fail the call
pub trait ResponseMiddleware: Send + Sync {
    fn on_response(&self, response: RawResponse) -> Result<RawResponse>;
}

/// Adds `Authorization: Bearer <token>` when a token is stored
pub struct AttachBearerToken {
    session: SessionStore,
}

impl AttachBearerToken {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl RequestMiddleware for AttachBearerToken {
    fn on_request(&self, request: &mut ApiRequest) -> Result<()> {
        let token = match self.session.token() {
            Some(t) if !t.is_empty() => t,
            _ => return Ok(()),
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                request.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => tracing::warn!("Stored token is not a valid header value, sending without it"),
        }
        Ok(())
    }
}

/// On 401: drop the session and send the user to the login page
pub struct HandleUnauthorized {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl HandleUnauthorized {
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }
}

impl ResponseMiddleware for HandleUnauthorized {
    fn on_response(&self, response: RawResponse) -> Result<RawResponse> {
        if response.status != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::warn!("Request rejected as unauthorized: {}", response.message());
        if let Err(e) = self.session.clear_session() {
            tracing::warn!("Failed to clear session after 401: {}", e);
        }
        self.navigator.redirect(LOGIN_PATH);
        Err(Error::Unauthorized)
    }
}

/// Fails the call on any non-2xx status. No retry.
pub struct RejectErrorStatus;

impl ResponseMiddleware for RejectErrorStatus {
    fn on_response(&self, response: RawResponse) -> Result<RawResponse> {
        if response.status.is_success() {
            return Ok(response);
        }
        Err(Error::Status {
            status: response.status.as_u16(),
            message: response.message(),
        })
    }
}

/// Ordered request and response middleware around a transport
#[derive(Clone, Default)]
pub struct Pipeline {
    request: Vec<Arc<dyn RequestMiddleware>>,
    response: Vec<Arc<dyn ResponseMiddleware>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token attachment, 401 handling, then status rejection
    pub fn standard(session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self::new()
            .with_request(AttachBearerToken::new(session.clone()))
            .with_response(HandleUnauthorized::new(session, navigator))
            .with_response(RejectErrorStatus)
    }

    pub fn with_request(mut self, middleware: impl RequestMiddleware + 'static) -> Self {
        self.request.push(Arc::new(middleware));
        self
    }

    pub fn with_response(mut self, middleware: impl ResponseMiddleware + 'static) -> Self {
        self.response.push(Arc::new(middleware));
        self
    }

    pub async fn execute(&self, transport: &dyn Transport, mut request: ApiRequest) -> Result<RawResponse> {
        for middleware in &self.request {
            middleware.on_request(&mut request)?;
        }

        tracing::debug!("{} {}", request.method, request.path);
        let mut response = transport.send(&request).await?;

        for middleware in &self.response {
            response = middleware.on_response(response)?;
        }
        Ok(response)
    }
}
