//! HTTP layer: request/response pipeline in front of a transport

pub mod client;
pub mod middleware;
pub mod request;
pub mod transport;

pub use client::{ApiClient, Envelope};
pub use middleware::{
    AttachBearerToken, HandleUnauthorized, Pipeline, RejectErrorStatus, RequestMiddleware,
    ResponseMiddleware,
};
pub use request::{ApiRequest, RawResponse};
pub use transport::{ReqwestTransport, Transport};
