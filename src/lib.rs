//! bookadmin - client for the library admin backend
//!
//! Keeps the login session, guards client-side routes by role and wraps
//! the favorite, like, ranking and auth endpoints.

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod router;

pub use app::App;
pub use auth::SessionStore;
pub use config::Config;
pub use error::Error;
pub use router::{NavigationGuard, Router};
