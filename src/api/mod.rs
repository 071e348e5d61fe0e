//! Typed wrappers for the backend REST endpoints

pub mod auth;
pub mod favorite;
pub mod like;
pub mod models;
pub mod ranking;

pub use models::*;

/// `[1, 2, 3]` -> `"1,2,3"`
fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
