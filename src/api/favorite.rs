//! Favorite endpoints

use crate::api::models::{BatchFavoriteStatus, BookMark, FavoriteStatus, PageResult, Pagination};
use crate::api::join_ids;
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};

/// Flip the current user's favorite on a book
pub async fn toggle(client: &ApiClient, book_id: u64) -> Result<FavoriteStatus> {
    client
        .call(ApiRequest::post(format!("/favorite/toggle/{}", book_id)))
        .await
}

pub async fn status(client: &ApiClient, book_id: u64) -> Result<FavoriteStatus> {
    client
        .call(ApiRequest::get(format!("/favorite/status/{}", book_id)))
        .await
}

/// Status for several books at once; an empty list never hits the network
pub async fn batch_status(client: &ApiClient, book_ids: &[u64]) -> Result<Vec<BatchFavoriteStatus>> {
    if book_ids.is_empty() {
        return Ok(Vec::new());
    }
    client
        .call(ApiRequest::get("/favorite/batch-status").query("bookIds", join_ids(book_ids)))
        .await
}

/// The current user's favorites, newest first
pub async fn list(client: &ApiClient, page: Pagination) -> Result<PageResult<BookMark>> {
    client
        .call(
            ApiRequest::get("/favorite/list")
                .query("page", page.page)
                .query("pageSize", page.page_size),
        )
        .await
}
