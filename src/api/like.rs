//! Like endpoints

use crate::api::models::{BatchLikeStatus, BookMark, LikeStatus, PageResult, Pagination};
use crate::api::join_ids;
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};

pub async fn toggle(client: &ApiClient, book_id: u64) -> Result<LikeStatus> {
    client
        .call(ApiRequest::post(format!("/like/toggle/{}", book_id)))
        .await
}

pub async fn status(client: &ApiClient, book_id: u64) -> Result<LikeStatus> {
    client
        .call(ApiRequest::get(format!("/like/status/{}", book_id)))
        .await
}

pub async fn batch_status(client: &ApiClient, book_ids: &[u64]) -> Result<Vec<BatchLikeStatus>> {
    if book_ids.is_empty() {
        return Ok(Vec::new());
    }
    client
        .call(ApiRequest::get("/like/batch-status").query("bookIds", join_ids(book_ids)))
        .await
}

pub async fn list(client: &ApiClient, page: Pagination) -> Result<PageResult<BookMark>> {
    client
        .call(
            ApiRequest::get("/like/list")
                .query("page", page.page)
                .query("pageSize", page.page_size),
        )
        .await
}
