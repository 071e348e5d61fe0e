//! Response shapes owned by the backend

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page of results as returned by the list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub list: Vec<T>,
    pub total: i64,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

/// Page selector for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

/// The subset of a book record the client displays
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub isbn: String,
    pub category: String,
    pub available_stock: i64,
    pub like_count: i64,
    pub favorite_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteStatus {
    pub is_favorited: bool,
    pub favorite_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFavoriteStatus {
    pub book_id: u64,
    pub is_favorited: bool,
    pub favorite_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeStatus {
    pub is_liked: bool,
    pub like_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchLikeStatus {
    pub book_id: u64,
    pub is_liked: bool,
    pub like_count: i64,
}

/// A favorite or like record with its book attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookMark {
    pub id: u64,
    pub book_id: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub book: Book,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RankingType {
    Like,
    Favorite,
}

impl fmt::Display for RankingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingType::Like => write!(f, "like"),
            RankingType::Favorite => write!(f, "favorite"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RankingPeriod {
    Week,
    Month,
}

impl fmt::Display for RankingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingPeriod::Week => write!(f, "week"),
            RankingPeriod::Month => write!(f, "month"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingItem {
    pub rank: u32,
    pub book_id: u64,
    #[serde(default)]
    pub book: Option<Book>,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ranking {
    #[serde(rename = "type")]
    pub kind: RankingType,
    pub period: RankingPeriod,
    #[serde(default)]
    pub period_key: String,
    #[serde(default)]
    pub items: Vec<RankingItem>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub updated_at: String,
}

/// Current user as returned by `/auth/userInfo`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "ID", default)]
    pub id: u64,
    pub username: String,
    pub role: crate::auth::Role,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub real_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_parses_backend_shape() {
        let json = r#"{
            "type": "like",
            "period": "week",
            "period_key": "2025-W45",
            "items": [{"rank": 1, "book_id": 9, "score": 42, "book": {"id": 9, "title": "Dune"}}],
            "total": 1,
            "updated_at": "2025-11-08 10:00:00"
        }"#;
        let ranking: Ranking = serde_json::from_str(json).unwrap();
        assert_eq!(ranking.kind, RankingType::Like);
        assert_eq!(ranking.items[0].book.as_ref().unwrap().title, "Dune");
    }

    #[test]
    fn test_bookmark_accepts_go_timestamps() {
        let json = r#"{"id":1,"user_id":3,"book_id":9,"created_at":"2025-11-08T10:00:00+08:00","book":{"id":9}}"#;
        let mark: BookMark = serde_json::from_str(json).unwrap();
        assert_eq!(mark.created_at.unwrap().to_rfc3339(), "2025-11-08T02:00:00+00:00");
    }

    #[test]
    fn test_page_result_uses_camel_case_page_size() {
        let json = r#"{"list":[],"total":0,"page":1,"pageSize":10}"#;
        let page: PageResult<BookMark> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page_size, 10);
    }
}
