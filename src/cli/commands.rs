//! CLI command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::sync::Arc;

use crate::api::{self, Pagination, RankingPeriod, RankingType};
use crate::app::App;
use crate::cli::{
    error, info, print_marks, print_navigation, print_ranking, print_routes, print_session,
    success, warn, ConsoleNotifier, MarkAction, OutputFormat,
};
use crate::config::{self, loader::CONFIG_FILENAME, Config};
use crate::router::routes::flatten as flatten_routes;

/// Which backend domain a mark command talks to
#[derive(Debug, Clone, Copy)]
pub enum MarkKind {
    Favorite,
    Like,
}

fn load_config(base_url: Option<String>) -> Result<Config> {
    let mut config = config::load_config_or_default()?;
    if let Some(url) = base_url {
        config.api.base_url = url;
    }
    Ok(config)
}

fn app(base_url: Option<String>) -> Result<App> {
    let config = load_config(base_url)?;
    Ok(App::bootstrap(config, Arc::new(ConsoleNotifier))?)
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, table: impl FnOnce(&T)) -> Result<()> {
    match format {
        OutputFormat::Table => table(value),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}

/// Initialize a new bookadmin.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Run 'bookadmin login' to start a session");
    Ok(())
}

pub async fn login(
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let app = app(base_url)?;

    let username = match username {
        Some(u) => u,
        None => dialoguer::Input::<String>::new()
            .with_prompt("Username")
            .interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?,
    };

    match api::auth::login(&app.client, &app.session, &username, &password).await {
        Ok(user) => {
            success(&format!("Logged in as {} ({})", user.display_name(), user.role));
            Ok(())
        }
        Err(e) => {
            error(&format!("Login failed: {}", e));
            Err(e.into())
        }
    }
}

pub async fn logout(base_url: Option<String>) -> Result<()> {
    let app = app(base_url)?;
    api::auth::logout(&app.session)?;
    success("Logged out");
    Ok(())
}

pub async fn whoami(base_url: Option<String>, remote: bool) -> Result<()> {
    let app = app(base_url)?;
    print_session(&app.session);

    if remote && app.session.is_logged_in() {
        let user = api::auth::current_user(&app.client)
            .await
            .context("Failed to fetch user info")?;
        println!();
        info(&format!(
            "Backend says: #{} {} ({}, {})",
            user.id, user.username, user.role, user.status
        ));
    }
    Ok(())
}

pub async fn routes(base_url: Option<String>, format: OutputFormat) -> Result<()> {
    let app = app(base_url)?;
    let all = flatten_routes(app.router.table());
    let role = if app.session.is_logged_in() {
        app.session.user_info().map(|u| u.role)
    } else {
        None
    };
    emit(format, &all, |all| print_routes(all, role))
}

pub async fn open(base_url: Option<String>, path: &str) -> Result<()> {
    let app = app(base_url)?;
    let navigation = app.router.push(path)?;
    print_navigation(&navigation);
    Ok(())
}

pub async fn mark(base_url: Option<String>, kind: MarkKind, action: MarkAction) -> Result<()> {
    let app = app(base_url)?;
    app.enter("/books")?;

    match (kind, action) {
        (MarkKind::Favorite, MarkAction::Toggle { book_id }) => {
            let status = api::favorite::toggle(&app.client, book_id).await?;
            let verb = if status.is_favorited { "Favorited" } else { "Unfavorited" };
            success(&format!("{} book {} ({} total)", verb, book_id, status.favorite_count));
        }
        (MarkKind::Favorite, MarkAction::Status { book_id }) => {
            let status = api::favorite::status(&app.client, book_id).await?;
            info(&format!(
                "Book {}: favorited={} count={}",
                book_id, status.is_favorited, status.favorite_count
            ));
        }
        (MarkKind::Favorite, MarkAction::Batch { book_ids }) => {
            for s in api::favorite::batch_status(&app.client, &book_ids).await? {
                info(&format!(
                    "Book {}: favorited={} count={}",
                    s.book_id, s.is_favorited, s.favorite_count
                ));
            }
        }
        (MarkKind::Favorite, MarkAction::List { page, page_size, format }) => {
            let result = api::favorite::list(&app.client, Pagination { page, page_size }).await?;
            emit(format, &result, print_marks)?;
        }
        (MarkKind::Like, MarkAction::Toggle { book_id }) => {
            let status = api::like::toggle(&app.client, book_id).await?;
            let verb = if status.is_liked { "Liked" } else { "Unliked" };
            success(&format!("{} book {} ({} total)", verb, book_id, status.like_count));
        }
        (MarkKind::Like, MarkAction::Status { book_id }) => {
            let status = api::like::status(&app.client, book_id).await?;
            info(&format!(
                "Book {}: liked={} count={}",
                book_id, status.is_liked, status.like_count
            ));
        }
        (MarkKind::Like, MarkAction::Batch { book_ids }) => {
            for s in api::like::batch_status(&app.client, &book_ids).await? {
                info(&format!(
                    "Book {}: liked={} count={}",
                    s.book_id, s.is_liked, s.like_count
                ));
            }
        }
        (MarkKind::Like, MarkAction::List { page, page_size, format }) => {
            let result = api::like::list(&app.client, Pagination { page, page_size }).await?;
            emit(format, &result, print_marks)?;
        }
    }
    Ok(())
}

pub async fn ranking_show(
    base_url: Option<String>,
    kind: RankingType,
    period: RankingPeriod,
    limit: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let app = app(base_url)?;
    app.enter("/ranking")?;

    let ranking = api::ranking::get(&app.client, kind, period, limit).await?;
    emit(format, &ranking, print_ranking)
}

pub async fn ranking_rebuild(
    base_url: Option<String>,
    kind: RankingType,
    period: RankingPeriod,
) -> Result<()> {
    let app = app(base_url)?;
    app.enter("/system")?;

    info(&format!("Rebuilding {} {} ranking", kind, period));
    match api::ranking::rebuild(&app.client, kind, period).await {
        Ok(message) => {
            success(if message.is_empty() { "Rebuilt" } else { message.as_str() });
            Ok(())
        }
        Err(e) => {
            error(&format!("Failed to rebuild ranking: {}", e));
            Err(e.into())
        }
    }
}
