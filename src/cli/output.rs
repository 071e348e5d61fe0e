//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::api::{BookMark, PageResult, Ranking};
use crate::auth::{Role, SessionStore};
use crate::router::{Navigation, Notifier, ResolvedRoute};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Shows guard notices on the terminal
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn warn(&self, message: &str) {
        warn(message);
    }
}

fn header(cells: &[&str]) -> Vec<Cell> {
    cells.iter().map(|c| Cell::new(c).fg(Color::Cyan)).collect()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn role_list(roles: &[Role]) -> String {
    if roles.is_empty() {
        return "-".to_string();
    }
    roles
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print the route table with what the current user may open
pub fn print_routes(routes: &[ResolvedRoute], role: Option<Role>) {
    let mut table = new_table();
    table.set_header(header(&["Path", "Name", "Auth", "Roles", "Access"]));

    for route in routes {
        let access = if !route.meta.auth_required() {
            Cell::new("open").fg(Color::Green)
        } else {
            match role {
                None => Cell::new("login").fg(Color::Yellow),
                Some(role)
                    if route.meta.requires_role.is_empty()
                        || route.meta.requires_role.iter().any(|r| role.satisfies(*r)) =>
                {
                    Cell::new("yes").fg(Color::Green)
                }
                Some(_) => Cell::new("no").fg(Color::Red),
            }
        };

        table.add_row(vec![
            Cell::new(&route.path),
            Cell::new(route.name.unwrap_or("-")),
            Cell::new(if route.meta.auth_required() { "yes" } else { "no" }),
            Cell::new(role_list(&route.meta.requires_role)),
            access,
        ]);
    }

    println!("{table}");
}

/// Print where a navigation landed
pub fn print_navigation(navigation: &Navigation) {
    for hop in &navigation.hops {
        println!(
            "  {} {} → {} ({:?})",
            "↪".yellow(),
            hop.from,
            hop.to,
            hop.reason
        );
    }
    let title = navigation.route.meta.title.unwrap_or("");
    success(&format!("At {} {}", navigation.route.path.bold(), title));
}

/// Print the local session state
pub fn print_session(session: &SessionStore) {
    println!("{}", "Session".bold().underline());
    println!();

    let logged_in = session.is_logged_in();
    let state = if logged_in {
        "logged in".green()
    } else {
        "logged out".red()
    };
    println!("  {} {}", "State:".bold(), state);

    match session.user_info() {
        Some(user) if logged_in => {
            println!("  {} {}", "User:".bold(), user.display_name());
            println!("  {} {}", "Role:".bold(), user.role);
            println!("  {} {}", "Staff:".bold(), session.has_elevated_role());
            println!("  {} {}", "Admin:".bold(), session.is_admin());
        }
        _ => info("Run 'bookadmin login' to start a session"),
    }
}

/// Print a page of favorites or likes
pub fn print_marks(page: &PageResult<BookMark>) {
    if page.list.is_empty() {
        info("Nothing here yet");
        return;
    }

    let mut table = new_table();
    table.set_header(header(&["Book", "Title", "Author", "Likes", "Favorites", "Since"]));

    for mark in &page.list {
        let since = mark
            .created_at
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(mark.book_id),
            Cell::new(&mark.book.title),
            Cell::new(&mark.book.author),
            Cell::new(mark.book.like_count),
            Cell::new(mark.book.favorite_count),
            Cell::new(since),
        ]);
    }

    println!("{table}");
    println!(
        "Page {} · {} per page · {} total",
        page.page, page.page_size, page.total
    );
}

/// Print a ranking board
pub fn print_ranking(ranking: &Ranking) {
    println!(
        "{} {} ranking {}",
        ranking.kind.to_string().bold(),
        ranking.period,
        ranking.period_key.dimmed()
    );

    if ranking.items.is_empty() {
        info("No entries for this period");
        return;
    }

    let mut table = new_table();
    table.set_header(header(&["#", "Book", "Title", "Author", "Score"]));

    for item in &ranking.items {
        let (title, author) = item
            .book
            .as_ref()
            .map(|b| (b.title.as_str(), b.author.as_str()))
            .unwrap_or(("-", "-"));

        let rank = match item.rank {
            1 => Cell::new(item.rank).fg(Color::Yellow),
            _ => Cell::new(item.rank),
        };

        table.add_row(vec![
            rank,
            Cell::new(item.book_id),
            Cell::new(title),
            Cell::new(author),
            Cell::new(item.score),
        ]);
    }

    println!("{table}");
    if !ranking.updated_at.is_empty() {
        println!("Updated {}", ranking.updated_at);
    }
}
