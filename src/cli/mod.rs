//! CLI command modules — one file per console area, shared output helpers
//! and the [`Console`] context here.

pub mod assignments;
pub mod attendance;
pub mod exercises;
pub mod expenses;
pub mod login;
pub mod members;
pub mod payments;
pub mod permissions;
pub mod plans;
pub mod roles;
pub mod staff;
pub mod users;

use std::io::{self, Write as IoWrite};
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};

use crate::api::{ApiClient, PageInfo, PageQuery};
use crate::config::ConsoleConfig;
use crate::session::{Session, SessionStore};

/// Everything a command needs: resolved config, the session store, and the
/// API client wired to both.
pub struct Console {
    pub config: ConsoleConfig,
    pub sessions: Arc<SessionStore>,
    pub client: Arc<ApiClient>,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        let sessions = Arc::new(SessionStore::open(&config.data_dir));
        let client = Arc::new(ApiClient::new(&config, Arc::clone(&sessions))?);
        Ok(Self {
            config,
            sessions,
            client,
        })
    }

    /// Commands that hit protected endpoints check this first so the user
    /// gets a clear line instead of a bare 401.
    pub fn require_auth(&self) -> Result<Session> {
        match self.sessions.current() {
            Some(session) => Ok(session),
            None => bail!("Not logged in. Run `gymctl login` first."),
        }
    }

    /// Page query from explicit flags, falling back to the configured
    /// default page size.
    pub fn page(&self, page: Option<u32>, limit: Option<u32>) -> PageQuery {
        PageQuery::new(
            page.unwrap_or(1).max(1),
            limit.unwrap_or(self.config.page_limit).max(1),
        )
    }
}

// ─── Output helpers ───────────────────────────────────────────────────────────

/// `2025-05-01` for table columns.
pub fn fmt_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// `2025-05-01 09:30` where the time matters (check-ins, payments).
pub fn fmt_datetime(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Column-friendly rendering of an optional field.
pub fn fmt_opt(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

/// Truncate for a column, appending `…` past `max` characters.
pub fn preview(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        let cut: String = value.chars().take(max).collect();
        format!("{cut}…")
    } else {
        value.to_string()
    }
}

pub fn print_pagination(info: &PageInfo) {
    println!(
        "\nPage {}/{} ({} total)",
        info.page, info.total_pages, info.total
    );
}

/// Prompt on stdout and read one trimmed line from stdin.
pub fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// y/N confirmation for destructive commands; `--yes` skips the prompt.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let answer = read_line(&format!("{prompt} [y/N]: "))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundaries() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdefghij", 10), "abcdefghij");
        assert_eq!(preview("abcdefghijk", 10), "abcdefghij…");
        // Multi-byte input must not split a char.
        assert_eq!(preview("크림치즈베이글크림치즈", 4), "크림치즈…");
    }

    #[test]
    fn fmt_opt_renders_dashes_for_missing() {
        assert_eq!(fmt_opt(None), "-");
        assert_eq!(fmt_opt(Some("")), "-");
        assert_eq!(fmt_opt(Some("x")), "x");
    }
}
