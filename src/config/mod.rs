use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

use crate::phone::PhoneRules;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PAGE_LIMIT: u32 = 10;

// ─── OTP / phone sections ─────────────────────────────────────────────────────

/// OTP entry settings (`[otp]` in config.toml).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of digits in the one-time code (default: 6).
    pub length: usize,
    /// Seconds before the resend action unlocks after a code is sent (default: 30).
    pub resend_timeout_secs: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            length: 6,
            resend_timeout_secs: 30,
        }
    }
}

/// Phone validation settings (`[phone]` in config.toml).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhoneConfig {
    /// Minimum digits a phone entry must contain (default: 10).
    pub min_digits: usize,
    /// Acceptance regex applied to the digit-only form of the input.
    /// Omit to use the built-in regional pattern.
    pub pattern: Option<String>,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            min_digits: 10,
            pattern: None,
        }
    }
}

// ─── TOML config file ─────────────────────────────────────────────────────────

/// `{data_dir}/config.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// Gym management API base URL (default: http://localhost:3000).
    api_base_url: Option<String>,
    /// Log level filter string, e.g. "debug", "info,gymctl=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default, human-readable) | "json" (structured).
    log_format: Option<String>,
    /// Write logs to this file path (rotated daily) in addition to stderr.
    log_file: Option<PathBuf>,
    /// HTTP request timeout in seconds (default: 10).
    http_timeout_secs: Option<u64>,
    /// Default page size for list commands (default: 10).
    page_limit: Option<u32>,
    /// OTP entry settings (`[otp]`).
    otp: Option<OtpConfig>,
    /// Phone validation settings (`[phone]`).
    phone: Option<PhoneConfig>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

// ─── ConsoleConfig ────────────────────────────────────────────────────────────

/// Resolved configuration for the console. Built once at startup.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend API base URL (GYMCTL_API_URL env var).
    pub api_base_url: String,
    /// Directory for config.toml, session.json, and log files.
    pub data_dir: PathBuf,
    /// Log level filter string.
    pub log: String,
    /// Log output format: "pretty" | "json".
    pub log_format: String,
    /// Optional log file path (daily rotation).
    pub log_file: Option<PathBuf>,
    /// HTTP request timeout in seconds.
    pub http_timeout_secs: u64,
    /// Default page size for list commands.
    pub page_limit: u32,
    /// OTP entry settings.
    pub otp: OtpConfig,
    /// Phone validation settings.
    pub phone: PhoneConfig,
}

impl ConsoleConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `{data_dir}/config.toml`
    ///   3. Built-in defaults
    pub fn new(
        api_base_url: Option<String>,
        data_dir: Option<PathBuf>,
        log: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);

        // Load TOML as the lowest-priority override layer
        let toml = load_toml(&data_dir).unwrap_or_default();

        let api_base_url = api_base_url
            .or(toml.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        let log_format = std::env::var("GYMCTL_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let log_file = log_file.or(toml.log_file);

        let http_timeout_secs = toml.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        let page_limit = toml.page_limit.unwrap_or(DEFAULT_PAGE_LIMIT);

        let otp = toml.otp.unwrap_or_default();
        let phone = toml.phone.unwrap_or_default();

        Self {
            api_base_url,
            data_dir,
            log,
            log_format,
            log_file,
            http_timeout_secs,
            page_limit,
            otp,
            phone,
        }
    }

    /// Compile the `[phone]` section into validation rules.
    ///
    /// A malformed pattern logs a warning and falls back to the built-in
    /// regional default rather than aborting.
    pub fn phone_rules(&self) -> PhoneRules {
        let mut rules = PhoneRules {
            min_digits: self.phone.min_digits,
            ..PhoneRules::default()
        };
        if let Some(raw) = &self.phone.pattern {
            match regex::Regex::new(raw) {
                Ok(re) => rules.pattern = Some(re),
                Err(e) => {
                    warn!(pattern = %raw, err = %e, "invalid phone pattern in config — using default");
                }
            }
        }
        rules
    }
}

fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/gymctl
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("gymctl");
        }
    }
    #[cfg(target_os = "linux")]
    {
        // $XDG_DATA_HOME/gymctl or ~/.local/share/gymctl
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("gymctl");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("gymctl");
        }
    }
    #[cfg(target_os = "windows")]
    {
        // %APPDATA%\gymctl
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("gymctl");
        }
    }
    // Fallback
    PathBuf::from(".gymctl")
}
