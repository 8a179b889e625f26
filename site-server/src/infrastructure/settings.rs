use anyhow::{Context, Result, anyhow};

use crate::domain::blog::DisplayOffset;

/// Settings shared by every command, including the ones that never start
/// the HTTP server.
#[derive(Debug, Clone)]
pub(crate) struct BaseSettings {
    pub(crate) database_url: String,
    pub(crate) log_level: String,
}

impl BaseSettings {
    pub(crate) fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://data.db".to_string())
            .trim()
            .to_string();
        if database_url.is_empty() {
            return Err(anyhow!("DATABASE_URL must not be empty"));
        }
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            log_level,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) database_url: String,
    pub(crate) jwt_secret: String,
    pub(crate) jwt_ttl_seconds: i64,
    pub(crate) http_addr: String,
    pub(crate) log_level: String,
    pub(crate) http_request_body_limit_bytes: usize,
    pub(crate) http_concurrency_limit: usize,
    pub(crate) http_no_cache: bool,
    pub(crate) guestbook_page_size: u32,
    pub(crate) admin_page_size: u32,
    pub(crate) display_offset: DisplayOffset,
    pub(crate) rich_text_editor_url: Option<String>,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        let BaseSettings {
            database_url,
            log_level,
        } = BaseSettings::from_env()?;
        let jwt_secret = get_required("JWT_SECRET").context("JWT_SECRET is required")?;
        let jwt_ttl_seconds = parse_jwt_ttl(
            &std::env::var("JWT_TTL_SECONDS").unwrap_or_else(|_| "3600".to_string()),
        )?;

        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_usize_env("HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_no_cache = parse_bool_env("HTTP_NO_CACHE", false)?;
        let guestbook_page_size = parse_u32_env("GUESTBOOK_PAGE_SIZE", 20)?;
        let admin_page_size = parse_u32_env("ADMIN_PAGE_SIZE", 20)?;

        let offset_hours: i32 = std::env::var("DISPLAY_UTC_OFFSET_HOURS")
            .unwrap_or_else(|_| "8".to_string())
            .trim()
            .parse()
            .context("Failed to parse DISPLAY_UTC_OFFSET_HOURS, expecting integer")?;
        let display_offset = DisplayOffset::from_hours(offset_hours)
            .map_err(|err| anyhow!("DISPLAY_UTC_OFFSET_HOURS: {err}"))?;

        let rich_text_editor_url = std::env::var("RICH_TEXT_EDITOR_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_ttl_seconds,
            http_addr,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_no_cache,
            guestbook_page_size,
            admin_page_size,
            display_offset,
            rich_text_editor_url,
        })
    }
}

/// Upper bound on admin session lifetime: one year.
const MAX_JWT_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

fn parse_jwt_ttl(raw: &str) -> Result<i64> {
    let ttl: i64 = raw
        .trim()
        .parse()
        .context("Failed to parse JWT_TTL_SECONDS, expecting integer")?;
    if !(1..=MAX_JWT_TTL_SECONDS).contains(&ttl) {
        return Err(anyhow!(
            "JWT_TTL_SECONDS must be between 1 and {MAX_JWT_TTL_SECONDS}"
        ));
    }
    Ok(ttl)
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u32_env(key: &str, default: u32) -> Result<u32> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u32>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_bool_env(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(anyhow!("{key} must be a boolean, got '{other}'")),
        },
    }
}
