//! Server configuration, loaded from environment variables at startup.

use anyhow::Context;

/// Runtime configuration for portfolio-server.
///
/// Everything optional has a sensible default so the server works
/// out-of-the-box; the one exception is the admin token, which must be set
/// explicitly so the archive endpoint can never fall open.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:5000"`).
    pub bind_address: String,

    /// Database URL (default: `"sqlite://portfolio.db"`). Supports any
    /// sqlx-compatible connection string – swap the scheme to migrate to
    /// Postgres (`postgres://…`) or MySQL (`mysql://…`).
    pub database_url: String,

    /// Shared secret gating the message archive endpoint. Required.
    pub admin_token: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated CORS origin allowlist. Unset means every origin is
    /// allowed, which is what the browser frontend needs in development.
    pub cors_allowed_origins: Option<String>,

    /// Serve the Swagger UI. On by default; disable in production to avoid
    /// advertising the API surface.
    pub enable_swagger: bool,

    /// SMTP relay settings; `None` disables contact notifications entirely.
    pub smtp: Option<SmtpConfig>,
}

/// Outbound mail settings for contact notifications.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay hostname.
    pub host: String,
    /// Submission port (default: 587, STARTTLS).
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender mailbox, e.g. `"Portfolio <noreply@example.com>"`.
    pub from: String,
    /// Operator mailbox that receives the notifications.
    pub to: String,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    ///
    /// Fails when `PORTFOLIO_ADMIN_TOKEN` is missing or empty, and when SMTP
    /// settings are present but incomplete; both are misconfigurations
    /// better caught at startup than at request time.
    pub fn from_env() -> anyhow::Result<Self> {
        let admin_token = std::env::var("PORTFOLIO_ADMIN_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .context("PORTFOLIO_ADMIN_TOKEN must be set to a non-empty value")?;

        Ok(Self {
            bind_address: env_or("PORTFOLIO_BIND", "0.0.0.0:5000"),
            database_url: env_or("PORTFOLIO_DATABASE_URL", "sqlite://portfolio.db"),
            admin_token,
            log_level: env_or("PORTFOLIO_LOG", "info"),
            log_json: bool_env("PORTFOLIO_LOG_JSON", false),
            cors_allowed_origins: std::env::var("PORTFOLIO_CORS_ORIGINS").ok(),
            enable_swagger: bool_env("PORTFOLIO_ENABLE_SWAGGER", true),
            smtp: smtp_from_env()?,
        })
    }
}

/// SMTP block, present only when `PORTFOLIO_SMTP_HOST` is set.
///
/// The recipient falls back to `PORTFOLIO_SMTP_USER` when `PORTFOLIO_SMTP_TO`
/// is unset, so a single-mailbox setup needs no extra variable.
fn smtp_from_env() -> anyhow::Result<Option<SmtpConfig>> {
    let Ok(host) = std::env::var("PORTFOLIO_SMTP_HOST") else {
        return Ok(None);
    };

    let username = std::env::var("PORTFOLIO_SMTP_USER").ok();
    let to = std::env::var("PORTFOLIO_SMTP_TO")
        .ok()
        .or_else(|| username.clone())
        .context("PORTFOLIO_SMTP_TO (or PORTFOLIO_SMTP_USER) must be set when PORTFOLIO_SMTP_HOST is")?;
    let from = std::env::var("PORTFOLIO_SMTP_FROM")
        .context("PORTFOLIO_SMTP_FROM must be set when PORTFOLIO_SMTP_HOST is")?;

    Ok(Some(SmtpConfig {
        host,
        port: parse_env("PORTFOLIO_SMTP_PORT", 587),
        username,
        password: std::env::var("PORTFOLIO_SMTP_PASS").ok(),
        from,
        to,
    }))
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn bool_env(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
