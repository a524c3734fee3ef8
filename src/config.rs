use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub request_timeout_ms: u64,
    pub concurrency_limit: usize,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub ping_on_startup: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticlesConfig {
    /// Start the store with the two demo articles ("1" and "2").
    pub seed_fixtures: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AdminConfig {
    /// Bearer token that grants the admin capability. No token, no admins.
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_seconds: u64,
}

/// Base URLs of partner sites handed to downstream collaborators.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SitesConfig {
    pub intuit: String,
    pub taxslayer: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub articles: ArticlesConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    pub rate_limit: RateLimitConfig,
    pub sites: SitesConfig,
}

impl AppConfig {
    /// Copy of the configuration that is safe to log.
    pub fn redacted(&self) -> AppConfig {
        let mut cfg = self.clone();
        if cfg.admin.token.is_some() {
            cfg.admin.token = Some("********".to_string());
        }
        cfg
    }
}

const DEFAULTS: &str = include_str!("../config/default.toml");

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        match ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => {
                    eprintln!("FATAL: Failed to deserialize default config: {}", e);
                    panic!("Failed to deserialize default config: {}", e);
                }
            },
            Err(e) => {
                eprintln!("FATAL: Failed to parse default config: {}", e);
                panic!("Failed to parse default config: {}", e);
            }
        }
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        // Optional local file: articles-api.toml (in CWD)
        .add_source(::config::File::with_name("articles-api").required(false));

    if let Ok(custom_path) = std::env::var("ARTICLES_API_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("ARTICLES_API").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    // Server
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }
    if cfg.server.request_timeout_ms == 0 {
        return Err(anyhow::anyhow!("server.request_timeout_ms must be > 0"));
    }
    if cfg.server.concurrency_limit == 0 {
        return Err(anyhow::anyhow!("server.concurrency_limit must be > 0"));
    }
    if cfg.server.max_body_bytes == 0 {
        return Err(anyhow::anyhow!("server.max_body_bytes must be > 0"));
    }

    // Database
    if cfg.database.url.trim().is_empty() {
        return Err(anyhow::anyhow!("database.url must not be empty"));
    }
    if cfg.database.max_connections == 0 {
        return Err(anyhow::anyhow!("database.max_connections must be > 0"));
    }

    // Rate limiting
    if cfg.rate_limit.max_requests == 0 {
        return Err(anyhow::anyhow!("rate_limit.max_requests must be > 0"));
    }
    if cfg.rate_limit.window_seconds == 0 {
        return Err(anyhow::anyhow!("rate_limit.window_seconds must be > 0"));
    }

    // Admin
    if let Some(token) = &cfg.admin.token {
        if token.trim().is_empty() {
            return Err(anyhow::anyhow!("admin.token must not be blank when set"));
        }
    }

    Ok(())
}

pub fn ensure_sqlite_parent_dir(url: &str) -> anyhow::Result<()> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        let path = path.split('?').next().unwrap_or(path);
        if path.is_empty() || path == ":memory:" {
            return Ok(());
        }
        let p = Path::new(path);
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }
    Ok(())
}
