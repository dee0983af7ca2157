use serde::Deserialize;
use tracing::warn;

/// Signing secret used when `JWT_SECRET` is unset. Never deploy with it.
pub const DEV_JWT_SECRET: &str = "your-secret-key-change-in-production";
/// Placeholder API key; treated the same as no key at all.
pub const DEV_NEWS_API_KEY: &str = "your-news-api-key";

pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/top-headlines";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub country: String,
    pub timeout_secs: u64,
}

impl NewsApiConfig {
    /// The key to send upstream, or `None` when only the placeholder is configured.
    pub fn real_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != DEV_NEWS_API_KEY)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub news: NewsApiConfig,
    pub password_hash_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = std::env::var("APP_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);

        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| {
                warn!("JWT_SECRET not set; using the development secret");
                DEV_JWT_SECRET.into()
            }),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "newsfeed".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "newsfeed-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24),
        };

        let news = NewsApiConfig {
            api_key: std::env::var("NEWS_API_KEY").ok(),
            base_url: std::env::var("NEWS_API_URL").unwrap_or_else(|_| DEFAULT_NEWS_API_URL.into()),
            country: std::env::var("NEWS_API_COUNTRY").unwrap_or_else(|_| "us".into()),
            timeout_secs: std::env::var("NEWS_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(10),
        };
        if news.real_api_key().is_none() {
            warn!("NEWS_API_KEY not configured; /news will serve a placeholder article");
        }

        let password_hash_cost = std::env::var("PASSWORD_HASH_COST")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            jwt,
            news,
            password_hash_cost,
        })
    }
}
