use std::{sync::Arc, time::Duration};

use crate::auth::{jwt::JwtKeys, password::PasswordService};
use crate::config::AppConfig;
use crate::news::{NewsAggregator, NewsApiClient, NewsProvider};
use crate::users::{InMemoryUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub keys: JwtKeys,
    pub passwords: PasswordService,
    pub news: Arc<NewsAggregator>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let news = match config.news.real_api_key() {
            Some(key) => {
                let client = NewsApiClient::new(
                    &config.news.base_url,
                    key,
                    Duration::from_secs(config.news.timeout_secs),
                )?;
                NewsAggregator::new(Arc::new(client), &config.news.country)
            }
            None => NewsAggregator::degraded(),
        };

        Self::from_parts(config, Arc::new(InMemoryUserStore::new()), news)
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        news: NewsAggregator,
    ) -> anyhow::Result<Self> {
        let keys = JwtKeys::new(&config.jwt);
        let passwords = PasswordService::new(config.password_hash_cost)?;
        Ok(Self {
            config,
            users,
            keys,
            passwords,
            news: Arc::new(news),
        })
    }

    /// State wired to an in-memory store and the given provider, with cheap hashing.
    pub fn for_tests(provider: Arc<dyn NewsProvider>) -> Self {
        use crate::config::{JwtConfig, NewsApiConfig, DEFAULT_NEWS_API_URL};

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 60 * 24,
            },
            news: NewsApiConfig {
                api_key: Some("test-key".into()),
                base_url: DEFAULT_NEWS_API_URL.into(),
                country: "us".into(),
                timeout_secs: 5,
            },
            password_hash_cost: 4,
        });
        let news = NewsAggregator::new(provider, "us");
        Self::from_parts(config, Arc::new(InMemoryUserStore::new()), news)
            .expect("test state")
    }
}
