use std::{collections::HashSet, sync::Arc};

use futures::future::join_all;
use tracing::{debug, warn};

use super::{
    article::Article,
    provider::{NewsProvider, NewsQuery, UpstreamError},
};

pub const HEADLINES_LIMIT: usize = 10;
pub const PER_PREFERENCE_LIMIT: usize = 5;
pub const MAX_ARTICLES: usize = 20;

/// Turns a preference list into one ranked feed.
pub struct NewsAggregator {
    /// `None` when no provider credentials are configured.
    provider: Option<Arc<dyn NewsProvider>>,
    country: String,
}

impl NewsAggregator {
    pub fn new(provider: Arc<dyn NewsProvider>, country: impl Into<String>) -> Self {
        Self {
            provider: Some(provider),
            country: country.into(),
        }
    }

    /// Aggregator that never calls upstream and serves [`Article::placeholder`].
    pub fn degraded() -> Self {
        Self {
            provider: None,
            country: String::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.provider.is_none()
    }

    pub async fn aggregate(&self, preferences: &[String]) -> Result<Vec<Article>, UpstreamError> {
        let Some(provider) = &self.provider else {
            debug!("no news credentials; serving placeholder");
            return Ok(vec![Article::placeholder()]);
        };

        if preferences.is_empty() {
            let query = NewsQuery::Headlines {
                country: self.country.clone(),
                page_size: HEADLINES_LIMIT as u32,
            };
            let mut articles = provider.fetch(&query).await?;
            articles.truncate(HEADLINES_LIMIT);
            return Ok(articles);
        }

        let lookups = preferences.iter().map(|term| async move {
            let query = NewsQuery::Search {
                term: term.clone(),
                page_size: PER_PREFERENCE_LIMIT as u32,
            };
            match provider.fetch(&query).await {
                Ok(mut articles) => {
                    articles.truncate(PER_PREFERENCE_LIMIT);
                    articles
                }
                Err(e) => {
                    warn!(preference = %term, error = %e, "preference lookup failed");
                    Vec::new()
                }
            }
        });
        let batches = join_all(lookups).await;

        Ok(rank(batches.into_iter().flatten()))
    }
}

/// Dedupe by exact title (first wins), newest first, capped at [`MAX_ARTICLES`].
///
/// The sort is stable, and articles without a publish time go last.
pub fn rank(articles: impl IntoIterator<Item = Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Article> = articles
        .into_iter()
        .filter(|a| seen.insert(a.title.clone()))
        .collect();
    unique.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    unique.truncate(MAX_ARTICLES);
    unique
}
