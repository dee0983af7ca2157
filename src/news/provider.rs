use async_trait::async_trait;
use thiserror::Error;

use super::article::Article;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("news provider returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("news provider unreachable: {0}")]
    Transport(String),
    #[error("unexpected news provider response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsQuery {
    /// General top headlines for a market.
    Headlines { country: String, page_size: u32 },
    /// Newest articles matching a search term.
    Search { term: String, page_size: u32 },
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<Article>, UpstreamError>;
}
