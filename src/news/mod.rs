use crate::state::AppState;
use axum::{routing::get, Router};

pub mod aggregator;
pub mod article;
pub mod client;
mod handlers;
pub mod provider;

pub use aggregator::NewsAggregator;
pub use article::{Article, Source};
pub use client::NewsApiClient;
pub use provider::{NewsProvider, NewsQuery, UpstreamError};

pub fn router() -> Router<AppState> {
    Router::new().route("/news", get(handlers::get_news))
}
