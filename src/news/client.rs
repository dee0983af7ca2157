use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{
    article::Article,
    provider::{NewsProvider, NewsQuery, UpstreamError},
};

/// NewsAPI `top-headlines` client.
pub struct NewsApiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ArticlesBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl NewsApiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build news http client")?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        })
    }

    fn params(query: &NewsQuery) -> Vec<(&'static str, String)> {
        match query {
            NewsQuery::Headlines { country, page_size } => vec![
                ("country", country.clone()),
                ("pageSize", page_size.to_string()),
            ],
            NewsQuery::Search { term, page_size } => vec![
                ("q", term.clone()),
                ("pageSize", page_size.to_string()),
                ("sortBy", "publishedAt".to_string()),
            ],
        }
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<Article>, UpstreamError> {
        // key goes in a header so it never shows up in logged URLs
        let response = self
            .client
            .get(&self.base_url)
            .header("X-Api-Key", &self.api_key)
            .query(&Self::params(query))
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("error").to_string());
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: ArticlesBody = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;
        if body.status == "error" {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: body.message.unwrap_or_default(),
            });
        }

        debug!(query = ?query, count = body.articles.len(), "news fetched");
        Ok(body.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(url: String) -> NewsApiClient {
        NewsApiClient::new(url, "test-key", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn headlines_query_params_and_parsing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("x-api-key", "test-key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("country".into(), "us".into()),
                Matcher::UrlEncoded("pageSize".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"ok","totalResults":1,"articles":[
                    {"source":{"id":null,"name":"Daily Planet"},"title":"Hello",
                     "url":"https://dp.example/1","publishedAt":"2024-01-02T03:04:05Z"}
                ]}"#,
            )
            .create_async()
            .await;

        let articles = client(server.url())
            .fetch(&NewsQuery::Headlines {
                country: "us".into(),
                page_size: 10,
            })
            .await
            .expect("fetch");

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title.as_deref(), Some("Hello"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_sorts_by_publish_date() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "space travel".into()),
                Matcher::UrlEncoded("pageSize".into(), "5".into()),
                Matcher::UrlEncoded("sortBy".into(), "publishedAt".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"status":"ok","articles":[]}"#)
            .create_async()
            .await;

        let articles = client(server.url())
            .fetch(&NewsQuery::Search {
                term: "space travel".into(),
                page_size: 5,
            })
            .await
            .unwrap();

        assert!(articles.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_carries_provider_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid"}"#)
            .create_async()
            .await;

        let err = client(server.url())
            .fetch(&NewsQuery::Headlines {
                country: "us".into(),
                page_size: 10,
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            UpstreamError::Status {
                status: 401,
                message: "Your API key is invalid".into()
            }
        );
    }

    #[tokio::test]
    async fn garbage_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = client(server.url())
            .fetch(&NewsQuery::Search {
                term: "x".into(),
                page_size: 5,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let err = client("http://127.0.0.1:1".into())
            .fetch(&NewsQuery::Search {
                term: "x".into(),
                page_size: 5,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
    }
}
