//! Shared helpers for router-level tests.
#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;

use newsfeed::news::{Article, NewsProvider, NewsQuery, Source, UpstreamError};

/// Provider answering from canned per-term results.
#[derive(Default)]
pub struct FakeProvider {
    pub headlines: Option<Result<Vec<Article>, UpstreamError>>,
    pub by_term: HashMap<String, Vec<Article>>,
}

#[async_trait]
impl NewsProvider for FakeProvider {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<Article>, UpstreamError> {
        match query {
            NewsQuery::Headlines { .. } => self.headlines.clone().unwrap_or(Ok(vec![])),
            NewsQuery::Search { term, .. } => Ok(self.by_term.get(term).cloned().unwrap_or_default()),
        }
    }
}

pub fn article(title: &str, minutes_ago: i64) -> Article {
    Article {
        source: Source {
            id: None,
            name: "Daily Planet".into(),
        },
        author: Some("Lois Lane".into()),
        title: Some(title.into()),
        description: None,
        url: format!("https://dailyplanet.example/{}", title),
        url_to_image: None,
        published_at: Some(OffsetDateTime::now_utc() - Duration::minutes(minutes_ago)),
        content: None,
    }
}

pub fn provider(p: FakeProvider) -> Arc<dyn NewsProvider> {
    Arc::new(p)
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.expect("router is infallible");
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

/// Register a user and return the issued token.
pub async fn register(app: &Router, email: &str, preferences: &[&str]) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/register",
            None,
            serde_json::json!({
                "name": "Clark Kent",
                "email": email,
                "password": "Krypt()n8",
                "preferences": preferences,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}
