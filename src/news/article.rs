use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// Article as delivered by the news provider, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Source,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    pub url_to_image: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    pub content: Option<String>,
}

impl Article {
    /// Stand-in served when no provider credentials are configured.
    pub fn placeholder() -> Self {
        Self {
            source: Source {
                id: None,
                name: "Sample News".into(),
            },
            author: None,
            title: Some("Sample News Article".into()),
            description: Some(
                "This is a sample news article. Please configure your News API key to get real news."
                    .into(),
            ),
            url: "https://example.com".into(),
            url_to_image: None,
            published_at: Some(OffsetDateTime::now_utc()),
            content: None,
        }
    }
}
