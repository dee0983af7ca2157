use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, instrument};

use super::article::Article;
use crate::{auth::AuthUser, error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub news: Vec<Article>,
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_news(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<NewsResponse>, ApiError> {
    let news = state.news.aggregate(&user.preferences).await?;
    info!(count = news.len(), preferences = user.preferences.len(), "news served");
    Ok(Json(NewsResponse { news }))
}
