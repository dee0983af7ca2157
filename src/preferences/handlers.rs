use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::dto::{PreferencesResponse, UpdatePreferencesRequest, UpdatePreferencesResponse};
use crate::{auth::AuthUser, error::ApiError, state::AppState, validation::ValidJson};

#[instrument(skip(user), fields(user_id = %user.id))]
pub async fn get_preferences(AuthUser(user): AuthUser) -> Json<PreferencesResponse> {
    Json(PreferencesResponse {
        preferences: user.preferences,
    })
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn update_preferences(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<UpdatePreferencesRequest>,
) -> Result<Json<UpdatePreferencesResponse>, ApiError> {
    let updated = state
        .users
        .update_preferences(user.id, payload.preferences)
        .await?;
    info!(count = updated.preferences.len(), "preferences updated");
    Ok(Json(UpdatePreferencesResponse {
        message: "Preferences updated successfully",
        preferences: updated.preferences,
    }))
}
