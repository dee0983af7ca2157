use serde::Serialize;

/// Validated body of `PUT /preferences`.
#[derive(Debug)]
pub struct UpdatePreferencesRequest {
    pub preferences: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdatePreferencesResponse {
    pub message: &'static str,
    pub preferences: Vec<String>,
}
