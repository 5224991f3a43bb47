use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Health check response. Carries nothing but `status`: the probe must
/// not depend on any other component's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

pub async fn healthz() -> (StatusCode, Json<HealthStatus>) {
    (
        StatusCode::OK,
        Json(HealthStatus {
            status: "ok".to_string(),
        }),
    )
}

/// Fixed confirmation text for eyeballing a fresh deployment.
pub async fn home() -> &'static str {
    "Polyglot Slack bot is running."
}
