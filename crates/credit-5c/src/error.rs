use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::credit::{IntakeError, ScoreError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("invalid scores: {0}")]
    Scores(#[from] ScoreError),
    #[error("invalid applicant input: {0}")]
    Intake(#[from] IntakeError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Scores(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Intake(IntakeError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
