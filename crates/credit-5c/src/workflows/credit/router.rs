use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::domain::{Criterion, CriterionScores};
use super::evaluation::{breakpoints, EvaluationResult, Rule};
use super::intake::{ComponentRatings, IntakeError};
use super::service::{BatchEntry, CreditEvaluationService};

/// Router exposing evaluation, assessment, batch, and rule listing endpoints.
pub fn credit_router(service: Arc<CreditEvaluationService>) -> Router {
    Router::new()
        .route("/api/v1/credit/evaluations", post(evaluate_handler))
        .route("/api/v1/credit/assessments", post(assess_handler))
        .route("/api/v1/credit/batch", post(batch_handler))
        .route("/api/v1/credit/rules", get(rules_handler))
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluationResponse {
    pub(crate) evaluated_at: DateTime<Utc>,
    pub(crate) decision_label: &'static str,
    #[serde(flatten)]
    pub(crate) evaluation: EvaluationResult,
}

impl From<EvaluationResult> for EvaluationResponse {
    fn from(evaluation: EvaluationResult) -> Self {
        Self {
            evaluated_at: Utc::now(),
            decision_label: evaluation.decision().label(),
            evaluation,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RuleView {
    position: usize,
    levels: [u8; 5],
    consequent: &'static str,
    description: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CriterionShapeView {
    criterion: Criterion,
    levels: Vec<&'static str>,
    breakpoints: Vec<f64>,
}

fn rule_views(table: &[Rule]) -> Vec<RuleView> {
    table
        .iter()
        .enumerate()
        .map(|(offset, rule)| RuleView {
            position: offset + 1,
            levels: rule.levels,
            consequent: rule.consequent.label(),
            description: rule.describe(),
        })
        .collect()
}

fn input_error(error: impl std::fmt::Display) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

/// Malformed or mistyped JSON bodies keep axum's status but use the `{"error"}` shape.
fn body_error(rejection: JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "rejected request body");
    let payload = json!({
        "error": rejection.body_text(),
    });
    (rejection.status(), axum::Json(payload)).into_response()
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<CreditEvaluationService>>,
    payload: Result<axum::Json<BTreeMap<String, f64>>, JsonRejection>,
) -> Response {
    let raw = match payload {
        Ok(axum::Json(raw)) => raw,
        Err(rejection) => return body_error(rejection),
    };
    match CriterionScores::try_from(raw) {
        Ok(scores) => {
            let response = EvaluationResponse::from(service.evaluate(&scores));
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(error) => {
            warn!(%error, "rejected criterion scores");
            input_error(error)
        }
    }
}

pub(crate) async fn assess_handler(
    State(service): State<Arc<CreditEvaluationService>>,
    payload: Result<axum::Json<ComponentRatings>, JsonRejection>,
) -> Response {
    let ratings = match payload {
        Ok(axum::Json(ratings)) => ratings,
        Err(rejection) => return body_error(rejection),
    };
    match service.assess(&ratings) {
        Ok(assessment) => {
            let payload = json!({
                "scores": assessment.scores,
                "evaluation": EvaluationResponse::from(assessment.evaluation),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => input_error(error),
    }
}

pub(crate) async fn batch_handler(
    State(service): State<Arc<CreditEvaluationService>>,
    body: String,
) -> Response {
    match service.evaluate_batch(Cursor::new(body.into_bytes())) {
        Ok(entries) => {
            let applicants: Vec<_> = entries
                .into_iter()
                .map(|BatchEntry { applicant, evaluation }| {
                    json!({
                        "applicant": applicant,
                        "evaluation": EvaluationResponse::from(evaluation),
                    })
                })
                .collect();
            let payload = json!({
                "count": applicants.len(),
                "applicants": applicants,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error @ IntakeError::Io(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(error) => input_error(error),
    }
}

pub(crate) async fn rules_handler(
    State(service): State<Arc<CreditEvaluationService>>,
) -> Response {
    let engine = service.engine();
    let criteria: Vec<_> = Criterion::ALL
        .into_iter()
        .map(|criterion| CriterionShapeView {
            criterion,
            levels: (1..=criterion.level_count())
                .filter_map(|level| criterion.level_label(level))
                .collect(),
            breakpoints: breakpoints(criterion),
        })
        .collect();

    let payload = json!({
        "criteria": criteria,
        "acceptance": rule_views(engine.acceptance_rules()),
        "rejection": rule_views(engine.rejection_rules()),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
