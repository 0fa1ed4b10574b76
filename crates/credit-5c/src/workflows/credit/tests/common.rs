use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::credit::domain::{Criterion, CriterionScores};
use crate::workflows::credit::evaluation::FuzzyCreditEngine;
use crate::workflows::credit::{credit_router, CreditEvaluationService};

/// Score grid from 0 to 100 in steps of 0.1.
pub(super) fn score_grid() -> impl Iterator<Item = f64> {
    (0..=1000).map(|tenth| f64::from(tenth) / 10.0)
}

pub(super) fn scores(values: [f64; 5]) -> CriterionScores {
    CriterionScores::new(values).expect("valid scores")
}

pub(super) fn uniform_scores(value: f64) -> CriterionScores {
    CriterionScores::uniform(value).expect("valid scores")
}

/// Character varies, Capital/Capacity/Condition sit at 50 and Collateral is fully safe.
pub(super) fn character_sweep(character: f64) -> CriterionScores {
    scores([character, 50.0, 50.0, 60.0, 50.0])
}

pub(super) fn engine() -> FuzzyCreditEngine {
    FuzzyCreditEngine::standard()
}

pub(super) fn three_level_criteria() -> [Criterion; 4] {
    [
        Criterion::Character,
        Criterion::Capital,
        Criterion::Capacity,
        Criterion::Condition,
    ]
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn router_with_limit(batch_limit: usize) -> axum::Router {
    credit_router(Arc::new(CreditEvaluationService::new(batch_limit)))
}

pub(super) fn assert_unprocessable(response: &Response) {
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
