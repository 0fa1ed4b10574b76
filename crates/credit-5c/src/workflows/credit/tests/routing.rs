use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::credit::router::{evaluate_handler, rules_handler};
use crate::workflows::credit::CreditEvaluationService;

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request")
}

#[tokio::test]
async fn evaluate_handler_returns_full_trail() {
    let service = Arc::new(CreditEvaluationService::default());
    let payload = json!({
        "Character": 38.0, "Capital": 50.0, "Capacity": 50.0,
        "Collateral": 50.0, "Condition": 50.0,
    });
    let raw = serde_json::from_value(payload).expect("score map");

    let response = evaluate_handler(State(service), Ok(axum::Json(raw))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["decision"], "rejected");
    assert_eq!(body["decision_label"], "rejected");
    assert_eq!(body["z"], 0.36);
    assert_eq!(body["accepted"][0]["position"], 9);
    assert_eq!(body["rejected"].as_array().map(Vec::len), Some(2));
    assert!(body.get("total_weight").is_some());
    assert!(body.get("evaluated_at").is_some());
}

#[tokio::test]
async fn evaluate_handler_rejects_missing_criterion() {
    let service = Arc::new(CreditEvaluationService::default());
    let raw = serde_json::from_value(json!({
        "Character": 50.0, "Capital": 50.0, "Capacity": 50.0, "Condition": 50.0,
    }))
    .expect("score map");

    let response = evaluate_handler(State(service), Ok(axum::Json(raw))).await;

    assert_unprocessable(&response);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("Collateral")));
}

#[tokio::test]
async fn evaluation_route_rejects_out_of_range_scores() {
    let router = router_with_limit(10);

    let response = router
        .oneshot(json_request(
            "/api/v1/credit/evaluations",
            json!({
                "Character": 50.0, "Capital": 50.0, "Capacity": 50.0,
                "Collateral": 150.0, "Condition": 50.0,
            }),
        ))
        .await
        .expect("route executes");

    assert_unprocessable(&response);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("Collateral") && message.contains("150")));
}

#[tokio::test]
async fn evaluation_route_rejects_duplicate_criteria() {
    let router = router_with_limit(10);

    let response = router
        .oneshot(json_request(
            "/api/v1/credit/evaluations",
            json!({
                "Character": 90.0, "CHARACTER": 10.0, "Capital": 50.0,
                "Capacity": 50.0, "Collateral": 50.0, "Condition": 50.0,
            }),
        ))
        .await
        .expect("route executes");

    assert_unprocessable(&response);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("more than once")));
}

#[tokio::test]
async fn evaluation_route_reports_malformed_bodies_as_json() {
    let router = router_with_limit(10);

    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/credit/evaluations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"Character\": fifty}"))
                .expect("request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"].is_string());

    let response = router
        .oneshot(json_request(
            "/api/v1/credit/evaluations",
            json!({
                "Character": "good", "Capital": 50.0, "Capacity": 50.0,
                "Collateral": 50.0, "Condition": 50.0,
            }),
        ))
        .await
        .expect("route executes");

    assert_unprocessable(&response);
    let body = read_json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn assessment_route_reports_mistyped_ratings_as_json() {
    let router = router_with_limit(10);

    let response = router
        .oneshot(json_request(
            "/api/v1/credit/assessments",
            json!({ "good_faith": "five" }),
        ))
        .await
        .expect("route executes");

    assert_unprocessable(&response);
    let body = read_json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn assessment_route_normalizes_ratings() {
    let router = router_with_limit(10);
    let ratings: serde_json::Map<String, serde_json::Value> = crate::workflows::credit::COMPONENTS
        .iter()
        .map(|component| (component.key.to_string(), json!(5)))
        .collect();

    let response = router
        .oneshot(json_request(
            "/api/v1/credit/assessments",
            serde_json::Value::Object(ratings),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["scores"]["Character"], 100.0);
    assert_eq!(body["evaluation"]["decision"], "accepted");
    assert_eq!(body["evaluation"]["z"], 1.0);
}

#[tokio::test]
async fn assessment_route_rejects_invalid_rating() {
    let router = router_with_limit(10);

    let response = router
        .oneshot(json_request(
            "/api/v1/credit/assessments",
            json!({ "good_faith": 9 }),
        ))
        .await
        .expect("route executes");

    assert_unprocessable(&response);
}

#[tokio::test]
async fn batch_route_evaluates_csv_bodies() {
    let router = router_with_limit(10);
    let csv = "applicant,character,capital,capacity,collateral,condition\n\
               A-1,100,100,100,100,100\n\
               A-2,0,0,0,0,0\n";

    let response = router
        .oneshot(
            Request::post("/api/v1/credit/batch")
                .header(header::CONTENT_TYPE, "text/csv")
                .body(Body::from(csv))
                .expect("request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["applicants"][0]["applicant"], "A-1");
    assert_eq!(body["applicants"][0]["evaluation"]["decision"], "accepted");
    assert_eq!(body["applicants"][1]["evaluation"]["decision"], "rejected");
}

#[tokio::test]
async fn batch_route_rejects_oversized_batches() {
    let router = router_with_limit(1);
    let csv = "applicant,character,capital,capacity,collateral,condition\n\
               A-1,100,100,100,100,100\n\
               A-2,0,0,0,0,0\n";

    let response = router
        .oneshot(
            Request::post("/api/v1/credit/batch")
                .body(Body::from(csv))
                .expect("request"),
        )
        .await
        .expect("route executes");

    assert_unprocessable(&response);
}

#[tokio::test]
async fn rules_handler_lists_both_tables() {
    let service = Arc::new(CreditEvaluationService::default());

    let response = rules_handler(State(service)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["acceptance"].as_array().map(Vec::len), Some(19));
    assert_eq!(body["rejection"].as_array().map(Vec::len), Some(29));
    assert_eq!(body["acceptance"][0]["levels"], json!([3, 3, 3, 2, 3]));
    assert_eq!(body["criteria"][3]["criterion"], "Collateral");
    assert_eq!(body["criteria"][3]["levels"], json!(["Unsafe", "Safe"]));
    assert_eq!(body["criteria"][3]["breakpoints"], json!([45.0, 55.0]));
}
