// tests/api_http.rs
//
// Boundary contract via the public router: the pipeline never surfaces an
// internal error as a request failure, and the duplicate guard rides along
// the response without touching the stored outcome.

use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use civic_trust_pipeline::api::{create_router, AppState};
use civic_trust_pipeline::config::PipelineParams;
use civic_trust_pipeline::pipeline::TrustPipeline;

/// Router backed by a pipeline with no artifacts on disk: heuristics only.
fn test_router() -> axum::Router {
    let pipeline = TrustPipeline::new("definitely/missing/artifacts", PipelineParams::default());
    create_router(AppState::new(pipeline))
}

async fn post_score(router: &axum::Router, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/reports/score")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 256 * 1024).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn health_is_ok() {
    let router = test_router();
    let resp = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn clean_report_scores_unknown_without_models() {
    let router = test_router();
    let (status, v) = post_score(
        &router,
        json!({
            "title": "Pothole on station road",
            "description": "A large crater has opened on station road near the bus stop, damaged two bikes already",
            "category": "Road"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["verdict"], "unknown");
    assert_eq!(v["is_suspicious"], false);
    assert_eq!(v["duplicate"], false);
    assert!(v["reasons"].as_array().unwrap().is_empty());
    assert_eq!(v["score_false"], 0.0);
    assert_eq!(v["spam_prob"], 0.0);
}

#[tokio::test]
async fn promotional_report_is_tagged_spam() {
    let router = test_router();
    let (status, v) = post_score(
        &router,
        json!({
            "title": "FREE MONEY",
            "description": "click now to claim your bonus https://spam.example",
            "category": "Road"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["verdict"], "spam");
    assert_eq!(v["is_suspicious"], true);
}

#[tokio::test]
async fn gibberish_title_real_description_forces_spam() {
    let router = test_router();
    let (status, v) = post_score(
        &router,
        json!({
            "title": "zxqpfgh",
            "description": "The streetlight outside my house has been broken for two weeks and needs urgent repair",
            "category": "Electricity"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["verdict"], "spam");
    let reasons = v["reasons"].as_array().unwrap();
    assert!(reasons.contains(&json!("gibberish_title_real_description")));
}

#[tokio::test]
async fn missing_category_is_accepted() {
    let router = test_router();
    let (status, v) = post_score(
        &router,
        json!({
            "title": "Pothole on station road",
            "description": "A large crater has opened on station road near the bus stop, damaged two bikes already"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["verdict"], "unknown");
}

#[tokio::test]
async fn resubmission_is_marked_duplicate() {
    let router = test_router();
    let body = json!({
        "title": "Garbage pile near school",
        "description": "A garbage pile near the school gate has not been collected for a week",
        "category": "Sanitation"
    });

    let (_, first) = post_score(&router, body.clone()).await;
    assert_eq!(first["duplicate"], false);

    let (_, second) = post_score(&router, body).await;
    assert_eq!(second["duplicate"], true);
    // The stored outcome itself is unchanged by the duplicate flag.
    assert_eq!(second["verdict"], first["verdict"]);
}

#[tokio::test]
async fn debug_lexicon_exposes_the_active_table() {
    let router = test_router();
    let resp = router
        .oneshot(
            Request::builder()
                .uri("/debug/lexicon")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 256 * 1024).await.unwrap();
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(v["categories"]["Road"].is_array());
    assert!(v["categories"]["Water"].is_array());
    assert!(v["version"].is_number());
}
