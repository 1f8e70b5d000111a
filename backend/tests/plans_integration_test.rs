//! Integration tests for diet plans, health reports, the health card, goals and profile

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;
use wellness_backend::ai::{AiServices, OllamaClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plan_request() -> serde_json::Value {
    json!({
        "weight_kg": 80,
        "height_cm": 180,
        "age": 30,
        "gender": "male",
        "activity_level": "moderate",
        "goal_weight_kg": 75
    })
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_calculate_targets() {
    let app = TestApp::new().await;
    let token = app.create_test_user().await;

    let response = app.post_auth("/api/diet-plan/calculate", plan_request(), &token).await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let body = response.json();
    assert_eq!(body["bmr"].as_f64().unwrap(), 1780.0);
    assert_eq!(body["activity_multiplier"].as_f64().unwrap(), 1.55);
    assert_eq!(body["goal_adjustment"].as_f64().unwrap(), -500.0);
    assert_eq!(body["daily_calories"].as_f64().unwrap(), 2259.0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_calculate_uses_latest_metrics() {
    let app = TestApp::new().await;
    let token = app.create_test_user().await;

    let missing = app.post_auth("/api/diet-plan/calculate", json!({}), &token).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    app.record_metrics(&token).await;
    let filled = app.post_auth("/api/diet-plan/calculate", json!({}), &token).await;
    assert_eq!(filled.status, StatusCode::OK, "{}", filled.body);
    assert_eq!(filled.json()["bmr"].as_f64().unwrap(), 1780.0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_diet_plan_falls_back_without_ai() {
    let app = TestApp::new().await;
    let token = app.create_test_user().await;

    let created = app.post_auth("/api/diet-plan", plan_request(), &token).await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);

    let plan = created.json();
    assert_eq!(plan["ai_generated"], false);
    assert_eq!(plan["is_weekly_plan"], false);
    assert_eq!(plan["content"]["kind"], "daily");
    assert!(!plan["content"]["meals"].as_array().unwrap().is_empty());
    let plan_id = plan["id"].as_str().unwrap().to_string();

    let weekly = app
        .post_auth("/api/diet-plan/weekly", json!({ "base_on_plan_id": plan_id }), &token)
        .await;
    assert_eq!(weekly.status, StatusCode::CREATED, "{}", weekly.body);
    let weekly = weekly.json();
    assert_eq!(weekly["is_weekly_plan"], true);
    assert_eq!(weekly["base_on_plan_id"], plan_id.as_str());
    assert_eq!(weekly["content"]["days"].as_array().unwrap().len(), 7);

    // Weekly plans cannot seed another weekly plan
    let nested = app
        .post_auth(
            "/api/diet-plan/weekly",
            json!({ "base_on_plan_id": weekly["id"] }),
            &token,
        )
        .await;
    assert_eq!(nested.status, StatusCode::BAD_REQUEST);

    let plans = app.get_auth("/api/diet-plan", &token).await;
    assert_eq!(plans.json().as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_diet_plan_uses_model_reply() {
    let server = MockServer::start().await;
    let reply = json!({
        "meals": [{
            "meal_type": "breakfast",
            "name": "Greek yogurt bowl",
            "foods": [{ "name": "Greek yogurt", "portion": "200 g", "calories": 200, "protein_g": 20 }],
            "total_calories": 200
        }]
    });
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": format!("Here is your plan:\n{}", reply)
        })))
        .mount(&server)
        .await;

    let ai = AiServices {
        text: std::sync::Arc::new(OllamaClient::new(&server.uri(), "llama3.2", 5).unwrap()),
        ..AiServices::disabled()
    };
    let app = TestApp::with_ai(ai).await;
    let token = app.create_test_user().await;

    let created = app.post_auth("/api/diet-plan", plan_request(), &token).await;

    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let plan = created.json();
    assert_eq!(plan["ai_generated"], true);
    assert_eq!(plan["content"]["meals"][0]["name"], "Greek yogurt bowl");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_report_requires_metrics() {
    let app = TestApp::new().await;
    let token = app.create_test_user().await;

    let without = app.post_auth("/api/reports", json!({}), &token).await;
    assert_eq!(without.status, StatusCode::BAD_REQUEST);

    app.record_metrics(&token).await;
    let created = app.post_auth("/api/reports", json!({}), &token).await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);

    let report = created.json();
    assert_eq!(report["ai_generated"], false);
    assert_eq!(report["bmi_category"], "normal");
    assert_eq!(report["risk_level"], "low");
    assert!(report["health_score"].as_u64().unwrap() >= 80);

    let id = report["id"].as_str().unwrap();
    let fetched = app.get_auth(&format!("/api/reports/{}", id), &token).await;
    assert_eq!(fetched.status, StatusCode::OK);

    let listed = app.get_auth("/api/reports?limit=5", &token).await;
    assert_eq!(listed.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_health_card() {
    let app = TestApp::new().await;
    let token = app.create_test_user().await;

    let empty = app.get_auth("/api/health-card", &token).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert!(empty.json().get("latest_metrics").is_none());
    assert_eq!(empty.json()["active_goals"], 0);

    app.record_metrics(&token).await;
    app.post_auth("/api/reports", json!({}), &token).await;

    let card = app.get_auth("/api/health-card", &token).await.json();
    assert_eq!(card["age"], 30);
    assert_eq!(card["risk_level"], "low");
    assert!(card["latest_report"]["id"].is_string());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_goal_lifecycle() {
    let app = TestApp::new().await;
    let token = app.create_test_user().await;

    let created = app
        .post_auth(
            "/api/goals",
            json!({
                "title": "Reach 72 kg",
                "goal_type": "weight",
                "start_value": 80,
                "target_value": 72,
                "unit": "kg"
            }),
            &token,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let goal = created.json();
    assert_eq!(goal["direction"], "decreasing");
    assert_eq!(goal["status"], "active");
    let id = goal["id"].as_str().unwrap().to_string();

    let updated = app
        .put_auth(&format!("/api/goals/{}", id), json!({ "current_value": 76 }), &token)
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["progress_percent"].as_f64().unwrap(), 50.0);

    let progress = app.get_auth(&format!("/api/goals/{}/progress", id), &token).await;
    assert_eq!(progress.json()["remaining"].as_f64().unwrap(), 4.0);
    assert_eq!(progress.json()["completed"], false);

    let reached = app
        .put_auth(&format!("/api/goals/{}", id), json!({ "current_value": 71.5 }), &token)
        .await;
    assert_eq!(reached.json()["status"], "completed");

    let active = app.get_auth("/api/goals?status=active", &token).await;
    assert!(active.json().as_array().unwrap().is_empty());
    let completed = app.get_auth("/api/goals?status=completed", &token).await;
    assert_eq!(completed.json().as_array().unwrap().len(), 1);

    let deleted = app.delete_auth(&format!("/api/goals/{}", id), &token).await;
    assert_eq!(deleted.status, StatusCode::OK);
    let missing = app.get_auth(&format!("/api/goals/{}", id), &token).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_update() {
    let app = TestApp::new().await;
    let token = app.create_test_user().await;

    let initial = app.get_auth("/api/profile", &token).await;
    assert_eq!(initial.status, StatusCode::OK);
    assert_eq!(initial.json()["timezone"], "UTC");

    let updated = app
        .put_auth(
            "/api/profile",
            json!({
                "display_name": "Sam",
                "height": 70,
                "height_unit": "in",
                "activity_level": "active",
                "dietary_preferences": ["vegetarian"]
            }),
            &token,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    let body = updated.json();
    assert_eq!(body["display_name"], "Sam");
    assert!((body["height_cm"].as_f64().unwrap() - 177.8).abs() < 0.1);
    assert_eq!(body["dietary_preferences"][0], "vegetarian");

    let bad = app
        .put_auth("/api/profile", json!({ "activity_level": "couch" }), &token)
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}
