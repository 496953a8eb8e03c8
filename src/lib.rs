use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod ui;

use crate::services::{PackingHistoryService, UserService};

pub type AppState = (Arc<UserService>, Arc<PackingHistoryService>);

pub fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        // User routes
        .route("/users", post(handlers::create_user))
        .route(
            "/users/:id",
            get(handlers::get_user).delete(handlers::delete_user),
        )
        .route(
            "/users/:id/packing_histories",
            get(handlers::list_user_packing_histories),
        )
        // Packing history routes; records are never updated
        .route(
            "/packing_histories",
            post(handlers::create_packing_history),
        )
        .route(
            "/packing_histories/:id",
            get(handlers::get_packing_history),
        )
        .with_state(state);

    Router::new()
        .route("/", get(root))
        .route("/api/v1/health", get(health_check))
        .nest("/api/v1", api_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .allow_credentials(false),
        )
        .layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    "Packing Assistant Server"
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::db::test_pool;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let db = test_pool().await;
        let clock: Arc<dyn Clock> =
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 9, 1, 6, 0, 0).unwrap()));
        app((
            Arc::new(UserService::new(db.clone(), clock.clone())),
            Arc::new(PackingHistoryService::new(db, clock)),
        ))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_check_responds_ok() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn records_round_trip_over_http() {
        let app = test_app().await;

        let (status, user) = send(&app, "POST", "/api/v1/users", Some(json!({"name": "Mei"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = user["id"].as_str().unwrap().to_string();

        let (status, record) = send(
            &app,
            "POST",
            "/api/v1/packing_histories",
            Some(json!({
                "user_id": user_id,
                "destination": "Kyoto",
                "travel_duration": 5,
                "packing_list": ["passport", "charger", "socks"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(record["packing_list"], json!(["passport", "charger", "socks"]));
        assert_eq!(record["created_at"], "2026-09-01T06:00:00Z");

        let id = record["id"].as_str().unwrap();
        let (status, fetched) = send(&app, "GET", &format!("/api/v1/packing_histories/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, record);

        let (status, list) = send(
            &app,
            "GET",
            &format!("/api/v1/users/{}/packing_histories?per_page=5", user_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["total"], 1);
        assert_eq!(list["per_page"], 5);
    }

    #[tokio::test]
    async fn oversized_paging_is_a_bad_request() {
        let app = test_app().await;
        let (_, user) = send(&app, "POST", "/api/v1/users", Some(json!({"name": "Noor"}))).await;
        let user_id = user["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            "GET",
            &format!(
                "/api/v1/users/{}/packing_histories?page=4294967295&per_page=4294967295",
                user_id
            ),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/v1/users/{}/packing_histories?per_page=101", user_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_user_id_is_a_bad_request() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/packing_histories",
            Some(json!({"destination": "Nowhere"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("user_id"));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let app = test_app().await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/packing_histories",
            Some(json!({"user_id": uuid::Uuid::new_v4()})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleting_user_removes_their_history() {
        let app = test_app().await;
        let (_, user) = send(&app, "POST", "/api/v1/users", Some(json!({"name": "Tomás"}))).await;
        let user_id = user["id"].as_str().unwrap().to_string();
        let (_, record) = send(
            &app,
            "POST",
            "/api/v1/packing_histories",
            Some(json!({"user_id": user_id})),
        )
        .await;

        let (status, _) = send(&app, "DELETE", &format!("/api/v1/users/{}", user_id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let id = record["id"].as_str().unwrap();
        let (status, _) = send(&app, "GET", &format!("/api/v1/packing_histories/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
