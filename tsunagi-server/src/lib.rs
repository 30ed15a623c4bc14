//! tsunagi - FHIR facade over a GraphQL care-management backend
//!
//! Exposes Appointment, ClockIn/ClockOut (Encounter) and Task endpoints and
//! translates each request into a single GraphQL query or mutation.

pub mod auth;
pub mod config;
pub mod handlers;
pub mod tenant;
pub mod translation;

use axum::{
    http::Method,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tsunagi_core::IdCodec;

use translation::Translator;

/// Application state
pub struct AppState {
    pub config: config::ServerConfig,
    pub translator: Translator,
    pub id_codec: Arc<dyn IdCodec>,
}

/// Build the application router with all routes and middleware
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .route("/health", get(handlers::metadata::health_check))
        .route("/metadata", get(handlers::metadata::capability_statement))
        .route("/Appointment", get(handlers::appointment::search))
        .route("/Appointment/{id}", get(handlers::appointment::read))
        .route("/ClockIn", get(handlers::appointment::search))
        .route(
            "/ClockIn/{id}",
            get(handlers::appointment::read).post(handlers::clock::clock_in),
        )
        .route("/ClockOut/{id}", put(handlers::clock::clock_out))
        .route(
            "/Task/{id}",
            get(handlers::task::read).put(handlers::task::update),
        )
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenIssuer;
    use crate::config::{ServerConfig, TokenSettings};
    use crate::translation::testing::StubExecutor;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use tsunagi_core::GlobalIdCodec;

    fn app(stub: Arc<StubExecutor>) -> Router {
        build_router(Arc::new(AppState {
            config: ServerConfig::default(),
            translator: Translator::new(stub, TokenIssuer::new(&TokenSettings::default())),
            id_codec: Arc::new(GlobalIdCodec),
        }))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_search_suffix_rejected() {
        let stub = StubExecutor::with(vec![]);
        for uri in ["/Appointment/_search", "/ClockIn/_search"] {
            let response = app(stub.clone())
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        }
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_clock_in_wrong_resource_type() {
        let stub = StubExecutor::with(vec![]);
        let response = app(stub.clone())
            .oneshot(
                Request::post("/ClockIn/42")
                    .body(Body::from(r#"{"resourceType":"Task"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["issue"][0]["diagnostics"], "'resourceType' should be Encounter.");
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_clock_in_non_numeric_id() {
        let stub = StubExecutor::with(vec![]);
        let response = app(stub.clone())
            .oneshot(
                Request::post("/ClockIn/abc")
                    .body(Body::from(r#"{"resourceType":"Encounter"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["issue"][0]["diagnostics"], "Shift Id needs to be integer.");
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let stub = StubExecutor::with(vec![]);
        let response = app(stub.clone())
            .oneshot(
                Request::put("/ClockOut/9")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_task_update_missing_resource_type() {
        let stub = StubExecutor::with(vec![]);
        let response = app(stub.clone())
            .oneshot(
                Request::put("/Task/7")
                    .body(Body::from(r#"{"status":"COMPLETED"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_read_with_hash_id_passes_through() {
        let stub = StubExecutor::with(vec![(
            "shift(",
            json!({"shift": {"id": "already-hashed", "status": "SCHEDULED"}}),
        )]);
        let response = app(stub.clone())
            .oneshot(
                Request::get("/ClockIn/already-hashed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(stub.calls()[0].contains(r#"shift(id: "already-hashed")"#));
    }

    #[tokio::test]
    async fn test_task_not_found() {
        let stub = StubExecutor::with(vec![("task(", json!({"task": null}))]);
        let response = app(stub)
            .oneshot(Request::get("/Task/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["issue"][0]["code"], "not-found");
    }

    #[tokio::test]
    async fn test_backend_failure_is_bad_gateway() {
        let stub = StubExecutor::with(vec![]);
        let response = app(stub)
            .oneshot(Request::get("/Appointment").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
