//! Barometer REST API
//!
//! HTTP API layer for Barometer, built with Axum.
//!
//! # Endpoints
//!
//! ## Sentiment
//! - `GET /api/v1/sentiment` - Monthly sentiment series
//!
//! ## Industries
//! - `GET /api/v1/industries` - Industry list with latest scores
//! - `GET /api/v1/industries/:name/factors` - Factor breakdown
//!
//! ## Engine
//! - `POST /api/v1/engine/run` - Recompute factors and scores
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use barometer::api::{serve, ApiConfig, AppState};
//! use barometer::engine::SentimentEngine;
//! use barometer::store::SentimentStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(SentimentStore::open("barometer.db".as_ref())?);
//!     let engine = Arc::new(SentimentEngine::new(Arc::clone(&store)));
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, engine, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Sentiment series
        .route("/sentiment", get(routes::sentiment::get_series))
        // Industry routes
        .route("/industries", get(routes::industries::list_industries))
        .route(
            "/industries/:name/factors",
            get(routes::industries::get_factors),
        )
        // Engine routes
        .route("/engine/run", post(routes::engine::run_engine));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Barometer API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Barometer API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SentimentEngine;
    use crate::store::SentimentStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app(seeded: bool) -> Router {
        let store = Arc::new(SentimentStore::open_in_memory().unwrap());
        if seeded {
            store.seed_sample().unwrap();
        }
        let engine = Arc::new(SentimentEngine::new(Arc::clone(&store)));
        if seeded {
            engine.run().unwrap();
        }

        let state = AppState::new(store, engine, ApiConfig::default());
        build_router(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app(false);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app(false);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app(true);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["store_stats"]["metrics"], 12);
    }

    #[tokio::test]
    async fn test_sentiment_series_is_chronological() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/sentiment")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let records = json["records"].as_array().unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0]["date"], "2023-01");
        assert_eq!(records[5]["date"], "2023-06");
        // Flat shape: industry labels are top-level keys
        assert!(records[0]["新能源车"].is_number());
    }

    #[tokio::test]
    async fn test_sentiment_series_rejects_zero_months() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/sentiment?months=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_industries_has_all_four() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/industries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["total"], 4);
        let industries = json["industries"].as_array().unwrap();
        assert_eq!(industries[0]["name"], "白酒");
        assert!(industries[0]["latest_score"].is_number());
        assert!(industries[0]["color"].as_str().unwrap().starts_with('#'));
    }

    #[tokio::test]
    async fn test_get_factors_known_industry() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/industries/nev/factors")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["industry"], "新能源车");
        let factors = json["factors"].as_array().unwrap();
        assert_eq!(factors.len(), 3);
        assert_eq!(factors[0]["name"], "新能源汽车销量");
        for f in factors {
            let v = f["value"].as_f64().unwrap();
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[tokio::test]
    async fn test_get_factors_unknown_industry_is_404() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/industries/metaverse/factors")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_engine_run_endpoint() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/engine/run")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["metrics_processed"], 12);
    }

    #[tokio::test]
    async fn test_empty_store_serves_empty_series() {
        let app = create_test_app(false);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/sentiment")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["records"].as_array().unwrap().len(), 0);
    }
}
