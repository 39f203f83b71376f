use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use arcade_calculator_core::{ArcadeService, ServiceError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    url: Option<String>,
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if !err.is_validation() {
        warn!(error = %err, "Request failed");
    }
    (status, Json(json!({ "error": err.public_message() }))).into_response()
}

async fn calculate(
    State(service): State<Arc<ArcadeService>>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let url = match body {
        Ok(Json(req)) => req.url,
        Err(rejection) => {
            warn!(error = %rejection, "Malformed calculate request");
            None
        }
    };
    match service.calculate(url.as_deref()).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn games(State(service): State<Arc<ArcadeService>>) -> Response {
    match service.active_games().await {
        Ok(games) => Json(games).into_response(),
        Err(e) => error_response(&e),
    }
}

pub fn router(service: Arc<ArcadeService>) -> Router {
    Router::new()
        .route("/api/calculate", post(calculate))
        .route("/api/games", get(games))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

pub async fn serve(service: Arc<ArcadeService>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(service))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_calculator_core::config::AppConfig;
    use arcade_calculator_core::fetcher::PageSource;
    use arcade_calculator_core::FetchError;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tower::ServiceExt;

    const PROFILE_URL: &str = "https://www.cloudskillsboost.google/public_profiles/abc";

    struct FixedPages(HashMap<String, String>);

    #[async_trait::async_trait]
    impl PageSource for FixedPages {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.0.get(url).cloned().ok_or(FetchError::Transport {
                url: url.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    fn app(pages: &[(&str, &str)]) -> Router {
        let pages = pages
            .iter()
            .map(|(u, b)| (u.to_string(), b.to_string()))
            .collect();
        let service = ArcadeService::new(AppConfig::default(), Arc::new(FixedPages(pages)));
        router(Arc::new(service))
    }

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::post("/api/calculate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn calculate_scores_profile() {
        let profile = r#"<h1 class="ql-display-small">Ada</h1>
            <div class="profile-badge"><span class="ql-title-medium">Trivia Week 3</span>
            <span class="ql-body-medium">Earned Jan 3, 2026</span></div>"#;
        let body = format!(r#"{{"url":"{PROFILE_URL}"}}"#);
        let (status, json) = call(app(&[(PROFILE_URL, profile)]), post_json(&body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stats"]["totalPoints"], 1);
        assert_eq!(json["user"]["name"], "Ada");
    }

    #[tokio::test]
    async fn calculate_rejects_foreign_host() {
        let (status, json) =
            call(app(&[]), post_json(r#"{"url":"https://example.com/u"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid URL"));
    }

    #[tokio::test]
    async fn calculate_requires_url() {
        let (status, json) = call(app(&[]), post_json("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "URL is required");

        let (status, _) = call(app(&[]), post_json("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn calculate_upstream_failure_is_generic_500() {
        let body = format!(r#"{{"url":"{PROFILE_URL}"}}"#);
        let (status, json) = call(app(&[]), post_json(&body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": "Failed to fetch or parse profile" }));
    }

    #[tokio::test]
    async fn games_lists_catalog() {
        let catalog = r#"<div data-code="<div class='card'><h3>Arcade Base Camp</h3><p>Access code: 1q-camp</p></div>"></div>"#;
        let catalog_url = AppConfig::default().catalog_url;
        let req = Request::get("/api/games").body(Body::empty()).unwrap();
        let (status, json) = call(app(&[(catalog_url.as_str(), catalog)]), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["accessCode"], "1q-camp");
        assert_eq!(json[0]["labNumber"], "GAME");
        assert_eq!(json[0]["points"], 1);
    }

    #[tokio::test]
    async fn games_without_listing_is_empty_array() {
        let catalog_url = AppConfig::default().catalog_url;
        let req = Request::get("/api/games").body(Body::empty()).unwrap();
        let (status, json) = call(app(&[(catalog_url.as_str(), "<html></html>")]), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));
    }

    #[tokio::test]
    async fn games_fetch_failure_is_500() {
        let req = Request::get("/api/games").body(Body::empty()).unwrap();
        let (status, json) = call(app(&[]), req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to fetch games");
    }
}
