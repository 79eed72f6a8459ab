use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use estate_office::office::{
    auth_router, office_router, require_session, MaintenanceStore, OfficeService, PropertyStore,
    ResidentStore, SessionStore,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_office_routes<S>(
    service: OfficeService<S>,
    sessions: Arc<SessionStore>,
) -> axum::Router
where
    S: PropertyStore + ResidentStore + MaintenanceStore + 'static,
{
    office_router(service)
        .route_layer(axum::middleware::from_fn_with_state(
            sessions.clone(),
            require_session,
        ))
        .merge(auth_router(sessions))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use estate_office::config::AuthConfig;
    use estate_office::office::MemoryOffice;
    use tower::ServiceExt;

    fn test_sessions() -> Arc<SessionStore> {
        Arc::new(SessionStore::new(AuthConfig {
            admin_name: "Test User".to_string(),
            admin_email: "test@example.com".to_string(),
            admin_password: "password".to_string(),
        }))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn office_routes_guard_api_but_not_login() {
        let service = OfficeService::new(Arc::new(MemoryOffice::new()));
        let app = with_office_routes(service, test_sessions());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/properties")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({ "email": "test@example.com", "password": "password" }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["user"]["email"], "test@example.com");
    }
}
