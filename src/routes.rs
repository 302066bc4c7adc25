//! HTTP router.
//!
//! Public routes (health, pages, login) plus two authenticated groups: the
//! content generator (any allow-listed code) and the admin API (admin code).

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware::auth, state::AppState};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let content_routes = Router::new()
        .route(
            "/api/v1/content/generate",
            post(handlers::content::generate),
        )
        .route("/api/v1/content/export", post(handlers::content::export))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::demo_code_middleware,
        ));

    // Layers run outermost-last: the code is validated before the admin check
    let admin_routes = Router::new()
        .route("/api/v1/admin/trials", get(handlers::admin::list_trials))
        .route(
            "/api/v1/admin/trials/{code}",
            post(handlers::admin::apply_action),
        )
        .route("/api/v1/admin/export", get(handlers::admin::export_trials))
        .route_layer(axum_middleware::from_fn(auth::require_admin))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::demo_code_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/",
            get(handlers::pages::index).post(handlers::pages::enter),
        )
        .route("/generate", post(handlers::pages::generate))
        .route("/export", post(handlers::pages::export_content))
        .route("/admin/action", post(handlers::pages::admin_action))
        .route("/admin/export", post(handlers::pages::export_trials))
        .route("/api/v1/access", post(handlers::access::access))
        .merge(content_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::demo_code::DemoCodes, state::Branding, store::RecordStore};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        let mut state = AppState::new(
            RecordStore::new(dir.path().join("trials.json")),
            DemoCodes::new("test123", 50).unwrap(),
            7,
            Branding {
                app_name: "IntellimaKG".to_string(),
                slogan: "Empower your business intelligence".to_string(),
            },
        );
        state.today = fixed_today;
        state
    }

    fn json_request(method: &str, uri: &str, code: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(code) = code {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {code}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_missing_store() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store"], "missing");
    }

    #[tokio::test]
    async fn access_starts_trial_for_valid_code() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .oneshot(json_request("POST", "/api/v1/access", None, json!({"code": "Demo7"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["role"], "demo");
        assert_eq!(body["code"], "demo7");
        assert_eq!(body["first_use"], "2025-06-15");
        assert_eq!(body["remaining_days"], 7);
        assert_eq!(body["status"], "ACTIVE");
        assert_eq!(body["uses"], 1);
    }

    #[tokio::test]
    async fn access_rejects_unknown_code() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .oneshot(json_request("POST", "/api/v1/access", None, json!({"code": "nope"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "invalid_demo_code");
    }

    #[tokio::test]
    async fn expired_code_is_refused_after_force_expire() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/admin/trials/demo3",
                Some("test123"),
                json!({"action": "force_expire"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let row = body_json(response).await;
        assert_eq!(row["first_use"], "2025-06-07");
        assert_eq!(row["status"], "EXPIRED");

        let response = app
            .oneshot(json_request("POST", "/api/v1/access", None, json!({"code": "demo3"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "trial_expired");
        assert_eq!(body["error"]["first_use"], "2025-06-07");
    }

    #[tokio::test]
    async fn admin_routes_reject_demo_codes() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .clone()
            .oneshot(
                Request::get("/api/v1/admin/trials")
                    .header(header::AUTHORIZATION, "Bearer demo1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .oneshot(Request::get("/api/v1/admin/trials").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_table_lists_all_codes() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .oneshot(
                Request::get("/api/v1/admin/trials")
                    .header(header::AUTHORIZATION, "Bearer TEST123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let rows = body_json(response).await;
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 51);
        assert_eq!(rows[0]["code"], "demo1");
        assert_eq!(rows[50]["code"], "test123");
        assert_eq!(rows[50]["remaining_days"], Value::Null);
    }

    #[tokio::test]
    async fn admin_export_downloads_store() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));

        app.clone()
            .oneshot(json_request("POST", "/api/v1/access", None, json!({"code": "demo9"})))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::get("/api/v1/admin/export")
                    .header(header::AUTHORIZATION, "Bearer test123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"trials.json\""
        );
        let body = body_json(response).await;
        assert_eq!(body["demo9"]["uses"], 1);
    }

    #[tokio::test]
    async fn content_generation_requires_active_code() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let app = router(state.clone());
        let request = json!({
            "product_name": "Linen Shirt",
            "category": "clothing",
            "keywords": "cotton, durable",
            "tone": "friendly"
        });

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/content/generate",
                Some("demo5"),
                request.clone(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content = body_json(response).await;
        assert_eq!(content["title"], "Linen Shirt - Clothing | Quality & value");
        assert_eq!(content["hashtags"], json!(["#Clothing", "#cotton", "#durable"]));

        crate::services::access_service::apply_admin_action(
            &state,
            "demo5",
            crate::models::trial::AdminAction::ForceExpire,
        )
        .await
        .unwrap();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/content/generate",
                Some("demo5"),
                request,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn content_export_is_a_text_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/content/export",
                Some("demo5"),
                json!({"product_name": "Linen Shirt"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Linen_Shirt_description.txt\""
        );
        let text = body_text(response).await;
        assert!(text.starts_with("Title: Linen Shirt - Clothing | Quality & value"));
    }

    #[tokio::test]
    async fn page_flow_renders_generator_and_admin_views() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .clone()
            .oneshot(form_request("/", "code=demo2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Trial active"));
        assert!(html.contains("<b>7</b> trial days left"));

        let response = app
            .clone()
            .oneshot(form_request(
                "/generate",
                "code=demo2&product_name=Desk+Lamp&category=electronics&keywords=warm+light&tone=short",
            ))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Desk Lamp - Electronics | Quality &amp; value"));
        assert!(html.contains("#Electronics #warmlight"));
        assert!(html.contains("action=\"/export\""));

        let response = app
            .clone()
            .oneshot(form_request("/", "code=test123"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Admin Panel"));
        assert!(html.contains("<td>demo2</td><td>2025-06-15</td>"));
        assert!(html.contains("action=\"/admin/export\""));

        let response = app
            .oneshot(form_request(
                "/admin/action",
                "code=test123&target=demo2&action=force_expire",
            ))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Code demo2 marked as expired (first_use = 2025-06-07)"));
    }

    #[tokio::test]
    async fn page_rejects_invalid_code_inline() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .oneshot(form_request("/", "code=letmein"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Invalid demo code"));
    }

    #[tokio::test]
    async fn page_download_of_generated_description() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let app = router(state.clone());
        let form = "code=demo2&product_name=Desk+Lamp&category=electronics&keywords=warm+light&tone=short";

        let response = app
            .clone()
            .oneshot(form_request("/export", form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Desk_Lamp_description.txt\""
        );
        let text = body_text(response).await;
        assert!(text.starts_with("Title: Desk Lamp - Electronics | Quality & value"));

        crate::services::access_service::apply_admin_action(
            &state,
            "demo2",
            crate::models::trial::AdminAction::ForceExpire,
        )
        .await
        .unwrap();

        let response = app
            .clone()
            .oneshot(form_request("/export", form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .oneshot(form_request("/export", "code=letmein&product_name=Desk+Lamp"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn page_download_of_trial_file_is_admin_only() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));

        app.clone()
            .oneshot(form_request("/", "code=demo4"))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(form_request("/admin/export", "code=test123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"trials.json\""
        );
        let body = body_json(response).await;
        assert_eq!(body["demo4"]["first_use"], "2025-06-15");
        assert_eq!(body["demo4"]["uses"], 1);

        let response = app
            .oneshot(form_request("/admin/export", "code=demo4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
