use axum::http::header;

use super::test_client::{get, send};
use super::*;
use crate::state::test_helpers;

#[tokio::test]
async fn healthz_is_ok_without_auth() {
    let state = test_helpers::test_app_state();
    let resp = send(&state, get("/healthz", None)).await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_api_path_is_not_found() {
    let state = test_helpers::test_app_state();
    let resp = send(&state, get("/api/place/nope", None)).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_error_renders_detail_body() {
    let resp = ApiError::new(StatusCode::CONFLICT, "Username already taken").into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(resp.headers().get(header::WWW_AUTHENTICATE).is_none());
    let body = http_body_util::BodyExt::collect(resp.into_body()).await.expect("body").to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(json, serde_json::json!({ "detail": "Username already taken" }));
}

#[test]
fn unauthorized_error_challenges_for_bearer() {
    let resp = ApiError::unauthorized().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get(header::WWW_AUTHENTICATE).expect("challenge"), "Bearer");
}

// =============================================================================
// Client route table over the real SSR router
// =============================================================================

mod views {
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    const CONNECTION_MARK: &str = "One pixel at a time";
    const CANVAS_MARK: &str = "Sign out";
    const REGISTER_MARK: &str = "Confirm password";
    const NOT_FOUND_MARK: &str = "Page not found.";

    async fn render(path: &str) -> (StatusCode, Option<String>, String) {
        let options = LeptosOptions::builder().output_name("place").build();
        let response = view_routes(&options)
            .oneshot(Request::get(path).body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.into_body().collect().await.expect("body").to_bytes();
        (status, location, String::from_utf8_lossy(&body).into_owned())
    }

    fn marks_in(body: &str) -> Vec<&'static str> {
        [CONNECTION_MARK, CANVAS_MARK, REGISTER_MARK, NOT_FOUND_MARK]
            .into_iter()
            .filter(|mark| body.contains(mark))
            .collect()
    }

    #[tokio::test]
    async fn route_list_matches_route_table() {
        let mut paths: Vec<String> = generate_route_list(client::app::App)
            .iter()
            .map(|r| r.path().to_owned())
            .collect();
        paths.sort();
        let mut expected: Vec<String> = AppRoute::ALL.iter().map(|r| r.path().to_owned()).collect();
        expected.sort();
        assert_eq!(paths, expected);
    }

    #[tokio::test]
    async fn root_renders_connection_view_only() {
        let (status, _, body) = render("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(marks_in(&body), vec![CONNECTION_MARK]);
    }

    #[tokio::test]
    async fn canvas_renders_canvas_view_only() {
        let (status, _, body) = render("/canvas").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(marks_in(&body), vec![CANVAS_MARK]);
    }

    #[tokio::test]
    async fn register_renders_register_view_only() {
        let (status, _, body) = render("/register").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(marks_in(&body), vec![REGISTER_MARK]);
    }

    #[tokio::test]
    async fn unknown_path_renders_not_found() {
        let (status, _, body) = render("/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(marks_in(&body), vec![NOT_FOUND_MARK]);
    }

    #[tokio::test]
    async fn trailing_slash_redirects_to_view_path() {
        for route in [AppRoute::Canvas, AppRoute::Register] {
            let slashed = format!("{}/", route.path());
            let (status, location, _) = render(&slashed).await;
            assert_eq!(status, StatusCode::PERMANENT_REDIRECT, "{slashed}");
            assert_eq!(location.as_deref(), Some(route.path()));
            assert_eq!(AppRoute::resolve(&slashed), Some(route));
        }
    }
}
