//! Admin Guard Middleware.
//! Turns a denied access check into a 400 response.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::security::{AccessGuard, Decision, DenyReason};

pub async fn admin_guard_middleware(
    State(guard): State<Arc<AccessGuard>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let remote_address = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    match guard.check(request.uri().path(), request.headers(), remote_address) {
        Decision::Allow => next.run(request).await,
        Decision::Deny(reason) => {
            tracing::warn!(
                path = %request.uri().path(),
                peer = ?remote_address,
                reason = %reason,
                "Admin access denied"
            );
            let body = match reason {
                DenyReason::InvalidAddress(_) => "Invalid client address",
                DenyReason::AddressNotAllowed(_) => "Disallowed IP address",
            };
            (StatusCode::BAD_REQUEST, body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderName, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        let guard = Arc::new(AccessGuard::new(
            "admin",
            vec!["10.0.0.0/8".parse().unwrap()],
            HeaderName::from_static("x-forwarded-for"),
        ));
        Router::new()
            .route("/admin/login", get(|| async { "login" }))
            .route("/public/home", get(|| async { "home" }))
            .layer(middleware::from_fn_with_state(guard, admin_guard_middleware))
    }

    fn request(path: &str, peer: &str, forwarded: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(value) = forwarded {
            builder = builder.header("x-forwarded-for", value);
        }
        builder
            .extension(ConnectInfo(SocketAddr::new(peer.parse().unwrap(), 51000)))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_denied_peer_gets_bad_request() {
        let res = app()
            .oneshot(request("/admin/login", "192.168.1.1", None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_allowed_forwarded_address_passes() {
        let res = app()
            .oneshot(request("/admin/login", "192.168.1.1", Some("10.1.2.3")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_path_passes() {
        let res = app()
            .oneshot(request("/public/home", "192.168.1.1", Some("::1")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_encoded_admin_path_denied() {
        for path in ["/%61dmin/login", "/%2fadmin/login", "//admin/login"] {
            let res = app()
                .oneshot(request(path, "192.168.1.1", None))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{path}");
        }
    }

    #[tokio::test]
    async fn test_missing_connect_info_denied() {
        let req = Request::builder()
            .uri("/admin/login")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
