#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        middleware::from_fn,
        routing::get as get_route,
        Router,
    };

    use crate::middleware::admin::{admin_only, AdminCapability};
    use crate::tests::{
        body_json, body_text, get, send, setup_test_app, setup_test_app_with, test_config, ADMIN_TOKEN,
    };

    fn admin_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_admin_routes_forbidden_without_capability() {
        let (app, _) = setup_test_app().await;

        for uri in ["/admin", "/admin/accounts", "/admin/users/42"] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", uri);
            let v = body_json(response).await;
            assert_eq!(v["error"]["code"], "FORBIDDEN");
        }
    }

    #[tokio::test]
    async fn test_admin_routes_with_capability() {
        let (app, _) = setup_test_app().await;

        let cases = [
            ("/admin", "admin: index"),
            ("/admin/accounts", "admin: list accounts.."),
            ("/admin/users/42", "admin: view user id 42"),
        ];
        for (uri, expected) in cases {
            let response = send(&app, admin_request(Method::GET, uri, Some(ADMIN_TOKEN))).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
            assert_eq!(body_text(response).await, expected);
        }
    }

    #[tokio::test]
    async fn test_same_request_differs_only_by_capability() {
        let (app, _) = setup_test_app().await;

        let denied = send(&app, admin_request(Method::GET, "/admin/accounts", Some("wrong-token"))).await;
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);

        let allowed = send(&app, admin_request(Method::GET, "/admin/accounts", Some(ADMIN_TOKEN))).await;
        assert_eq!(allowed.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_admin_paths_are_gated() {
        let (app, _) = setup_test_app().await;

        for uri in ["/admin/unknown", "/admin/users", "/admin/", "/admin/accounts/extra"] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", uri);
            assert_eq!(body_json(response).await["error"]["code"], "FORBIDDEN");

            let response = send(&app, admin_request(Method::GET, uri, Some(ADMIN_TOKEN))).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
            assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn test_admin_head_requests() {
        let (app, _) = setup_test_app().await;

        let response = send(&app, admin_request(Method::HEAD, "/admin", Some(ADMIN_TOKEN))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, admin_request(Method::HEAD, "/admin", None)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_no_configured_token_means_no_admins() {
        let mut config = test_config();
        config.admin.token = None;
        let (app, _) = setup_test_app_with(config).await;

        let response = send(&app, admin_request(Method::GET, "/admin", Some(ADMIN_TOKEN))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_client_cannot_smuggle_capability() {
        let (app, _) = setup_test_app().await;

        let request = Request::builder().uri("/admin").extension(AdminCapability(true)).body(Body::empty()).unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_only_reads_capability_flag() {
        let app: Router = Router::new().route("/", get_route(|| async { "in" })).layer(from_fn(admin_only));

        let missing = send(&app, Request::builder().uri("/").body(Body::empty()).unwrap()).await;
        assert_eq!(missing.status(), StatusCode::FORBIDDEN);

        let denied = send(
            &app,
            Request::builder().uri("/").extension(AdminCapability(false)).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);

        let allowed = send(
            &app,
            Request::builder().uri("/").extension(AdminCapability(true)).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(allowed.status(), StatusCode::OK);
        assert_eq!(body_text(allowed).await, "in");
    }

    #[tokio::test]
    async fn test_articles_do_not_need_capability() {
        let (app, _) = setup_test_app().await;
        let response = get(&app, "/articles/1").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
