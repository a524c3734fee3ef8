#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        http::StatusCode,
        middleware::from_fn_with_state,
        response::IntoResponse,
        routing::get as get_route,
        Router,
    };
    use tower_http::catch_panic::CatchPanicLayer;

    use crate::error::{panic_response, AppError};
    use crate::middleware::timeout::request_timeout;
    use crate::store::StoreError;
    use crate::tests::{body_json, body_text, get};

    #[test]
    fn test_app_error_display() {
        let error = AppError::BadRequest("Invalid input".to_string());
        assert_eq!(format!("{}", error), "Bad request: Invalid input");

        let error = AppError::NotFound("Resource not found".to_string());
        assert_eq!(format!("{}", error), "Not found: Resource not found");

        let error = AppError::MissingContext("article");
        assert_eq!(format!("{}", error), "Missing request context: article");

        let error = AppError::RateLimited { retry_after_seconds: 60 };
        assert_eq!(format!("{}", error), "Rate limited. Retry after 60 seconds");
    }

    #[test]
    fn test_app_error_into_response() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AppError::Upstream("x".into()), StatusCode::NOT_FOUND),
            (AppError::MissingContext("article"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Timeout, StatusCode::GATEWAY_TIMEOUT),
            (AppError::RateLimited { retry_after_seconds: 30 }, StatusCode::TOO_MANY_REQUESTS),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let v = body_json(AppError::Upstream("connection refused".into()).into_response()).await;
        assert_eq!(v["error"]["code"], "UPSTREAM_ERROR");
        assert_eq!(v["error"]["message"], "Not Found");
        assert_eq!(v["error"]["details"]["reason"], "connection refused");
        assert_eq!(v["status"], 404);
        assert!(v["timestamp"].is_string());

        let v = body_json(AppError::Internal(anyhow::anyhow!("secret detail")).into_response()).await;
        assert_eq!(v["error"]["message"], "An internal server error occurred");
        assert!(v["error"]["details"]["error_id"].is_string());
        assert!(!v.to_string().contains("secret detail"));
    }

    #[test]
    fn test_from_store_error() {
        let app_error: AppError = StoreError::NotFound("7".to_string()).into();
        match app_error {
            AppError::NotFound(msg) => assert_eq!(msg, "Not Found"),
            _ => panic!("Expected NotFound variant"),
        }
    }

    #[test]
    fn test_from_sqlx_error() {
        let app_error: AppError = sqlx::Error::PoolClosed.into();
        assert!(matches!(app_error, AppError::Upstream(_)));

        let app_error: AppError = sqlx::Error::PoolTimedOut.into();
        match app_error {
            AppError::Upstream(msg) => assert!(msg.contains("timed out")),
            _ => panic!("Expected Upstream variant"),
        }
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_error: AppError = err.into();
        match app_error {
            AppError::BadRequest(msg) => assert!(msg.starts_with("Invalid JSON body")),
            _ => panic!("Expected BadRequest variant"),
        }
    }

    async fn boom() -> &'static str {
        panic!("kaboom")
    }

    #[tokio::test]
    async fn test_panicking_handler_becomes_500() {
        let app = Router::new()
            .route("/boom", get_route(boom))
            .route("/fine", get_route(|| async { "fine" }))
            .layer(CatchPanicLayer::custom(panic_response));

        let response = get(&app, "/boom").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let v = body_json(response).await;
        assert_eq!(v["error"]["code"], "INTERNAL_ERROR");
        assert!(!v.to_string().contains("kaboom"));

        // The service keeps answering afterwards
        let response = get(&app, "/fine").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "fine");
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let app = Router::new()
            .route(
                "/slow",
                get_route(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .route("/quick", get_route(|| async { "quick" }))
            .layer(from_fn_with_state(Duration::from_millis(50), request_timeout));

        let response = get(&app, "/slow").await;
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body_json(response).await["error"]["code"], "REQUEST_TIMEOUT");

        let response = get(&app, "/quick").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
