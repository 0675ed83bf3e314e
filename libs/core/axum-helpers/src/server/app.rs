use super::shutdown::{coordinated_shutdown, ShutdownCoordinator};
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{middleware, Router};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

/// Wraps the application routes with the cross-cutting layers.
///
/// Adds, outermost last:
/// - a JSON 404 fallback
/// - request tracing at INFO
/// - security headers
/// - the given CORS layer
/// - response compression (gzip, br, deflate, zstd by `Accept-Encoding`)
///
/// Routes must already have their state applied.
///
/// # Example
/// ```ignore
/// use axum_helpers::{cors_layer_from_env, create_router};
///
/// let cors = cors_layer_from_env(&environment)?;
/// let router = create_router(graphql_routes, cors);
/// ```
pub fn create_router(apis: Router, cors: CorsLayer) -> Router {
    Router::new()
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new())
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// Binds `server_config.address()` and serves until SIGINT/SIGTERM. Once
/// in-flight requests have drained, runs `cleanup` bounded by
/// `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// create_production_app(router, &config, Duration::from_secs(30), async move {
///     client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()>,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();

    let listener = TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    serve_then_cleanup(
        listener,
        router,
        coordinated_shutdown(coordinator),
        shutdown_timeout,
        cleanup,
    )
    .await
}

/// Serves until `shutdown` resolves and every open connection has finished,
/// then runs `cleanup`.
pub(crate) async fn serve_then_cleanup<S, F>(
    listener: TcpListener,
    router: Router,
    shutdown: S,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
    F: Future<Output = ()>,
{
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(_) => info!("Cleanup completed successfully"),
        Err(_) => {
            tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            );
        }
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_unknown_route_returns_json_404_with_security_headers() {
        let apis = Router::new().route("/ping", get(|| async { "pong" }));
        let app = create_router(apis, CorsLayer::permissive());

        let response = app
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn test_known_route_is_served() {
        let apis = Router::new().route("/ping", get(|| async { "pong" }));
        let app = create_router(apis, CorsLayer::permissive());

        let response = app
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cleanup_runs_after_in_flight_requests_drain() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::{Arc, Mutex};
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::sync::oneshot;

        let cleaned = Arc::new(AtomicBool::new(false));
        let (started_tx, started_rx) = oneshot::channel::<()>();
        let started_tx = Arc::new(Mutex::new(Some(started_tx)));

        let seen_by_handler = cleaned.clone();
        let apis = Router::new().route(
            "/slow",
            get(move || {
                let cleaned = seen_by_handler.clone();
                let started_tx = started_tx.clone();
                async move {
                    let tx = started_tx.lock().unwrap().take();
                    if let Some(tx) = tx {
                        let _ = tx.send(());
                    }
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    if cleaned.load(Ordering::SeqCst) {
                        "cleaned"
                    } else {
                        "live"
                    }
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let flag = cleaned.clone();
        let server = tokio::spawn(serve_then_cleanup(
            listener,
            apis,
            async move {
                let _ = stop_rx.await;
            },
            Duration::from_secs(5),
            async move {
                flag.store(true, Ordering::SeqCst);
            },
        ));

        let client = tokio::spawn(async move {
            let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
            stream
                .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                .await
                .unwrap();
            let mut response = String::new();
            stream.read_to_string(&mut response).await.unwrap();
            response
        });

        started_rx.await.unwrap();
        stop_tx.send(()).unwrap();

        let response = client.await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("live"));

        server.await.unwrap().unwrap();
        assert!(cleaned.load(Ordering::SeqCst));
    }
}
