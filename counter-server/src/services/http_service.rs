use std::future::Future;
use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::core::{Result, ServerState};

/// 请求体上限 (图片 5MB + multipart 表单字段)
const BODY_LIMIT: usize = 6 * 1024 * 1024;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        // Customer kiosk
        .merge(crate::api::orders::router())
        .merge(crate::api::stock::router())
        .merge(crate::api::score::router())
        // Staff screens
        .merge(crate::api::kitchen::router())
        .merge(crate::api::monitor::router())
        .merge(crate::api::manager::router())
        // Admin
        .merge(crate::api::auth::router())
        .merge(crate::api::admin_stock::router())
        .merge(crate::api::payments::router())
        .merge(crate::api::sales::router())
}

/// Full application: routes, uploaded files and middleware, state applied
pub fn build_router(state: ServerState) -> Router {
    let uploads = ServeDir::new(state.config.uploads_dir());
    build_app()
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
        // 外层在前: 请求日志 -> trace -> CORS
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(log_request))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[derive(Clone, Debug)]
pub struct HttpService {
    router: Router,
}

impl HttpService {
    pub fn new(state: ServerState) -> Self {
        Self {
            router: build_router(state),
        }
    }

    /// Bind and serve until `shutdown_signal` resolves
    pub async fn start_server<F>(&self, addr: SocketAddr, shutdown_signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("🚀 Starting HTTP server on {}", addr);

        axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
