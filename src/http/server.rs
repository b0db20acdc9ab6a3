//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router for one service
//! - Wire up middleware (request ID, tracing, timeout, limits, headers, metrics)
//! - JSON fallbacks for unknown paths and unsupported methods
//! - Bind server to listener and drain on shutdown

use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Request},
    middleware, Router,
};
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::EchoConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{method_not_allowed, not_found};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::services::ServiceKind;

/// HTTP server for a single echo service.
pub struct HttpServer {
    kind: ServiceKind,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server for `kind` with the given configuration.
    pub fn new(kind: ServiceKind, config: &EchoConfig) -> Self {
        let router = Self::build_router(kind, config);
        Self { kind, router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(kind: ServiceKind, config: &EchoConfig) -> Router {
        let mut router = kind
            .routes()
            .fallback(not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .layer(middleware::from_fn_with_state(kind, metrics::track_requests));

        if config.security.enable_headers {
            router = router
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ));
        }

        // The configured limit replaces axum's built-in 2MB extractor cap.
        router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(GlobalConcurrencyLimitLayer::new(config.limits.max_in_flight))
            .layer(propagate_request_id_layer())
            .layer(
                TraceLayer::new_for_http().make_span_with(move |request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        service = %kind,
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id(request),
                    )
                }),
            )
            .layer(set_request_id_layer())
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires, then drain.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(
            service = %self.kind,
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!(service = %self.kind, "HTTP server stopped");
        Ok(())
    }
}
