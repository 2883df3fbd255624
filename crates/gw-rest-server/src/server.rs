// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main server implementation

use crate::config::ServerConfig;
use crate::dependencies::DefaultServerDependencies;
use crate::error::{ServerError, ServerResult};
use crate::handlers;
use crate::middleware::{rate_limit_problem, rate_limit_quota};
use crate::state::AppState;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{self, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tracing::{error, info, warn};

/// REST API server
pub struct Server {
    config: ServerConfig,
    app: Router,
}

impl Server {
    /// Create a new server instance
    pub async fn new(config: ServerConfig) -> ServerResult<Self> {
        let state = DefaultServerDependencies::new(config.clone()).await?.into_state();
        Ok(Self::with_state(config, state))
    }

    /// Construct a server from an already-built app state (used for custom dependencies)
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        let app = Self::build_app(state, &config);
        Self { config, app }
    }

    /// Build the Axum application with routes and middleware
    pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
        // CORS wraps the limiter: preflights never reach it and 429s carry CORS headers
        let middleware_stack = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(cors_layer(config))
            .layer(map_response(rate_limit_problem));

        let api_routes = Router::new()
            // Health and status endpoints
            .route("/healthz", get(handlers::health::health_check))
            .route("/readyz", get(handlers::health::readiness_check))
            .route("/version", get(handlers::health::version))
            // Accounts and tokens
            .route("/register", post(handlers::register::register))
            .route("/login", post(handlers::login::login))
            .route("/reissue", post(handlers::reissue::reissue))
            .route("/user_info", get(handlers::user_info::user_info))
            // chzzk follow relations
            .route("/chzzk", post(handlers::chzzk::follow_relations))
            // Naver login
            .route("/naver/callback", get(handlers::naver::callback))
            .method_not_allowed_fallback(method_not_allowed);

        let mut app = Router::new()
            .nest("/api", api_routes)
            .fallback(route_not_found)
            .layer(CatchPanicLayer::custom(panic_response));

        // Keyed on the forwarded client address, else the peer IP
        let governor = rate_limit_quota(&config.rate_limit).and_then(|(interval, burst)| {
            GovernorConfigBuilder::default()
                .per_millisecond(interval.as_millis() as u64)
                .burst_size(burst)
                .key_extractor(SmartIpKeyExtractor)
                .finish()
        });
        match governor {
            Some(governor) => {
                app = app.layer(GovernorLayer {
                    config: Arc::new(governor),
                });
            }
            None => warn!("rate limiting disabled"),
        }

        app.with_state(state).layer(middleware_stack)
    }

    /// Bind the configured address and serve until Ctrl-C or SIGTERM
    pub async fn run(self) -> ServerResult<()> {
        let addr = self.config.bind_addr;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener until Ctrl-C or SIGTERM
    pub async fn serve(self, listener: TcpListener) -> ServerResult<()> {
        info!("Starting server on {}", listener.local_addr()?);

        axum::serve(
            listener,
            self.app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| ServerError::Internal(format!("REST server error: {err}")))?;

        info!("Server stopped");
        Ok(())
    }

    /// Router with all middleware applied
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Get the bind address
    pub fn addr(&self) -> SocketAddr {
        self.config.bind_addr
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.enable_cors {
        return CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods(cors::Any)
            .allow_headers(cors::Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%origin, error = %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %message, "handler panicked");
    ServerError::Internal(format!("handler panicked: {message}")).into_response()
}

async fn route_not_found() -> ServerError {
    ServerError::NotFound("route not found".to_string())
}

async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                error!(error = %err, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
