//! ServerBuilder for fluent API to build HTTP servers

use super::admin::{AdminState, admin_routes};
use super::router::api_routes;
use super::state::AppState;
use crate::core::DEFAULT_PAGE_SIZE;
use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the hotel-booking HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_state(AppState::new(stores, 10))
///     .build()?;
/// ```
pub struct ServerBuilder {
    state: Option<AppState>,
    admin: bool,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the admin panel enabled
    pub fn new() -> Self {
        Self {
            state: None,
            admin: true,
            custom_routes: Vec::new(),
        }
    }

    /// Use these services; defaults to fresh in-memory stores
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Mount or skip the `/admin` panel
    pub fn with_admin(mut self, enabled: bool) -> Self {
        self.admin = enabled;
        self
    }

    /// Add routes next to the JSON API
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    ///
    /// Merges the JSON API, the custom routes and, when enabled, the admin
    /// panel nested under `/admin`. Every request goes through the trace and
    /// CORS layers.
    pub fn build(self) -> Result<Router> {
        let state = self
            .state
            .unwrap_or_else(|| AppState::in_memory(DEFAULT_PAGE_SIZE));

        let mut app = api_routes(state.clone());
        for routes in self.custom_routes {
            app = app.merge(routes);
        }

        if self.admin {
            let admin = AdminState::new(state)
                .map_err(|e| anyhow::anyhow!("Failed to compile admin templates: {}", e))?;
            app = app.nest("/admin", admin_routes(admin));
        }

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds `addr`, serves until SIGTERM or Ctrl+C, then drains in-flight
    /// requests.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, routing::get};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_default_builder_serves_health() {
        let server = TestServer::new(ServerBuilder::new().build().unwrap());

        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_json(&json!({"status": "ok", "service": "hotel-booking"}));
    }

    #[tokio::test]
    async fn test_custom_routes_are_merged() {
        let extra = Router::new().route("/version", get(|| async { Json(json!({"v": 1})) }));
        let app = ServerBuilder::new().with_custom_routes(extra).build().unwrap();
        let server = TestServer::new(app);

        let body: Value = server.get("/version").await.json();
        assert_eq!(body["v"], 1);
    }

    #[tokio::test]
    async fn test_admin_can_be_disabled() {
        let app = ServerBuilder::new().with_admin(false).build().unwrap();
        let server = TestServer::new(app);

        server.get("/admin/hotels").expect_failure().await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_admin_is_mounted_by_default() {
        let server = TestServer::new(ServerBuilder::default().build().unwrap());

        let response = server.get("/admin/hotels").await;
        response.assert_status_ok();
        assert!(response.text().contains("Hotels"));
    }
}
