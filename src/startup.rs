//! Application startup and lifecycle management.

use crate::config::Config;
use crate::error::AppError;
use crate::handlers;
use crate::services::{EmailProvider, GymDb, SmtpProvider};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: GymDb,
    pub email: Option<Arc<dyn EmailProvider>>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration. The SMTP provider
    /// is wired in only when credentials are enabled in config.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let email: Option<Arc<dyn EmailProvider>> = if config.smtp.enabled {
            match SmtpProvider::new(&config.smtp) {
                Ok(provider) => {
                    tracing::info!("SMTP email provider initialized");
                    Some(Arc::new(provider))
                }
                Err(e) => {
                    tracing::warn!("Failed to initialize SMTP provider: {}. Email notifications disabled.", e);
                    None
                }
            }
        } else {
            tracing::info!("SMTP provider disabled, email notifications skipped");
            None
        };

        Self::build_with_email_provider(config, email).await
    }

    /// Build with an explicit email provider. Used by tests to inject mocks.
    pub async fn build_with_email_provider(
        config: Config,
        email: Option<Arc<dyn EmailProvider>>,
    ) -> Result<Self, AppError> {
        let db = GymDb::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;

        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let state = AppState {
            config: config.clone(),
            db: db.clone(),
            email,
        };

        let api = Router::new()
            .route("/", get(handlers::health::api_root))
            .route(
                "/status",
                post(handlers::status::create_status_check).get(handlers::status::list_status_checks),
            )
            .route("/contact", post(handlers::contact::submit_contact_form))
            .route("/contact/inquiries", get(handlers::contact::list_inquiries));

        let app = Router::new()
            .route("/health", get(handlers::health::health_check))
            .nest("/api", api)
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.cors.allowed_origins))
            .with_state(state.clone());

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db(&self) -> &GymDb {
        &self.state.db
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    // `AllowOrigin::list` rejects the wildcard; it needs the dedicated variant.
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| {
                    tracing::error!("Ignoring invalid CORS origin '{}': {}", o, e);
                    e
                })
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
