use sqquats_backend::config::{Config, CorsConfig, MongoConfig, ServerConfig, SmtpConfig};
use sqquats_backend::services::{EmailProvider, GymDb};
use sqquats_backend::startup::Application;
use std::sync::Arc;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub api_address: String,
    pub port: u16,
    pub db: GymDb,
    pub db_name: String,
}

impl TestApp {
    /// Spawn the application without an email provider (notifications skipped).
    pub async fn spawn() -> Self {
        Self::spawn_with_email(None).await
    }

    /// Spawn the application with an injected email provider.
    pub async fn spawn_with_email(email: Option<Arc<dyn EmailProvider>>) -> Self {
        let db_name = format!("sqquats_test_{}", Uuid::new_v4().simple());

        let config = Config {
            server: ServerConfig { port: 0 },
            mongodb: MongoConfig {
                uri: std::env::var("TEST_MONGODB_URI")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                database: db_name.clone(),
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_string()],
            },
            smtp: SmtpConfig {
                host: "smtp.test.local".to_string(),
                port: 587,
                user: "test".to_string(),
                password: "test".to_string(),
                sender_email: "test@example.com".to_string(),
                recipient_email: "owner@example.com".to_string(),
                enabled: false,
                send_timeout_secs: 2,
            },
        };

        let app = Application::build_with_email_provider(config, email)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);
        let api_address = format!("{}/api", address);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            api_address,
            port,
            db,
            db_name,
        }
    }

    /// Drop the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
