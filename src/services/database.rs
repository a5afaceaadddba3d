use crate::error::AppError;
use crate::models::{ContactInquiry, StatusCheck};
use futures::TryStreamExt;
use mongodb::{
    bson::doc, options::FindOptions, options::IndexOptions, Client as MongoClient, Collection,
    Database, IndexModel,
};

/// Listing endpoints never return more than this many records.
pub const LIST_LIMIT: i64 = 1000;

#[derive(Clone)]
pub struct GymDb {
    client: MongoClient,
    db: Database,
}

impl GymDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    /// Unique index on `id` per collection: every persisted record carries a
    /// globally unique id assigned at creation time.
    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes");

        let id_index = || {
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .name("id_idx".to_string())
                        .unique(true)
                        .build(),
                )
                .build()
        };

        self.status_checks()
            .create_index(id_index(), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create id index on status_checks: {}", e);
                AppError::from(e)
            })?;

        self.contact_inquiries()
            .create_index(id_index(), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create id index on contact_inquiries: {}", e);
                AppError::from(e)
            })?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn status_checks(&self) -> Collection<StatusCheck> {
        self.db.collection("status_checks")
    }

    pub fn contact_inquiries(&self) -> Collection<ContactInquiry> {
        self.db.collection("contact_inquiries")
    }

    pub async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), AppError> {
        self.status_checks()
            .insert_one(check, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert status check: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub async fn list_status_checks(&self) -> Result<Vec<StatusCheck>, AppError> {
        let find_options = FindOptions::builder().limit(LIST_LIMIT).build();

        let cursor = self
            .status_checks()
            .find(doc! {}, find_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list status checks: {}", e);
                AppError::from(e)
            })?;

        let checks = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect status checks: {}", e);
            AppError::from(e)
        })?;

        Ok(checks)
    }

    pub async fn insert_inquiry(&self, inquiry: &ContactInquiry) -> Result<(), AppError> {
        self.contact_inquiries()
            .insert_one(inquiry, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert contact inquiry: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    /// Flip `email_sent` on a stored inquiry after the provider accepted the
    /// send. Called at most once per inquiry.
    pub async fn mark_email_sent(&self, inquiry_id: &str) -> Result<(), AppError> {
        self.contact_inquiries()
            .update_one(
                doc! { "id": inquiry_id },
                doc! { "$set": { "email_sent": true } },
                None,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to update email_sent for {}: {}", inquiry_id, e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub async fn list_inquiries(&self) -> Result<Vec<ContactInquiry>, AppError> {
        let find_options = FindOptions::builder().limit(LIST_LIMIT).build();

        let cursor = self
            .contact_inquiries()
            .find(doc! {}, find_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list contact inquiries: {}", e);
                AppError::from(e)
            })?;

        let inquiries = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect contact inquiries: {}", e);
            AppError::from(e)
        })?;

        Ok(inquiries)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}
