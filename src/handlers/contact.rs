use crate::dtos::{ContactFormRequest, ContactFormResponse};
use crate::error::AppError;
use crate::models::ContactInquiry;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{extract::State, Json};

/// Submit a contact-form inquiry.
///
/// The inquiry is persisted first with `email_sent = false`; the notification
/// attempt that follows can never fail the request. A failed or timed-out send
/// is logged and the record simply stays `email_sent = false`.
pub async fn submit_contact_form(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ContactFormRequest>,
) -> Result<Json<ContactFormResponse>, AppError> {
    let inquiry = ContactInquiry::new(
        request.name,
        request.email,
        request.phone,
        request.message,
        request.interest,
    );

    state.db.insert_inquiry(&inquiry).await?;
    tracing::info!(inquiry_id = %inquiry.id, name = %inquiry.name, "Contact inquiry saved");

    let mut email_sent = false;
    if let Some(provider) = &state.email {
        let timeout = state.config.smtp.send_timeout();
        match tokio::time::timeout(timeout, provider.send_inquiry_notification(&inquiry)).await {
            Ok(Ok(())) => {
                email_sent = true;
                // Response reports the send outcome even if the flag update fails
                if let Err(e) = state.db.mark_email_sent(&inquiry.id).await {
                    tracing::error!(inquiry_id = %inquiry.id, error = %e, "Failed to record email_sent");
                }
            }
            Ok(Err(e)) => {
                tracing::error!(inquiry_id = %inquiry.id, error = %e, "Failed to send email");
            }
            Err(_) => {
                tracing::error!(
                    inquiry_id = %inquiry.id,
                    timeout_secs = timeout.as_secs(),
                    "Email notification timed out"
                );
            }
        }
    }

    Ok(Json(ContactFormResponse::from_inquiry(inquiry, email_sent)))
}

pub async fn list_inquiries(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactFormResponse>>, AppError> {
    let inquiries = state.db.list_inquiries().await?;
    let responses = inquiries
        .into_iter()
        .map(ContactFormResponse::from)
        .collect();
    Ok(Json(responses))
}
