use crate::models::{ContactInquiry, DEFAULT_INTEREST};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct StatusCheckCreate {
    #[validate(length(min = 1, message = "client_name must not be empty"))]
    pub client_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactFormRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub phone: String,

    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,

    #[serde(default = "default_interest")]
    pub interest: String,
}

fn default_interest() -> String {
    DEFAULT_INTEREST.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactFormResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub interest: String,
    pub submitted_at: DateTime<Utc>,
    pub email_sent: bool,
}

impl ContactFormResponse {
    /// Build the response for a just-created inquiry; `email_sent` reflects
    /// the notification outcome of this request, not the stored record.
    pub fn from_inquiry(inquiry: ContactInquiry, email_sent: bool) -> Self {
        Self {
            id: inquiry.id,
            name: inquiry.name,
            email: inquiry.email,
            phone: inquiry.phone,
            message: inquiry.message,
            interest: inquiry.interest,
            submitted_at: inquiry.submitted_at,
            email_sent,
        }
    }
}

impl From<ContactInquiry> for ContactFormResponse {
    fn from(inquiry: ContactInquiry) -> Self {
        let email_sent = inquiry.email_sent;
        Self::from_inquiry(inquiry, email_sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_request_rejects_invalid_email() {
        let request: ContactFormRequest = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "email": "not-an-email",
            "phone": "123",
            "message": "hello"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn contact_request_defaults_interest() {
        let request: ContactFormRequest = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "email": "alice@example.com",
            "phone": "123",
            "message": "hello"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.interest, DEFAULT_INTEREST);
    }
}
