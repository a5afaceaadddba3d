use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_INTEREST: &str = "General Inquiry";

/// A customer contact-form submission.
///
/// `email_sent` starts false and is flipped at most once, right after the
/// notification email is accepted by the provider. There is no deletion path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub interest: String,
    pub submitted_at: DateTime<Utc>,
    pub email_sent: bool,
}

impl ContactInquiry {
    pub fn new(
        name: String,
        email: String,
        phone: String,
        message: String,
        interest: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            phone,
            message,
            interest,
            submitted_at: Utc::now(),
            email_sent: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContactInquiry {
        ContactInquiry::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "+91 99999 99999".to_string(),
            "Interested in membership".to_string(),
            DEFAULT_INTEREST.to_string(),
        )
    }

    #[test]
    fn new_starts_with_email_not_sent() {
        let inquiry = sample();
        assert!(!inquiry.email_sent);
        assert!(Uuid::parse_str(&inquiry.id).is_ok());
    }

    #[test]
    fn submitted_at_serializes_as_string() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json["submitted_at"].is_string());
    }
}
