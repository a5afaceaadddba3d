use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lightweight heartbeat-style record used for diagnostic purposes.
///
/// Timestamps serialize as RFC 3339 strings, both in responses and in the
/// stored documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_unique_ids() {
        let a = StatusCheck::new("client-a".to_string());
        let b = StatusCheck::new("client-a".to_string());
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn timestamp_serializes_as_rfc3339_string() {
        let check = StatusCheck::new("client-a".to_string());
        let json = serde_json::to_value(&check).unwrap();
        let ts = json["timestamp"].as_str().expect("timestamp not a string");
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
