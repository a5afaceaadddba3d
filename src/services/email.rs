use crate::config::SmtpConfig;
use crate::error::AppError;
use crate::models::ContactInquiry;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::atomic::{AtomicU64, Ordering};

#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Deliver the inquiry notification to the configured recipient.
    async fn send_inquiry_notification(&self, inquiry: &ContactInquiry) -> Result<(), AppError>;
}

pub struct SmtpProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender_email: String,
    recipient_email: String,
}

impl SmtpProvider {
    pub fn new(config: &SmtpConfig) -> Result<Self, AppError> {
        let creds = Credentials::new(config.user.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Failed to create SMTP relay: {}", e))
            })?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            sender_email: config.sender_email.clone(),
            recipient_email: config.recipient_email.clone(),
        })
    }
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send_inquiry_notification(&self, inquiry: &ContactInquiry) -> Result<(), AppError> {
        let from_mailbox: Mailbox = format!("The Sqquats Gym <{}>", self.sender_email)
            .parse()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid sender address: {}", e)))?;

        let to_mailbox: Mailbox = self.recipient_email.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Invalid recipient address: {}", e))
        })?;

        let message = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(inquiry_subject(inquiry))
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(inquiry_text(inquiry)),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(inquiry_html(inquiry)),
                    ),
            )
            .map_err(|e| AppError::EmailError(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::EmailError(format!("Failed to send email: {}", e)))?;

        tracing::info!(
            inquiry_id = %inquiry.id,
            to = %self.recipient_email,
            "Email notification sent"
        );

        Ok(())
    }
}

pub fn inquiry_subject(inquiry: &ContactInquiry) -> String {
    format!(
        "New Gym Inquiry from {} - {}",
        inquiry.name, inquiry.interest
    )
}

fn inquiry_text(inquiry: &ContactInquiry) -> String {
    format!(
        "New Gym Inquiry!\n\nName: {}\nEmail: {}\nPhone: {}\nInterest: {}\n\nMessage:\n{}\n",
        inquiry.name, inquiry.email, inquiry.phone, inquiry.interest, inquiry.message
    )
}

pub fn inquiry_html(inquiry: &ContactInquiry) -> String {
    format!(
        r###"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <div style="background: #FF4500; color: white; padding: 20px; text-align: center;">
        <h1 style="margin: 0;">New Gym Inquiry!</h1>
    </div>
    <div style="padding: 20px; background: #f5f5f5;">
        <h2 style="color: #333;">Contact Details</h2>
        <table style="width: 100%; border-collapse: collapse;">
            <tr>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;"><strong>Name:</strong></td>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;">{name}</td>
            </tr>
            <tr>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;"><strong>Email:</strong></td>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;">{email}</td>
            </tr>
            <tr>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;"><strong>Phone:</strong></td>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;">{phone}</td>
            </tr>
            <tr>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;"><strong>Interest:</strong></td>
                <td style="padding: 10px; border-bottom: 1px solid #ddd;">{interest}</td>
            </tr>
        </table>
        <h3 style="color: #333; margin-top: 20px;">Message:</h3>
        <p style="background: white; padding: 15px; border-radius: 5px;">{message}</p>
    </div>
    <div style="background: #333; color: #999; padding: 15px; text-align: center; font-size: 12px;">
        The Sqquats Gym - Haldwani's Standard of Strength
    </div>
</div>"###,
        name = inquiry.name,
        email = inquiry.email,
        phone = inquiry.phone,
        interest = inquiry.interest,
        message = inquiry.message,
    )
}

/// Mock email provider for testing
pub struct MockEmailProvider {
    succeed: bool,
    delay: Option<std::time::Duration>,
    send_count: AtomicU64,
}

impl MockEmailProvider {
    pub fn new(succeed: bool) -> Self {
        Self {
            succeed,
            delay: None,
            send_count: AtomicU64::new(0),
        }
    }

    /// Mock a slow provider: every send sleeps for `delay` before completing.
    pub fn with_delay(succeed: bool, delay: std::time::Duration) -> Self {
        Self {
            succeed,
            delay: Some(delay),
            send_count: AtomicU64::new(0),
        }
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send_inquiry_notification(&self, inquiry: &ContactInquiry) -> Result<(), AppError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if !self.succeed {
            return Err(AppError::EmailError(
                "Mock email provider configured to fail".to_string(),
            ));
        }

        tracing::info!(
            inquiry_id = %inquiry.id,
            "[MOCK] Email would be sent"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_INTEREST;

    fn sample_inquiry() -> ContactInquiry {
        ContactInquiry::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "+91 99999 99999".to_string(),
            "Looking for evening batch timings".to_string(),
            DEFAULT_INTEREST.to_string(),
        )
    }

    #[test]
    fn html_template_embeds_all_inquiry_fields() {
        let inquiry = sample_inquiry();
        let html = inquiry_html(&inquiry);
        assert!(html.contains(&inquiry.name));
        assert!(html.contains(&inquiry.email));
        assert!(html.contains(&inquiry.phone));
        assert!(html.contains(&inquiry.interest));
        assert!(html.contains(&inquiry.message));
    }

    #[test]
    fn subject_includes_name_and_interest() {
        let inquiry = sample_inquiry();
        assert_eq!(
            inquiry_subject(&inquiry),
            "New Gym Inquiry from Alice - General Inquiry"
        );
    }

    #[tokio::test]
    async fn failing_mock_still_counts_attempts() {
        let provider = MockEmailProvider::new(false);
        let result = provider.send_inquiry_notification(&sample_inquiry()).await;
        assert!(result.is_err());
        assert_eq!(provider.send_count(), 1);
    }
}
