//! Outbound email for buyer-interest notifications.
//!
//! The dispatcher renders a fixed HTML template and hands it to a [`MailTransport`] on a
//! spawned task. The HTTP response never waits for, or reports, the delivery outcome.

use std::sync::Arc;

use async_trait::async_trait;
use html_escape::encode_text;
use serde_json::json;
use tokio::task::JoinHandle;

use crate::server::{error::mail::MailError, model::notification::BuyerInterestParam};

/// A fully rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Delivers mail through the SendGrid v3 `mail/send` endpoint.
pub struct SendGridTransport {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

impl SendGridTransport {
    pub fn new(client: reqwest::Client, api_key: String, url: String) -> Self {
        Self {
            client,
            api_key,
            url,
        }
    }
}

#[async_trait]
impl MailTransport for SendGridTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let payload = json!({
            "personalizations": [{ "to": [{ "email": email.to }] }],
            "from": { "email": email.from },
            "subject": email.subject,
            "content": [{ "type": "text/html", "value": email.html }],
        });

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Fire-and-forget sender for notification emails.
#[derive(Clone)]
pub struct NotificationDispatcher {
    transport: Arc<dyn MailTransport>,
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Sends a contact request from a buyer to a seller in the background.
    ///
    /// Delivery is attempted once. Success is logged at info level and failure at error
    /// level; neither is reported back to the caller.
    ///
    /// # Arguments
    /// - `param` - Recipient, sender, subject, buyer name and message
    ///
    /// # Returns
    /// - `JoinHandle<()>` - Handle of the spawned send, only awaited by tests
    pub fn notify_buyer_interest(&self, param: BuyerInterestParam) -> JoinHandle<()> {
        let email = OutgoingEmail {
            html: render_buyer_interest(&param),
            to: param.to,
            from: param.from,
            subject: param.subject,
        };
        let transport = self.transport.clone();

        tokio::spawn(async move {
            match transport.send(&email).await {
                Ok(()) => tracing::info!("Sent buyer interest email to {}", email.to),
                Err(e) => tracing::error!("Failed to send buyer interest email to {}: {}", email.to, e),
            }
        })
    }
}

/// Renders the buyer-interest HTML body. All user input is escaped.
pub fn render_buyer_interest(param: &BuyerInterestParam) -> String {
    format!(
        "<h3>You have a new message about your advert</h3>\
         <p><strong>From:</strong> {name}</p>\
         <p><strong>Reply to:</strong> {from}</p>\
         <p><strong>Subject:</strong> {subject}</p>\
         <p>{message}</p>\
         <p>Reply directly to this email to get in touch with the buyer.</p>",
        name = encode_text(&param.buyer_name),
        from = encode_text(&param.from),
        subject = encode_text(&param.subject),
        message = encode_text(&param.message).replace('\n', "<br>"),
    )
}
