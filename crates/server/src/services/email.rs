//! Best-effort transactional email.
//!
//! Every notification here is fire-and-forget: callers log failures and
//! never bubble them into request handling, and nothing is retried. A
//! lost confirmation email must not lose an order.
//!
//! The `Mailer` trait is the seam tests use to observe notification
//! attempts without a network transport.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use thiserror::Error;

use goatique_core::{MessageKind, OrderId};

use crate::config::SmtpConfig;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Failed to build the email message.
    #[error("failed to build email message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),
}

/// A rendered email ready to send.
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Sends transactional email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one email. Implementations must not retry.
    async fn send(&self, to: &str, content: &EmailContent) -> Result<(), EmailError>;
}

/// SMTP-backed mailer using STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a mailer from SMTP configuration.
    ///
    /// # Errors
    ///
    /// Returns `EmailError::Smtp` if the relay parameters are invalid and
    /// `EmailError::InvalidAddress` if the sender mailbox cannot be parsed.
    pub fn new(config: &SmtpConfig) -> Result<Self, EmailError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_owned(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|_| EmailError::InvalidAddress(config.from_address.clone()))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, content: &EmailContent) -> Result<(), EmailError> {
        let to_mailbox = to
            .parse::<Mailbox>()
            .map_err(|_| EmailError::InvalidAddress(to.to_owned()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(content.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                content.text.clone(),
                content.html.clone(),
            ))?;

        self.transport.send(message).await?;
        tracing::info!(to = %to, subject = %content.subject, "Email sent");
        Ok(())
    }
}

/// Mailer used when SMTP is not configured. Logs the message and drops it.
pub struct NullMailer;

#[async_trait]
impl Mailer for NullMailer {
    async fn send(&self, to: &str, content: &EmailContent) -> Result<(), EmailError> {
        tracing::debug!(to = %to, subject = %content.subject, "SMTP not configured, dropping email");
        Ok(())
    }
}

/// Render the order confirmation email.
#[must_use]
pub fn order_confirmation(customer_name: &str, order_id: OrderId, total_amount: f64) -> EmailContent {
    let subject = format!("Order Confirmation #{order_id}");
    let text = format!(
        "Dear {customer_name},\n\n\
         Thank you for your order! Your order ID is #{order_id}.\n\
         Total Amount: \u{20b9}{total_amount}\n\
         We will notify you when your order is shipped.\n\n\
         Best regards,\n\
         SEWA Goatique Team"
    );
    let html = format!(
        "<h1>Order Confirmation</h1>\n\
         <p>Dear {customer_name},</p>\n\
         <p>Thank you for your order! Your order ID is #{order_id}.</p>\n\
         <p>Total Amount: \u{20b9}{total_amount}</p>\n\
         <p>We will notify you when your order is shipped.</p>\n\
         <br>\n\
         <p>Best regards,</p>\n\
         <p>SEWA Goatique Team</p>"
    );

    EmailContent { subject, text, html }
}

/// Render the acknowledgment for a contact or bulk order inquiry.
#[must_use]
pub fn inquiry_acknowledgment(kind: MessageKind, name: Option<&str>) -> EmailContent {
    let subject = if kind == MessageKind::Bulk {
        "Bulk Order Inquiry Received"
    } else {
        "Contact Inquiry Received"
    };
    let name = name.unwrap_or("Customer");

    let text = format!(
        "Dear {name},\n\n\
         Thank you for contacting us. We have received your inquiry and will \
         get back to you shortly.\n\n\
         Best regards,\n\
         SEWA Goatique Team"
    );
    let html = format!(
        "<h1>We received your message</h1>\n\
         <p>Dear {name},</p>\n\
         <p>Thank you for contacting us. We have received your inquiry and \
         will get back to you shortly.</p>\n\
         <br>\n\
         <p>Best regards,</p>\n\
         <p>SEWA Goatique Team</p>"
    );

    EmailContent {
        subject: subject.to_owned(),
        text,
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goatique_core::OrderId;

    #[test]
    fn order_confirmation_includes_id_and_total() {
        let content = order_confirmation("Priya", OrderId::new(42), 999.0);

        assert_eq!(content.subject, "Order Confirmation #42");
        assert!(content.text.contains("Dear Priya,"));
        assert!(content.text.contains("\u{20b9}999"));
        assert!(content.html.contains("order ID is #42"));
    }

    #[test]
    fn inquiry_subject_depends_on_kind() {
        let contact = inquiry_acknowledgment(MessageKind::Contact, Some("Priya"));
        assert_eq!(contact.subject, "Contact Inquiry Received");
        assert!(contact.html.contains("Dear Priya,"));

        let bulk = inquiry_acknowledgment(MessageKind::Bulk, None);
        assert_eq!(bulk.subject, "Bulk Order Inquiry Received");
        assert!(bulk.text.contains("Dear Customer,"));
    }
}
