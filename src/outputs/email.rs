//! Gmail delivery of the finished draft.
//!
//! One message per run, sent from the configured account to itself, with the
//! Markdown as the plain-text body and the HTML as its alternative. The
//! session uses implicit TLS on port 465.

use super::{Delivery, DraftNotifier};
use crate::config::MailCredentials;
use crate::models::Draft;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::error::Error;
use tracing::{error, info, instrument};

const SMTP_RELAY: &str = "smtp.gmail.com";

/// Sends drafts through a Gmail account.
#[derive(Debug, Clone)]
pub struct GmailNotifier {
    credentials: MailCredentials,
}

impl GmailNotifier {
    pub fn new(credentials: MailCredentials) -> Self {
        Self { credentials }
    }

    async fn send(&self, draft: &Draft) -> Result<(), Box<dyn Error>> {
        let message = build_message(draft, &self.credentials.address)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_RELAY)?
            .credentials(Credentials::new(
                self.credentials.address.clone(),
                self.credentials.app_password.clone(),
            ))
            .build();

        mailer.send(message).await?;
        Ok(())
    }
}

impl DraftNotifier for GmailNotifier {
    #[instrument(level = "info", skip_all, fields(date = %draft.date))]
    async fn notify(&self, draft: &Draft) -> Delivery {
        match self.send(draft).await {
            Ok(()) => {
                info!("Draft emailed");
                Delivery::Sent
            }
            Err(e) => {
                error!(error = %e, "Failed to email draft");
                Delivery::Failed
            }
        }
    }
}

/// Build the two-part message addressed from and to `address`.
pub fn build_message(draft: &Draft, address: &str) -> Result<Message, Box<dyn Error>> {
    let mailbox: Mailbox = address.parse()?;
    let message = Message::builder()
        .from(mailbox.clone())
        .to(mailbox)
        .subject(draft.title())
        .multipart(MultiPart::alternative_plain_html(
            draft.markdown.clone(),
            draft.html.clone(),
        ))?;
    Ok(message)
}
