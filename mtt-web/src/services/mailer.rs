//! Task notifications by email
//!
//! Recipients come from the task's responsible-parties field: split on
//! commas, trimmed, and only tokens containing `@` are kept.

use lettre::address::AddressError;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use mtt_common::Task;
use thiserror::Error;
use tracing::info;

use crate::config::{MailSettings, SmtpSettings};

/// Subject line of every task notification
pub const SUBJECT: &str = "Task Update Required";

/// Notification errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("SMTP configuration is incomplete. Please check your .env file")]
    IncompleteConfig,

    #[error("no valid email addresses found")]
    NoRecipients,

    #[error("invalid address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("failed to send email: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// A composed, not yet sent, notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub from: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Addresses taken from a comma-separated responsible-parties field
pub fn parse_recipients(responsibles: &str) -> Vec<String> {
    responsibles
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.contains('@'))
        .map(str::to_string)
        .collect()
}

/// Link to the task's edit page
pub fn edit_url(server_host: &str, task_id: i64) -> String {
    format!("http://{}/edit/{}", server_host, task_id)
}

/// Compose the notification for `task`.
pub fn compose(task: &Task, from: &str, server_host: &str) -> Result<Notification, NotifyError> {
    let recipients = parse_recipients(&task.responsibles);
    if recipients.is_empty() {
        return Err(NotifyError::NoRecipients);
    }

    let body = format!(
        "\nTask: {}\nDeadline: {}\nMeeting Date: {}\nStatus: {}\n\n\
         Please update the task status by following this link:\n{}\n\n\
         Best regards,\nTask Management System\n",
        task.task_text,
        task.deadline,
        task.meeting_date,
        task.status,
        edit_url(server_host, task.id),
    );

    Ok(Notification {
        from: from.to_string(),
        recipients,
        subject: SUBJECT.to_string(),
        body,
    })
}

fn mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address.parse().map_err(|source| NotifyError::Address {
        address: address.to_string(),
        source,
    })
}

/// Build the wire message for a notification
pub fn build_message(notification: &Notification) -> Result<Message, NotifyError> {
    let mut builder = Message::builder()
        .from(mailbox(&notification.from)?)
        .subject(notification.subject.clone())
        .header(ContentType::TEXT_PLAIN);

    for recipient in &notification.recipients {
        builder = builder.to(mailbox(recipient)?);
    }

    Ok(builder.body(notification.body.clone())?)
}

/// Sends task notifications over SMTP
#[derive(Debug, Clone)]
pub struct Mailer {
    settings: MailSettings,
    server_host: String,
}

impl Mailer {
    pub fn new(settings: MailSettings, server_host: impl Into<String>) -> Self {
        Self {
            settings,
            server_host: server_host.into(),
        }
    }

    /// Notify the responsible parties of `task`; returns the addresses used.
    ///
    /// Fails before connecting when the SMTP settings are incomplete or the
    /// task has no usable address.
    pub async fn notify(&self, task: &Task) -> Result<Vec<String>, NotifyError> {
        let smtp = self.settings.complete().ok_or(NotifyError::IncompleteConfig)?;
        let notification = compose(task, &smtp.from, &self.server_host)?;
        let message = build_message(&notification)?;

        transport(&smtp)?.send(message).await?;

        info!(
            "Email sent successfully for task {} to: {}",
            task.id,
            notification.recipients.join(", ")
        );
        Ok(notification.recipients)
    }
}

/// Authenticated transport; upgrades to TLS when the server offers STARTTLS
fn transport(smtp: &SmtpSettings) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
    let tls = TlsParameters::new(smtp.host.clone())?;
    Ok(
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(smtp.host.as_str())
            .port(smtp.port)
            .tls(Tls::Opportunistic(tls))
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ))
            .build(),
    )
}
