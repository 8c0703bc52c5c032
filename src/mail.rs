use crate::error::MailError;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Split a comma-separated address list, trimming each entry and dropping blanks
pub fn parse_recipients(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(|addr| addr.to_string())
        .collect()
}

/// Build a plain-text message addressed to every recipient
pub fn build_message(mail: &OutgoingMail) -> Result<Message, MailError> {
    if mail.to.is_empty() {
        return Err(MailError::NoRecipients);
    }

    let mut builder = Message::builder()
        .from(parse_mailbox(&mail.from)?)
        .subject(&mail.subject)
        .header(ContentType::TEXT_PLAIN);
    for to in &mail.to {
        builder = builder.to(parse_mailbox(to)?);
    }

    Ok(builder.body(mail.body.clone())?)
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|source| MailError::Address {
        address: address.to_string(),
        source,
    })
}

/// SMTP delivery: STARTTLS on 587, implicit TLS on 465, plain on other ports
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        port: u16,
        user: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, MailError> {
        let builder = match port {
            465 => AsyncSmtpTransport::<Tokio1Executor>::relay(host)?,
            587 => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?,
            _ => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };

        let transport = builder
            .port(port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .timeout(Some(timeout))
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = build_message(mail)?;
        self.transport.send(message).await?;

        info!(
            to = %mail.to.join(", "),
            subject = %mail.subject,
            "Email sent successfully"
        );
        Ok(())
    }
}
