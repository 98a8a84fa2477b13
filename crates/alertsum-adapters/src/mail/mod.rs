use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use alertsum_ports::error::DeliveryError;
use alertsum_ports::outbound::Mailer;
use alertsum_ports::types::{DeliveryReceipt, OutgoingMail};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

/// Authenticated SMTP over implicit TLS. The login user is also the
/// envelope sender.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_addr: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, DeliveryError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?
            .port(config.port)
            .timeout(Some(config.timeout))
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from_addr: config.username.clone(),
        })
    }

    async fn build_message(&self, mail: &OutgoingMail) -> Result<Message, DeliveryError> {
        if mail.recipients.is_empty() {
            return Err(DeliveryError::NoRecipients);
        }

        let address: Address = self
            .from_addr
            .parse()
            .map_err(|e| DeliveryError::InvalidAddress(format!("{}: {e}", self.from_addr)))?;
        let mut builder = Message::builder()
            .from(Mailbox::new(Some(mail.sender_name.clone()), address))
            .subject(&mail.subject)
            .date_now();
        for recipient in &mail.recipients {
            let mailbox: Mailbox = recipient
                .parse()
                .map_err(|e| DeliveryError::InvalidAddress(format!("{recipient}: {e}")))?;
            builder = builder.to(mailbox);
        }

        let body = SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(mail.body.body.clone());
        let mut parts = MultiPart::mixed().singlepart(body);

        for path in &mail.attachments {
            let content = tokio::fs::read(path)
                .await
                .map_err(|e| DeliveryError::Attachment(format!("{}: {e}", path.display())))?;
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| DeliveryError::Attachment(format!("{}: no file name", path.display())))?
                .to_string();
            let content_type = ContentType::parse("application/octet-stream")
                .map_err(|e| DeliveryError::Message(e.to_string()))?;
            parts = parts.singlepart(Attachment::new(filename).body(content, content_type));
        }

        builder
            .multipart(parts)
            .map_err(|e| DeliveryError::Message(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<DeliveryReceipt, DeliveryError> {
        let message = self.build_message(mail).await?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        tracing::debug!(
            code = %response.code(),
            recipients = mail.recipients.len(),
            attachments = mail.attachments.len(),
            "smtp accepted message"
        );
        Ok(DeliveryReceipt {
            recipients: mail.recipients.len(),
            response: Some(
                response
                    .message()
                    .map(|line| line.to_string())
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        })
    }
}

/// Expand bare user names with the organisation's mail domain. Entries that
/// already contain `@` are kept as they are.
pub fn recipient_addresses(names: &[String], domain: &str) -> Vec<String> {
    let domain = domain.trim().trim_start_matches('@');
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(|n| {
            if n.contains('@') || domain.is_empty() {
                n.to_string()
            } else {
                format!("{n}@{domain}")
            }
        })
        .collect()
}
