use crate::{config::Mail, report::Report};
use anyhow::{anyhow, Context, Result};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use tracing::info;

/// One plain-text mail over an authenticated STARTTLS session. Delivery
/// failure is terminal for the invocation; there is no retry.
pub struct Mailer {
    cfg: Mail,
}

impl Mailer {
    pub fn new(cfg: &Mail) -> Self {
        Self { cfg: cfg.clone() }
    }

    pub fn send(&self, report: &Report) -> Result<()> {
        if self.cfg.recipients.is_empty() {
            return Err(anyhow!("mail.recipients is empty"));
        }

        let from = if self.cfg.from.is_empty() {
            &self.cfg.username
        } else {
            &self.cfg.from
        };
        let from: Mailbox = from
            .parse()
            .with_context(|| format!("parsing mail.from: {from}"))?;

        let mut builder = Message::builder()
            .from(from)
            .subject(&report.subject)
            .header(ContentType::TEXT_PLAIN);
        for recipient in &self.cfg.recipients {
            let to: Mailbox = recipient
                .parse()
                .with_context(|| format!("parsing recipient: {recipient}"))?;
            builder = builder.to(to);
        }
        let message = builder
            .body(report.body.clone())
            .with_context(|| "assembling mail")?;

        let credentials =
            Credentials::new(self.cfg.username.clone(), self.cfg.password.clone());
        let transport = SmtpTransport::starttls_relay(&self.cfg.smtp_host)
            .with_context(|| format!("smtp relay: {}", self.cfg.smtp_host))?
            .port(self.cfg.smtp_port)
            .credentials(credentials)
            .build();

        transport
            .send(&message)
            .with_context(|| format!("smtp send via {}", self.cfg.smtp_host))?;

        info!(
            "mail sent to {} recipient(s) via {}",
            self.cfg.recipients.len(),
            self.cfg.smtp_host
        );
        Ok(())
    }
}
