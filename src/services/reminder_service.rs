use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{info, warn};

use crate::config::SmtpConfig;

/// What a payment reminder needs to say.
#[derive(Debug, Clone)]
pub struct PaymentReminder {
    pub recipient_name: Option<String>,
    pub recipient_email: String,
    pub amount: f64,
    pub currency: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl PaymentReminder {
    pub fn subject(&self) -> String {
        "Payment reminder from Samyoga".to_string()
    }

    pub fn body(&self) -> String {
        let greeting = match self.recipient_name.as_deref() {
            Some(name) if !name.trim().is_empty() => format!("Dear {},", name.trim()),
            _ => "Hello,".to_string(),
        };

        let mut body = format!(
            "{}\n\nThis is a friendly reminder that a payment of {:.2} {} is pending",
            greeting, self.amount, self.currency
        );
        if let Some(description) = &self.description {
            body.push_str(&format!(" for {}", description));
        }
        match self.due_date {
            Some(due) => body.push_str(&format!(", due on {}.", due.format("%d %B %Y"))),
            None => body.push('.'),
        }
        body.push_str("\n\nThank you for practicing with us.\nSamyoga");
        body
    }
}

/// Sends payment reminders over SMTP, or logs them when no relay is set up.
#[derive(Clone)]
pub struct ReminderService {
    mailer: Option<Mailer>,
}

#[derive(Clone)]
struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for ReminderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderService")
            .field("smtp_enabled", &self.mailer.is_some())
            .finish()
    }
}

impl ReminderService {
    pub fn new(smtp: Option<&SmtpConfig>) -> Result<Self> {
        let mailer = match smtp {
            Some(config) => {
                let mut builder =
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                        .context("Failed to create SMTP transport")?
                        .port(config.port);

                if let (Some(username), Some(password)) = (&config.username, &config.password) {
                    builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
                }

                let from = config
                    .from_email
                    .parse::<Mailbox>()
                    .context("Invalid SMTP_FROM address")?;

                Some(Mailer {
                    transport: builder.build(),
                    from,
                })
            }
            None => None,
        };

        Ok(Self { mailer })
    }

    /// Service that only logs reminders.
    pub fn log_only() -> Self {
        Self { mailer: None }
    }

    pub async fn send_payment_reminder(&self, reminder: &PaymentReminder) -> Result<()> {
        let Some(mailer) = &self.mailer else {
            info!(
                email = %reminder.recipient_email,
                amount = reminder.amount,
                currency = %reminder.currency,
                "SMTP not configured, payment reminder logged only"
            );
            return Ok(());
        };

        let to = reminder
            .recipient_email
            .parse::<Mailbox>()
            .context("Invalid recipient address")?;

        let message = Message::builder()
            .from(mailer.from.clone())
            .to(to)
            .subject(reminder.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(reminder.body())
            .context("Failed to build reminder email")?;

        mailer.transport.send(message).await.map_err(|e| {
            warn!(error = %e, email = %reminder.recipient_email, "payment reminder delivery failed");
            anyhow::anyhow!("Failed to send reminder email: {}", e)
        })?;

        info!(email = %reminder.recipient_email, "payment reminder sent");

        Ok(())
    }
}
