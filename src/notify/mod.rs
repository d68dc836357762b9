//! Transactional email notifier.
//!
//! A [`Notifier`] turns an [`EventType`] and a recipient into a canned message
//! and hands it to an [`EmailSender`]. Delivery is fire-and-forget: the send
//! runs on a blocking task when a Tokio runtime is available, its result is
//! only logged, and callers never see an error. Without SMTP credentials the
//! notifier is inert and every send is a logged no-op.
//!
//! The default sender is [`SmtpEmailSender`], which authenticates against an
//! SMTP relay with the credentials from [`NotifierConfig`]. [`LogEmailSender`]
//! logs the message instead and is handy for local runs.

pub mod config;

pub use self::config::{NotifierConfig, SmtpSettings};

use anyhow::{Context, Result};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use secrecy::ExposeSecret;
use std::{fmt, str::FromStr, sync::Arc};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{error, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventType {
    Signup,
    Notification,
}

impl EventType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Notification => "notification",
        }
    }

    const fn subject(self) -> &'static str {
        match self {
            Self::Signup => "signup email",
            Self::Notification => "some notification email",
        }
    }

    const fn body(self) -> &'static str {
        match self {
            Self::Signup => "signup email from library extended",
            Self::Notification => "a notification email from library extended",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "signup" => Ok(Self::Signup),
            "notification" => Ok(Self::Notification),
            other => Err(format!("unknown email event: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    pub event: EventType,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    #[must_use]
    pub fn from_template(event: EventType, from: &str, to: &str) -> Self {
        Self {
            event,
            from: from.to_string(),
            to: to.trim().to_string(),
            subject: event.subject().to_string(),
            body: event.body().to_string(),
        }
    }
}

/// Email delivery abstraction used by the notifier.
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error describing why it failed.
    ///
    /// # Errors
    /// Returns an error if the message cannot be built or delivered.
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Sender address used by [`Notifier::logging`] without configured settings.
pub const LOG_SENDER_ADDRESS: &str = "libris@localhost";

/// Sender that logs the message instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to_email = %message.to,
            event = %message.event,
            subject = %message.subject,
            "email send stub"
        );
        Ok(())
    }
}

/// Sender backed by an authenticated SMTP relay.
#[derive(Clone)]
pub struct SmtpEmailSender {
    transport: SmtpTransport,
}

impl SmtpEmailSender {
    /// # Errors
    /// Returns an error if the relay host cannot be used to build a transport.
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let credentials = Credentials::new(
            settings.email.clone(),
            settings.password.expose_secret().to_string(),
        );
        let transport = SmtpTransport::relay(&settings.relay)
            .with_context(|| format!("invalid SMTP relay: {}", settings.relay))?
            .credentials(credentials)
            .build();

        Ok(Self { transport })
    }
}

impl fmt::Debug for SmtpEmailSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpEmailSender").finish_non_exhaustive()
    }
}

impl EmailSender for SmtpEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        let email = build_message(message)?;
        let response = self
            .transport
            .send(&email)
            .context("SMTP relay refused the message")?;
        info!(code = %response.code(), "email accepted by relay");
        Ok(())
    }
}

fn build_message(message: &EmailMessage) -> Result<Message> {
    let from: Mailbox = message
        .from
        .parse()
        .with_context(|| format!("invalid sender address: {}", message.from))?;
    let to: Mailbox = message
        .to
        .parse()
        .with_context(|| format!("invalid recipient address: {}", message.to))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .context("failed to build email")
}

struct Active {
    from: String,
    sender: Arc<dyn EmailSender>,
}

pub struct Notifier {
    active: Option<Active>,
}

impl Notifier {
    /// Builds a notifier from configuration. A disabled configuration, or a
    /// relay that cannot be set up, yields an inert notifier.
    #[must_use]
    pub fn new(config: &NotifierConfig) -> Self {
        match config {
            NotifierConfig::Enabled(settings) => match SmtpEmailSender::new(settings) {
                Ok(sender) => Self::with_sender(&settings.email, Arc::new(sender)),
                Err(err) => {
                    error!(error = %err, "email notifier disabled");
                    Self::disabled()
                }
            },
            NotifierConfig::Disabled => {
                warn!("email notifier disabled: no credentials configured");
                Self::disabled()
            }
        }
    }

    /// Builds a notifier that logs messages instead of sending them. The
    /// configured account is used as sender when there is one.
    #[must_use]
    pub fn logging(config: &NotifierConfig) -> Self {
        let from = match config {
            NotifierConfig::Enabled(settings) => settings.email.as_str(),
            NotifierConfig::Disabled => LOG_SENDER_ADDRESS,
        };
        Self::with_sender(from, Arc::new(LogEmailSender))
    }

    #[must_use]
    pub fn with_sender(from: &str, sender: Arc<dyn EmailSender>) -> Self {
        Self {
            active: Some(Active {
                from: from.to_string(),
                sender,
            }),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { active: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// Message that `send` would deliver, or `None` when inert.
    #[must_use]
    pub fn compose(&self, event: EventType, recipient: &str) -> Option<EmailMessage> {
        self.active
            .as_ref()
            .map(|active| EmailMessage::from_template(event, &active.from, recipient))
    }

    /// Sends the templated email for `event` to `recipient` without waiting.
    ///
    /// Returns the background task handle when the send was spawned on a
    /// runtime. Delivery failures are logged, never returned.
    pub fn send(&self, event: EventType, recipient: &str) -> Option<JoinHandle<()>> {
        let Some(active) = &self.active else {
            warn!(%event, "email notifier disabled, dropping message");
            return None;
        };

        let message = EmailMessage::from_template(event, &active.from, recipient);
        let sender = Arc::clone(&active.sender);
        let task = move || deliver(sender.as_ref(), &message);

        match Handle::try_current() {
            Ok(handle) => Some(handle.spawn_blocking(task)),
            Err(_) => {
                task();
                None
            }
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

fn deliver(sender: &dyn EmailSender, message: &EmailMessage) {
    match sender.send(message) {
        Ok(()) => info!(to_email = %message.to, event = %message.event, "email sent"),
        Err(err) => error!(
            to_email = %message.to,
            event = %message.event,
            "email send failed: {err:#}"
        ),
    }
}
