//! SMTP settings for the notifier, read once by the process entry point.
//!
//! The settings live in an INI file with an `[EMAIL]` section:
//!
//! ```ini
//! [EMAIL]
//! email = desk@library.org
//! password = app-password
//! relay = smtp.gmail.com
//! ```
//!
//! Candidate files are tried in order and the first one that exists wins.
//! Missing files, unreadable files and missing keys all lead to
//! [`NotifierConfig::Disabled`]; they are logged, never fatal.

use anyhow::{anyhow, Context, Result};
use config::{Config, File, FileFormat, Map, Source, Value};
use secrecy::SecretString;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Files tried when no explicit path is given.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["config/dev.cfg", "config/settings.cfg"];
/// Relay used when the file does not name one.
pub const DEFAULT_RELAY: &str = "smtp.gmail.com";

const SECTION: &str = "email";

#[derive(Clone, Debug)]
pub struct SmtpSettings {
    pub email: String,
    pub password: SecretString,
    pub relay: String,
}

#[derive(Clone, Debug, Default)]
pub enum NotifierConfig {
    Enabled(SmtpSettings),
    #[default]
    Disabled,
}

impl NotifierConfig {
    #[must_use]
    pub fn default_paths() -> Vec<PathBuf> {
        DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from).collect()
    }

    /// Loads settings from the first existing path.
    #[must_use]
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Self {
        let Some(path) = paths
            .iter()
            .map(AsRef::<Path>::as_ref)
            .find(|p| p.is_file())
        else {
            warn!(
                candidates = paths.len(),
                "no email settings file found, notifier disabled"
            );
            return Self::Disabled;
        };

        match read_settings(path) {
            Ok(settings) => {
                info!(path = %path.display(), relay = %settings.relay, "email settings loaded");
                Self::Enabled(settings)
            }
            Err(err) => {
                error!(path = %path.display(), "email settings unusable, notifier disabled: {err:#}");
                Self::Disabled
            }
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

/// Parses one INI file into SMTP settings.
///
/// # Errors
/// Returns an error if the file cannot be parsed or `EMAIL.email` /
/// `EMAIL.password` are missing or blank.
pub fn read_settings(path: &Path) -> Result<SmtpSettings> {
    let name = path.to_string_lossy();
    let root = Config::builder()
        .add_source(File::new(&name, FileFormat::Ini))
        .build()
        .and_then(|config| config.collect())
        .with_context(|| format!("failed to read {name}"))?;

    // Section and key names are matched case-insensitively.
    let section = lookup(&root, SECTION)
        .ok_or_else(|| anyhow!("missing [EMAIL] section"))?
        .into_table()
        .context("[EMAIL] is not a section")?;

    let email = required(&section, "email")?;
    let password = required(&section, "password")?;
    let relay = optional(&section, "relay")?.unwrap_or_else(|| DEFAULT_RELAY.to_string());

    debug!(email = %email, "smtp account configured");

    Ok(SmtpSettings {
        email,
        password: SecretString::from(password),
        relay,
    })
}

fn lookup(table: &Map<String, Value>, key: &str) -> Option<Value> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value.clone())
}

fn optional(section: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    let Some(value) = lookup(section, key) else {
        return Ok(None);
    };
    let value = value
        .into_string()
        .with_context(|| format!("EMAIL.{key} is not a string"))?;
    let trimmed = value.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

fn required(section: &Map<String, Value>, key: &str) -> Result<String> {
    optional(section, key)?.ok_or_else(|| anyhow!("missing EMAIL.{key}"))
}
