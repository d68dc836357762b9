//! Maps validated CLI matches to the action the binary runs.

use crate::cli::{
    actions::{login, notify, register, Action},
    commands::{self, forms, notify as notify_command},
    globals::GlobalArgs,
};
use crate::notify::EventType;
use anyhow::{Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let api_url = matches
        .get_one::<String>(commands::ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;
    let timeout = matches
        .get_one::<u64>(commands::ARG_TIMEOUT)
        .copied()
        .context("missing required argument: --timeout")?;
    let session_file = matches
        .get_one::<String>(commands::ARG_SESSION_FILE)
        .map(PathBuf::from)
        .context("missing required argument: --session-file")?;
    let email_config = matches
        .get_many::<String>(commands::ARG_EMAIL_CONFIG)
        .map(|paths| {
            paths
                .map(|path| path.trim())
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(GlobalArgs::new(api_url, Duration::from_secs(timeout))
        .with_session_file(session_file)
        .with_email_config(email_config))
}

fn secret(matches: &ArgMatches, id: &str) -> Option<SecretString> {
    matches
        .get_one::<String>(id)
        .map(|value| SecretString::from(value.clone()))
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;

    match matches.subcommand() {
        Some(("login", sub_m)) => Ok(Action::Login(login::Args {
            globals,
            username: required(sub_m, forms::ARG_USERNAME)?,
            password: secret(sub_m, forms::ARG_PASSWORD),
        })),
        Some(("register", sub_m)) => Ok(Action::Register(register::Args {
            globals,
            username: required(sub_m, forms::ARG_USERNAME)?,
            email: required(sub_m, forms::ARG_EMAIL)?,
            password: secret(sub_m, forms::ARG_PASSWORD),
            confirmation: secret(sub_m, forms::ARG_CONFIRM_PASSWORD),
            admin: required(sub_m, forms::ARG_ADMIN)?,
        })),
        Some(("notify", sub_m)) => Ok(Action::Notify(notify::Args {
            globals,
            event: sub_m
                .get_one::<EventType>(notify_command::ARG_EVENT)
                .copied()
                .context("missing required argument: --event")?,
            recipient: required(sub_m, notify_command::ARG_TO)?,
            dry_run: sub_m.get_flag(notify_command::ARG_DRY_RUN),
        })),
        Some((name, _)) => anyhow::bail!("unknown subcommand: {name}"),
        None => anyhow::bail!("missing subcommand"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    const CLEAN_ENV: [(&str, Option<&str>); 9] = [
        ("LIBRIS_API_URL", None),
        ("LIBRIS_TIMEOUT_SECONDS", None),
        ("LIBRIS_SESSION_FILE", None),
        ("LIBRIS_EMAIL_CONFIG", None),
        ("LIBRIS_USERNAME", None),
        ("LIBRIS_PASSWORD", None),
        ("LIBRIS_CONFIRM_PASSWORD", None),
        ("LIBRIS_EMAIL", None),
        ("LIBRIS_LOG_LEVEL", None),
    ];

    fn dispatch(args: &[&str]) -> Result<Action> {
        let matches = commands::new().try_get_matches_from(args)?;
        handler(&matches)
    }

    #[test]
    fn login_action() {
        temp_env::with_vars(CLEAN_ENV, || {
            let action = dispatch(&["libris", "--timeout", "5", "login", "-u", "ada", "-p", "hunter22"])
                .expect("action");
            let Action::Login(args) = action else {
                panic!("expected login action");
            };
            assert_eq!(args.username, "ada");
            assert_eq!(
                args.password.as_ref().map(|p| p.expose_secret().to_string()),
                Some("hunter22".to_string())
            );
            assert_eq!(args.globals.timeout, Duration::from_secs(5));
            assert_eq!(args.globals.api_url, "http://localhost:8000");
            assert_eq!(args.globals.email_config.len(), 2);
        });
    }

    #[test]
    fn register_action() {
        temp_env::with_vars(CLEAN_ENV, || {
            let action = dispatch(&[
                "libris",
                "register",
                "-u",
                "ada",
                "-e",
                "ada@example.org",
                "--admin",
                "1",
                "--session-file",
                "/tmp/libris-test.json",
            ])
            .expect("action");
            let Action::Register(args) = action else {
                panic!("expected register action");
            };
            assert_eq!(args.email, "ada@example.org");
            assert_eq!(args.admin, "1");
            assert!(args.password.is_none());
            assert!(args.confirmation.is_none());
            assert_eq!(args.globals.session_file, PathBuf::from("/tmp/libris-test.json"));
        });
    }

    #[test]
    fn notify_action_uses_explicit_config() {
        temp_env::with_vars(CLEAN_ENV, || {
            let action = dispatch(&[
                "libris",
                "--email-config",
                "mail.cfg",
                "notify",
                "--event",
                "notification",
                "--to",
                "ada@example.org",
            ])
            .expect("action");
            let Action::Notify(args) = action else {
                panic!("expected notify action");
            };
            assert_eq!(args.event, EventType::Notification);
            assert_eq!(args.recipient, "ada@example.org");
            assert_eq!(args.globals.email_config, [PathBuf::from("mail.cfg")]);
            assert!(!args.dry_run);
        });
    }

    #[test]
    fn notify_dry_run_action() {
        temp_env::with_vars(CLEAN_ENV, || {
            let action = dispatch(&[
                "libris",
                "notify",
                "--event",
                "signup",
                "--to",
                "ada@example.org",
                "--dry-run",
            ])
            .expect("action");
            let Action::Notify(args) = action else {
                panic!("expected notify action");
            };
            assert!(args.dry_run);
            assert_eq!(args.event, EventType::Signup);
        });
    }
}
