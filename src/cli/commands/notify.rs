use crate::notify::EventType;
use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_EVENT: &str = "event";
pub const ARG_TO: &str = "to";
pub const ARG_DRY_RUN: &str = "dry-run";

#[must_use]
pub fn command() -> Command {
    Command::new("notify")
        .about("Send a transactional email")
        .arg(
            Arg::new(ARG_EVENT)
                .long("event")
                .help("Email template to send: signup, notification")
                .required(true)
                .value_parser(ValueParser::new(|value: &str| value.parse::<EventType>())),
        )
        .arg(
            Arg::new(ARG_TO)
                .long("to")
                .help("Recipient address")
                .required(true),
        )
        .arg(
            Arg::new(ARG_DRY_RUN)
                .long("dry-run")
                .help("Log the email instead of sending it")
                .action(ArgAction::SetTrue),
        )
}
