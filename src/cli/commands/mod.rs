pub mod forms;
pub mod logging;
pub mod notify;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_EMAIL_CONFIG: &str = "email-config";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("libris")
        .about("Library management client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the library backend API")
                .env("LIBRIS_API_URL")
                .global(true)
                .default_value(crate::client::DEFAULT_API_URL),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds")
                .env("LIBRIS_TIMEOUT_SECONDS")
                .global(true)
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..=300)),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long("session-file")
                .help("File where the session token is kept between runs")
                .env("LIBRIS_SESSION_FILE")
                .global(true)
                .default_value("libris-session.json"),
        )
        .arg(
            Arg::new(ARG_EMAIL_CONFIG)
                .long("email-config")
                .help("Email settings file (INI with an [EMAIL] section), tried in order")
                .long_help(
                    "Email settings file (INI with an [EMAIL] section). Repeat the flag or use a comma-separated list; the first existing file wins. Defaults to config/dev.cfg, then config/settings.cfg.",
                )
                .env("LIBRIS_EMAIL_CONFIG")
                .global(true)
                .action(ArgAction::Append)
                .value_delimiter(','),
        )
        .subcommand(forms::login())
        .subcommand(forms::register())
        .subcommand(notify::command());

    logging::with_args(command)
}
