use crate::{
    cli::globals::GlobalArgs,
    notify::{EventType, Notifier, NotifierConfig},
};
use anyhow::Result;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub event: EventType,
    pub recipient: String,
    pub dry_run: bool,
}

/// Execute the notify action. Delivery problems are logged by the notifier
/// and never fail the command.
/// # Errors
/// Never returns an error today; the signature matches the other actions.
pub async fn execute(args: Args) -> Result<()> {
    let config = NotifierConfig::load(args.globals.email_config.as_slice());
    let notifier = if args.dry_run {
        Notifier::logging(&config)
    } else {
        Notifier::new(&config)
    };

    if let Some(handle) = notifier.send(args.event, &args.recipient) {
        if let Err(err) = handle.await {
            warn!("email task did not complete: {err}");
        }
    }
    debug!(event = %args.event, "notify finished");

    Ok(())
}
