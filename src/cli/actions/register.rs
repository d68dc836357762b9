use crate::{
    auth::{Dispatcher, Field, RegistrationForm},
    cli::{actions::terminal, globals::GlobalArgs},
    client::ApiClient,
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub username: String,
    pub email: String,
    pub password: Option<SecretString>,
    pub confirmation: Option<SecretString>,
    /// "0" or "1", parsed by the form like any other field value.
    pub admin: String,
}

/// Execute the register action.
/// # Errors
/// Returns an error if the client cannot be built, a password cannot be
/// read, or the form ends with an error notice.
pub async fn execute(args: Args) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => terminal::prompt_secret("Password").await?,
    };
    let confirmation = match args.confirmation {
        Some(confirmation) => confirmation,
        None => terminal::prompt_secret("Confirm password").await?,
    };

    let dispatcher = Dispatcher::new(ApiClient::new(
        &args.globals.api_url,
        args.globals.timeout,
    )?);

    let mut form = RegistrationForm::new();
    form.update_field(Field::Username, &args.username);
    form.update_field(Field::Email, &args.email);
    form.update_field(Field::Password, password.expose_secret());
    form.update_field(Field::PasswordConfirmation, confirmation.expose_secret());
    form.update_field(Field::Admin, &args.admin);

    form.submit(&dispatcher).await;

    terminal::report(&mut std::io::stdout(), form.notice())
}
