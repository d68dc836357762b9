use crate::{
    auth::{Dispatcher, Field, FileStorage, History, LoginForm, SessionStore},
    cli::{actions::terminal, globals::GlobalArgs},
    client::ApiClient,
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub username: String,
    pub password: Option<SecretString>,
}

/// Execute the login action.
/// # Errors
/// Returns an error if the client cannot be built, the password cannot be
/// read, or the form ends with an error notice.
pub async fn execute(args: Args) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => terminal::prompt_secret("Password").await?,
    };

    let dispatcher = Dispatcher::new(ApiClient::new(
        &args.globals.api_url,
        args.globals.timeout,
    )?);
    let mut session = SessionStore::new(
        FileStorage::new(args.globals.session_file.clone()),
        History::default(),
    );

    let mut form = LoginForm::new();
    form.update_field(Field::Username, &args.username);
    form.update_field(Field::Password, password.expose_secret());
    drop(password);

    form.submit(&dispatcher, &mut session).await;

    if let Some(path) = session.navigator().current() {
        info!(
            path,
            session_file = %args.globals.session_file.display(),
            "session established"
        );
    }

    terminal::report(&mut std::io::stdout(), form.notice())
}
