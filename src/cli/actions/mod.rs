pub mod login;
pub mod notify;
pub mod register;

mod run;
mod terminal;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    Register(register::Args),
    Notify(notify::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails or ends with an error notice.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
