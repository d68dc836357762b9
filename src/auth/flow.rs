//! End-to-end submission for both forms: validate, dispatch, apply the
//! outcome. Errors never escape; they land in the form's display region.

use super::{
    dispatcher::Dispatcher,
    form::{Attempt, LoginForm, RegistrationForm},
    outcome::{LoginOutcome, Notice, RegistrationOutcome},
    session::{Navigator, SessionStore, TokenStorage},
};
use tracing::{debug, instrument};

pub const SIGNED_IN: &str = "Signed in";
pub const ACCOUNT_CREATED: &str = "Account has been created successfully";

impl LoginForm {
    /// Submits the login form. On success the token is handed to the session
    /// store, which navigates to the application root.
    ///
    /// The form stays in `Submitting` until this future completes. A caller
    /// that drops it early (a timeout wrapper, say) must call
    /// [`CredentialForm::cancel`](super::form::CredentialForm::cancel) or
    /// every later submit reports `InFlight`.
    #[instrument(skip_all)]
    pub async fn submit<S, N>(
        &mut self,
        dispatcher: &Dispatcher,
        session: &mut SessionStore<S, N>,
    ) -> Attempt<LoginOutcome>
    where
        S: TokenStorage,
        N: Navigator,
    {
        let credentials = match self.begin() {
            Attempt::Proceeded(credentials) => credentials,
            Attempt::Invalid => return Attempt::Invalid,
            Attempt::InFlight => return Attempt::InFlight,
        };

        let outcome = dispatcher.submit_login(&credentials).await;
        drop(credentials);

        let notice = match outcome.clone().into_result() {
            Ok(token) => {
                session.establish_session(&token);
                Notice::success(SIGNED_IN)
            }
            Err(err) => Notice::from(&err),
        };
        debug!(message = %notice.message, "login attempt settled");
        self.finish(notice);

        Attempt::Proceeded(outcome)
    }
}

impl RegistrationForm {
    /// Submits the registration form and renders the result. Dropping the
    /// future early has the same caveat as [`LoginForm::submit`].
    #[instrument(skip_all)]
    pub async fn submit(&mut self, dispatcher: &Dispatcher) -> Attempt<RegistrationOutcome> {
        let request = match self.begin() {
            Attempt::Proceeded(request) => request,
            Attempt::Invalid => return Attempt::Invalid,
            Attempt::InFlight => return Attempt::InFlight,
        };

        let outcome = dispatcher.submit_registration(&request).await;
        drop(request);

        let notice = match outcome.clone().into_result() {
            Ok(()) => Notice::success(ACCOUNT_CREATED),
            Err(err) => Notice::from(&err),
        };
        debug!(message = %notice.message, "registration attempt settled");
        self.finish(notice);

        Attempt::Proceeded(outcome)
    }
}
