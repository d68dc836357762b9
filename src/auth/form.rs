//! Credential form controller shared by the login and registration forms.
//!
//! A form holds the transient field values, a display region for the last
//! notice, and a submission state. Submissions move through
//! `Idle -> Submitting -> Idle`: [`CredentialForm::begin`] validates and takes
//! the fields, [`CredentialForm::finish`] renders the outcome. A trigger that
//! arrives while a request is in flight is ignored.

use super::{
    outcome::{AuthError, Notice},
    types::{Field, LoginCredentials, RegistrationRequest},
    validation,
};
use secrecy::SecretString;
use std::fmt;
use tracing::debug;

/// Whether a stored value changed after `update_field`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    Changed,
    Unchanged,
    /// The form has no such field.
    Ignored,
}

/// Field storage for one kind of form.
pub trait FormFields: Default {
    type Payload;

    /// Stores `value` under `field`.
    fn set(&mut self, field: Field, value: &str) -> FieldUpdate;

    /// Validates the current values and builds the payload to send.
    ///
    /// # Errors
    /// Returns the first validation rule the values violate.
    fn validate(&self) -> Result<Self::Payload, validation::ValidationError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// What happened when the user triggered a submission.
#[derive(Debug, PartialEq, Eq)]
pub enum Attempt<T> {
    /// The attempt went ahead.
    Proceeded(T),
    /// Local validation failed; the message is in the display region.
    Invalid,
    /// A previous attempt has not resolved yet; nothing was done.
    InFlight,
}

pub struct CredentialForm<F> {
    fields: F,
    state: SubmissionState,
    notice: Option<Notice>,
}

pub type LoginForm = CredentialForm<LoginFields>;
pub type RegistrationForm = CredentialForm<RegistrationFields>;

impl<F: FormFields> Default for CredentialForm<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FormFields> CredentialForm<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: F::default(),
            state: SubmissionState::Idle,
            notice: None,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &F {
        &self.fields
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Current content of the display region.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Sets one field. Never validates and never touches the display region.
    pub fn update_field(&mut self, field: Field, value: &str) -> FieldUpdate {
        let update = self.fields.set(field, value);
        if update == FieldUpdate::Ignored {
            debug!(%field, "field not present on this form");
        }
        update
    }

    /// Starts a submission: validates, clears the transient fields and marks
    /// the form as submitting.
    pub fn begin(&mut self) -> Attempt<F::Payload> {
        if self.is_submitting() {
            debug!("submission already in progress");
            return Attempt::InFlight;
        }

        self.notice = None;

        match self.fields.validate() {
            Ok(payload) => {
                self.fields = F::default();
                self.state = SubmissionState::Submitting;
                Attempt::Proceeded(payload)
            }
            Err(err) => {
                debug!(error = %err, "form validation failed");
                self.notice = Some(Notice::from(&AuthError::from(err)));
                Attempt::Invalid
            }
        }
    }

    /// Applies the result of an attempt and returns the form to idle.
    pub fn finish(&mut self, notice: Notice) {
        self.state = SubmissionState::Idle;
        self.notice = Some(notice);
    }

    /// Returns the form to idle without an outcome, for callers that drop a
    /// submission before it settles. Fields and notice are left as they are.
    pub fn cancel(&mut self) {
        if self.is_submitting() {
            debug!("submission abandoned");
        }
        self.state = SubmissionState::Idle;
    }
}

impl<F: fmt::Debug> fmt::Debug for CredentialForm<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialForm")
            .field("fields", &self.fields)
            .field("state", &self.state)
            .field("notice", &self.notice)
            .finish()
    }
}

fn replace(slot: &mut String, value: &str) -> FieldUpdate {
    if slot.as_str() == value {
        FieldUpdate::Unchanged
    } else {
        value.clone_into(slot);
        FieldUpdate::Changed
    }
}

#[derive(Default)]
pub struct LoginFields {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginFields")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl FormFields for LoginFields {
    type Payload = LoginCredentials;

    fn set(&mut self, field: Field, value: &str) -> FieldUpdate {
        match field {
            Field::Username => replace(&mut self.username, value),
            Field::Password => replace(&mut self.password, value),
            Field::PasswordConfirmation | Field::Email | Field::Admin => FieldUpdate::Ignored,
        }
    }

    fn validate(&self) -> Result<LoginCredentials, validation::ValidationError> {
        validation::validate_login(&self.username)?;
        Ok(LoginCredentials {
            username: self.username.clone(),
            password: SecretString::from(self.password.clone()),
        })
    }
}

#[derive(Default)]
pub struct RegistrationFields {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
    pub email: String,
    pub admin: u8,
}

impl fmt::Debug for RegistrationFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationFields")
            .field("username", &self.username)
            .field("password", &"***")
            .field("password_confirmation", &"***")
            .field("email", &self.email)
            .field("admin", &self.admin)
            .finish()
    }
}

impl FormFields for RegistrationFields {
    type Payload = RegistrationRequest;

    fn set(&mut self, field: Field, value: &str) -> FieldUpdate {
        match field {
            Field::Username => replace(&mut self.username, value),
            Field::Password => replace(&mut self.password, value),
            Field::PasswordConfirmation => replace(&mut self.password_confirmation, value),
            Field::Email => replace(&mut self.email, value),
            Field::Admin => match value.trim().parse::<u8>() {
                Ok(admin) if admin == self.admin => FieldUpdate::Unchanged,
                Ok(admin @ (0 | 1)) => {
                    self.admin = admin;
                    FieldUpdate::Changed
                }
                Ok(_) | Err(_) => {
                    debug!("ignoring admin flag outside 0 or 1");
                    FieldUpdate::Unchanged
                }
            },
        }
    }

    fn validate(&self) -> Result<RegistrationRequest, validation::ValidationError> {
        validation::validate_registration(
            &self.username,
            &self.email,
            &self.password,
            &self.password_confirmation,
        )?;
        Ok(RegistrationRequest {
            username: self.username.clone(),
            password: SecretString::from(self.password.clone()),
            email: self.email.clone(),
            admin: self.admin,
        })
    }
}
