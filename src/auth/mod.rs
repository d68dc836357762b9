//! Sign-in and registration: form state, local validation, request dispatch
//! and session bootstrap. Passwords and tokens pass through this module, so
//! nothing here may log them.
//!
//! Flow Overview: a form gathers input through `update_field`, validates on
//! submit, and hands a payload to the [`Dispatcher`]. The classified outcome is
//! rendered back into the form; a successful login also goes through the
//! [`SessionStore`], which persists the token and navigates to `/`.

pub mod dispatcher;
pub mod flow;
pub mod form;
pub mod outcome;
pub mod session;
pub mod types;
pub mod validation;

pub use dispatcher::Dispatcher;
pub use form::{Attempt, CredentialForm, FieldUpdate, LoginForm, RegistrationForm, SubmissionState};
pub use outcome::{AuthError, LoginOutcome, Notice, NoticeKind, RegistrationOutcome};
pub use session::{FileStorage, History, MemoryStorage, Navigator, SessionStore, TokenStorage};
pub use types::{Field, LoginCredentials, RegistrationRequest, SessionToken};
pub use validation::ValidationError;
