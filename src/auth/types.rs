//! Request types and the session token. Passwords and tokens are wrapped in
//! `SecretString` so they never show up in `Debug` output or logs; the wire
//! payloads borrow the exposed values only for the duration of a request.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::fmt;

/// Input names a form understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Password,
    PasswordConfirmation,
    Email,
    Admin,
}

impl Field {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::PasswordConfirmation => "checkPassword",
            Self::Email => "email",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated login input. Lives for a single submission.
#[derive(Clone, Debug)]
pub struct LoginCredentials {
    pub username: String,
    pub password: SecretString,
}

/// Validated registration input. Lives for a single submission.
#[derive(Clone, Debug)]
pub struct RegistrationRequest {
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub admin: u8,
}

/// Body of `POST /login/`.
#[derive(Serialize)]
pub(crate) struct LoginPayload<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginPayload<'a> {
    fn from(credentials: &'a LoginCredentials) -> Self {
        Self {
            username: &credentials.username,
            password: credentials.password.expose_secret(),
        }
    }
}

/// Body of `POST /users/`.
#[derive(Serialize)]
pub(crate) struct RegistrationPayload<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
    pub admin: u8,
}

impl<'a> From<&'a RegistrationRequest> for RegistrationPayload<'a> {
    fn from(request: &'a RegistrationRequest) -> Self {
        Self {
            username: &request.username,
            password: request.password.expose_secret(),
            email: &request.email,
            admin: request.admin,
        }
    }
}

/// Opaque session credential issued by the backend on login.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SessionToken {}
