//! # Libris (library management client)
//!
//! `libris` is the client side of the library management service. It owns the
//! sign-in and registration forms, talks to the backend HTTP API, keeps the
//! session token issued on login, and can send transactional emails.
//!
//! ## Sign-in
//!
//! The login form validates locally, posts `{username, password}` to
//! `/login/` and inspects the JSON body only. A non-empty `token` field means
//! the user is authenticated: the token is stored under the `token` key and the
//! client navigates to `/`. Anything else is shown as an error in the form.
//!
//! ## Registration
//!
//! The registration form runs its checks in a fixed order and reports only the
//! first failure. Valid input is posted to `/users/` and the `response` field
//! of the reply decides the outcome.
//!
//! ## Submissions
//!
//! Each form allows one submission at a time. Transient fields are cleared as
//! soon as a request is sent, whatever the result. Nothing is retried.

pub mod auth;
pub mod cli;
pub mod client;
pub mod notify;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
