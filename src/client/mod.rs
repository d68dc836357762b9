//! Shared HTTP plumbing for the backend API.
//!
//! Feature code goes through [`ApiClient`] so every request gets the same user
//! agent, the same bounded timeout and the same error mapping. The client never
//! stores credentials; callers hand it the payloads to send and must avoid
//! logging them.

pub mod api;
pub mod errors;

pub use api::{ApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use errors::ClientError;
