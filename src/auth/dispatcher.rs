//! Submission dispatcher: turns validated input into one backend request and
//! classifies the JSON reply. The backend's HTTP status is not consulted;
//! only the body shape decides the outcome.

use super::{
    outcome::{LoginOutcome, RegistrationOutcome},
    types::{LoginCredentials, LoginPayload, RegistrationPayload, RegistrationRequest, SessionToken},
};
use crate::client::ApiClient;
use serde_json::Value;
use tracing::{info, instrument, warn};

pub const LOGIN_PATH: &str = "/login/";
pub const USERS_PATH: &str = "/users/";

const RESPONSE_SUCCESS: &str = "Success";
const RESPONSE_USERNAME_TAKEN: &str = "Username taken";

#[derive(Clone, Debug)]
pub struct Dispatcher {
    api: ApiClient,
}

impl Dispatcher {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Sends `POST /login/`. Never logs the password.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn submit_login(&self, credentials: &LoginCredentials) -> LoginOutcome {
        let payload = LoginPayload::from(credentials);

        match self.api.post_json(LOGIN_PATH, &payload).await {
            Ok(body) => classify_login(&body),
            Err(err) => {
                warn!(error = %err, "login request failed");
                LoginOutcome::TransportError(err)
            }
        }
    }

    /// Sends `POST /users/`. Never logs the password.
    #[instrument(skip_all, fields(username = %request.username))]
    pub async fn submit_registration(&self, request: &RegistrationRequest) -> RegistrationOutcome {
        let payload = RegistrationPayload::from(request);

        match self.api.post_json(USERS_PATH, &payload).await {
            Ok(body) => classify_registration(&body),
            Err(err) => {
                warn!(error = %err, "registration request failed");
                RegistrationOutcome::TransportError(err)
            }
        }
    }
}

fn classify_login(body: &Value) -> LoginOutcome {
    match body.get("token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => {
            info!("login accepted");
            LoginOutcome::Authenticated(SessionToken::new(token))
        }
        _ => {
            info!("login rejected");
            LoginOutcome::Rejected
        }
    }
}

fn classify_registration(body: &Value) -> RegistrationOutcome {
    match body.get("response").and_then(Value::as_str) {
        Some(RESPONSE_SUCCESS) => {
            info!("account created");
            RegistrationOutcome::Created
        }
        Some(RESPONSE_USERNAME_TAKEN) => {
            info!("username taken");
            RegistrationOutcome::UsernameTaken
        }
        Some(other) => {
            warn!(response = other, "unexpected registration response");
            RegistrationOutcome::ServerRejected(other.to_string())
        }
        None => {
            warn!(body = %body, "registration response without status");
            RegistrationOutcome::ServerRejected(body.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, DEFAULT_TIMEOUT};
    use anyhow::Result;
    use secrecy::SecretString;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn credentials() -> LoginCredentials {
        LoginCredentials {
            username: "ada".to_string(),
            password: SecretString::from("hunter22".to_string()),
        }
    }

    fn registration() -> RegistrationRequest {
        RegistrationRequest {
            username: "ada".to_string(),
            password: SecretString::from("correct-horse".to_string()),
            email: "ada@example.org".to_string(),
            admin: 1,
        }
    }

    #[test]
    fn classify_login_requires_non_empty_token() {
        assert_eq!(
            classify_login(&json!({"token": "abc123"})),
            LoginOutcome::Authenticated(SessionToken::new("abc123"))
        );
        assert_eq!(classify_login(&json!({})), LoginOutcome::Rejected);
        assert_eq!(classify_login(&json!({"token": ""})), LoginOutcome::Rejected);
        assert_eq!(classify_login(&json!({"token": null})), LoginOutcome::Rejected);
        assert_eq!(classify_login(&json!({"token": 42})), LoginOutcome::Rejected);
        assert_eq!(
            classify_login(&json!({"detail": "Username or password is incorrect"})),
            LoginOutcome::Rejected
        );
        assert_eq!(classify_login(&Value::Null), LoginOutcome::Rejected);
    }

    #[test]
    fn classify_registration_matches_response_field() {
        assert_eq!(
            classify_registration(&json!({"response": "Success"})),
            RegistrationOutcome::Created
        );
        assert_eq!(
            classify_registration(&json!({"response": "Username taken"})),
            RegistrationOutcome::UsernameTaken
        );
        assert_eq!(
            classify_registration(&json!({"response": "Weird"})),
            RegistrationOutcome::ServerRejected("Weird".to_string())
        );
        assert!(matches!(
            classify_registration(&json!({"detail": "User already exists"})),
            RegistrationOutcome::ServerRejected(_)
        ));
        assert!(matches!(
            classify_registration(&Value::Null),
            RegistrationOutcome::ServerRejected(_)
        ));
    }

    #[tokio::test]
    async fn submit_login_sends_credentials() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .and(body_json(json!({"username": "ada", "password": "hunter22"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(ApiClient::new(&server.uri(), DEFAULT_TIMEOUT)?);
        let outcome = dispatcher.submit_login(&credentials()).await;

        assert_eq!(
            outcome,
            LoginOutcome::Authenticated(SessionToken::new("abc123"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn submit_login_rejects_empty_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(ApiClient::new(&server.uri(), DEFAULT_TIMEOUT)?);

        assert_eq!(
            dispatcher.submit_login(&credentials()).await,
            LoginOutcome::Rejected
        );
        Ok(())
    }

    #[tokio::test]
    async fn submit_login_surfaces_transport_errors() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(ApiClient::new(&server.uri(), DEFAULT_TIMEOUT)?);

        assert!(matches!(
            dispatcher.submit_login(&credentials()).await,
            LoginOutcome::TransportError(ClientError::Parse(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn submit_registration_sends_admin_flag() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(USERS_PATH))
            .and(body_json(json!({
                "username": "ada",
                "password": "correct-horse",
                "email": "ada@example.org",
                "admin": 1
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"response": "Username taken"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::new(ApiClient::new(&server.uri(), DEFAULT_TIMEOUT)?);

        assert_eq!(
            dispatcher.submit_registration(&registration()).await,
            RegistrationOutcome::UsernameTaken
        );
        Ok(())
    }
}
