//! Authentication modes and the per-operation session factory.
//!
//! Every operation in [`crate::ops`] builds its own short-lived
//! `MawaqitClient` through [`create_authenticated_client`] and drops it
//! when the operation returns; nothing here outlives a single call.

use std::fmt;

use tracing::debug;

use crate::api::{ApiError, MawaqitClient};
use crate::config::ClientConfig;

/// How a session authenticates to the MAWAQIT API.
///
/// The choice is an explicit variant rather than "whichever optional
/// argument happens to be set": `Credentials` always performs a fresh
/// login, `Token` never does.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Username/password pair; the factory logs in and obtains a fresh
    /// token every time. Deliberately carries no token slot - reusing a
    /// stored token would skip the login and keep a possibly stale token.
    Credentials { username: String, password: String },
    /// A previously issued token, used as-is with no login call.
    Token(String),
    /// No authentication; calls that need a token fail with
    /// `ApiError::NotAuthenticated`.
    Anonymous,
}

impl AuthMethod {
    pub fn credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        AuthMethod::Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn token(token: impl Into<String>) -> Self {
        AuthMethod::Token(token.into())
    }

    /// Build the auth mode from loose optional values as a config entry
    /// stores them. A complete credential pair wins over a stored token,
    /// so a fresh login happens whenever credentials are available.
    pub fn from_parts(
        username: Option<&str>,
        password: Option<&str>,
        token: Option<&str>,
    ) -> Self {
        match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Self::credentials(u, p),
            _ => match token {
                Some(t) if !t.is_empty() => Self::token(t),
                _ => AuthMethod::Anonymous,
            },
        }
    }
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::Credentials { username, .. } => f
                .debug_struct("Credentials")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            AuthMethod::Token(_) => f.debug_tuple("Token").field(&"***").finish(),
            AuthMethod::Anonymous => f.write_str("Anonymous"),
        }
    }
}

/// Build an authenticated client for one operation.
///
/// With `Credentials` the client is constructed without any token and
/// `get_api_token` is invoked, which always logs in and stores a fresh
/// token. If that fails, `?` drops the partially built client before the
/// error reaches the caller. With `Token` the token is attached as-is and
/// no login request is made.
pub(crate) async fn create_authenticated_client(
    config: &ClientConfig,
    latitude: Option<f64>,
    longitude: Option<f64>,
    mosque: Option<&str>,
    auth: &AuthMethod,
) -> Result<MawaqitClient, ApiError> {
    let mut client = MawaqitClient::new(config)?;
    if let (Some(lat), Some(lon)) = (latitude, longitude) {
        client = client.with_location(lat, lon);
    }
    if let Some(mosque) = mosque {
        client = client.with_mosque(mosque);
    }

    match auth {
        AuthMethod::Credentials { username, password } => {
            debug!("Creating client with credentials, will perform fresh login");
            let mut client = client.with_credentials(username, password);
            client.get_api_token().await?;
            Ok(client)
        }
        AuthMethod::Token(token) => {
            debug!("Creating client with existing token only (no credentials)");
            Ok(client.with_token(token))
        }
        AuthMethod::Anonymous => {
            debug!("Creating client without authentication");
            Ok(client)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_from_parts_prefers_credentials_over_token() {
        let auth = AuthMethod::from_parts(Some("amina"), Some("secret"), Some("stale-token"));
        assert_eq!(auth, AuthMethod::credentials("amina", "secret"));
    }

    #[test]
    fn test_from_parts_token_only() {
        let auth = AuthMethod::from_parts(None, None, Some("tok"));
        assert_eq!(auth, AuthMethod::token("tok"));
    }

    #[test]
    fn test_from_parts_incomplete_pair_falls_back() {
        let auth = AuthMethod::from_parts(Some("amina"), None, Some("tok"));
        assert_eq!(auth, AuthMethod::token("tok"));

        let auth = AuthMethod::from_parts(Some(""), Some("secret"), None);
        assert_eq!(auth, AuthMethod::Anonymous);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let auth = AuthMethod::credentials("amina", "hunter2");
        let rendered = format!("{:?}", auth);
        assert!(rendered.contains("amina"));
        assert!(!rendered.contains("hunter2"));

        let rendered = format!("{:?}", AuthMethod::token("tok-123"));
        assert!(!rendered.contains("tok-123"));
    }

    #[tokio::test]
    async fn test_credentials_always_log_in() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "apiAccessToken": "fresh-token"
            })))
            .expect(1)
            .mount(&server)
            .await;

        // Even when a token was supplied alongside the pair, the pair wins
        // and a login request is made.
        let auth = AuthMethod::from_parts(Some("amina"), Some("secret"), Some("stale"));
        let config = ClientConfig::with_base_url(server.uri());
        let client = create_authenticated_client(&config, None, None, None, &auth)
            .await
            .unwrap();

        assert_eq!(client.token(), Some("fresh-token"));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_token_only_performs_no_login() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "apiAccessToken": "fresh-token"
            })))
            .expect(0)
            .mount(&server)
            .await;

        let config = ClientConfig::with_base_url(server.uri());
        let client =
            create_authenticated_client(&config, None, None, None, &AuthMethod::token("mine"))
                .await
                .unwrap();

        assert_eq!(client.token(), Some("mine"));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_login_failure_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let config = ClientConfig::with_base_url(server.uri());
        let auth = AuthMethod::credentials("amina", "wrong");
        let err = create_authenticated_client(&config, None, None, None, &auth)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadCredentials));
    }

    #[tokio::test]
    async fn test_location_and_mosque_are_attached() {
        let config = ClientConfig::default();
        let client = create_authenticated_client(
            &config,
            Some(48.84),
            Some(2.35),
            Some("m-1"),
            &AuthMethod::Anonymous,
        )
        .await
        .unwrap();

        assert_eq!(client.mosque(), Some("m-1"));
        assert_eq!(client.token(), None);
    }
}
