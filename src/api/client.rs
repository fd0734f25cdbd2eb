//! Low-level client for the MAWAQIT REST API.
//!
//! `MawaqitClient` covers login, token acquisition, mosque search and the
//! prayer-times fetch. One instance serves exactly one logical operation:
//! the wrappers in [`crate::ops`] build a client, make one domain call and
//! drop it. Instances are not shared and hold no cross-call state.

use reqwest::{header, Client};
use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::models::{Mosque, PrayerCalendar};

use super::ApiError;

/// Header name the MAWAQIT API historically accepted on the prayer-times
/// endpoint. Some deployments now reject it with 401 and require the plain
/// `Authorization` header instead; the direct-fetch path in `ops` handles
/// that rejection.
pub const API_ACCESS_TOKEN_HEADER: &str = "Api-Access-Token";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "apiAccessToken")]
    api_access_token: String,
}

/// Client for the MAWAQIT API, scoped to a single logical operation.
#[derive(Debug)]
pub struct MawaqitClient {
    client: Client,
    base_url: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    mosque: Option<String>,
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
}

impl MawaqitClient {
    /// Create an unauthenticated client. Credentials, token, location and
    /// mosque are attached through the `with_*` builders.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            latitude: None,
            longitude: None,
            mosque: None,
            username: None,
            password: None,
            token: None,
        })
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_mosque(mut self, mosque: impl Into<String>) -> Self {
        self.mosque = Some(mosque.into());
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Attach a pre-existing token. `get_api_token` will return it without
    /// logging in, so callers wanting a fresh token must not set one here.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The bearer token, once acquired via login or supplied up front.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The mosque id, explicit or resolved from a neighborhood search.
    pub fn mosque(&self) -> Option<&str> {
        self.mosque.as_deref()
    }

    /// Log in with HTTP Basic credentials and store the issued token.
    /// Returns the token on success. A 401 means the credentials were
    /// rejected; any other non-success status maps through `from_status`.
    pub async fn login(&mut self) -> Result<String, ApiError> {
        let (username, password) = match (&self.username, &self.password) {
            (Some(u), Some(p)) => (u.clone(), p.clone()),
            _ => return Err(ApiError::BadCredentials),
        };

        let url = format!("{}/me", self.base_url);
        let response = self
            .client
            .get(&url)
            .basic_auth(&username, Some(&password))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::BadCredentials);
        }
        let response = Self::check_response(response).await?;

        let login: LoginResponse = response.json().await?;
        debug!(username = %username, "Login succeeded, token obtained");
        self.token = Some(login.api_access_token.clone());
        Ok(login.api_access_token)
    }

    /// Return the stored token, performing a login first when none is set.
    /// A token attached at construction short-circuits the login call.
    pub async fn get_api_token(&mut self) -> Result<String, ApiError> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }
        self.login().await
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NotAuthenticated)?;
        let mut headers = header::HeaderMap::new();
        // The API expects the raw token in Authorization, no Bearer prefix
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(token)
                .map_err(|_| ApiError::InvalidResponse("token is not a valid header value".into()))?,
        );
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Search mosques around the configured coordinates, nearest first.
    pub async fn all_mosques_neighborhood(&self) -> Result<Vec<Mosque>, ApiError> {
        let url = format!("{}/mosque/search", self.base_url);
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(lat) = self.latitude {
            query.push(("lat", lat.to_string()));
        }
        if let Some(lon) = self.longitude {
            query.push(("lon", lon.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let mosques: Vec<Mosque> = response.json().await?;
        debug!(count = mosques.len(), "Neighborhood search returned mosques");
        Ok(mosques)
    }

    /// Search mosques by free-text keyword.
    pub async fn fetch_mosques_by_keyword(&self, keyword: &str) -> Result<Vec<Mosque>, ApiError> {
        let url = format!("{}/mosque/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("word", keyword)])
            .headers(self.auth_headers()?)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let mosques: Vec<Mosque> = response.json().await?;
        debug!(count = mosques.len(), keyword = keyword, "Keyword search returned mosques");
        Ok(mosques)
    }

    /// Mosque id used for the prayer-times endpoint: the explicitly
    /// configured mosque if any, else the nearest match from a
    /// neighborhood search (stored for the rest of this session).
    pub async fn resolve_mosque(&mut self) -> Result<String, ApiError> {
        if let Some(mosque) = &self.mosque {
            return Ok(mosque.clone());
        }

        let mosques = self.all_mosques_neighborhood().await?;
        let nearest = mosques
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound("no mosque near the configured coordinates".into()))?;
        debug!(mosque = nearest.display_name(), "Resolved nearest mosque");
        self.mosque = Some(nearest.uuid.clone());
        Ok(nearest.uuid)
    }

    /// Fetch the prayer-time calendar for the resolved mosque, sending the
    /// token under the `Api-Access-Token` header convention. A 401 from
    /// this endpoint surfaces as `NotAuthenticated` and means the service
    /// rejected that convention, not necessarily that the token is bad.
    pub async fn fetch_prayer_times(&mut self) -> Result<PrayerCalendar, ApiError> {
        let token = self.token.clone().ok_or(ApiError::NotAuthenticated)?;
        let mosque_id = self.resolve_mosque().await?;

        let url = format!("{}/mosque/{}/prayer-times", self.base_url, mosque_id);
        let response = self
            .client
            .get(&url)
            .header(API_ACCESS_TOKEN_HEADER, &token)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }
}
