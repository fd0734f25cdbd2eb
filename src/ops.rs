//! Integration-facing operations.
//!
//! Each function here is one self-contained exchange with the MAWAQIT
//! service: build a client through the session factory, make one domain
//! call, classify any failure and let the client drop. Credential and
//! network failures are logged and masked as `false`/empty/`None` so a
//! polling caller never has to handle them; anything else (server errors,
//! undecodable payloads, rate limiting) propagates as `Err`.
//!
//! The prayer-times operation additionally carries the fallback protocol:
//! when the API rejects the library-convention `Api-Access-Token` header
//! with a 401, a single direct HTTP attempt is made with the token in the
//! `Authorization` header instead.

use std::time::Duration;

use reqwest::header;
use tracing::{error, warn};

use crate::api::{ApiError, MawaqitClient};
use crate::auth::{create_authenticated_client, AuthMethod};
use crate::config::ClientConfig;
use crate::models::{Mosque, PrayerCalendar};

/// Total timeout for the direct prayer-times fetch in seconds.
const DIRECT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Convert recognized failures into the operation's empty result.
/// Credential and network errors are logged here with the operation name;
/// everything else stays an `Err` for the caller to handle.
fn mask_recognized<T>(
    result: Result<T, ApiError>,
    empty: impl FnOnce() -> T,
    operation: &str,
) -> Result<T, ApiError> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if err.is_credential_error() => {
            error!(operation, error = %err, "Authentication failed");
            Ok(empty())
        }
        Err(err) if err.is_network_error() => {
            error!(operation, error = %err, "Network-related error");
            Ok(empty())
        }
        Err(err) => Err(err),
    }
}

/// Check a username/password pair against the MAWAQIT login endpoint.
///
/// Builds a credential-only client and calls `login` directly - no token,
/// no location, no session factory. Returns `Ok(false)` when the
/// credentials are rejected or the service is unreachable.
pub async fn test_credentials(
    config: &ClientConfig,
    username: &str,
    password: &str,
) -> Result<bool, ApiError> {
    let result = async {
        let mut client = MawaqitClient::new(config)?.with_credentials(username, password);
        client.login().await?;
        Ok(true)
    }
    .await;

    mask_recognized(result, || false, "test_credentials")
}

/// Obtain a fresh API token for a username/password pair.
///
/// Returns `Ok(None)` when the credentials are rejected or the service is
/// unreachable. The token is not stored anywhere by this crate.
pub async fn get_api_token(
    config: &ClientConfig,
    username: &str,
    password: &str,
) -> Result<Option<String>, ApiError> {
    let result = async {
        let mut client = MawaqitClient::new(config)?.with_credentials(username, password);
        let token = client.get_api_token().await?;
        Ok(Some(token))
    }
    .await;

    mask_recognized(result, || None, "get_api_token")
}

/// List mosques near the given coordinates, nearest first.
///
/// Returns `Ok(vec![])` on credential or network failure - callers must
/// treat an empty list as "could not complete", not "no mosques exist".
pub async fn all_mosques_neighborhood(
    config: &ClientConfig,
    latitude: f64,
    longitude: f64,
    mosque: Option<&str>,
    auth: &AuthMethod,
) -> Result<Vec<Mosque>, ApiError> {
    let result = async {
        let client =
            create_authenticated_client(config, Some(latitude), Some(longitude), mosque, auth)
                .await?;
        client.all_mosques_neighborhood().await
    }
    .await;

    mask_recognized(result, Vec::new, "all_mosques_neighborhood")
}

/// List mosques matching a free-text keyword.
///
/// A `None` keyword short-circuits to an empty list without building a
/// session or touching the network. Failure behavior matches
/// [`all_mosques_neighborhood`].
pub async fn all_mosques_by_keyword(
    config: &ClientConfig,
    keyword: Option<&str>,
    auth: &AuthMethod,
) -> Result<Vec<Mosque>, ApiError> {
    let Some(keyword) = keyword else {
        return Ok(Vec::new());
    };

    let result = async {
        let client = create_authenticated_client(config, None, None, None, auth).await?;
        client.fetch_mosques_by_keyword(keyword).await
    }
    .await;

    mask_recognized(result, Vec::new, "all_mosques_by_keyword")
}

/// Fetch the prayer-time calendar for a mosque.
///
/// Primary path: the client's own `fetch_prayer_times`, which sends the
/// token under the `Api-Access-Token` header. If the service answers 401
/// to that convention, exactly one direct attempt follows with the token
/// in the `Authorization` header; a failure of the direct attempt yields
/// `Ok(None)` with no further retry. A `BadCredentials` rejection of the
/// primary call is masked to `Ok(None)` without any fallback.
pub async fn fetch_prayer_times(
    config: &ClientConfig,
    latitude: Option<f64>,
    longitude: Option<f64>,
    mosque: Option<&str>,
    auth: &AuthMethod,
) -> Result<Option<PrayerCalendar>, ApiError> {
    let result = async {
        let mut client =
            create_authenticated_client(config, latitude, longitude, mosque, auth).await?;

        match client.fetch_prayer_times().await {
            Ok(calendar) => Ok(Some(calendar)),
            Err(ApiError::NotAuthenticated) => {
                let mosque_id = mosque
                    .map(str::to_string)
                    .or_else(|| client.mosque().map(str::to_string));
                let Some(mosque_id) = mosque_id else {
                    warn!("Prayer times fetch rejected and no mosque id is resolved");
                    return Ok(None);
                };
                let Some(token) = client.token() else {
                    warn!(mosque = %mosque_id, "Prayer times fetch rejected and no token is available");
                    return Ok(None);
                };
                warn!(
                    mosque = %mosque_id,
                    "Library prayer times fetch failed with 401, retrying with Authorization header"
                );
                Ok(fetch_prayer_times_direct(&config.base_url, &mosque_id, token).await)
            }
            Err(err) => Err(err),
        }
    }
    .await;

    mask_recognized(result, || None, "fetch_prayer_times")
}

/// Single direct HTTP attempt at the prayer-times endpoint, sending the
/// token in the `Authorization` header. Anything other than a decodable
/// 200 response is logged and yields `None`; there is no retry.
async fn fetch_prayer_times_direct(
    base_url: &str,
    mosque_id: &str,
    token: &str,
) -> Option<PrayerCalendar> {
    let url = format!("{}/mosque/{}/prayer-times", base_url, mosque_id);

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(DIRECT_FETCH_TIMEOUT_SECS))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            error!(mosque = %mosque_id, error = %err, "Could not build direct fetch client");
            return None;
        }
    };

    let response = client
        .get(&url)
        .header(header::AUTHORIZATION, token)
        .header(header::CONTENT_TYPE, "application/json")
        .send()
        .await;

    match response {
        Ok(response) if response.status() == reqwest::StatusCode::OK => {
            match response.json::<PrayerCalendar>().await {
                Ok(calendar) => Some(calendar),
                Err(err) => {
                    error!(
                        mosque = %mosque_id,
                        error = %err,
                        "Direct prayer times fetch returned an undecodable body"
                    );
                    None
                }
            }
        }
        Ok(response) => {
            error!(
                status = %response.status(),
                mosque = %mosque_id,
                "Direct prayer times fetch failed"
            );
            None
        }
        Err(err) => {
            error!(mosque = %mosque_id, error = %err, "Direct prayer times fetch failed");
            None
        }
    }
}
