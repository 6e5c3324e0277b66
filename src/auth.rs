//! Token acquisition against the Glober AI auth service.
//!
//! [`Client`](crate::Client) never logs in by itself; it takes a token that
//! was obtained beforehand, for example with [`login`].

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{join_segments, parse_base_url, read_json, USER_AGENT};
use crate::errors::Result;

pub const DEFAULT_AUTH_URL: &str = "https://auth.api.glober.ai/api/v1";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
}

/// Exchange email and password for an access token.
///
/// `auth_base_url` is the auth API root, e.g. [`DEFAULT_AUTH_URL`]. Rejected
/// credentials come back as [`GloberError::Api`](crate::GloberError::Api)
/// with the service's status code.
///
/// Uses a default HTTP client without a timeout; see [`login_with`] to
/// supply one.
pub async fn login(auth_base_url: &str, email: &str, password: &str) -> Result<String> {
    let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    login_with(&http, auth_base_url, email, password).await
}

/// Like [`login`], over a caller-configured `reqwest::Client` (timeouts,
/// proxies, user agent).
pub async fn login_with(
    http: &reqwest::Client,
    auth_base_url: &str,
    email: &str,
    password: &str,
) -> Result<String> {
    let url = join_segments(&parse_base_url(auth_base_url)?, &["auth", "login"])?;

    debug!(path = url.path(), "logging in");
    let response = http
        .request(Method::POST, url)
        .json(&LoginRequest { email, password })
        .send()
        .await?;

    let body: LoginResponse = read_json(response).await?;
    Ok(body.access_token)
}
