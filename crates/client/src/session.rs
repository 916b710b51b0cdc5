//! Authenticated HTTP session against a Nexus Dashboard cluster.
//!
//! [`NdSession::login`] exchanges credentials for a JWT over
//! `POST /login`; every later request carries it as a bearer token.

use std::fmt;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::NdConfig;
use crate::error::ClientError;

/// An authenticated session. Cheap to clone.
#[derive(Clone)]
pub struct NdSession {
    client: reqwest::Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for NdSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdSession")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_name: &'a str,
    user_passwd: &'a str,
    domain: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    jwttoken: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl NdSession {
    /// Build an HTTP client from `config` and log in.
    pub async fn login(config: &NdConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.validate_certs)
            .build()?;

        Self::login_with_client(client, config).await
    }

    /// Log in reusing an existing [`reqwest::Client`].
    pub async fn login_with_client(
        client: reqwest::Client,
        config: &NdConfig,
    ) -> Result<Self, ClientError> {
        let base_url = parse_base_url(&config.base_url())?;

        let body = LoginRequest {
            user_name: &config.username,
            user_passwd: &config.password,
            domain: &config.login_domain,
        };

        let response = client
            .post(endpoint(&base_url, &["login"])?)
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let login: LoginResponse = decode(response).await?;

        let token = login
            .jwttoken
            .or(login.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::Login("response carried no token".to_string()))?;

        tracing::info!(
            host = %config.host,
            user = %config.username,
            domain = %config.login_domain,
            "Logged in to Nexus Dashboard",
        );

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Wrap an already-issued token without contacting the cluster.
    pub fn from_token(
        client: reqwest::Client,
        base_url: &str,
        token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET` the given path segments with query parameters and decode
    /// the JSON body.
    pub async fn get_json(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, ClientError> {
        let url = endpoint(&self.base_url, segments)?;
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;

        decode(ensure_success(response).await?).await
    }

    /// `POST` to the given path segments without a body and decode the
    /// JSON reply.
    pub async fn post_json(&self, segments: &[&str]) -> Result<serde_json::Value, ClientError> {
        let url = endpoint(&self.base_url, segments)?;
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        decode(ensure_success(response).await?).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw).map_err(|e| ClientError::Url(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::Url(format!("{raw}: not a base URL")));
    }
    Ok(url)
}

/// Append percent-encoded path segments to `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::Url(format!("{base}: not a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Turn a non-2xx reply into [`ClientError::Api`]. The raw body is kept
/// because ND explains rejected logins and requests in its `errors`
/// array there.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ClientError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}
