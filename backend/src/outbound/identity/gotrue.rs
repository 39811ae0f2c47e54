//! Reqwest-backed adapter for a GoTrue-style identity API.
//!
//! This adapter owns transport details only: request serialisation, the
//! per-request timeout, HTTP status mapping, and JSON decoding into the
//! provider port's types. The endpoint shapes match the hosted auth API the
//! original deployment used (`/signup`, `/token?grant_type=password`,
//! `/user`, `/logout`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, NewProviderAccount, ProviderSession,
};
use crate::domain::{AccessToken, EmailAddress, Password, UserId};

/// Default per-request timeout; conservative so callers fail fast instead
/// of hanging on a slow provider.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Identity provider adapter calling a GoTrue-style HTTP API.
pub struct GoTrueIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoTrueIdentityProvider {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn decode_user_id(response: reqwest::Response) -> Result<UserId, IdentityProviderError> {
        let dto: UserDto = response.json().await.map_err(map_transport_error)?;
        parse_user_id(&dto.id)
    }
}

#[derive(Debug, Deserialize)]
struct UserDto {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SignupDto {
    id: Option<String>,
    user: Option<UserDto>,
}

#[derive(Debug, Deserialize)]
struct TokenDto {
    access_token: String,
    user: UserDto,
}

fn parse_user_id(raw: &str) -> Result<UserId, IdentityProviderError> {
    UserId::new(raw).map_err(|error| {
        IdentityProviderError::unavailable(format!("provider returned malformed user id: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    if error.is_timeout() {
        IdentityProviderError::timeout(error.to_string())
    } else {
        IdentityProviderError::unavailable(error.to_string())
    }
}

fn status_message(status: StatusCode, body: &str) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}

fn body_preview(body: &str) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

fn map_signup_status(status: StatusCode, body: &str) -> IdentityProviderError {
    match status {
        // GoTrue answers 400/409/422 for already-registered addresses.
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            IdentityProviderError::duplicate_email()
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            IdentityProviderError::timeout(status_message(status, body))
        }
        _ => IdentityProviderError::unavailable(status_message(status, body)),
    }
}

fn map_signin_status(status: StatusCode, body: &str) -> IdentityProviderError {
    match status {
        // Do not leak whether the email exists: every rejection is the same.
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        | StatusCode::UNPROCESSABLE_ENTITY => IdentityProviderError::invalid_credentials(),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            IdentityProviderError::timeout(status_message(status, body))
        }
        _ => IdentityProviderError::unavailable(status_message(status, body)),
    }
}

fn map_resolve_status(status: StatusCode, body: &str) -> IdentityProviderError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        | StatusCode::NOT_FOUND => IdentityProviderError::token_rejected(),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            IdentityProviderError::timeout(status_message(status, body))
        }
        _ => IdentityProviderError::unavailable(status_message(status, body)),
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn create_account(
        &self,
        account: &NewProviderAccount,
    ) -> Result<UserId, IdentityProviderError> {
        let response = self
            .client
            .post(self.endpoint("signup"))
            .header("apikey", self.api_key.as_str())
            .json(&json!({
                "email": account.email.as_str(),
                "password": account.password.expose(),
                "data": { "name": account.name, "role": account.role },
            }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_signup_status(status, &body));
        }
        let dto: SignupDto = response.json().await.map_err(map_transport_error)?;
        let raw_id = dto
            .id
            .or(dto.user.map(|user| user.id))
            .ok_or_else(|| {
                IdentityProviderError::unavailable("signup response carried no user id")
            })?;
        parse_user_id(&raw_id)
    }

    async fn sign_in(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<ProviderSession, IdentityProviderError> {
        let response = self
            .client
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", self.api_key.as_str())
            .json(&json!({
                "email": email.as_str(),
                "password": password.expose(),
            }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_signin_status(status, &body));
        }
        let dto: TokenDto = response.json().await.map_err(map_transport_error)?;
        let access_token = AccessToken::new(dto.access_token).map_err(|error| {
            IdentityProviderError::unavailable(format!("provider returned malformed token: {error}"))
        })?;
        Ok(ProviderSession {
            access_token,
            user_id: parse_user_id(&dto.user.id)?,
        })
    }

    async fn resolve(&self, token: &AccessToken) -> Result<UserId, IdentityProviderError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", self.api_key.as_str())
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_resolve_status(status, &body));
        }
        Self::decode_user_id(response).await
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), IdentityProviderError> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", self.api_key.as_str())
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        // An already-dead session still counts as logged out.
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_resolve_status(status, &body))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.
    use rstest::rstest;

    use super::*;

    #[test]
    fn endpoint_joins_without_duplicate_slashes() {
        let provider = GoTrueIdentityProvider::new(
            "https://auth.example.com/auth/v1/",
            "anon-key",
            DEFAULT_TIMEOUT,
        )
        .expect("client builds");
        assert_eq!(
            provider.endpoint("token?grant_type=password"),
            "https://auth.example.com/auth/v1/token?grant_type=password"
        );
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST)]
    #[case(StatusCode::CONFLICT)]
    #[case(StatusCode::UNPROCESSABLE_ENTITY)]
    fn signup_rejections_map_to_duplicate_email(#[case] status: StatusCode) {
        let error = map_signup_status(status, "{\"msg\":\"User already registered\"}");
        assert_eq!(error, IdentityProviderError::DuplicateEmail);
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST)]
    #[case(StatusCode::UNAUTHORIZED)]
    fn signin_rejections_collapse_to_invalid_credentials(#[case] status: StatusCode) {
        let error = map_signin_status(status, "{\"error\":\"invalid_grant\"}");
        assert_eq!(error, IdentityProviderError::InvalidCredentials);
    }

    #[test]
    fn resolve_unauthorized_maps_to_token_rejected() {
        let error = map_resolve_status(StatusCode::UNAUTHORIZED, "");
        assert_eq!(error, IdentityProviderError::TokenRejected);
    }

    #[rstest]
    #[case(StatusCode::REQUEST_TIMEOUT)]
    #[case(StatusCode::GATEWAY_TIMEOUT)]
    fn timeout_statuses_map_to_timeout(#[case] status: StatusCode) {
        let error = map_signin_status(status, "");
        assert!(matches!(error, IdentityProviderError::Timeout { .. }));
    }

    #[test]
    fn server_errors_map_to_unavailable_with_preview() {
        let error = map_signup_status(StatusCode::INTERNAL_SERVER_ERROR, "backend   exploded");
        match error {
            IdentityProviderError::Unavailable { message } => {
                assert!(message.contains("status 500"));
                assert!(message.contains("backend exploded"));
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn long_bodies_are_truncated_in_previews() {
        let body = "x".repeat(500);
        let preview = body_preview(&body);
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 163);
    }
}
