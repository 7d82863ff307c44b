//! # Session handling against the hosted auth service
//!
//! The identity provider is consumed, not implemented. [`AuthClient`] talks to
//! its GoTrue-style endpoints:
//!
//! - [`sign_in_with_password`](AuthClient::sign_in_with_password):
//!   `POST /auth/v1/token?grant_type=password` with `{email, password}`;
//!   answers with a [`Session`].
//! - [`current_user`](AuthClient::current_user): `GET /auth/v1/user` with the
//!   session's bearer token; used to validate a restored session.
//! - [`sign_out`](AuthClient::sign_out): `POST /auth/v1/logout`.
//!
//! The only thing the rest of the app reads from a session is the user id
//! (the primary key of that user's `profiles` row) and the access token that
//! [`crate::RestClient`] forwards.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use store::BackendConfig;

use crate::error::ApiError;

/// An authenticated session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

/// The user record embedded in a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AuthClient {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.backend.url.clone(),
            anon_key: config.backend.anon_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    /// Exchange email and password for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let resp = self
            .http
            .post(self.url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email.trim(), "password": password }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Auth(auth_error_message(&body)));
        }
        let session: Session = resp.json().await?;
        tracing::info!(user = %session.user.id, "signed in");
        Ok(session)
    }

    /// Look up the user behind an access token.
    pub async fn current_user(&self, access_token: &str) -> Result<AuthUser, ApiError> {
        let resp = self
            .http
            .get(self.url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Auth(auth_error_message(&body)));
        }
        Ok(resp.json().await?)
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.url("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Auth(auth_error_message(&body)));
        }
        Ok(())
    }
}

/// Pull a human-readable message out of an auth error body.
pub fn auth_error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str))
        })
        .map(str::to_string)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Sign-in failed".to_string()
            } else {
                body.trim().to_string()
            }
        })
}
