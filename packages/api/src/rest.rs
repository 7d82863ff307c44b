//! # REST client for the hosted table API
//!
//! [`RestClient`] implements [`RemoteStore`] on top of a PostgREST-style HTTP
//! surface, the one the hosted backend exposes under `/rest/v1/<table>`:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `select` | `GET /rest/v1/posts?select=*,profiles(*)&parent=eq.42&order=created_at.desc` |
//! | `insert` | `POST /rest/v1/likes` with `Prefer: return=representation` and a JSON object body |
//! | `delete` | `DELETE /rest/v1/likes?post_id=eq.42&user_id=eq.<uuid>` |
//!
//! Every request carries the project's public key in the `apikey` header and a
//! bearer token: the signed-in user's access token when there is a session,
//! the public key otherwise. Row-level security on the service decides what
//! the token may see; nothing is checked client-side.
//!
//! Status mapping: `409` becomes [`StoreError::Conflict`], any other non-2xx
//! becomes [`StoreError::Service`] carrying the response body, and requests
//! that never got a response become [`StoreError::Transport`].

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use store::{BackendConfig, Filter, RemoteStore, Select, StoreError, Table};

#[derive(Clone, Debug)]
pub struct RestClient {
    http: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl RestClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.backend.url.clone(),
            anon_key: config.backend.anon_key.clone(),
            access_token: None,
        }
    }

    /// A copy of this client that acts as the signed-in user.
    pub fn with_access_token(&self, token: Option<&str>) -> Self {
        Self {
            access_token: token.map(str::to_string),
            ..self.clone()
        }
    }

    pub fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let token = self.access_token.as_deref().unwrap_or(&self.anon_key);
        req.header("apikey", &self.anon_key).bearer_auth(token)
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    if e.is_decode() {
        StoreError::Decode(e.to_string())
    } else {
        StoreError::Transport(e.to_string())
    }
}

/// Turn a non-success response into the matching [`StoreError`].
async fn check(resp: Response, table: Table) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::CONFLICT {
        return Err(StoreError::Conflict {
            table: table.to_string(),
        });
    }
    let message = resp.text().await.unwrap_or_default();
    Err(StoreError::Service {
        status: status.as_u16(),
        message,
    })
}

impl RemoteStore for RestClient {
    async fn select(&self, query: &Select) -> Result<Vec<Value>, StoreError> {
        tracing::debug!(table = %query.table, "GET rows");
        let req = self
            .http
            .get(self.table_url(query.table))
            .query(&query.query_pairs());
        let resp = self.authorize(req).send().await.map_err(transport)?;
        let resp = check(resp, query.table).await?;
        resp.json::<Vec<Value>>().await.map_err(transport)
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, StoreError> {
        tracing::debug!(%table, "POST row");
        let req = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&row);
        let resp = self.authorize(req).send().await.map_err(transport)?;
        let resp = check(resp, table).await?;
        let mut rows = resp.json::<Vec<Value>>().await.map_err(transport)?;
        if rows.is_empty() {
            return Err(StoreError::Decode(format!("insert into {table} returned no row")));
        }
        Ok(rows.swap_remove(0))
    }

    async fn delete(&self, table: Table, filters: &[Filter]) -> Result<(), StoreError> {
        tracing::debug!(%table, "DELETE rows");
        let pairs: Vec<(String, String)> = filters.iter().map(Filter::query_pair).collect();
        let req = self.http.delete(self.table_url(table)).query(&pairs);
        let resp = self.authorize(req).send().await.map_err(transport)?;
        check(resp, table).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_has_no_double_slash() {
        let client = RestClient::new(&BackendConfig::new("https://demo.example.co/", "anon"));
        assert_eq!(
            client.table_url(Table::SavedPosts),
            "https://demo.example.co/rest/v1/saved_posts"
        );
    }

    #[test]
    fn test_access_token_stays_on_the_copy() {
        let client = RestClient::new(&BackendConfig::new("https://demo.example.co", "anon"));
        let signed_in = client.with_access_token(Some("jwt"));

        assert!(client.access_token.is_none());
        assert_eq!(signed_in.access_token.as_deref(), Some("jwt"));
        assert_eq!(signed_in.anon_key, "anon");
    }
}
