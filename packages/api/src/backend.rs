//! The backend every widget talks to.
//!
//! Returns a [`RemoteStore`] backed by the appropriate implementation:
//! - **Hosted**: [`RestClient`] + [`AuthClient`] when a backend URL is configured
//! - **Demo**: a seeded [`MemoryStore`] otherwise

use serde_json::Value;
use store::{BackendConfig, Filter, MemoryStore, RemoteStore, Select, StoreError, Table};

use crate::auth::{AuthClient, Session};
use crate::demo;
use crate::error::ApiError;
use crate::rest::RestClient;

#[derive(Clone, Debug)]
pub enum Backend {
    Hosted { rest: RestClient, auth: AuthClient },
    Demo(MemoryStore),
}

impl Backend {
    pub fn from_config(config: &BackendConfig) -> Self {
        if config.is_demo() {
            Backend::Demo(demo::seeded_store())
        } else {
            tracing::info!(url = %config.backend.url, "using hosted backend");
            Backend::Hosted {
                rest: RestClient::new(config),
                auth: AuthClient::new(config),
            }
        }
    }

    /// A handle that issues table calls as the given session's user.
    pub fn with_session(&self, session: Option<&Session>) -> Self {
        match self {
            Backend::Hosted { rest, auth } => Backend::Hosted {
                rest: rest.with_access_token(session.map(|s| s.access_token.as_str())),
                auth: auth.clone(),
            },
            Backend::Demo(store) => Backend::Demo(store.clone()),
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Backend::Demo(_))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        match self {
            Backend::Hosted { auth, .. } => auth.sign_in_with_password(email, password).await,
            Backend::Demo(_) => Ok(demo::session(email)),
        }
    }

    /// Check that a restored session is still accepted.
    pub async fn validate(&self, session: &Session) -> Result<(), ApiError> {
        match self {
            Backend::Hosted { auth, .. } => {
                let user = auth.current_user(&session.access_token).await?;
                if user.id != session.user.id {
                    return Err(ApiError::Auth("session belongs to another user".to_string()));
                }
                Ok(())
            }
            Backend::Demo(_) => Ok(()),
        }
    }

    pub async fn sign_out(&self, session: &Session) -> Result<(), ApiError> {
        match self {
            Backend::Hosted { auth, .. } => auth.sign_out(&session.access_token).await,
            Backend::Demo(_) => Ok(()),
        }
    }
}

impl RemoteStore for Backend {
    async fn select(&self, query: &Select) -> Result<Vec<Value>, StoreError> {
        match self {
            Backend::Hosted { rest, .. } => rest.select(query).await,
            Backend::Demo(store) => store.select(query).await,
        }
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, StoreError> {
        match self {
            Backend::Hosted { rest, .. } => rest.insert(table, row).await,
            Backend::Demo(store) => store.insert(table, row).await,
        }
    }

    async fn delete(&self, table: Table, filters: &[Filter]) -> Result<(), StoreError> {
        match self {
            Backend::Hosted { rest, .. } => rest.delete(table, filters).await,
            Backend::Demo(store) => store.delete(table, filters).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social;

    #[tokio::test]
    async fn test_demo_backend_signs_in_as_demo_user() {
        let backend = Backend::from_config(&BackendConfig::default());
        assert!(backend.is_demo());

        let session = backend.sign_in("me@example.com", "anything").await.unwrap();
        assert_eq!(session.user_id(), demo::DEMO_USER_ID);
        assert!(backend.validate(&session).await.is_ok());

        let scoped = backend.with_session(Some(&session));
        social::like_post(&scoped, "10000000-0000-4000-8000-000000000001", session.user_id())
            .await
            .unwrap();

        // both handles share the same tables
        let likes = social::fetch_likes(&backend, "10000000-0000-4000-8000-000000000001")
            .await
            .unwrap();
        assert!(social::is_liked_by(&likes, session.user_id()));
    }

    #[test]
    fn test_configured_backend_is_hosted() {
        let backend = Backend::from_config(&BackendConfig::new("https://x.example.co", "anon"));
        assert!(!backend.is_demo());
    }
}
