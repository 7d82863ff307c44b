//! Current-user context and backend handle for the UI.
//!
//! [`UserProvider`] owns the session and the signed-in user's profile and
//! provides both to every descendant. Widgets read the current actor with
//! [`use_current_user`] and reach the backend with [`use_backend`]; neither
//! is looked up any other way.

use api::{Backend, Session};
use dioxus::prelude::*;
use store::{BackendConfig, Profile};

use crate::feed::load_profile;

/// Session and profile of whoever is using the app.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub session: Option<Session>,
    /// The `profiles` row for the session's user, once fetched.
    pub profile: Option<Profile>,
    /// True until a stored session has been restored or ruled out.
    pub loading: bool,
}

impl Default for CurrentUser {
    fn default() -> Self {
        Self {
            session: None,
            profile: None,
            loading: true,
        }
    }
}

impl CurrentUser {
    /// Id of the current profile. Per-user fetches wait for this.
    pub fn id(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.id.as_str())
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}

/// Copyable access to the backend, scoped to the current session.
#[derive(Clone, Copy, PartialEq)]
pub struct BackendHandle {
    base: Signal<Backend>,
    user: Signal<CurrentUser>,
}

impl BackendHandle {
    /// A backend that acts as the user signed in right now.
    pub fn get(&self) -> Backend {
        self.base.peek().with_session(self.user.peek().session.as_ref())
    }

    pub async fn sign_in(mut self, email: &str, password: &str) -> Result<(), api::ApiError> {
        let backend = self.base.peek().clone();
        let session = backend.sign_in(email, password).await?;
        session_storage::save(&session);
        self.user.set(CurrentUser {
            session: Some(session),
            profile: None,
            loading: false,
        });
        Ok(())
    }

    pub async fn sign_out(mut self) {
        let session = self.user.peek().session.clone();
        if let Some(session) = session {
            let backend = self.base.peek().clone();
            if let Err(e) = backend.sign_out(&session).await {
                tracing::error!("Error signing out: {e}");
            }
        }
        session_storage::clear();
        self.user.set(CurrentUser {
            session: None,
            profile: None,
            loading: false,
        });
    }
}

pub fn use_current_user() -> Signal<CurrentUser> {
    use_context::<Signal<CurrentUser>>()
}

pub fn use_backend() -> BackendHandle {
    use_context::<BackendHandle>()
}

/// Provider component that owns the backend and the current user.
/// Wrap your app with this component.
#[component]
pub fn UserProvider(children: Element) -> Element {
    let base = use_signal(|| Backend::from_config(&BackendConfig::from_env()));
    let mut user = use_signal(CurrentUser::default);

    // Restore a stored session on mount
    let _ = use_resource(move || async move {
        let Some(session) = session_storage::load() else {
            user.set(CurrentUser {
                loading: false,
                ..CurrentUser::default()
            });
            return;
        };
        let backend = base.peek().clone();
        match backend.validate(&session).await {
            Ok(()) => user.set(CurrentUser {
                session: Some(session),
                profile: None,
                loading: false,
            }),
            Err(e) => {
                tracing::info!("Stored session rejected: {e}");
                session_storage::clear();
                user.set(CurrentUser {
                    loading: false,
                    ..CurrentUser::default()
                });
            }
        }
    });

    // Fetch the profile whenever the session's user changes
    let session_user = use_memo(move || user.read().session.as_ref().map(|s| s.user.id.clone()));
    let _ = use_resource(move || async move {
        let Some(user_id) = session_user() else {
            return;
        };
        let backend = base.peek().with_session(user.peek().session.as_ref());
        let profile = load_profile(&backend, &user_id).await;
        user.write().profile = profile;
    });

    use_context_provider(|| user);
    use_context_provider(|| BackendHandle { base, user });

    rsx! {
        {children}
    }
}

/// Session persistence across page loads.
mod session_storage {
    use api::Session;

    #[cfg(target_arch = "wasm32")]
    const KEY: &str = "social.session";

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Option<Session> {
        let raw = storage()?.get_item(KEY).ok().flatten()?;
        serde_json::from_str(&raw)
            .map_err(|e| tracing::error!("Discarding stored session: {e}"))
            .ok()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(session: &Session) {
        let Some(storage) = storage() else {
            return;
        };
        match serde_json::to_string(session) {
            Ok(raw) => {
                let _ = storage.set_item(KEY, &raw);
            }
            Err(e) => tracing::error!("Could not store session: {e}"),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn clear() {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(KEY);
        }
    }

    // Native builds keep the session for the lifetime of the window only.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Option<Session> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(_session: &Session) {}

    #[cfg(not(target_arch = "wasm32"))]
    pub fn clear() {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::AuthUser;

    #[test]
    fn test_id_comes_from_profile_not_session() {
        let mut user = CurrentUser {
            session: Some(Session {
                access_token: "t".to_string(),
                refresh_token: None,
                user: AuthUser {
                    id: "u1".to_string(),
                    email: None,
                },
            }),
            profile: None,
            loading: false,
        };
        assert!(user.is_signed_in());
        assert_eq!(user.id(), None);

        user.profile = Some(Profile {
            id: "u1".to_string(),
            name: Some("Ada".to_string()),
            avatar: None,
            cover: None,
            place: None,
        });
        assert_eq!(user.id(), Some("u1"));
    }
}
