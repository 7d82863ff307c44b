//! # Backend configuration: `social.toml`
//!
//! Where the hosted backend lives and which public key to present to it.
//!
//! ```toml
//! [backend]
//! url = "https://project.example.co"   # empty = offline demo
//! anon_key = "public-anon-key"
//! ```
//!
//! [`BackendConfig::from_env`] resolves it as follows:
//!
//! 1. On native targets, `social.toml` in the working directory, with
//!    `SOCIAL_BACKEND_URL` / `SOCIAL_BACKEND_ANON_KEY` from the process
//!    environment overriding its fields (a `.env` file is loaded first).
//! 2. Otherwise the same variables captured at compile time, which is how
//!    the wasm bundle receives them.
//! 3. [`BackendConfig::default`], an empty URL, meaning the app runs against a
//!    seeded in-memory store.

use serde::{Deserialize, Serialize};

pub const URL_VAR: &str = "SOCIAL_BACKEND_URL";
pub const ANON_KEY_VAR: &str = "SOCIAL_BACKEND_ANON_KEY";

/// Top-level configuration stored in `social.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub backend: BackendSection,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendSection {
    /// Base URL of the hosted project, without a trailing slash.
    #[serde(default)]
    pub url: String,
    /// Public (anonymous) API key sent with every request.
    #[serde(default)]
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            backend: BackendSection {
                url: url.trim_end_matches('/').to_string(),
                anon_key: anon_key.into(),
            },
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "social.toml"
    }

    /// Whether no hosted backend is configured.
    pub fn is_demo(&self) -> bool {
        self.backend.url.trim().is_empty()
    }

    /// Resolve the configuration from the environment.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            dotenvy::dotenv().ok();
            match std::env::current_dir() {
                Ok(dir) => return Self::from_dir(&dir),
                Err(e) => tracing::warn!("cannot resolve working directory: {e}"),
            }
        }

        Self::from_build_env()
    }

    /// `social.toml` in `dir` when present, with the process environment
    /// layered on top.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_dir(dir: &std::path::Path) -> Self {
        let file = Self::read_file(&dir.join(Self::filename()));
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn read_file(path: &std::path::Path) -> Option<Self> {
        let text = std::fs::read_to_string(path).ok()?;
        match Self::from_toml(&text) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded backend config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring malformed config: {e}");
                None
            }
        }
    }

    /// Env vars win over the file; neither falls back to the build env.
    #[cfg(not(target_arch = "wasm32"))]
    fn resolve(file: Option<Self>, var: impl Fn(&str) -> Option<String>) -> Self {
        let base = match file {
            Some(config) => config,
            None if var(URL_VAR).is_none() => return Self::from_build_env(),
            None => Self::default(),
        };
        let url = var(URL_VAR).unwrap_or(base.backend.url);
        let key = var(ANON_KEY_VAR).unwrap_or(base.backend.anon_key);
        Self::new(url, key)
    }

    fn from_build_env() -> Self {
        match option_env!("SOCIAL_BACKEND_URL") {
            Some(url) => Self::new(url, option_env!("SOCIAL_BACKEND_ANON_KEY").unwrap_or_default()),
            None => {
                tracing::info!("no backend configured, using the in-memory demo store");
                Self::default()
            }
        }
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.backend.url = config.backend.url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = BackendConfig::from_toml(
            r#"
            [backend]
            url = "https://demo.example.co/"
            anon_key = "k"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.url, "https://demo.example.co");
        assert_eq!(config.backend.anon_key, "k");
        assert!(!config.is_demo());
    }

    #[test]
    fn test_empty_config_is_demo() {
        let config = BackendConfig::from_toml("").unwrap();
        assert_eq!(config, BackendConfig::default());
        assert!(config.is_demo());
    }

    #[test]
    fn test_config_file_is_read_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = BackendConfig::new("https://file.example.co/", "file-key");
        std::fs::write(
            dir.path().join(BackendConfig::filename()),
            config.to_toml().unwrap(),
        )
        .unwrap();

        let file = BackendConfig::read_file(&dir.path().join(BackendConfig::filename()));
        let loaded = BackendConfig::resolve(file, |_| None);
        assert_eq!(loaded.backend.url, "https://file.example.co");
        assert_eq!(loaded.backend.anon_key, "file-key");
        assert!(!loaded.is_demo());

        if std::env::var(URL_VAR).is_err() && std::env::var(ANON_KEY_VAR).is_err() {
            assert_eq!(BackendConfig::from_dir(dir.path()), loaded);
        }
    }

    #[test]
    fn test_env_vars_override_config_file() {
        let file = Some(BackendConfig::new("https://file.example.co", "file-key"));
        let config = BackendConfig::resolve(file, |name| {
            (name == URL_VAR).then(|| "https://env.example.co".to_string())
        });
        assert_eq!(config.backend.url, "https://env.example.co");
        assert_eq!(config.backend.anon_key, "file-key");
    }

    #[test]
    fn test_missing_or_malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(BackendConfig::filename());
        assert!(BackendConfig::read_file(&path).is_none());

        std::fs::write(&path, "[backend\nurl = ").unwrap();
        assert!(BackendConfig::read_file(&path).is_none());

        let config = BackendConfig::resolve(None, |name| {
            (name == URL_VAR).then(|| "https://env.example.co".to_string())
        });
        assert_eq!(config.backend.url, "https://env.example.co");
        assert_eq!(config.backend.anon_key, "");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = BackendConfig::new("https://x.example.co", "anon");
        let text = config.to_toml().unwrap();
        assert_eq!(BackendConfig::from_toml(&text).unwrap(), config);
    }
}
