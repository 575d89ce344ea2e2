//! Profile configuration for ccctl
//!
//! Configuration is stored in TOML with one table per named profile:
//!
//! ```toml
//! default_profile = "prod"
//!
//! [profiles.prod]
//! client_id = "${CC_PROD_CLIENT_ID}"
//! client_secret = "keyring:prod-client-secret"
//! ```

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::credential::CredentialStore;
use super::error::{ConfigError, Result};
use crate::client::{DEFAULT_API_URL, DEFAULT_AUTH_URL};
use crate::models::DEFAULT_AUDIENCE;

pub const ENV_CLIENT_ID: &str = "CC_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "CC_CLIENT_SECRET";
pub const ENV_API_URL: &str = "CC_API_URL";
pub const ENV_AUTH_URL: &str = "CC_AUTH_URL";
pub const ENV_AUDIENCE: &str = "CC_AUDIENCE";
pub const ENV_PROFILE: &str = "CCCTL_PROFILE";
pub const ENV_CONFIG_FILE: &str = "CCCTL_CONFIG_FILE";
/// Collector that receives exported spans
pub const ENV_TRACING_URL: &str = "CC_TRACING_URL";

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when none is named on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// One set of API client credentials plus the endpoints they belong to
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    pub client_id: String,
    /// Plaintext secret or a `keyring:<key>` reference
    pub client_secret: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_audience")]
    pub audience: String,
}

/// Credentials with keyring references resolved
#[derive(Clone, PartialEq)]
pub struct ResolvedCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub auth_url: String,
    pub audience: String,
}

impl std::fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("auth_url", &self.auth_url)
            .field("audience", &self.audience)
            .finish()
    }
}

impl Profile {
    /// Profile against the public Camunda Cloud endpoints
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_url: default_api_url(),
            auth_url: default_auth_url(),
            audience: default_audience(),
        }
    }

    pub fn has_keyring_secret(&self) -> bool {
        CredentialStore::is_keyring_reference(&self.client_secret)
    }

    /// Expand `${VAR}` references and resolve keyring references
    ///
    /// The profile itself keeps the values as written, so saving the config
    /// never writes expanded secrets back to disk.
    pub fn resolve_credentials(&self) -> Result<ResolvedCredentials> {
        let store = CredentialStore::default();
        let client_id = store
            .resolve(&Config::expand_env_vars(&self.client_id))
            .map_err(|e| {
                ConfigError::CredentialError(format!("Failed to resolve client id: {}", e))
            })?;
        let client_secret = store
            .resolve(&Config::expand_env_vars(&self.client_secret))
            .map_err(|e| {
                ConfigError::CredentialError(format!("Failed to resolve client secret: {}", e))
            })?;

        Ok(ResolvedCredentials {
            client_id,
            client_secret,
            api_url: Config::expand_env_vars(&self.api_url),
            auth_url: Config::expand_env_vars(&self.auth_url),
            audience: Config::expand_env_vars(&self.audience),
        })
    }
}

impl Config {
    /// Name of the profile to use
    ///
    /// An explicit name wins, then `default_profile`, then the alphabetically
    /// first profile.
    pub fn resolve_profile_name(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(name) = explicit_profile {
            return Ok(name.to_string());
        }

        if let Some(ref default) = self.default_profile {
            return Ok(default.clone());
        }

        self.list_profiles()
            .first()
            .map(|(name, _)| name.to_string())
            .ok_or_else(|| ConfigError::NoProfiles {
                suggestion: "Use 'ccctl profile set' to create a profile.".to_string(),
            })
    }

    /// The profile to use, resolved as in [`resolve_profile_name`](Self::resolve_profile_name)
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<(String, &Profile)> {
        let name = self.resolve_profile_name(explicit_profile)?;
        let profile = self
            .profiles
            .get(&name)
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.clone() })?;
        Ok((name, profile))
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from `config_path`; a missing file is an empty config
    ///
    /// `${VAR}` references stay unexpanded until
    /// [`Profile::resolve_credentials`].
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// Insert or replace a profile
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile, clearing the default if it pointed there
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// All profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Path of the configuration file
    ///
    /// On macOS `~/.config/ccctl/config.toml` is preferred when that directory
    /// exists; otherwise the platform config dir is used
    /// (`~/.config/ccctl/config.toml` on Linux,
    /// `%APPDATA%\camunda\ccctl\config\config.toml` on Windows).
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style_dir = base_dirs.home_dir().join(".config").join("ccctl");
                if linux_style_dir.exists() {
                    return Ok(linux_style_dir.join("config.toml"));
                }
            }
        }

        let proj_dirs =
            ProjectDirs::from("io", "camunda", "ccctl").ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand `${VAR}` and `${VAR:-default}` references
    ///
    /// Unset variables without a default are left as written so profiles that
    /// are not in use do not break loading.
    fn expand_env_vars(content: &str) -> String {
        shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok()).to_string()
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_audience() -> String {
    DEFAULT_AUDIENCE.to_string()
}
