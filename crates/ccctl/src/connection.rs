//! Credential resolution and client creation

use std::path::PathBuf;
use std::time::Duration;

use ccctl_core::CamundaCloudClient;
use ccctl_core::client::{DEFAULT_API_URL, DEFAULT_AUTH_URL};
use ccctl_core::config::{
    Config, ENV_API_URL, ENV_AUDIENCE, ENV_AUTH_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET,
    ResolvedCredentials,
};
use ccctl_core::models::DEFAULT_AUDIENCE;
use tracing::{debug, info, trace};

use crate::error::{CcCtlError, Result};

const CCCTL_USER_AGENT: &str = concat!("ccctl/", env!("CARGO_PKG_VERSION"));

/// Environment values relevant to credential resolution
#[derive(Debug, Default, Clone)]
struct EnvOverrides {
    client_id: Option<String>,
    client_secret: Option<String>,
    api_url: Option<String>,
    auth_url: Option<String>,
    audience: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            client_id: var(ENV_CLIENT_ID),
            client_secret: var(ENV_CLIENT_SECRET),
            api_url: var(ENV_API_URL),
            auth_url: var(ENV_AUTH_URL),
            audience: var(ENV_AUDIENCE),
        }
    }

    fn is_empty(&self) -> bool {
        self.client_id.is_none()
            && self.client_secret.is_none()
            && self.api_url.is_none()
            && self.auth_url.is_none()
            && self.audience.is_none()
    }
}

/// Builds logged-in clients from profiles and the environment
#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub timeout: Duration,
}

impl ConnectionManager {
    pub fn new(config: Config, config_path: Option<PathBuf>, timeout: Duration) -> Self {
        Self {
            config,
            config_path,
            timeout,
        }
    }

    /// Save the configuration to where it was loaded from
    pub fn save_config(&self) -> Result<()> {
        if let Some(ref path) = self.config_path {
            self.config.save_to_path(path)?;
        } else {
            self.config.save()?;
        }
        Ok(())
    }

    /// Path of the active configuration file
    pub fn config_file(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_path()?),
        }
    }

    /// Credentials for `profile_name`, with environment overrides applied
    ///
    /// When --config-file is given the environment is ignored so the file is
    /// the only source of credentials.
    pub fn resolve_credentials(&self, profile_name: Option<&str>) -> Result<ResolvedCredentials> {
        let use_env_vars = self.config_path.is_none();
        if !use_env_vars {
            info!("--config-file specified explicitly, ignoring environment variables");
        }

        let env = if use_env_vars {
            EnvOverrides::from_env()
        } else {
            EnvOverrides::default()
        };
        self.resolve_with(profile_name, env)
    }

    fn resolve_with(
        &self,
        profile_name: Option<&str>,
        env: EnvOverrides,
    ) -> Result<ResolvedCredentials> {
        if let (Some(client_id), Some(client_secret)) = (&env.client_id, &env.client_secret) {
            info!("Using Camunda Cloud credentials from environment variables");
            return Ok(ResolvedCredentials {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                api_url: env.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                auth_url: env.auth_url.unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
                audience: env.audience.unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),
            });
        }

        let (name, profile) = self.config.resolve_profile(profile_name)?;
        info!("Using profile: {}", name);

        let mut creds = profile.resolve_credentials().map_err(|e| {
            CcCtlError::Config(format!(
                "Failed to resolve credentials of profile '{}': {}",
                name, e
            ))
        })?;

        if !env.is_empty() {
            debug!("Applying environment overrides to profile '{}'", name);
        }
        if let Some(v) = env.client_id {
            creds.client_id = v;
        }
        if let Some(v) = env.client_secret {
            creds.client_secret = v;
        }
        if let Some(v) = env.api_url {
            creds.api_url = v;
        }
        if let Some(v) = env.auth_url {
            creds.auth_url = v;
        }
        if let Some(v) = env.audience {
            creds.audience = v;
        }

        if creds.client_id.is_empty() || creds.client_secret.is_empty() {
            return Err(CcCtlError::MissingCredentials);
        }

        Ok(creds)
    }

    /// A client that has already logged in
    pub async fn create_client(&self, profile_name: Option<&str>) -> Result<CamundaCloudClient> {
        let creds = self.resolve_credentials(profile_name)?;

        info!("Connecting to Camunda Cloud API: {}", creds.api_url);
        trace!("Client id: {}", creds.client_id);

        let client = CamundaCloudClient::builder()
            .api_url(&creds.api_url)
            .auth_url(&creds.auth_url)
            .audience(&creds.audience)
            .user_agent(CCCTL_USER_AGENT)
            .timeout(self.timeout)
            .build()?;

        client.login(&creds.client_id, &creds.client_secret).await?;
        debug!("Logged in");
        Ok(client)
    }
}
