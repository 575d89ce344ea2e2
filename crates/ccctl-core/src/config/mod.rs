//! Configuration and profile management for ccctl
//!
//! # Features
//!
//! - Multiple named profiles, each holding one set of client credentials
//! - Optional OS keyring storage for secrets (`secure-storage` feature)
//! - Environment variable expansion in config files
//! - Platform-specific config file locations

// The config subsystem keeps its `Config` type in a file of the same name
#![allow(clippy::module_inception)]

pub mod config;
pub mod credential;
pub mod error;

pub use config::{
    Config, ENV_API_URL, ENV_AUDIENCE, ENV_AUTH_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET,
    ENV_CONFIG_FILE, ENV_PROFILE, ENV_TRACING_URL, Profile, ResolvedCredentials,
};
pub use credential::{CredentialStorage, CredentialStore};
pub use error::{ConfigError, Result};
