//! Error types for ccctl

use ccctl_core::CoreError;
use ccctl_core::config::ConfigError;
use colored::Colorize;
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// Produces structured output like:
/// ```text
/// error: No credentials found
///   Set CC_CLIENT_ID and CC_CLIENT_SECRET or configure a profile.
///
///   tip: create a profile:
///       ccctl profile set prod --client-id <id> --client-secret <secret>
/// ```
pub struct CliDiagnostic {
    message: String,
    detail: Option<String>,
    tips: Vec<(String, Vec<String>)>,
}

impl CliDiagnostic {
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            tips: Vec::new(),
        }
    }

    pub fn detail(mut self, text: &str) -> Self {
        self.detail = Some(text.to_string());
        self
    }

    /// Add a tip with optional example commands.
    pub fn tip(mut self, description: &str, commands: &[&str]) -> Self {
        self.tips.push((
            description.to_string(),
            commands.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        if let Some(detail) = &self.detail {
            eprintln!("  {}", detail);
        }

        for (description, commands) in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
            for cmd in commands {
                eprintln!("      {}", cmd);
            }
        }
    }
}

/// Main error type for the ccctl application
#[derive(Error, Debug)]
pub enum CcCtlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No credentials found")]
    MissingCredentials,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },
}

pub type Result<T> = std::result::Result<T, CcCtlError>;

impl CcCtlError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            CcCtlError::ProfileNotFound { name } => vec![
                "List available profiles: ccctl profile list".to_string(),
                format!(
                    "Create profile '{}': ccctl profile set {} --client-id <id> --client-secret <secret>",
                    name, name
                ),
            ],
            CcCtlError::MissingCredentials => vec![
                "Export CC_CLIENT_ID and CC_CLIENT_SECRET with the credentials of a Camunda Cloud API client".to_string(),
                "Or create a profile: ccctl profile set <name> --client-id <id> --client-secret <secret>".to_string(),
                "API clients are created in the Camunda Cloud console under Organization Settings > Cloud Management API".to_string(),
            ],
            CcCtlError::AuthenticationFailed { .. } => vec![
                "Check your credentials: ccctl profile show <profile>".to_string(),
                "Verify the client id and secret are still valid in the console".to_string(),
                "Ensure the auth URL and audience match the API URL".to_string(),
            ],
            CcCtlError::ConnectionError { .. } => vec![
                "Check network connectivity".to_string(),
                "Verify the API URL is correct: ccctl profile show <profile>".to_string(),
                "Increase the request timeout with --timeout".to_string(),
            ],
            CcCtlError::NotFound { .. } => vec![
                "List clusters to find the correct id: ccctl clusters list".to_string(),
                "Check that you're using the correct profile".to_string(),
            ],
            CcCtlError::InvalidInput { message } if message.contains("already exists") => vec![
                "Pick another name or delete the existing cluster first".to_string(),
            ],
            CcCtlError::InvalidInput { message } if message.contains("found with name") => vec![
                "List the valid names: ccctl clusters params".to_string(),
            ],
            CcCtlError::InvalidInput { .. } => vec![
                "Check the command syntax: ccctl <command> --help".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        let mut diag = CliDiagnostic::error(&format!("{}", self));

        if matches!(self, CcCtlError::MissingCredentials) {
            diag = diag.detail("Set CC_CLIENT_ID and CC_CLIENT_SECRET or configure a profile.");
        }

        for suggestion in self.suggestions() {
            diag = diag.tip(&suggestion, &[]);
        }

        diag.print();
    }
}

impl From<CoreError> for CcCtlError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotAuthenticated
            | CoreError::AuthenticationFailed { .. }
            | CoreError::Unauthorized { .. } => CcCtlError::AuthenticationFailed {
                message: err.to_string(),
            },
            CoreError::Transport(ref e) => CcCtlError::ConnectionError {
                message: e.to_string(),
            },
            CoreError::NotFound { .. } => CcCtlError::NotFound {
                message: err.to_string(),
            },
            CoreError::Validation(message) => CcCtlError::InvalidInput { message },
            CoreError::ClusterExists { .. } => CcCtlError::InvalidInput {
                message: err.to_string(),
            },
            CoreError::Config(message) => CcCtlError::Config(message),
            CoreError::Api { .. } | CoreError::Decode { .. } => CcCtlError::ApiError {
                message: err.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CcCtlError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name } => CcCtlError::ProfileNotFound { name },
            ConfigError::NoProfiles { .. } => CcCtlError::MissingCredentials,
            other => CcCtlError::Config(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CcCtlError {
    fn from(err: serde_json::Error) -> Self {
        CcCtlError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<anyhow::Error> for CcCtlError {
    fn from(err: anyhow::Error) -> Self {
        CcCtlError::OutputError {
            message: format!("{:#}", err),
        }
    }
}
