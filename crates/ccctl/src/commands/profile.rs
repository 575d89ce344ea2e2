//! Profile management command implementations

use crate::cli::{self, ProfileCommands};
use crate::connection::ConnectionManager;
use crate::error::{CcCtlError, Result};
use crate::output::{self, OutputFormat};
use ccctl_core::config::{CredentialStore, Profile};
use colored::Colorize;
use serde_json::json;
use tracing::{debug, info};

pub async fn handle_profile_command(
    profile_cmd: &ProfileCommands,
    conn_mgr: &ConnectionManager,
    output_format: cli::OutputFormat,
) -> Result<()> {
    use ProfileCommands::*;

    // Profiles read best as text; structured output only on request
    let format = OutputFormat::resolve(output_format, OutputFormat::Table);

    match profile_cmd {
        List => handle_list(conn_mgr, format),
        Path => handle_path(conn_mgr, format),
        Show { name } => handle_show(conn_mgr, name, format),
        Set {
            name,
            client_id,
            client_secret,
            api_url,
            auth_url,
            audience,
            #[cfg(feature = "secure-storage")]
            use_keyring,
        } => {
            let store = {
                #[cfg(feature = "secure-storage")]
                {
                    if *use_keyring {
                        CredentialStore::keyring()
                    } else {
                        CredentialStore::plaintext()
                    }
                }
                #[cfg(not(feature = "secure-storage"))]
                {
                    CredentialStore::plaintext()
                }
            };

            let profile = Profile {
                client_id: client_id.clone(),
                client_secret: store.store(&format!("{}-client-secret", name), client_secret)?,
                api_url: api_url.clone(),
                auth_url: auth_url.clone(),
                audience: audience.clone(),
            };
            handle_set(conn_mgr, name, profile)
        }
        Remove { name } => handle_remove(conn_mgr, name),
        Default { name } => handle_default(conn_mgr, name),
    }
}

fn handle_list(conn_mgr: &ConnectionManager, format: OutputFormat) -> Result<()> {
    let profiles = conn_mgr.config.list_profiles();
    let default = conn_mgr.config.default_profile.as_deref();
    debug!("Found {} profiles", profiles.len());

    if !format.is_table() {
        let list: Vec<_> = profiles
            .iter()
            .map(|(name, profile)| {
                json!({
                    "name": name,
                    "is_default": default == Some(name.as_str()),
                    "api_url": profile.api_url,
                })
            })
            .collect();
        let data = json!({
            "config_path": conn_mgr.config_file().ok(),
            "profiles": list,
            "count": profiles.len(),
        });
        output::print_output(&data, format, None)?;
        return Ok(());
    }

    if let Ok(path) = conn_mgr.config_file() {
        println!("Configuration file: {}", path.display());
        println!();
    }

    if profiles.is_empty() {
        println!("No profiles configured.");
        println!("Use 'ccctl profile set' to create a profile.");
        return Ok(());
    }

    for (name, profile) in profiles {
        if default == Some(name.as_str()) {
            println!("  {} {}", name.bold().cyan(), "(default)".green());
        } else {
            println!("  {}", name.bold().cyan());
        }
        println!("    {} {}", "API:".dimmed(), profile.api_url);
    }
    Ok(())
}

fn handle_path(conn_mgr: &ConnectionManager, format: OutputFormat) -> Result<()> {
    let path = conn_mgr.config_file()?;
    if format.is_table() {
        println!("{}", path.display());
    } else {
        output::print_output(json!({ "config_path": path }), format, None)?;
    }
    Ok(())
}

fn handle_show(conn_mgr: &ConnectionManager, name: &str, format: OutputFormat) -> Result<()> {
    let profile = conn_mgr
        .config
        .profiles
        .get(name)
        .ok_or_else(|| CcCtlError::ProfileNotFound { name: name.into() })?;
    let is_default = conn_mgr.config.default_profile.as_deref() == Some(name);
    let secret = if profile.has_keyring_secret() {
        "(stored in keyring)"
    } else {
        "(stored in config file)"
    };

    if !format.is_table() {
        let data = json!({
            "name": name,
            "is_default": is_default,
            "client_id": profile.client_id,
            "client_secret": secret,
            "api_url": profile.api_url,
            "auth_url": profile.auth_url,
            "audience": profile.audience,
        });
        output::print_output(&data, format, None)?;
        return Ok(());
    }

    println!("Profile: {}{}", name.bold(), if is_default { " (default)" } else { "" });
    println!("  Client ID:     {}", profile.client_id);
    println!("  Client secret: {}", secret);
    println!("  API URL:       {}", profile.api_url);
    println!("  Auth URL:      {}", profile.auth_url);
    println!("  Audience:      {}", profile.audience);
    Ok(())
}

fn handle_set(conn_mgr: &ConnectionManager, name: &str, profile: Profile) -> Result<()> {
    let mut mgr = conn_mgr.clone();
    let first = mgr.config.profiles.is_empty();
    mgr.config.set_profile(name.to_string(), profile);

    // The first profile becomes the default
    if first && mgr.config.default_profile.is_none() {
        mgr.config.default_profile = Some(name.to_string());
    }
    mgr.save_config()?;

    info!("Saved profile '{}'", name);
    println!("Profile '{}' saved.", name);
    Ok(())
}

fn handle_remove(conn_mgr: &ConnectionManager, name: &str) -> Result<()> {
    let mut mgr = conn_mgr.clone();
    let profile = mgr
        .config
        .remove_profile(name)
        .ok_or_else(|| CcCtlError::ProfileNotFound { name: name.into() })?;

    CredentialStore::default().forget(&profile.client_secret)?;
    mgr.save_config()?;

    println!("Profile '{}' removed.", name);
    Ok(())
}

fn handle_default(conn_mgr: &ConnectionManager, name: &str) -> Result<()> {
    if !conn_mgr.config.profiles.contains_key(name) {
        return Err(CcCtlError::ProfileNotFound { name: name.into() });
    }

    let mut mgr = conn_mgr.clone();
    mgr.config.default_profile = Some(name.to_string());
    mgr.save_config()?;

    println!("Default profile set to '{}'.", name);
    Ok(())
}
