//! Zeebe client command implementations

use serde_json::json;
use tracing::info;

use crate::cli::{self, ZeebeClientCommands};
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{self, OutputFormat};

pub async fn handle_zeebe_client_command(
    cmd: &ZeebeClientCommands,
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    output_format: cli::OutputFormat,
    query: Option<&str>,
) -> Result<()> {
    let format = OutputFormat::resolve(output_format, OutputFormat::Json);
    let client = conn_mgr.create_client(profile_name).await?;

    match cmd {
        ZeebeClientCommands::List { cluster } => {
            let clients = client.get_zeebe_clients(cluster).await?;
            output::print_output(&clients, format, query)?;
        }
        ZeebeClientCommands::Get { cluster, client: id } => {
            let details = client.get_zeebe_client_details(cluster, id).await?;
            output::print_output(&details, format, query)?;
        }
        ZeebeClientCommands::Create { cluster, name } => {
            let created = client.create_zeebe_client(cluster, name).await?;
            if format.is_table() {
                eprintln!("Store the client secret now, it cannot be retrieved again.");
            }
            output::print_output(&created, format, query)?;
        }
        ZeebeClientCommands::Delete { cluster, client: id } => {
            client.delete_zeebe_client(cluster, id).await?;
            info!("Deleted Zeebe client {} of cluster {}", id, cluster);
            output::print_output(
                json!({ "clusterId": cluster, "clientId": id, "deleted": true }),
                format,
                query,
            )?;
        }
    }

    Ok(())
}
