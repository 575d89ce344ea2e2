//! Cluster command implementations

use ccctl_core::models::{Cluster, ClusterCreationRequest, ClusterStatus};
use ccctl_core::{CamundaCloudClient, ClusterSelection, CoreError};
use chrono::DateTime;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::cli::{self, ClusterCommands, ClusterCreateArgs};
use crate::connection::ConnectionManager;
use crate::error::{CcCtlError, Result};
use crate::output::{self, OutputFormat};

pub async fn handle_cluster_command(
    cmd: &ClusterCommands,
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    output_format: cli::OutputFormat,
    query: Option<&str>,
) -> Result<()> {
    let format = OutputFormat::resolve(output_format, OutputFormat::Json);
    let client = conn_mgr.create_client(profile_name).await?;

    match cmd {
        ClusterCommands::List => {
            let clusters = client.get_clusters().await?;
            debug!("Found {} clusters", clusters.len());
            if format.is_table() && query.is_none() {
                output::print_output(cluster_rows(&clusters), format, None)?;
            } else {
                output::print_output(&clusters, format, query)?;
            }
        }
        ClusterCommands::Get { name: Some(name), .. } => {
            let cluster = client.get_cluster_by_name(name).await?.ok_or_else(|| {
                CcCtlError::NotFound {
                    message: format!("No cluster named '{}'", name),
                }
            })?;
            output::print_output(&cluster, format, query)?;
        }
        ClusterCommands::Get { id: Some(id), .. } | ClusterCommands::Status { id } => {
            let status = cluster_status(&client, id).await?;
            output::print_output(&status, format, query)?;
        }
        ClusterCommands::Get { .. } => {
            return Err(CcCtlError::InvalidInput {
                message: "Either --name or --id is required".to_string(),
            });
        }
        ClusterCommands::Params => {
            let params = client.get_cluster_params().await?;
            output::print_output(&params, format, query)?;
        }
        ClusterCommands::Create(args) => {
            let cluster_id = create_cluster(&client, args).await?;
            output::print_output(json!({ "clusterId": cluster_id }), format, query)?;
        }
        ClusterCommands::Delete { id } => {
            client.delete_cluster(id).await?;
            info!("Deleted cluster {}", id);
            output::print_output(json!({ "clusterId": id, "deleted": true }), format, query)?;
        }
    }

    Ok(())
}

/// Status of a cluster, with an unknown id shown as the "Not Found" status
async fn cluster_status(client: &CamundaCloudClient, id: &str) -> Result<ClusterStatus> {
    match client.get_cluster_details(id).await {
        Ok(status) => Ok(status),
        Err(CoreError::NotFound { .. }) => Ok(ClusterStatus::not_found()),
        Err(e) => Err(e.into()),
    }
}

/// How `clusters create` should build its request
#[derive(Debug, PartialEq)]
enum CreateMode {
    Default,
    WithParams(ClusterSelection),
    Custom(ClusterCreationRequest),
}

fn create_mode(args: &ClusterCreateArgs) -> Result<CreateMode> {
    let ids = [
        &args.channel_id,
        &args.generation_id,
        &args.region_id,
        &args.plan_id,
    ];

    if let [Some(channel), Some(generation), Some(region), Some(plan)] = ids {
        return Ok(CreateMode::Custom(ClusterCreationRequest::new(
            &args.name, channel, generation, region, plan,
        )));
    }
    if ids.iter().any(|id| id.is_some()) {
        return Err(CcCtlError::InvalidInput {
            message: "--channel-id, --generation-id, --region-id and --plan-id must be given together"
                .to_string(),
        });
    }

    let mut selection = ClusterSelection::new();
    if let Some(channel) = &args.channel {
        selection = selection.with_channel(channel);
    }
    if let Some(generation) = &args.generation {
        selection = selection.with_generation(generation);
    }
    if let Some(region) = &args.region {
        selection = selection.with_region(region);
    }
    if let Some(plan) = &args.plan {
        selection = selection.with_plan(plan);
    }

    if args.default || selection.is_default() {
        Ok(CreateMode::Default)
    } else {
        Ok(CreateMode::WithParams(selection))
    }
}

async fn create_cluster(client: &CamundaCloudClient, args: &ClusterCreateArgs) -> Result<String> {
    let cluster_id = match create_mode(args)? {
        CreateMode::Default => client.create_cluster_default(&args.name).await?,
        CreateMode::WithParams(selection) => {
            client
                .create_cluster_with_params(&args.name, &selection)
                .await?
        }
        CreateMode::Custom(request) => client.create_cluster_custom_config(&request).await?,
    };
    info!("Created cluster {} ({})", args.name, cluster_id);
    Ok(cluster_id)
}

/// Compact rows for the cluster table
fn cluster_rows(clusters: &[Cluster]) -> Vec<Value> {
    clusters
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "name": c.name,
                "channel": c.channel.name,
                "generation": c.generation.name,
                "region": c.k8s_context.name,
                "created": format_created(&c.created),
            })
        })
        .collect()
}

fn format_created(created: &str) -> String {
    DateTime::parse_from_rfc3339(created)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| created.to_string())
}
