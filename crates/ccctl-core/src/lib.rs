//! # ccctl-core
//!
//! Client library for the Camunda Cloud cluster management API.
//!
//! The crate covers the whole lifecycle a provisioning script needs:
//!
//! - **Login** with client credentials ([`CamundaCloudClient::login`])
//! - **Parameter catalog** of channels, generations, regions and plans
//! - **Clusters**: list, look up, inspect, create and delete
//! - **Zeebe clients**: list, inspect, create and delete per cluster
//! - **Profiles**: TOML configuration with optional keyring-backed secrets
//!
//! ## Creating a cluster
//!
//! ```rust,no_run
//! use ccctl_core::{CamundaCloudClient, ClusterSelection};
//!
//! # async fn run() -> ccctl_core::Result<()> {
//! let client = CamundaCloudClient::builder().build()?;
//! client.login("client-id", "client-secret").await?;
//! client.get_cluster_params().await?;
//!
//! let selection = ClusterSelection::new().with_region("Europe West 1D");
//! let id = client.create_cluster_with_params("orders", &selection).await?;
//! println!("{}", client.get_cluster_details(&id).await?.ready);
//! # Ok(())
//! # }
//! ```
//!
//! Selection names that are left out fall back to the catalog defaults; see
//! [`resolver`] for the exact rules.

pub mod auth;
pub mod client;
mod clusters;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
mod zeebe;

pub use client::{CamundaCloudClient, CamundaCloudClientBuilder};
pub use error::{CoreError, Result};
pub use models::{
    Channel, Cluster, ClusterCreationRequest, ClusterParams, ClusterStatus, Generation, PlanType,
    Region, ZeebeClient, ZeebeClientCreated, ZeebeClientDetails,
};
pub use resolver::ClusterSelection;
