//! Cluster operations
//!
//! Creation comes in three flavours that differ only in how the catalog ids
//! are chosen. All of them refuse a name that is already taken.

use crate::client::{CamundaCloudClient, decode, require, status_error};
use crate::error::{CoreError, Result};
use crate::models::{Cluster, ClusterCreated, ClusterCreationRequest, ClusterStatus, ClusterStatusResponse};
use crate::resolver::ClusterSelection;
use reqwest::{Method, StatusCode};
use tracing::{debug, info, instrument};

impl CamundaCloudClient {
    /// All clusters visible to the logged-in client
    #[instrument(name = "get_clusters", skip(self))]
    pub async fn get_clusters(&self) -> Result<Vec<Cluster>> {
        let request = self.authorized(Method::GET, &["clusters"]).await?;
        let clusters: Vec<Cluster> = decode(self.send(request).await?, "cluster list").await?;
        debug!(count = clusters.len(), "Fetched clusters");
        Ok(clusters)
    }

    /// The first cluster named exactly `name`
    #[instrument(name = "get_cluster_by_name", skip(self))]
    pub async fn get_cluster_by_name(&self, name: &str) -> Result<Option<Cluster>> {
        let clusters = self.get_clusters().await?;
        Ok(clusters.into_iter().find(|c| c.name == name))
    }

    /// Readiness and endpoints of one cluster
    ///
    /// A 404 yields [`CoreError::NotFound`]; callers that want the
    /// placeholder record can fall back to [`ClusterStatus::not_found`].
    #[instrument(name = "get_cluster_details", skip(self))]
    pub async fn get_cluster_details(&self, cluster_id: &str) -> Result<ClusterStatus> {
        require(cluster_id, "Cluster id should not be empty")?;

        let request = self.authorized(Method::GET, &["clusters", cluster_id]).await?;
        let response = self.send(request).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::NotFound {
                resource: format!("Cluster {}", cluster_id),
            });
        }

        let details: ClusterStatusResponse = decode(response, "cluster details").await?;
        Ok(details.status)
    }

    /// Fail with [`CoreError::ClusterExists`] when `name` is taken
    #[instrument(name = "ensure_cluster_name_available", skip(self))]
    pub async fn ensure_cluster_name_available(&self, name: &str) -> Result<()> {
        if self.get_cluster_by_name(name).await?.is_some() {
            return Err(CoreError::ClusterExists {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Create a cluster using every catalog default
    #[instrument(name = "create_cluster_default", skip(self))]
    pub async fn create_cluster_default(&self, name: &str) -> Result<String> {
        self.create_cluster_with_params(name, &ClusterSelection::new())
            .await
    }

    /// Create a cluster with entries picked by name from the catalog
    ///
    /// Uses the catalog snapshot from the last
    /// [`get_cluster_params`](Self::get_cluster_params) call, fetching one if
    /// none exists.
    #[instrument(name = "create_cluster", skip(self, selection))]
    pub async fn create_cluster_with_params(
        &self,
        name: &str,
        selection: &ClusterSelection,
    ) -> Result<String> {
        require(name, "Cluster name should not be empty")?;
        self.ensure_cluster_name_available(name).await?;

        let params = self.catalog().await?;
        let request = selection.resolve(name, &params)?;
        self.post_cluster(&request).await
    }

    /// Create a cluster from explicit catalog ids
    #[instrument(name = "create_cluster_custom", skip(self, request), fields(name = %request.name))]
    pub async fn create_cluster_custom_config(
        &self,
        request: &ClusterCreationRequest,
    ) -> Result<String> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        self.ensure_cluster_name_available(&request.name).await?;
        self.post_cluster(request).await
    }

    async fn post_cluster(&self, request: &ClusterCreationRequest) -> Result<String> {
        debug!(
            channel_id = %request.channel_id,
            generation_id = %request.generation_id,
            region_id = %request.region_id,
            plan_type_id = %request.plan_type_id,
            "Creating cluster"
        );

        let builder = self.authorized(Method::POST, &["clusters"]).await?.json(request);
        let created: ClusterCreated = decode(self.send(builder).await?, "cluster creation").await?;

        info!(cluster_id = %created.cluster_id, "Cluster created");
        Ok(created.cluster_id)
    }

    /// Delete a cluster; only HTTP 200 counts as success
    #[instrument(name = "delete_cluster", skip(self))]
    pub async fn delete_cluster(&self, cluster_id: &str) -> Result<()> {
        require(cluster_id, "Cluster id should not be empty")?;

        let request = self
            .authorized(Method::DELETE, &["clusters", cluster_id])
            .await?;
        let response = self.send(request).await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        info!("Cluster deleted");
        Ok(())
    }
}
