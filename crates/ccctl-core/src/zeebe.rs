//! Zeebe client credential operations scoped to a cluster

use crate::client::{CamundaCloudClient, decode, require, status_error};
use crate::error::Result;
use crate::models::{ZeebeClient, ZeebeClientCreateRequest, ZeebeClientCreated, ZeebeClientDetails};
use reqwest::{Method, StatusCode};
use tracing::{debug, info, instrument};

impl CamundaCloudClient {
    #[instrument(name = "get_zeebe_clients", skip(self))]
    pub async fn get_zeebe_clients(&self, cluster_id: &str) -> Result<Vec<ZeebeClient>> {
        require(cluster_id, "Cluster id should not be empty")?;

        let request = self
            .authorized(Method::GET, &["clusters", cluster_id, "clients"])
            .await?;
        let clients: Vec<ZeebeClient> = decode(self.send(request).await?, "zeebe client list").await?;
        debug!(count = clients.len(), "Fetched zeebe clients");
        Ok(clients)
    }

    /// Connection details for one client (never includes the secret)
    #[instrument(name = "get_zeebe_client_details", skip(self))]
    pub async fn get_zeebe_client_details(
        &self,
        cluster_id: &str,
        client_id: &str,
    ) -> Result<ZeebeClientDetails> {
        require(cluster_id, "Cluster id should not be empty")?;
        require(client_id, "Client id should not be empty")?;

        let request = self
            .authorized(Method::GET, &["clusters", cluster_id, "clients", client_id])
            .await?;
        decode(self.send(request).await?, "zeebe client details").await
    }

    /// Create a client; the returned secret is only ever shown once
    #[instrument(name = "create_zeebe_client", skip(self))]
    pub async fn create_zeebe_client(
        &self,
        cluster_id: &str,
        client_name: &str,
    ) -> Result<ZeebeClientCreated> {
        require(cluster_id, "Cluster id should not be empty")?;
        require(client_name, "Client name should not be empty")?;

        let payload = ZeebeClientCreateRequest {
            client_name: client_name.to_string(),
        };
        let request = self
            .authorized(Method::POST, &["clusters", cluster_id, "clients"])
            .await?
            .json(&payload);
        let created: ZeebeClientCreated =
            decode(self.send(request).await?, "zeebe client creation").await?;

        info!(client_id = %created.client_id, "Zeebe client created");
        Ok(created)
    }

    /// Delete a client; only HTTP 200 counts as success
    #[instrument(name = "delete_zeebe_client", skip(self))]
    pub async fn delete_zeebe_client(&self, cluster_id: &str, client_id: &str) -> Result<()> {
        require(cluster_id, "Cluster id should not be empty")?;
        require(client_id, "Client id should not be empty")?;

        let request = self
            .authorized(Method::DELETE, &["clusters", cluster_id, "clients", client_id])
            .await?;
        let response = self.send(request).await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        info!("Zeebe client deleted");
        Ok(())
    }
}
