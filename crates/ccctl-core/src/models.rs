//! Wire models for the Camunda Cloud management API
//!
//! Field names follow the JSON the API sends and expects. Response types
//! default every field and ignore unknown ones, so partial payloads still
//! decode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Audience requested for management API tokens
pub const DEFAULT_AUDIENCE: &str = "api.cloud.camunda.io";

// =============================================================================
// Authentication
// =============================================================================

/// Client-credentials grant sent to the token endpoint
#[derive(Clone, Serialize)]
pub struct AuthRequest {
    pub grant_type: String,
    pub audience: String,
    pub client_id: String,
    pub client_secret: String,
}

impl AuthRequest {
    /// Build a `client_credentials` grant for the given audience
    pub fn client_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            grant_type: "client_credentials".to_string(),
            audience: audience.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("grant_type", &self.grant_type)
            .field("audience", &self.audience)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Token endpoint response
#[derive(Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

// =============================================================================
// Cluster parameter catalog
// =============================================================================

/// Snapshot of everything a cluster can be created with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    pub channels: Vec<Channel>,
    #[serde(rename = "clusterPlanTypes")]
    pub plan_types: Vec<PlanType>,
    pub regions: Vec<Region>,
}

/// Release track gating which generations are offered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
    #[serde(rename = "allowedGenerations")]
    pub allowed_generations: Vec<Generation>,
    #[serde(rename = "isDefault")]
    pub is_default: bool,
    #[serde(rename = "defaultGeneration")]
    pub default_generation: Generation,
}

/// Version lineage permitted under a channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Generation {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
}

/// Sizing tier of a cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanType {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
}

/// Where a cluster is provisioned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
    pub region: String,
    pub zone: String,
}

// =============================================================================
// Clusters
// =============================================================================

/// Body of `POST /clusters`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterCreationRequest {
    pub name: String,
    #[serde(rename = "channelId")]
    pub channel_id: String,
    #[serde(rename = "generationId")]
    pub generation_id: String,
    #[serde(rename = "regionId")]
    pub region_id: String,
    #[serde(rename = "planTypeId")]
    pub plan_type_id: String,
}

impl ClusterCreationRequest {
    pub fn new(
        name: impl Into<String>,
        channel_id: impl Into<String>,
        generation_id: impl Into<String>,
        region_id: impl Into<String>,
        plan_type_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            channel_id: channel_id.into(),
            generation_id: generation_id.into(),
            region_id: region_id.into(),
            plan_type_id: plan_type_id.into(),
        }
    }

    /// Names of required fields that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("channelId", &self.channel_id),
            ("generationId", &self.generation_id),
            ("regionId", &self.region_id),
            ("planTypeId", &self.plan_type_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Response of `POST /clusters`
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterCreated {
    #[serde(rename = "clusterId")]
    pub cluster_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
    pub channel: Channel,
    pub generation: Generation,
    pub created: String,
    #[serde(rename = "k8sContext")]
    pub k8s_context: K8sContext,
    pub metadata: ClusterMetadata,
}

/// Execution context the cluster runs in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct K8sContext {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
    pub region: String,
    pub zone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterMetadata {
    pub uid: String,
    #[serde(rename = "creationTimestamp")]
    pub creation_timestamp: String,
    pub generation: i64,
    pub name: String,
    #[serde(rename = "resourceVersion")]
    pub resource_version: String,
    #[serde(rename = "selfLink")]
    pub self_link: String,
}

/// Response of `GET /clusters/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClusterStatusResponse {
    #[serde(rename = "uuid")]
    pub cluster_id: String,
    pub status: ClusterStatus,
}

/// Per-component readiness and endpoints of a cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterStatus {
    pub ready: String,
    #[serde(rename = "zeebeStatus")]
    pub zeebe_status: String,
    #[serde(rename = "zeebeUrl")]
    pub zeebe_url: String,
    #[serde(rename = "operateStatus")]
    pub operate_status: String,
    #[serde(rename = "operateUrl")]
    pub operate_url: String,
    #[serde(rename = "tasklistStatus")]
    pub tasklist_status: String,
    #[serde(rename = "tasklistUrl")]
    pub tasklist_url: String,
}

impl ClusterStatus {
    pub const NOT_FOUND: &'static str = "Not Found";

    /// Sentinel status rendered for clusters that do not exist
    pub fn not_found() -> Self {
        Self {
            ready: Self::NOT_FOUND.to_string(),
            ..Self::default()
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.ready == Self::NOT_FOUND
    }
}

// =============================================================================
// Zeebe clients
// =============================================================================

/// Entry of `GET /clusters/{id}/clients`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZeebeClient {
    #[serde(rename = "clientId")]
    pub client_id: String,
    pub created: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    pub uuid: String,
    pub name: String,
    pub internal: bool,
    pub permissions: Vec<String>,
}

/// Connection settings of one Zeebe client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZeebeClientDetails {
    pub name: String,
    #[serde(rename = "ZEEBE_ADDRESS")]
    pub zeebe_address: String,
    #[serde(rename = "ZEEBE_CLIENT_ID")]
    pub zeebe_client_id: String,
    #[serde(rename = "ZEEBE_AUTHORIZATION_SERVER_URL")]
    pub zeebe_authorization_server_url: String,
}

/// Body of `POST /clusters/{id}/clients`
#[derive(Debug, Clone, Serialize)]
pub struct ZeebeClientCreateRequest {
    #[serde(rename = "clientName")]
    pub client_name: String,
}

/// Response of `POST /clusters/{id}/clients`
///
/// The secret is only ever returned here; the API cannot show it again.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZeebeClientCreated {
    pub name: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

impl fmt::Debug for ZeebeClientCreated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZeebeClientCreated")
            .field("name", &self.name)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
