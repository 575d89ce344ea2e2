//! Channel, generation, region and plan resolution over a parameter catalog
//!
//! Named lookups scan the whole list and keep the *last* match, so two
//! regions with the same name resolve to the later one.

use crate::error::{CoreError, Result};
use crate::models::{Channel, ClusterCreationRequest, ClusterParams, Generation, PlanType, Region};

/// Channel name used when no channel in the catalog is flagged as default
pub const FALLBACK_CHANNEL_NAME: &str = "Stable";

/// Plan used when none is requested
pub const DEFAULT_PLAN_NAME: &str = "Development";

/// The channel flagged `isDefault`, or the one named "Stable" if none is flagged
pub fn default_channel(params: &ClusterParams) -> Option<&Channel> {
    params
        .channels
        .iter()
        .rfind(|c| c.is_default)
        .or_else(|| {
            params
                .channels
                .iter()
                .rfind(|c| c.name == FALLBACK_CHANNEL_NAME)
        })
}

/// Last channel whose name *contains* `name`
pub fn channel_by_name<'a>(params: &'a ClusterParams, name: &str) -> Option<&'a Channel> {
    params.channels.iter().rfind(|c| c.name.contains(name))
}

/// The channel's default generation, if it carries one
pub fn default_generation(channel: &Channel) -> Option<&Generation> {
    Some(&channel.default_generation).filter(|g| !g.id.is_empty())
}

/// Last generation allowed on `channel` with exactly this name
pub fn generation_by_name<'a>(channel: &'a Channel, name: &str) -> Option<&'a Generation> {
    channel.allowed_generations.iter().rfind(|g| g.name == name)
}

/// The "Development" plan
pub fn default_plan(params: &ClusterParams) -> Option<&PlanType> {
    plan_by_name(params, DEFAULT_PLAN_NAME)
}

pub fn plan_by_name<'a>(params: &'a ClusterParams, name: &str) -> Option<&'a PlanType> {
    params.plan_types.iter().rfind(|p| p.name == name)
}

/// First region in the catalog
pub fn default_region(params: &ClusterParams) -> Option<&Region> {
    params.regions.first()
}

pub fn region_by_name<'a>(params: &'a ClusterParams, name: &str) -> Option<&'a Region> {
    params.regions.iter().rfind(|r| r.name == name)
}

/// Optional names selecting the catalog entries for a new cluster
///
/// Any field left unset (or set to an empty string) falls back to its
/// default: the default channel, that channel's default generation, the first
/// region and the "Development" plan.
///
/// # Example
///
/// ```rust
/// use ccctl_core::ClusterSelection;
///
/// let selection = ClusterSelection::new()
///     .with_region("Europe West 1D")
///     .with_plan("Development");
/// assert!(!selection.is_default());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterSelection {
    pub channel: Option<String>,
    pub generation: Option<String>,
    pub region: Option<String>,
    pub plan: Option<String>,
}

impl ClusterSelection {
    /// Selection that uses every default
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    #[must_use]
    pub fn with_generation(mut self, generation: impl Into<String>) -> Self {
        self.generation = Some(generation.into());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    /// True when no field names a specific entry
    #[must_use]
    pub fn is_default(&self) -> bool {
        [&self.channel, &self.generation, &self.region, &self.plan]
            .into_iter()
            .all(|field| requested(field).is_none())
    }

    /// Resolve every field against `params` into a creation request
    pub fn resolve(&self, cluster_name: &str, params: &ClusterParams) -> Result<ClusterCreationRequest> {
        if cluster_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Cluster name should not be empty".to_string(),
            ));
        }

        let channel = match requested(&self.channel) {
            Some(name) => channel_by_name(params, name),
            None => default_channel(params),
        }
        .ok_or_else(|| unresolved("channel", requested(&self.channel)))?;

        let generation = match requested(&self.generation) {
            Some(name) => generation_by_name(channel, name),
            None => default_generation(channel),
        }
        .ok_or_else(|| unresolved("generation", requested(&self.generation)))?;

        let region = match requested(&self.region) {
            Some(name) => region_by_name(params, name),
            None => default_region(params),
        }
        .ok_or_else(|| unresolved("region", requested(&self.region)))?;

        let plan = match requested(&self.plan) {
            Some(name) => plan_by_name(params, name),
            None => default_plan(params),
        }
        .ok_or_else(|| unresolved("plan", requested(&self.plan)))?;

        let request = ClusterCreationRequest::new(
            cluster_name,
            &channel.id,
            &generation.id,
            &region.id,
            &plan.id,
        );

        // Entries can exist in the catalog with an empty uuid
        if let Some(field) = request.missing_fields().first() {
            return Err(CoreError::Validation(format!(
                "Resolved {} has an empty id",
                field
            )));
        }

        Ok(request)
    }
}

fn requested(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn unresolved(field: &str, name: Option<&str>) -> CoreError {
    match name {
        Some(name) => CoreError::Validation(format!("No {} found with name: {}", field, name)),
        None => CoreError::Validation(format!("No default {} available", field)),
    }
}
