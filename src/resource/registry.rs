//! Resource Registry
//!
//! The single table mapping Terraform resource type names to their
//! implementations. Built on first access and shared by every provider.

use super::alert::AlertResource;
use super::alert_target::AlertTargetResource;
use super::dashboard::DashboardResource;
use super::dashboard_json::DashboardJsonResource;
use super::derived_metric::DerivedMetricResource;
use super::user::UserResource;
use super::user_group::UserGroupResource;
use super::DynamicResource;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Resource implementations keyed by type name
pub struct ResourceRegistry {
    resources: BTreeMap<&'static str, Box<dyn DynamicResource>>,
}

impl ResourceRegistry {
    fn new() -> Self {
        let all: Vec<Box<dyn DynamicResource>> = vec![
            Box::new(AlertResource),
            Box::new(AlertTargetResource),
            Box::new(DashboardResource),
            Box::new(DashboardJsonResource),
            Box::new(DerivedMetricResource),
            Box::new(UserResource),
            Box::new(UserGroupResource),
        ];

        let resources = all
            .into_iter()
            .map(|resource| (resource.type_name(), resource))
            .collect();

        Self { resources }
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynamicResource> {
        self.resources.get(name).map(|resource| resource.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }
}

static REGISTRY: OnceLock<ResourceRegistry> = OnceLock::new();

/// Get the resource registry (built on first access)
pub fn get_registry() -> &'static ResourceRegistry {
    REGISTRY.get_or_init(ResourceRegistry::new)
}

/// Get a resource implementation by type name
pub fn get_resource(name: &str) -> Option<&'static dyn DynamicResource> {
    get_registry().get(name)
}

/// Get all resource type names, sorted
pub fn get_all_resource_names() -> Vec<&'static str> {
    get_registry().names().collect()
}
