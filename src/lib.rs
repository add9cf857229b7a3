//! Terraform provider for Wavefront
//!
//! Exposes Wavefront alerts, alert targets, dashboards, derived metrics, users
//! and user groups as resources. The [`wavefront`] gateway talks to the REST
//! API, [`resource`] maps local state to API entities, and [`provider`] plus
//! [`plugin`] answer the host's requests.

pub mod config;
pub mod plugin;
pub mod provider;
pub mod resource;
pub mod wavefront;

/// Version injected at compile time via WAVEFRONT_PROVIDER_VERSION (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("WAVEFRONT_PROVIDER_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
