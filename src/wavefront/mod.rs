//! Wavefront API interaction module
//!
//! The entity gateway: a small REST client that turns one typed CRUD or
//! search operation into one HTTP request and decodes the JSON response.
//!
//! # Module Structure
//!
//! - [`client`] - Main client holding the address, token and HTTP transport
//! - [`http`] - HTTP verb dispatch and response handling
//! - [`entity`] - Generic get/find/create/update/delete for every family
//! - [`search`] - Offset-paged search with a page cap
//! - [`error`] - Typed gateway errors
//! - one module per entity family with its wire model
//!
//! # Example
//!
//! ```ignore
//! use terraform_provider_wavefront::wavefront::WavefrontClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = WavefrontClient::new("example.wavefront.com", "token")?;
//!     let alerts = client.alerts().find(vec![]).await?;
//!     Ok(())
//! }
//! ```

pub mod alert;
pub mod client;
pub mod dashboard;
pub mod derived_metric;
pub mod entity;
pub mod error;
pub mod http;
pub mod search;
pub mod target;
pub mod user;
pub mod user_group;

pub use client::WavefrontClient;
pub use entity::{Entities, Entity};
pub use error::ApiError;
pub use search::{MatchingMethod, SearchCondition};

use serde::{Deserialize, Serialize};

/// Free-text tags as the API nests them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tags {
    #[serde(default)]
    pub customer_tags: Vec<String>,
}

impl Tags {
    pub fn new<I: IntoIterator<Item = String>>(tags: I) -> Self {
        Self {
            customer_tags: tags.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.customer_tags.is_empty()
    }
}
