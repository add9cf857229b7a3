//! User group wire model

use super::entity::Entity;
use serde::{Deserialize, Serialize};

/// A named set of permissions shared by its members
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub permissions: Vec<String>,

    /// Member e-mail addresses, maintained by the server
    #[serde(default, skip_serializing)]
    pub users: Vec<String>,
}

impl Entity for UserGroup {
    const KIND: &'static str = "User Group";
    const BASE_PATH: &'static str = "/api/v2/usergroup";
    const SEARCH_TYPE: &'static str = "usergroup";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}
