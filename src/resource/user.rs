//! `wavefront_user`
//!
//! Users are identified by e-mail address. Changing the address replaces the
//! user. `user_groups` may be left to the server, in which case updates keep
//! whatever groups the user already has.

use super::common::{set_to_vec, vec_to_set};
use super::schema::{Attribute, AttributeType, Block, Schema};
use super::{require_id, Resource, ResourceState};
use crate::wavefront::user::{NewUserRequest, User};
use crate::wavefront::WavefrontClient;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    /// Legacy permission names
    pub groups: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_groups: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer: String,
}

impl ResourceState for UserState {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

impl UserState {
    pub fn new_user_request(&self) -> NewUserRequest {
        NewUserRequest {
            email_address: self.email.clone(),
            groups: set_to_vec(&self.groups),
            user_groups: self
                .user_groups
                .as_ref()
                .map(set_to_vec)
                .unwrap_or_default(),
        }
    }

    /// Overlay the configured fields onto the server's user
    pub fn apply_to(&self, user: &mut User) {
        user.groups = set_to_vec(&self.groups);
        if let Some(user_groups) = &self.user_groups {
            user.user_groups = set_to_vec(user_groups);
        }
    }

    pub fn flatten(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.id.clone().unwrap_or_default(),
            groups: vec_to_set(&user.groups),
            user_groups: Some(vec_to_set(&user.user_groups)),
            customer: user.customer.clone().unwrap_or_default(),
        }
    }
}

pub struct UserResource;

#[async_trait]
impl Resource for UserResource {
    type State = UserState;

    fn type_name(&self) -> &'static str {
        "wavefront_user"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            1,
            Block::new()
                .attribute(
                    "email",
                    Attribute::required(AttributeType::String).force_new(),
                )
                .attribute(
                    "groups",
                    Attribute::optional(AttributeType::set(AttributeType::String))
                        .describe("Permissions granted directly to the user"),
                )
                .attribute(
                    "user_groups",
                    Attribute::optional_computed(AttributeType::set(AttributeType::String))
                        .describe("Ids of the user groups the user belongs to"),
                )
                .attribute("customer", Attribute::computed(AttributeType::String)),
        )
    }

    async fn create(&self, client: &WavefrontClient, state: UserState) -> Result<UserState> {
        let mut user = client
            .users()
            .create_user(&state.new_user_request(), true)
            .await
            .with_context(|| format!("failed to create new user {}", state.email))?;

        if user.id.is_none() {
            user.id = Some(state.email.clone());
        }
        Ok(UserState::flatten(&user))
    }

    async fn read(&self, client: &WavefrontClient, state: UserState) -> Result<Option<UserState>> {
        let id = require_id(&state, self.type_name())?;
        let user = client
            .users()
            .find_by_id(id)
            .await
            .with_context(|| format!("error finding user {}", id))?;
        Ok(user.as_ref().map(UserState::flatten))
    }

    async fn update(&self, client: &WavefrontClient, state: UserState) -> Result<UserState> {
        let id = require_id(&state, self.type_name())?;
        let Some(mut user) = client
            .users()
            .find_by_id(id)
            .await
            .with_context(|| format!("error finding user {}", id))?
        else {
            bail!("user {} not found", id);
        };

        user.id = Some(id.to_string());
        state.apply_to(&mut user);
        client
            .users()
            .update(&mut user)
            .await
            .with_context(|| format!("error updating user {}", id))?;
        Ok(UserState::flatten(&user))
    }

    async fn delete(&self, client: &WavefrontClient, state: UserState) -> Result<()> {
        let id = require_id(&state, self.type_name())?;
        let Some(mut user) = client
            .users()
            .find_by_id(id)
            .await
            .with_context(|| format!("error finding user {}", id))?
        else {
            bail!("user {} not found", id);
        };

        client
            .users()
            .delete(&mut user)
            .await
            .with_context(|| format!("error deleting user {}", id))
    }

    async fn exists(&self, client: &WavefrontClient, state: &UserState) -> Result<bool> {
        let id = require_id(state, self.type_name())?;
        let user = client
            .users()
            .find_by_id(id)
            .await
            .with_context(|| format!("error finding user {}", id))?;
        Ok(user.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> UserState {
        UserState {
            email: "jane@example.com".to_string(),
            groups: ["agent_management".to_string(), "alerts_management".to_string()]
                .into_iter()
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_user_request() {
        let request = state().new_user_request();
        assert_eq!(request.email_address, "jane@example.com");
        assert_eq!(request.groups, vec!["agent_management", "alerts_management"]);
        assert!(request.user_groups.is_empty());
    }

    #[test]
    fn test_unset_user_groups_keep_server_value() {
        let mut user = User {
            id: Some("jane@example.com".to_string()),
            user_groups: vec!["everyone".to_string()],
            ..Default::default()
        };
        state().apply_to(&mut user);
        assert_eq!(user.user_groups, vec!["everyone"]);

        let configured = UserState {
            user_groups: Some(BTreeSet::new()),
            ..state()
        };
        configured.apply_to(&mut user);
        assert!(user.user_groups.is_empty());
    }

    #[test]
    fn test_flatten_fills_computed_fields() {
        let user = User {
            id: Some("jane@example.com".to_string()),
            customer: Some("acme".to_string()),
            groups: vec!["browse".to_string()],
            user_groups: vec!["g-1".to_string()],
        };
        let state = UserState::flatten(&user);
        assert_eq!(state.email, "jane@example.com");
        assert_eq!(state.id.as_deref(), Some("jane@example.com"));
        assert_eq!(state.customer, "acme");
        assert!(state.user_groups.unwrap().contains("g-1"));
    }
}
