//! `wavefront_user_group`

use super::common::{set_to_vec, vec_to_set};
use super::schema::{Attribute, AttributeType, Block, Schema};
use super::{require_id, Resource, ResourceState};
use crate::wavefront::user_group::UserGroup;
use crate::wavefront::WavefrontClient;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserGroupState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub permissions: BTreeSet<String>,
    /// Member e-mail addresses, maintained by the server
    pub members: BTreeSet<String>,
}

impl ResourceState for UserGroupState {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

impl UserGroupState {
    pub fn build(&self) -> UserGroup {
        UserGroup {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            permissions: set_to_vec(&self.permissions),
            users: Vec::new(),
        }
    }

    pub fn flatten(group: &UserGroup) -> Self {
        Self {
            id: group.id.clone(),
            name: group.name.clone(),
            description: group.description.clone(),
            permissions: vec_to_set(&group.permissions),
            members: vec_to_set(&group.users),
        }
    }
}

pub struct UserGroupResource;

#[async_trait]
impl Resource for UserGroupResource {
    type State = UserGroupState;

    fn type_name(&self) -> &'static str {
        "wavefront_user_group"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            1,
            Block::new()
                .attribute("name", Attribute::required(AttributeType::String))
                .attribute("description", Attribute::required(AttributeType::String))
                .attribute(
                    "permissions",
                    Attribute::required(AttributeType::set(AttributeType::String)),
                )
                .attribute(
                    "members",
                    Attribute::computed(AttributeType::set(AttributeType::String))
                        .describe("E-mail addresses of the group's members"),
                ),
        )
    }

    async fn create(
        &self,
        client: &WavefrontClient,
        state: UserGroupState,
    ) -> Result<UserGroupState> {
        let mut group = state.build();
        client
            .user_groups()
            .create(&mut group)
            .await
            .with_context(|| format!("failed to create user group {}", state.name))?;

        // Members are only reported once the group exists
        let created = UserGroupState::flatten(&group);
        match self.read(client, created.clone()).await? {
            Some(state) => Ok(state),
            None => Ok(created),
        }
    }

    async fn read(
        &self,
        client: &WavefrontClient,
        state: UserGroupState,
    ) -> Result<Option<UserGroupState>> {
        let id = require_id(&state, self.type_name())?;
        let group = client
            .user_groups()
            .fetch(id)
            .await
            .with_context(|| format!("unable to find user group {}", id))?;
        Ok(group.as_ref().map(UserGroupState::flatten))
    }

    async fn update(
        &self,
        client: &WavefrontClient,
        state: UserGroupState,
    ) -> Result<UserGroupState> {
        let id = require_id(&state, self.type_name())?;
        if client
            .user_groups()
            .fetch(id)
            .await
            .with_context(|| format!("unable to find user group {}", id))?
            .is_none()
        {
            bail!("user group {} not found", id);
        }

        let mut group = state.build();
        client
            .user_groups()
            .update(&mut group)
            .await
            .with_context(|| format!("unable to update user group {}", id))?;
        Ok(UserGroupState::flatten(&group))
    }

    async fn delete(&self, client: &WavefrontClient, state: UserGroupState) -> Result<()> {
        let id = require_id(&state, self.type_name())?;
        let Some(mut group) = client
            .user_groups()
            .fetch(id)
            .await
            .with_context(|| format!("unable to find user group {}", id))?
        else {
            bail!("user group {} not found", id);
        };

        client
            .user_groups()
            .delete(&mut group)
            .await
            .with_context(|| format!("unable to delete user group {}", id))
    }

    async fn exists(&self, client: &WavefrontClient, state: &UserGroupState) -> Result<bool> {
        let id = require_id(state, self.type_name())?;
        let group = client
            .user_groups()
            .find_by_id(id)
            .await
            .with_context(|| format!("error while searching for user group {}", id))?;
        Ok(group.is_some())
    }
}
