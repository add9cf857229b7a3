//! User wire model

use super::entity::{decode_response, Entities, Entity};
use super::error::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// A Wavefront user. The identifier is the user's e-mail address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, rename = "identifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Organisation the user belongs to (read-only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    /// Legacy permission names
    #[serde(default)]
    pub groups: Vec<String>,

    /// Ids of the user groups the user is a member of
    #[serde(default, deserialize_with = "deserialize_group_ids")]
    pub user_groups: Vec<String>,
}

impl Entity for User {
    const KIND: &'static str = "User";
    const BASE_PATH: &'static str = "/api/v2/user";
    const SEARCH_TYPE: &'static str = "user";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

/// Body of a user creation request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRequest {
    pub email_address: String,
    pub groups: Vec<String>,
    pub user_groups: Vec<String>,
}

/// The API returns user groups either as bare ids or as full objects
#[derive(Deserialize)]
#[serde(untagged)]
enum UserGroupRef {
    Id(String),
    Object { id: String },
}

fn deserialize_group_ids<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = Option::<Vec<UserGroupRef>>::deserialize(deserializer)?;
    Ok(refs
        .unwrap_or_default()
        .into_iter()
        .map(|group| match group {
            UserGroupRef::Id(id) => id,
            UserGroupRef::Object { id } => id,
        })
        .collect())
}

impl Entities<'_, User> {
    /// Invite a new user. Users are created through a dedicated request
    /// shape rather than the user representation itself.
    pub async fn create_user(&self, request: &NewUserRequest, send_email: bool) -> Result<User> {
        let body = serde_json::to_value(request)?;
        let response = self
            .client
            .post(
                User::BASE_PATH,
                &[("sendEmail", send_email.to_string())],
                Some(&body),
            )
            .await?;
        decode_response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_groups_decode_from_objects_or_ids() {
        let user: User = serde_json::from_value(json!({
            "identifier": "jane@example.com",
            "customer": "acme",
            "groups": ["agent_management"],
            "userGroups": [{"id": "g-1", "name": "Everyone"}, "g-2"]
        }))
        .unwrap();
        assert_eq!(user.id.as_deref(), Some("jane@example.com"));
        assert_eq!(user.user_groups, vec!["g-1", "g-2"]);
    }

    #[test]
    fn test_null_user_groups_decode_empty() {
        let user: User =
            serde_json::from_value(json!({"identifier": "a@b.c", "userGroups": null})).unwrap();
        assert!(user.user_groups.is_empty());
    }

    #[test]
    fn test_user_groups_serialize_as_ids() {
        let user = User {
            id: Some("a@b.c".to_string()),
            user_groups: vec!["g-1".to_string()],
            ..Default::default()
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["userGroups"], json!(["g-1"]));
        assert_eq!(value["identifier"], json!("a@b.c"));
    }
}
