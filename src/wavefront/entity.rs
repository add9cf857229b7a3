//! Generic CRUD gateway
//!
//! Every entity family shares the same verbs: GET/PUT/DELETE on
//! `<base>/<id>`, POST on `<base>`, and a paged search. [`Entities`] implements
//! them once for any type implementing [`Entity`].

use super::client::WavefrontClient;
use super::error::{ApiError, Result};
use super::search::{Search, SearchCondition};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// A remote object type managed through the Wavefront API
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Human readable family name used in errors and logs
    const KIND: &'static str;
    /// REST path prefix, e.g. `/api/v2/alert`
    const BASE_PATH: &'static str;
    /// Search API type, e.g. `alert`
    const SEARCH_TYPE: &'static str;

    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: Option<String>);
}

#[derive(Deserialize)]
struct Envelope<T> {
    response: T,
}

/// Decode the `{"response": T}` envelope
pub(crate) fn decode_response<T: DeserializeOwned>(value: Value) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_value(value)?;
    Ok(envelope.response)
}

/// Path of a single entity, with the identifier percent-encoded
pub(crate) fn entity_path<T: Entity>(id: &str) -> String {
    format!("{}/{}", T::BASE_PATH, urlencoding::encode(id))
}

/// CRUD operations for one entity family
pub struct Entities<'c, T> {
    pub(crate) client: &'c WavefrontClient,
    _entity: PhantomData<T>,
}

impl<'c, T: Entity> Entities<'c, T> {
    pub fn new(client: &'c WavefrontClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    /// Retrieve an entity by the identifier it already carries.
    /// On success `entity` is replaced by the server's representation.
    pub async fn get(&self, entity: &mut T) -> Result<()> {
        let id = entity.id().ok_or(ApiError::MissingId(T::KIND))?;
        let response = self.client.get(&entity_path::<T>(id)).await?;
        *entity = decode_response(response)?;
        Ok(())
    }

    /// Retrieve an entity by identifier; `None` when the server answers 404
    pub async fn fetch(&self, id: &str) -> Result<Option<T>>
    where
        T: Default,
    {
        let mut entity = T::default();
        entity.set_id(Some(id.to_string()));
        match self.get(&mut entity).await {
            Ok(()) => Ok(Some(entity)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Return every entity matching all conditions. An empty filter returns all.
    pub async fn find(&self, conditions: Vec<SearchCondition>) -> Result<Vec<T>> {
        self.search(conditions).execute().await
    }

    /// Build a search that callers can tune (page cap) before executing
    pub fn search(&self, conditions: Vec<SearchCondition>) -> Search<'c> {
        Search::new(self.client, T::SEARCH_TYPE, conditions)
    }

    /// Look up one entity by exact identifier through the search API.
    /// Anything but exactly one match counts as not found.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        let mut results = self.find(vec![SearchCondition::exact_id(id)]).await?;
        if results.len() != 1 {
            if results.len() > 1 {
                tracing::warn!(
                    "{} search for id {} returned {} matches, treating it as missing",
                    T::KIND,
                    id,
                    results.len()
                );
            }
            return Ok(None);
        }
        Ok(results.pop())
    }

    /// Create the entity. On success `entity` holds the server's
    /// representation, including its newly assigned identifier.
    pub async fn create(&self, entity: &mut T) -> Result<()> {
        let body = serde_json::to_value(&*entity)?;
        let response = self.client.post(T::BASE_PATH, &[], Some(&body)).await?;
        *entity = decode_response(response)?;
        Ok(())
    }

    /// Replace the remote entity with the full local representation
    pub async fn update(&self, entity: &mut T) -> Result<()> {
        let id = entity.id().ok_or(ApiError::MissingId(T::KIND))?;
        let path = entity_path::<T>(id);
        let body = serde_json::to_value(&*entity)?;
        let response = self.client.put(&path, &body).await?;
        *entity = decode_response(response)?;
        Ok(())
    }

    /// Delete the entity and clear its identifier. Deleting an entity whose
    /// identifier was already cleared does nothing.
    pub async fn delete(&self, entity: &mut T) -> Result<()> {
        let Some(id) = entity.id() else {
            tracing::debug!("{} has no id, nothing to delete", T::KIND);
            return Ok(());
        };

        self.client.delete(&entity_path::<T>(id)).await?;
        entity.set_id(None);
        Ok(())
    }
}
