//! Generic resource mapper
//!
//! Every resource kind shares the same create/read/update/delete flow against
//! the API; a [`ResourceKind`] only supplies the schema and the translation
//! between its declarative state and the wire [`ResourceItem`].

use crate::diagnostics::Diagnostics;
use crate::error::{ResourceError, Result};
use crate::provider::PROVIDER_TYPE_NAME;
use crate::resource::{ReadOutcome, Resource};
use crate::schema::Schema;
use async_trait::async_trait;
use coderforge_cloud::{ApiClient, Lookup, ResourceItem};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// RFC 850 layout, as in `Monday, 02-Jan-06 15:04:05 UTC`.
const LAST_UPDATED_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S %Z";

/// Field mapping for one resource kind.
pub trait ResourceKind: Send + Sync + 'static {
    /// Wire `type` of the items and suffix of the host type name.
    const TYPE_SUFFIX: &'static str;

    type State: Serialize + DeserializeOwned + Send + Sync;

    fn schema() -> Schema;

    /// Desired state to wire item. `id` and `type` are filled in by the mapper.
    fn to_item(state: &Self::State) -> ResourceItem;

    /// Wire item to state.
    fn from_item(item: &ResourceItem, last_updated: Option<String>) -> Self::State;

    fn id(state: &Self::State) -> Option<&str>;

    fn last_updated(state: &Self::State) -> Option<&str>;

    fn type_name() -> String {
        format!("{}_{}", PROVIDER_TYPE_NAME, Self::TYPE_SUFFIX)
    }
}

/// Current time in the `last_updated` layout.
pub fn timestamp() -> String {
    chrono::Utc::now().format(LAST_UPDATED_FORMAT).to_string()
}

/// Optional string attributes are null in state when the API leaves them empty.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// CRUD against the API for resources of kind `K`.
pub struct ResourceMapper<K: ResourceKind> {
    client: Arc<ApiClient>,
    _kind: PhantomData<K>,
}

impl<K: ResourceKind> ResourceMapper<K> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            _kind: PhantomData,
        }
    }

    pub async fn create(&self, planned: &K::State) -> Result<K::State> {
        let mut item = K::to_item(planned);
        item.id.clear();
        item.kind = K::TYPE_SUFFIX.to_string();

        let created = self.client.create_resource(item).await?;
        if created.id.is_empty() {
            return Err(ResourceError::MissingId);
        }

        tracing::info!(kind = K::TYPE_SUFFIX, id = %created.id, "Created resource");
        Ok(K::from_item(&created, Some(timestamp())))
    }

    pub async fn read(&self, prior: &K::State) -> Result<ReadOutcome<K::State>> {
        let id = K::id(prior).ok_or(ResourceError::MissingId)?;

        match self.client.get_resource(id).await? {
            Lookup::Found(mut item) => {
                if item.id.is_empty() {
                    item.id = id.to_string();
                }
                let last_updated = K::last_updated(prior).map(str::to_string);
                Ok(ReadOutcome::Found(K::from_item(&item, last_updated)))
            }
            Lookup::NotFound => {
                tracing::info!(kind = K::TYPE_SUFFIX, id, "Resource no longer exists");
                Ok(ReadOutcome::NotFound)
            }
        }
    }

    /// Update in place. The resulting state is built from the API response
    /// alone; only the id falls back to the prior state.
    pub async fn update(&self, prior: &K::State, planned: &K::State) -> Result<K::State> {
        let id = K::id(prior).ok_or(ResourceError::MissingId)?;

        let mut item = K::to_item(planned);
        item.id = id.to_string();
        item.kind = K::TYPE_SUFFIX.to_string();

        let mut updated = self.client.update_resource(item).await?;
        if updated.id.is_empty() {
            updated.id = id.to_string();
        }

        tracing::info!(kind = K::TYPE_SUFFIX, id, "Updated resource");
        Ok(K::from_item(&updated, Some(timestamp())))
    }

    pub async fn delete(&self, prior: &K::State) -> Result<()> {
        let id = K::id(prior).ok_or(ResourceError::MissingId)?;
        self.client.delete_resource(id).await?;
        tracing::info!(kind = K::TYPE_SUFFIX, id, "Deleted resource");
        Ok(())
    }
}

fn decode<K: ResourceKind>(value: Value) -> Result<K::State> {
    Ok(serde_json::from_value(value)?)
}

fn encode<K: ResourceKind>(state: &K::State) -> Result<Value> {
    Ok(serde_json::to_value(state)?)
}

fn failure(summary: &str, detail: String) -> Diagnostics {
    let mut diags = Diagnostics::new();
    diags.add_error(summary, detail);
    diags
}

fn id_of(value: &Value) -> &str {
    value.get("id").and_then(Value::as_str).unwrap_or_default()
}

#[async_trait]
impl<K: ResourceKind> Resource for ResourceMapper<K> {
    fn type_name(&self) -> String {
        K::type_name()
    }

    fn schema(&self) -> Schema {
        K::schema()
    }

    async fn create(&self, planned: Value) -> std::result::Result<Value, Diagnostics> {
        let result = match decode::<K>(planned) {
            Ok(planned) => ResourceMapper::create(self, &planned).await,
            Err(e) => Err(e),
        };

        result.and_then(|state| encode::<K>(&state)).map_err(|e| {
            failure(
                "Error creating resource",
                format!("Could not create resource, unexpected error: {}", e),
            )
        })
    }

    async fn read(&self, prior: Value) -> std::result::Result<ReadOutcome<Value>, Diagnostics> {
        let id = id_of(&prior).to_string();
        let result = match decode::<K>(prior) {
            Ok(prior) => ResourceMapper::read(self, &prior).await,
            Err(e) => Err(e),
        };

        let outcome = match result {
            Ok(ReadOutcome::Found(state)) => encode::<K>(&state).map(ReadOutcome::Found),
            Ok(ReadOutcome::NotFound) => Ok(ReadOutcome::NotFound),
            Err(e) => Err(e),
        };

        outcome.map_err(|e| {
            failure(
                "Error reading resource",
                format!("Could not read resource ID {}: {}", id, e),
            )
        })
    }

    async fn update(
        &self,
        prior: Value,
        planned: Value,
    ) -> std::result::Result<Value, Diagnostics> {
        let id = id_of(&prior).to_string();
        let result = match (decode::<K>(prior), decode::<K>(planned)) {
            (Ok(prior), Ok(planned)) => ResourceMapper::update(self, &prior, &planned).await,
            (Err(e), _) | (_, Err(e)) => Err(e),
        };

        result.and_then(|state| encode::<K>(&state)).map_err(|e| {
            failure(
                "Error updating resource",
                format!("Could not update resource ID {}, unexpected error: {}", id, e),
            )
        })
    }

    async fn delete(&self, prior: Value) -> std::result::Result<(), Diagnostics> {
        let id = id_of(&prior).to_string();
        let result = match decode::<K>(prior) {
            Ok(prior) => ResourceMapper::delete(self, &prior).await,
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            failure(
                "Error deleting resource",
                format!("Could not delete resource ID {}, unexpected error: {}", id, e),
            )
        })
    }
}
