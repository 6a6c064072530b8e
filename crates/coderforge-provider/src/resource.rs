//! Resource contract driven by the plugin host
//!
//! The host hands state around as JSON objects whose keys are the schema's
//! attribute names. Implementations decode that state, talk to the API and
//! hand back the new state, or a set of [`Diagnostics`] explaining why not.
//! When an operation fails, the host keeps its prior state.

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;
use async_trait::async_trait;
use serde_json::Value;

/// Outcome of refreshing a resource from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome<T> {
    /// The resource exists; this is its current state.
    Found(T),
    /// The resource no longer exists and should be dropped from state.
    NotFound,
}

impl<T> ReadOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadOutcome<U> {
        match self {
            ReadOutcome::Found(value) => ReadOutcome::Found(f(value)),
            ReadOutcome::NotFound => ReadOutcome::NotFound,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            ReadOutcome::Found(value) => Some(value),
            ReadOutcome::NotFound => None,
        }
    }
}

/// One resource type as seen by the plugin host.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Full type name, e.g. `coderforge_function`.
    fn type_name(&self) -> String;

    fn schema(&self) -> Schema;

    async fn create(&self, planned: Value) -> Result<Value, Diagnostics>;

    async fn read(&self, prior: Value) -> Result<ReadOutcome<Value>, Diagnostics>;

    async fn update(&self, prior: Value, planned: Value) -> Result<Value, Diagnostics>;

    async fn delete(&self, prior: Value) -> Result<(), Diagnostics>;
}
