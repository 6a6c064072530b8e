//! `coderforge_container` resource

use crate::mapper::{ResourceKind, non_empty};
use crate::schema::{Attribute, Schema};
use coderforge_cloud::{Code, ResourceItem};
use serde::{Deserialize, Serialize};

/// Long-running container built from an image and a runtime.
pub struct ContainerKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerState {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_uri: Option<String>,
    pub runtime: String,
    #[serde(default)]
    pub timeout: Option<i64>,
    #[serde(default)]
    pub max_ram_size: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl ResourceKind for ContainerKind {
    const TYPE_SUFFIX: &'static str = "container";

    type State = ContainerState;

    fn schema() -> Schema {
        Schema::v0()
            .with_description("A container deployed to a CoderForge.org cloud space.")
            .with_attribute(Attribute::computed_string("id"))
            .with_attribute(Attribute::computed_string("last_updated"))
            .with_attribute(Attribute::optional_string("name"))
            .with_attribute(Attribute::optional_string("image_uri"))
            .with_attribute(Attribute::required_string("runtime"))
            .with_attribute(Attribute::optional_int64("timeout"))
            .with_attribute(Attribute::optional_string("max_ram_size"))
    }

    fn to_item(state: &ContainerState) -> ResourceItem {
        ResourceItem {
            name: state.name.clone().unwrap_or_default(),
            code: Code {
                image_uri: state.image_uri.clone().unwrap_or_default(),
                runtime: state.runtime.clone(),
                ..Default::default()
            },
            timeout: state.timeout.unwrap_or_default(),
            max_ram_size: state.max_ram_size.clone().unwrap_or_default(),
            ..ResourceItem::new(Self::TYPE_SUFFIX)
        }
    }

    fn from_item(item: &ResourceItem, last_updated: Option<String>) -> ContainerState {
        ContainerState {
            id: non_empty(&item.id),
            name: non_empty(&item.name),
            image_uri: non_empty(&item.code.image_uri),
            runtime: item.code.runtime.clone(),
            timeout: (item.timeout != 0).then_some(item.timeout),
            max_ram_size: non_empty(&item.max_ram_size),
            last_updated,
        }
    }

    fn id(state: &ContainerState) -> Option<&str> {
        state.id.as_deref().filter(|id| !id.is_empty())
    }

    fn last_updated(state: &ContainerState) -> Option<&str> {
        state.last_updated.as_deref()
    }
}
