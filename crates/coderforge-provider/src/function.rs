//! `coderforge_function` resource

use crate::mapper::{ResourceKind, non_empty};
use crate::schema::{Attribute, Schema};
use coderforge_cloud::{Code, ResourceItem};
use serde::{Deserialize, Serialize};

/// Serverless function packaged as an image.
pub struct FunctionKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionState {
    #[serde(default)]
    pub id: Option<String>,
    pub function_name: String,
    pub code: FunctionCode,
    #[serde(default)]
    pub timeout: Option<i64>,
    #[serde(default)]
    pub max_ram_size: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCode {
    pub package_type: String,
    #[serde(default)]
    pub image_uri: Option<String>,
}

impl ResourceKind for FunctionKind {
    const TYPE_SUFFIX: &'static str = "function";

    type State = FunctionState;

    fn schema() -> Schema {
        Schema::v0()
            .with_description("A serverless function deployed to a CoderForge.org cloud space.")
            .with_attribute(Attribute::computed_string("id"))
            .with_attribute(Attribute::required_string("function_name"))
            .with_attribute(Attribute::computed_string("last_updated"))
            .with_attribute(Attribute::required_nested(
                "code",
                vec![
                    Attribute::required_string("package_type"),
                    Attribute::optional_string("image_uri"),
                ],
            ))
            .with_attribute(Attribute::optional_int64("timeout"))
            .with_attribute(Attribute::optional_string("max_ram_size"))
    }

    fn to_item(state: &FunctionState) -> ResourceItem {
        ResourceItem {
            function_name: state.function_name.clone(),
            code: Code {
                package_type: state.code.package_type.clone(),
                image_uri: state.code.image_uri.clone().unwrap_or_default(),
                ..Default::default()
            },
            timeout: state.timeout.unwrap_or_default(),
            max_ram_size: state.max_ram_size.clone().unwrap_or_default(),
            ..ResourceItem::new(Self::TYPE_SUFFIX)
        }
    }

    fn from_item(item: &ResourceItem, last_updated: Option<String>) -> FunctionState {
        FunctionState {
            id: non_empty(&item.id),
            function_name: item.function_name.clone(),
            code: FunctionCode {
                package_type: item.code.package_type.clone(),
                image_uri: non_empty(&item.code.image_uri),
            },
            timeout: (item.timeout != 0).then_some(item.timeout),
            max_ram_size: non_empty(&item.max_ram_size),
            last_updated,
        }
    }

    fn id(state: &FunctionState) -> Option<&str> {
        state.id.as_deref().filter(|id| !id.is_empty())
    }

    fn last_updated(state: &FunctionState) -> Option<&str> {
        state.last_updated.as_deref()
    }
}
