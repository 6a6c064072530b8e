//! Wire model for the `/api/1.2/cloud/terraform/resource` endpoint
//!
//! Every verb sends and receives the same [`CloudData`] envelope. The
//! server is lenient about absent fields and may answer with explicit
//! `null`s, so every field decodes to its default when missing or null.

use serde::{Deserialize, Deserializer, Serialize};

/// Tenant context attached to every request.
///
/// Built once at configuration time and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloudContext {
    pub stack_id: String,
    pub cloud_space: String,
    pub locations: Vec<String>,
}

impl CloudContext {
    pub fn new(cloud_space: impl Into<String>) -> Self {
        Self {
            cloud_space: cloud_space.into(),
            ..Default::default()
        }
    }

    pub fn with_stack_id(mut self, stack_id: impl Into<String>) -> Self {
        self.stack_id = stack_id.into();
        self
    }

    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.locations = locations;
        self
    }
}

/// Request/response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub stack_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cloud_space: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_items: Vec<ResourceItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_items: Vec<DataItem>,
}

impl CloudData {
    /// Empty envelope carrying the tenant context.
    pub fn from_context(context: &CloudContext) -> Self {
        Self {
            stack_id: context.stack_id.clone(),
            cloud_space: context.cloud_space.clone(),
            locations: context.locations.clone(),
            ..Default::default()
        }
    }

    pub fn with_item(mut self, item: ResourceItem) -> Self {
        self.resource_items.push(item);
        self
    }

    /// The first resource item, which is the only one the API returns for
    /// single-resource verbs.
    pub fn into_first_item(self) -> Option<ResourceItem> {
        self.resource_items.into_iter().next()
    }
}

/// One managed compute unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceItem {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,

    /// Resource kind ("function", "container"). Fixed at creation.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub function_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub code: Code,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub timeout: i64,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub protocol: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub domain: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub port: i64,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_false"
    )]
    pub active: bool,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub load_balance_percentage: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub max_ram_size: String,
}

impl ResourceItem {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }
}

/// Deployable artifact of a resource item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Code {
    #[serde(default, deserialize_with = "null_as_default")]
    pub package_type: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub image_uri: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub runtime: String,
}

/// Key/value pair carried by the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataItem {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub value: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_item() -> ResourceItem {
        ResourceItem {
            id: "r-1".to_string(),
            kind: "container".to_string(),
            name: "web".to_string(),
            function_name: "handler".to_string(),
            code: Code {
                package_type: "Image".to_string(),
                image_uri: "repo/web:1".to_string(),
                runtime: "nodejs20".to_string(),
            },
            timeout: 30,
            protocol: "https".to_string(),
            domain: "web.example.org".to_string(),
            port: 8443,
            active: true,
            load_balance_percentage: 50,
            max_ram_size: "512MB".to_string(),
        }
    }

    #[test]
    fn test_fully_populated_item_survives_envelope_round_trip() {
        let context = CloudContext::new("space-a")
            .with_stack_id("stack-1")
            .with_locations(vec!["eu-west".to_string(), "us-east".to_string()]);
        let envelope = CloudData::from_context(&context).with_item(full_item());

        let bytes = serde_json::to_vec(&envelope).unwrap();
        let decoded: CloudData = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(decoded, envelope);
        assert_eq!(decoded.into_first_item(), Some(full_item()));
    }

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let item = ResourceItem::new("function");
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "function",
                "code": { "packageType": "" },
                "maxRamSize": ""
            })
        );
    }

    #[test]
    fn test_envelope_uses_camel_case_keys() {
        let context = CloudContext::new("space-a").with_stack_id("stack-1");
        let value = serde_json::to_value(CloudData::from_context(&context)).unwrap();

        assert_eq!(value["stackId"], "stack-1");
        assert_eq!(value["cloudSpace"], "space-a");
        assert_eq!(value["resourceItems"], json!([]));
        assert_eq!(value["dataItems"], json!([]));
    }

    #[test]
    fn test_null_collections_decode_as_empty() {
        let decoded: CloudData = serde_json::from_value(json!({
            "stackId": null,
            "cloudSpace": "space-a",
            "locations": null,
            "resourceItems": null,
            "dataItems": null
        }))
        .unwrap();

        assert_eq!(decoded.cloud_space, "space-a");
        assert!(decoded.resource_items.is_empty());
        assert!(decoded.into_first_item().is_none());
    }

    #[test]
    fn test_item_with_missing_fields_decodes_with_defaults() {
        let item: ResourceItem = serde_json::from_value(json!({
            "id": "r-9",
            "type": "function",
            "code": null
        }))
        .unwrap();

        assert_eq!(item.id, "r-9");
        assert_eq!(item.code, Code::default());
        assert_eq!(item.timeout, 0);
        assert!(!item.active);
    }
}
