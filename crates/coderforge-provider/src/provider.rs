//! Provider root
//!
//! Negotiates the provider configuration with the host, builds the one
//! [`ApiClient`] of the session and hands it to every resource mapper.

use crate::container::ContainerKind;
use crate::diagnostics::Diagnostics;
use crate::function::FunctionKind;
use crate::mapper::{ResourceKind, ResourceMapper};
use crate::resource::Resource;
use crate::schema::{Attribute, Schema};
use coderforge_cloud::{
    ApiClient, ClientConfig, CloudContext, DEFAULT_HOST_URL, HOST_URL_ENV, TOKEN_ENV,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Type name of the provider; resource type names are prefixed with it.
pub const PROVIDER_TYPE_NAME: &str = "coderforge";

/// Provider block as configured by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub cloud_space: Option<String>,
    #[serde(default)]
    pub stack_id: Option<String>,
    #[serde(default)]
    pub locations: Option<Vec<String>>,
    #[serde(default)]
    pub host: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub type_name: String,
    pub version: String,
}

/// Unconfigured provider, as first loaded by the host.
#[derive(Debug, Clone)]
pub struct CoderforgeProvider {
    /// "dev" for local builds, "test" under acceptance tests.
    version: String,
}

impl CoderforgeProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    pub fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Manage CoderForge.org cloud functions and containers.")
            .with_attribute(
                Attribute::optional_string("token")
                    .sensitive()
                    .with_description(format!("API token. Falls back to {}.", TOKEN_ENV)),
            )
            .with_attribute(Attribute::required_string("cloud_space"))
            .with_attribute(Attribute::optional_string_list("locations"))
            .with_attribute(Attribute::optional_string("stack_id"))
            .with_attribute(Attribute::optional_string("host").with_description(format!(
                "API base URL. Falls back to {}, then {}.",
                HOST_URL_ENV, DEFAULT_HOST_URL
            )))
    }

    /// Schemas of every resource type, keyed by type name. Available before
    /// the provider is configured.
    pub fn resource_schemas(&self) -> BTreeMap<String, Schema> {
        BTreeMap::from([
            (FunctionKind::type_name(), FunctionKind::schema()),
            (ContainerKind::type_name(), ContainerKind::schema()),
        ])
    }

    /// Configure from the host's JSON representation of the provider block.
    pub fn configure(
        &self,
        config: serde_json::Value,
    ) -> Result<ConfiguredProvider, Diagnostics> {
        let config: ProviderConfig = serde_json::from_value(config).map_err(|e| {
            let mut diags = Diagnostics::new();
            diags.add_error("Invalid provider configuration", e.to_string());
            diags
        })?;
        self.configure_with(config)
    }

    pub fn configure_with(
        &self,
        config: ProviderConfig,
    ) -> Result<ConfiguredProvider, Diagnostics> {
        tracing::info!("Configuring CoderForge.org client");

        let mut diags = Diagnostics::new();

        let token = config
            .token
            .or_else(|| std::env::var(TOKEN_ENV).ok())
            .unwrap_or_default();
        if token.is_empty() {
            diags.add_attribute_error(
                "token",
                "Missing CoderForge.org API token",
                format!(
                    "The provider cannot create the CoderForge.org API client as there is a \
                     missing or empty value for the CoderForge.org API token. Set the token \
                     value in the configuration or use the {} environment variable. If either \
                     is already set, ensure the value is not empty.",
                    TOKEN_ENV
                ),
            );
        }

        let cloud_space = config.cloud_space.unwrap_or_default();
        if cloud_space.is_empty() {
            diags.add_attribute_error(
                "cloud_space",
                "Missing CoderForge.org API cloud_space",
                "The provider cannot create the CoderForge.org API client as there is a \
                 missing or empty value for the CoderForge.org API cloud_space. Set the \
                 cloud_space inside the provider.",
            );
        }

        if diags.has_error() {
            return Err(diags);
        }

        let host = config
            .host
            .or_else(|| std::env::var(HOST_URL_ENV).ok())
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST_URL.to_string());

        let context = CloudContext::new(cloud_space)
            .with_stack_id(config.stack_id.unwrap_or_default())
            .with_locations(config.locations.unwrap_or_default());

        tracing::debug!(
            cloud_space = %context.cloud_space,
            stack_id = %context.stack_id,
            host = %host,
            "Creating CoderForge.org client"
        );

        let client = ApiClient::new(ClientConfig::new(token, context).with_base_url(host))
            .map_err(|e| {
                let mut diags = Diagnostics::new();
                diags.add_error(
                    "Unable to create CoderForge.org API client",
                    format!(
                        "An unexpected error occurred when creating the CoderForge.org API \
                         client. If the error is not clear, please contact the provider \
                         developers.\n\nCoderForge.org Client Error: {}",
                        e
                    ),
                );
                diags
            })?;

        tracing::info!(success = true, "Configured CoderForge.org client");
        Ok(ConfiguredProvider::new(Arc::new(client)))
    }
}

/// Provider after a successful configure: one shared client, every resource
/// type bound to it.
pub struct ConfiguredProvider {
    client: Arc<ApiClient>,
    resources: BTreeMap<String, Box<dyn Resource>>,
}

impl ConfiguredProvider {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let registered: Vec<Box<dyn Resource>> = vec![
            Box::new(ResourceMapper::<FunctionKind>::new(Arc::clone(&client))),
            Box::new(ResourceMapper::<ContainerKind>::new(Arc::clone(&client))),
        ];

        let resources = registered
            .into_iter()
            .map(|resource| (resource.type_name(), resource))
            .collect();

        Self { client, resources }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn resource(&self, type_name: &str) -> Option<&dyn Resource> {
        self.resources.get(type_name).map(|r| r.as_ref())
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    fn config(token: Option<&str>, cloud_space: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            token: token.map(str::to_string),
            cloud_space: cloud_space.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_metadata() {
        let metadata = CoderforgeProvider::new("1.1.0").metadata();
        assert_eq!(metadata.type_name, "coderforge");
        assert_eq!(metadata.version, "1.1.0");
    }

    #[test]
    fn test_token_is_sensitive_and_cloud_space_required() {
        let schema = CoderforgeProvider::new("test").schema();
        assert!(schema.attribute("token").unwrap().sensitive);
        assert!(schema.attribute("cloud_space").unwrap().is_required());
        assert!(!schema.attribute("stack_id").unwrap().is_required());
    }

    #[test]
    fn test_resource_schemas_before_configure() {
        let schemas = CoderforgeProvider::new("test").resource_schemas();
        let names: Vec<_> = schemas.keys().cloned().collect();
        assert_eq!(names, vec!["coderforge_container", "coderforge_function"]);
    }

    #[test]
    #[serial]
    fn test_missing_token_and_cloud_space_are_both_reported() {
        temp_env::with_var_unset(TOKEN_ENV, || {
            let err = CoderforgeProvider::new("test")
                .configure_with(config(None, None))
                .err()
                .unwrap();

            assert_eq!(err.len(), 2);
            assert_eq!(err.for_attribute("token").count(), 1);
            assert_eq!(err.for_attribute("cloud_space").count(), 1);
        });
    }

    #[test]
    #[serial]
    fn test_empty_configured_token_does_not_fall_back() {
        temp_env::with_var(TOKEN_ENV, Some("from-env"), || {
            let err = CoderforgeProvider::new("test")
                .configure_with(config(Some(""), Some("space-a")))
                .err()
                .unwrap();
            assert_eq!(err.for_attribute("token").count(), 1);
        });
    }

    #[test]
    #[serial]
    fn test_token_falls_back_to_environment() {
        temp_env::with_vars(
            [(TOKEN_ENV, Some("from-env")), (HOST_URL_ENV, None)],
            || {
                let provider = CoderforgeProvider::new("test")
                    .configure_with(config(None, Some("space-a")))
                    .unwrap();
                assert_eq!(provider.client().base_url(), DEFAULT_HOST_URL);
                assert_eq!(provider.client().context().cloud_space, "space-a");
            },
        );
    }

    #[test]
    #[serial]
    fn test_host_from_environment() {
        temp_env::with_var(HOST_URL_ENV, Some("https://api.coderforge.test"), || {
            let provider = CoderforgeProvider::new("test")
                .configure_with(config(Some("t"), Some("space-a")))
                .unwrap();
            assert_eq!(provider.client().base_url(), "https://api.coderforge.test");
        });
    }

    #[test]
    #[serial]
    fn test_configure_from_json() {
        temp_env::with_var_unset(HOST_URL_ENV, || {
            let provider = CoderforgeProvider::new("test")
                .configure(json!({
                    "token": "t",
                    "cloud_space": "space-a",
                    "stack_id": "stack-1",
                    "locations": ["eu-west", "us-east"],
                    "host": null
                }))
                .unwrap();

            let context = provider.client().context();
            assert_eq!(context.stack_id, "stack-1");
            assert_eq!(context.locations, vec!["eu-west", "us-east"]);

            let types: Vec<_> = provider.resource_types().collect();
            assert_eq!(types, vec!["coderforge_container", "coderforge_function"]);
            assert!(provider.resource("coderforge_function").is_some());
            assert!(provider.resource("coderforge_bucket").is_none());
        });
    }

    #[test]
    fn test_malformed_configuration_is_a_diagnostic() {
        let err = CoderforgeProvider::new("test")
            .configure(json!({ "locations": "eu-west" }))
            .err()
            .unwrap();
        assert!(err.has_error());
    }
}
