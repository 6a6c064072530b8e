//! CoderForge.org cloud API client
//!
//! Single-shot request/response against the Terraform resource endpoint.
//! Every request is authenticated with the bearer token and carries the
//! tenant context header; nothing is cached between calls.

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::model::{CloudContext, CloudData, ResourceItem};
use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderValue};

/// Path of the resource endpoint, relative to the base URL.
pub const RESOURCE_PATH: &str = "/api/1.2/cloud/terraform/resource";

/// Header identifying the tenant context of a request.
pub const CONTEXT_HEADER: &str = "X-CoderForge.org-Context";

/// Result of looking a resource up by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }
}

/// Authenticated handle to the API.
///
/// Holds only read-only configuration, so one instance is shared (behind an
/// `Arc`) by every resource operation of a configuration session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    context: CloudContext,
    context_header: HeaderValue,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.token.is_empty() {
            return Err(ApiError::InvalidConfig("token must not be empty".into()));
        }
        if config.context.cloud_space.is_empty() {
            return Err(ApiError::InvalidConfig(
                "cloud_space must not be empty".into(),
            ));
        }

        let context_header = HeaderValue::from_str(&context_header_value(&config.context))
            .map_err(|e| ApiError::InvalidConfig(format!("invalid context header: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
            context: config.context,
            context_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn context(&self) -> &CloudContext {
        &self.context
    }

    /// Issue one request and return the raw response body.
    ///
    /// Non-2xx answers become [`ApiError::Status`] with the body text.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&CloudData>,
    ) -> Result<Bytes> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.token)
            .header(CONTEXT_HEADER, self.context_header.clone())
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        tracing::debug!(
            method = %method,
            path,
            status = status.as_u16(),
            "CoderForge.org API request"
        );

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes)
    }

    /// Create a resource item. The returned item carries the server-assigned id.
    pub async fn create_resource(&self, item: ResourceItem) -> Result<ResourceItem> {
        let envelope = self.envelope().with_item(item);
        let bytes = self
            .request(Method::POST, RESOURCE_PATH, &[], Some(&envelope))
            .await?;

        decode(&bytes)?
            .into_first_item()
            .ok_or(ApiError::EmptyResponse)
    }

    /// Fetch a resource item by id within the configured cloud space.
    ///
    /// An envelope without items and a 404 both mean the resource is gone.
    pub async fn get_resource(&self, resource_id: &str) -> Result<Lookup<ResourceItem>> {
        let query = [
            ("resourceId", resource_id),
            ("cloudSpace", self.context.cloud_space.as_str()),
        ];

        let bytes = match self.request(Method::GET, RESOURCE_PATH, &query, None).await {
            Ok(bytes) => bytes,
            Err(ApiError::Status { status: 404, .. }) => return Ok(Lookup::NotFound),
            Err(e) => return Err(e),
        };

        Ok(match decode(&bytes)?.into_first_item() {
            Some(item) => Lookup::Found(item),
            None => Lookup::NotFound,
        })
    }

    /// Replace a resource item. `item.id` must be set.
    pub async fn update_resource(&self, item: ResourceItem) -> Result<ResourceItem> {
        let envelope = self.envelope().with_item(item);
        let bytes = self
            .request(Method::PUT, RESOURCE_PATH, &[], Some(&envelope))
            .await?;

        decode(&bytes)?
            .into_first_item()
            .ok_or(ApiError::EmptyResponse)
    }

    pub async fn delete_resource(&self, resource_id: &str) -> Result<()> {
        let envelope = self.envelope();
        let bytes = self
            .request(
                Method::DELETE,
                RESOURCE_PATH,
                &[("resourceId", resource_id)],
                Some(&envelope),
            )
            .await?;

        // An empty body is accepted; anything else must be a valid envelope.
        if !bytes.is_empty() {
            decode(&bytes)?;
        }
        Ok(())
    }

    fn envelope(&self) -> CloudData {
        CloudData::from_context(&self.context)
    }
}

fn decode(bytes: &[u8]) -> Result<CloudData> {
    Ok(serde_json::from_slice(bytes)?)
}

fn context_header_value(context: &CloudContext) -> String {
    let mut value = serde_json::Map::new();
    value.insert(
        "cloudSpace".to_string(),
        serde_json::Value::String(context.cloud_space.clone()),
    );
    if !context.stack_id.is_empty() {
        value.insert(
            "stackId".to_string(),
            serde_json::Value::String(context.stack_id.clone()),
        );
    }
    serde_json::Value::Object(value).to_string()
}
