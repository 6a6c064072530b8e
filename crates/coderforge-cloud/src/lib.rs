//! CoderForge.org cloud API
//!
//! This crate provides the wire model and HTTP client for the CoderForge.org
//! cloud-management API, as used by the Terraform provider.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              coderforge-provider                 │
//! │     (resource mappers, provider root)            │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               coderforge-cloud                   │
//! │  ┌──────────────┐  ┌──────────────┐             │
//! │  │  ApiClient   │  │  CloudData   │             │
//! │  │  (reqwest)   │  │  wire model  │             │
//! │  └──────────────┘  └──────────────┘             │
//! └─────────────────┬───────────────────────────────┘
//!                   │  JSON over HTTPS
//! ┌─────────────────▼───────────────────────────────┐
//! │   /api/1.2/cloud/terraform/resource              │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use coderforge_cloud::{ApiClient, ClientConfig, CloudContext, ResourceItem};
//!
//! let context = CloudContext::new("my-space").with_stack_id("stack-1");
//! let client = ApiClient::new(ClientConfig::new(token, context))?;
//!
//! let created = client.create_resource(ResourceItem::new("function")).await?;
//! let current = client.get_resource(&created.id).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod model;

// Re-exports
pub use client::{ApiClient, CONTEXT_HEADER, Lookup, RESOURCE_PATH};
pub use config::{
    ClientConfig, DEFAULT_HOST_URL, DEFAULT_TIMEOUT, HOST_URL_ENV, TOKEN_ENV,
};
pub use error::{ApiError, Result};
pub use model::{CloudContext, CloudData, Code, DataItem, ResourceItem};
