//! Terraform provider for CoderForge.org
//!
//! This crate implements the provider side of the plugin contract for the
//! CoderForge.org cloud, exposing serverless functions and containers as
//! Terraform resources.
//!
//! # Resources
//!
//! - `coderforge_function`: serverless function packaged as an image
//! - `coderforge_container`: container built from an image and a runtime
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  Plugin host                     │
//! │        (schema, configure, plan, apply)          │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │             coderforge-provider                  │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  CoderforgeProvider → ConfiguredProvider  │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  ResourceMapper<K: ResourceKind>          │   │
//! │  │    FunctionKind   ContainerKind           │   │
//! │  └──────────────────────────────────────────┘   │
//! └─────────────────┬───────────────────────────────┘
//!                   │  Arc<ApiClient>
//! ┌─────────────────▼───────────────────────────────┐
//! │               coderforge-cloud                   │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use coderforge_provider::CoderforgeProvider;
//! use serde_json::json;
//!
//! let provider = CoderforgeProvider::new("1.1.0");
//! let configured = provider.configure(json!({ "cloud_space": "my-space" }))?;
//!
//! let function = configured.resource("coderforge_function").unwrap();
//! let state = function
//!     .create(json!({
//!         "function_name": "f1",
//!         "code": { "package_type": "Image", "image_uri": "repo/img:tag" },
//!         "timeout": 30
//!     }))
//!     .await?;
//! ```

pub mod container;
pub mod diagnostics;
pub mod error;
pub mod function;
pub mod logging;
pub mod mapper;
pub mod provider;
pub mod resource;
pub mod schema;

pub use container::{ContainerKind, ContainerState};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ResourceError, Result};
pub use function::{FunctionCode, FunctionKind, FunctionState};
pub use logging::try_init_logging;
pub use mapper::{ResourceKind, ResourceMapper};
pub use provider::{
    CoderforgeProvider, ConfiguredProvider, PROVIDER_TYPE_NAME, ProviderConfig, ProviderMetadata,
};
pub use resource::{ReadOutcome, Resource};
pub use schema::{Attribute, AttributeKind, AttributeMode, Schema};
