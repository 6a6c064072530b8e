//! Attribute schemas negotiated with the plugin host

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Int64,
    Bool,
    List(Box<AttributeKind>),
    /// Single nested object with its own attributes.
    Nested(Vec<Attribute>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    /// Must be set in configuration.
    Required,
    /// May be set in configuration.
    Optional,
    /// Set by the provider only.
    Computed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
    pub mode: AttributeMode,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeKind, mode: AttributeMode) -> Self {
        Self {
            name: name.into(),
            kind,
            mode,
            sensitive: false,
            description: None,
        }
    }

    pub fn required_string(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::String, AttributeMode::Required)
    }

    pub fn optional_string(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::String, AttributeMode::Optional)
    }

    pub fn computed_string(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::String, AttributeMode::Computed)
    }

    pub fn optional_int64(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Int64, AttributeMode::Optional)
    }

    pub fn optional_string_list(name: impl Into<String>) -> Self {
        Self::new(
            name,
            AttributeKind::List(Box::new(AttributeKind::String)),
            AttributeMode::Optional,
        )
    }

    pub fn required_nested(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self::new(name, AttributeKind::Nested(attributes), AttributeMode::Required)
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.mode == AttributeMode::Required
    }
}

/// Schema of the provider block or of one resource type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    pub version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn v0() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}
