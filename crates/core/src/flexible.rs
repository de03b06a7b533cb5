//! Flexible field definitions for partially runtime-configured schemas.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Kind of a dynamically declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    /// Value constrained to a named choice domain.
    Choice { domain: String },
}

/// One dynamically declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleField {
    pub name: String,
    pub kind: FieldKind,
    /// Default applied when an import/record leaves the field blank.
    pub default: Option<JsonValue>,
}

/// Description of the dynamically declared part of an entity's schema.
///
/// Consumed by UI/reporting collaborators; never interpreted by this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleDefinition {
    pub entity_kind: String,
    pub fields: Vec<FlexibleField>,
}

impl FlexibleDefinition {
    pub fn new(entity_kind: impl Into<String>) -> Self {
        Self {
            entity_kind: entity_kind.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FlexibleField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FlexibleField> {
        self.fields.iter().find(|f| f.name == name)
    }
}
