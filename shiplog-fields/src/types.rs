//! Core field and entity descriptor types.
//!
//! All types serialize to/from YAML via serde. A field descriptor describes one
//! named, typed attribute; an entity descriptor lists the fields of one kind of
//! business object in their canonical display and storage order.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{FieldsError, Result};
use crate::storage::{storage_type, StorageType};
use crate::validation::{validation_rule, ValidationRule};

/// The kind of value a field holds.
///
/// Spellings outside the known vocabulary deserialize to `Unknown` instead of
/// failing, and every projection treats `Unknown` like `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    RichText,
    Number,
    Currency,
    Date,
    Datetime,
    Boolean,
    Select,
    MultiSelect,
    Tags,
    Url,
    Email,
    /// A field kind this build does not know about, spelled as declared.
    Unknown(String),
}

impl FieldType {
    /// Every known field kind, in vocabulary order.
    pub const ALL: [FieldType; 12] = [
        FieldType::Text,
        FieldType::RichText,
        FieldType::Number,
        FieldType::Currency,
        FieldType::Date,
        FieldType::Datetime,
        FieldType::Boolean,
        FieldType::Select,
        FieldType::MultiSelect,
        FieldType::Tags,
        FieldType::Url,
        FieldType::Email,
    ];

    /// The kebab-case spelling used in configuration files.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::RichText => "rich-text",
            FieldType::Number => "number",
            FieldType::Currency => "currency",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Boolean => "boolean",
            FieldType::Select => "select",
            FieldType::MultiSelect => "multi-select",
            FieldType::Tags => "tags",
            FieldType::Url => "url",
            FieldType::Email => "email",
            FieldType::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FieldType::Unknown(_))
    }

    /// Whether the field's `options` list is meaningful for this kind.
    pub fn uses_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::MultiSelect)
    }
}

impl From<&str> for FieldType {
    fn from(raw: &str) -> Self {
        match raw {
            "text" => FieldType::Text,
            "rich-text" => FieldType::RichText,
            "number" => FieldType::Number,
            "currency" => FieldType::Currency,
            "date" => FieldType::Date,
            "datetime" => FieldType::Datetime,
            "boolean" => FieldType::Boolean,
            "select" => FieldType::Select,
            "multi-select" => FieldType::MultiSelect,
            "tags" => FieldType::Tags,
            "url" => FieldType::Url,
            "email" => FieldType::Email,
            other => FieldType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        match FieldType::from(raw.as_str()) {
            FieldType::Unknown(_) => FieldType::Unknown(raw),
            known => known,
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Initial value suggested for a field when a record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DefaultValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DefaultValue::Bool(b) => serde_json::Value::Bool(*b),
            DefaultValue::Integer(n) => serde_json::Value::from(*n),
            DefaultValue::Float(n) => serde_json::Value::from(*n),
            DefaultValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// A field descriptor: the declarative schema of one entity attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Stable identifier; doubles as the storage column and validation key.
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub type_: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Permitted values, in display order. Only read for select kinds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_in_list: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_in_form: Option<bool>,
}

impl FieldDef {
    /// An optional field of the given kind, visible in both list and form.
    pub fn new(name: impl Into<String>, label: impl Into<String>, type_: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            type_,
            required: false,
            placeholder: None,
            description: None,
            options: Vec::new(),
            default_value: None,
            show_in_list: None,
            show_in_form: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn show_in_list(mut self, show: bool) -> Self {
        self.show_in_list = Some(show);
        self
    }

    pub fn show_in_form(mut self, show: bool) -> Self {
        self.show_in_form = Some(show);
        self
    }

    /// Listed unless explicitly opted out.
    pub fn in_list(&self) -> bool {
        self.show_in_list != Some(false)
    }

    /// Editable in forms unless explicitly opted out.
    pub fn in_form(&self) -> bool {
        self.show_in_form != Some(false)
    }

    pub fn storage_type(&self) -> StorageType {
        storage_type(&self.type_)
    }

    pub fn validation_rule(&self) -> ValidationRule {
        validation_rule(self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// The ordering a list view starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSort {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

fn default_true() -> bool {
    true
}

/// An entity descriptor: one kind of business object and its ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDef {
    pub name: String,
    pub plural_name: String,
    /// Storage/table identifier, unique across a registry.
    pub slug: String,
    /// Opaque icon identifier handed through to the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub fields: Vec<FieldDef>,
    pub title_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_field: Option<String>,
    pub default_sort: DefaultSort,
    #[serde(default = "default_true")]
    pub allow_create: bool,
    #[serde(default = "default_true")]
    pub allow_edit: bool,
    #[serde(default = "default_true")]
    pub allow_delete: bool,
    #[serde(default = "default_true")]
    pub allow_export: bool,
}

impl EntityDef {
    /// Get a field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check the structural invariants of the descriptor.
    ///
    /// Field names must be unique, and `title_field`, `description_field` and
    /// `default_sort.field` must each name a declared field.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(FieldsError::EmptyEntity {
                entity: self.name.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(FieldsError::DuplicateFieldName {
                    entity: self.name.clone(),
                    name: field.name.clone(),
                });
            }
            if !field.type_.is_known() {
                warn!(
                    entity = %self.name,
                    field = %field.name,
                    field_type = %field.type_,
                    "unknown field type, treating as text"
                );
            } else if !field.options.is_empty() && !field.type_.uses_options() {
                warn!(
                    entity = %self.name,
                    field = %field.name,
                    field_type = %field.type_,
                    "options ignored for this field type"
                );
            }
        }

        let mut references = vec![
            ("title_field", self.title_field.as_str()),
            ("default_sort.field", self.default_sort.field.as_str()),
        ];
        if let Some(description) = &self.description_field {
            references.push(("description_field", description.as_str()));
        }
        for (attribute, name) in references {
            if !seen.contains(name) {
                return Err(FieldsError::UnknownFieldReference {
                    entity: self.name.clone(),
                    attribute,
                    field: name.to_string(),
                });
            }
        }

        Ok(())
    }
}
