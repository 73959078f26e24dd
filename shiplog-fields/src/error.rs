//! Error types for the entity schema engine

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Structural defects in entity descriptors.
///
/// These are load-time configuration errors. The projections themselves never
/// fail; only building or validating a descriptor can.
#[derive(Debug, Error)]
pub enum FieldsError {
    /// A descriptor attribute names a field the entity does not declare
    #[error("entity '{entity}': {attribute} references unknown field '{field}'")]
    UnknownFieldReference {
        entity: String,
        attribute: &'static str,
        field: String,
    },

    /// Two fields in the same entity share a name
    #[error("entity '{entity}': duplicate field name '{name}'")]
    DuplicateFieldName { entity: String, name: String },

    /// Two entities share a storage slug
    #[error("duplicate entity slug: {slug}")]
    DuplicateSlug { slug: String },

    /// An entity declares no fields at all
    #[error("entity '{entity}' declares no fields")]
    EmptyEntity { entity: String },

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldsError::UnknownFieldReference {
            entity: "BuildJournalEntry".into(),
            attribute: "title_field",
            field: "headline".into(),
        };
        assert_eq!(
            err.to_string(),
            "entity 'BuildJournalEntry': title_field references unknown field 'headline'"
        );
    }

    #[test]
    fn test_duplicate_slug_display() {
        let err = FieldsError::DuplicateSlug {
            slug: "build_journal_entries".into(),
        };
        assert!(err.to_string().contains("build_journal_entries"));
    }
}
