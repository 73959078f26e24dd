//! Entity field schema and projection engine
//!
//! `shiplog-fields` declares the shape of a business object once, as an
//! [`EntityDef`] holding ordered [`FieldDef`]s, and derives every consumer view
//! from it.
//!
//! # Projections
//!
//! - **List**: [`list_fields`]: fields shown as table columns
//! - **Form**: [`form_fields`]: fields rendered in create/edit forms
//! - **Storage**: [`storage_type`]: semantic column type per field kind
//! - **Validation**: [`validation_rule`]: acceptance contract per field
//!
//! All projections are pure and total. Unrecognized field kinds behave like
//! `text` everywhere. Only descriptor structure is ever an error, and it is
//! reported when an [`EntityRegistry`] is built.

pub mod error;
pub mod projection;
pub mod registry;
pub mod storage;
pub mod types;
pub mod validation;

pub use error::{FieldsError, Result};
pub use projection::{form_fields, list_fields};
pub use registry::{EntityRegistry, RegistryHandle};
pub use storage::{storage_columns, storage_type, StorageType, CURRENCY_SCALE};
pub use types::{DefaultSort, DefaultValue, EntityDef, FieldDef, FieldType, SortDirection};
pub use validation::{
    validate_record, validation_rule, EntityValidator, RuleKind, RuleViolation, ValidationRule,
    ViolationReason, SELECT_FALLBACK,
};
