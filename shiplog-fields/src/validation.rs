//! Validation projection: field descriptor to acceptance rule.
//!
//! A [`ValidationRule`] is an inspectable contract, checked against untrusted
//! JSON input by the request layer. Rules are per field; there are no
//! cross-field rules.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::types::{EntityDef, FieldDef, FieldType};

/// Accepted value for a `select` field that declares no options.
// TODO: confirm with product whether an option-less select should reject everything.
pub const SELECT_FALLBACK: &str = "draft";

/// The base acceptance rule of a field, before optionality is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "kebab-case")]
pub enum RuleKind {
    /// Any string.
    AnyString,
    /// A number, or a string that parses as one.
    Number,
    Boolean,
    /// One of a fixed set of strings.
    OneOf(Vec<String>),
    /// A sequence of strings, any length.
    StringList,
    /// An absolute URL.
    Url,
    Email,
}

/// Why a value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViolationReason {
    #[error("value is required")]
    Missing,
    #[error("expected a string")]
    ExpectedString,
    #[error("expected a number")]
    ExpectedNumber,
    #[error("expected a boolean")]
    ExpectedBoolean,
    #[error("expected a list of strings")]
    ExpectedStringList,
    #[error("'{value}' is not one of [{}]", .allowed.join(", "))]
    NotAnOption { value: String, allowed: Vec<String> },
    #[error("invalid URL")]
    InvalidUrl,
    #[error("invalid email address")]
    InvalidEmail,
}

/// A rejected value, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}': {reason}")]
pub struct RuleViolation {
    pub field: String,
    pub reason: ViolationReason,
}

impl RuleKind {
    /// Check a present value, returning it normalized.
    pub fn check(&self, value: &Value) -> Result<Value, ViolationReason> {
        match self {
            RuleKind::AnyString => match value {
                Value::String(_) => Ok(value.clone()),
                _ => Err(ViolationReason::ExpectedString),
            },
            RuleKind::Number => coerce_number(value).ok_or(ViolationReason::ExpectedNumber),
            RuleKind::Boolean => match value {
                Value::Bool(_) => Ok(value.clone()),
                _ => Err(ViolationReason::ExpectedBoolean),
            },
            RuleKind::OneOf(allowed) => {
                let Value::String(s) = value else {
                    return Err(ViolationReason::ExpectedString);
                };
                if allowed.iter().any(|o| o == s) {
                    Ok(value.clone())
                } else {
                    Err(ViolationReason::NotAnOption {
                        value: s.clone(),
                        allowed: allowed.clone(),
                    })
                }
            }
            RuleKind::StringList => match value {
                Value::Array(items) if items.iter().all(Value::is_string) => Ok(value.clone()),
                _ => Err(ViolationReason::ExpectedStringList),
            },
            RuleKind::Url => {
                let Value::String(s) = value else {
                    return Err(ViolationReason::ExpectedString);
                };
                url::Url::parse(s)
                    .map(|_| value.clone())
                    .map_err(|_| ViolationReason::InvalidUrl)
            }
            RuleKind::Email => {
                let Value::String(s) = value else {
                    return Err(ViolationReason::ExpectedString);
                };
                if is_email(s) {
                    Ok(value.clone())
                } else {
                    Err(ViolationReason::InvalidEmail)
                }
            }
        }
    }
}

/// Numbers pass through; strings are trimmed and parsed.
fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if let Ok(n) = s.parse::<i64>() {
                return Some(Value::from(n));
            }
            s.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
        }
        _ => None,
    }
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("Invalid email regex")
    })
}

fn is_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && email_regex().is_match(s)
}

/// The full validation contract of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRule {
    field: String,
    kind: RuleKind,
    optional: bool,
}

impl ValidationRule {
    pub fn new(field: impl Into<String>, kind: RuleKind, optional: bool) -> Self {
        Self {
            field: field.into(),
            kind,
            optional,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Whether absence is accepted.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Check a value that may be absent.
    ///
    /// Returns the normalized value (`None` when an optional value is absent).
    /// Only a missing key counts as absent; an explicit JSON `null` is checked
    /// against the base rule like any other value.
    pub fn check(&self, value: Option<&Value>) -> Result<Option<Value>, RuleViolation> {
        match value {
            None if self.optional => Ok(None),
            None => Err(self.violation(ViolationReason::Missing)),
            Some(v) => self
                .kind
                .check(v)
                .map(Some)
                .map_err(|reason| self.violation(reason)),
        }
    }

    pub fn accepts(&self, value: Option<&Value>) -> bool {
        self.check(value).is_ok()
    }

    fn violation(&self, reason: ViolationReason) -> RuleViolation {
        RuleViolation {
            field: self.field.clone(),
            reason,
        }
    }
}

/// Derive the validation rule of a field. Unknown kinds validate as text.
pub fn validation_rule(field: &FieldDef) -> ValidationRule {
    let kind = match &field.type_ {
        FieldType::Text | FieldType::RichText | FieldType::Date | FieldType::Datetime => {
            RuleKind::AnyString
        }
        FieldType::Number | FieldType::Currency => RuleKind::Number,
        FieldType::Boolean => RuleKind::Boolean,
        FieldType::Select if field.options.is_empty() => {
            RuleKind::OneOf(vec![SELECT_FALLBACK.to_string()])
        }
        FieldType::Select => RuleKind::OneOf(field.options.clone()),
        FieldType::MultiSelect | FieldType::Tags => RuleKind::StringList,
        FieldType::Url => RuleKind::Url,
        FieldType::Email => RuleKind::Email,
        FieldType::Unknown(_) => RuleKind::AnyString,
    };
    ValidationRule::new(field.name.clone(), kind, !field.required)
}

/// Precomputed rules for every field of an entity.
#[derive(Debug, Clone)]
pub struct EntityValidator {
    rules: Vec<ValidationRule>,
}

impl EntityValidator {
    pub fn new(entity: &EntityDef) -> Self {
        Self {
            rules: entity.fields.iter().map(validation_rule).collect(),
        }
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn rule(&self, field: &str) -> Option<&ValidationRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// Validate a request body against every field rule.
    ///
    /// Keys the entity does not declare are dropped. All violations are
    /// reported, in field declaration order.
    pub fn validate(&self, record: &Map<String, Value>) -> Result<Map<String, Value>, Vec<RuleViolation>> {
        let mut accepted = Map::new();
        let mut violations = Vec::new();

        for rule in &self.rules {
            match rule.check(record.get(&rule.field)) {
                Ok(Some(value)) => {
                    accepted.insert(rule.field.clone(), value);
                }
                Ok(None) => {}
                Err(violation) => violations.push(violation),
            }
        }

        if violations.is_empty() {
            Ok(accepted)
        } else {
            Err(violations)
        }
    }
}

/// Validate a request body against an entity's field rules.
pub fn validate_record(
    entity: &EntityDef,
    record: &Map<String, Value>,
) -> Result<Map<String, Value>, Vec<RuleViolation>> {
    EntityValidator::new(entity).validate(record)
}
