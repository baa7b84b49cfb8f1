//! Validation rules for user payloads.
//!
//! Rules are pure: they take the raw JSON a client sent and return either a
//! typed, validated value or a [`ValidationFailure`] describing every field
//! that broke a rule. Nothing here performs I/O, so handlers can rely on a
//! validated value never having touched the database.

mod failure;
pub mod requests;

pub use failure::{FieldViolation, ValidationFailure};
pub use requests::{CreateUserRequest, IdRequest, UpdateUserRequest};

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use crate::config::{ConfigError, BODY_FIELD};
use crate::domain::{CreateUser, UpdateUser};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JSON fields accepted by each operation
const ID_FIELDS: &[&str] = &["id"];
const CREATE_FIELDS: &[&str] = &["email", "fullName"];
const UPDATE_FIELDS: &[&str] = &["id", "fullName", "email"];

/// Treatment of payload fields no rule knows about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Report each unknown field as a violation
    #[default]
    Reject,
    /// Drop unknown fields silently
    Strip,
}

impl FromStr for Strictness {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Strictness::Reject),
            "strip" => Ok(Strictness::Strip),
            _ => Err(ConfigError::InvalidValue {
                key: "VALIDATION_UNKNOWN_FIELDS",
                value: s.to_string(),
                expected: "reject, strip",
            }),
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strictness::Reject => write!(f, "reject"),
            Strictness::Strip => write!(f, "strip"),
        }
    }
}

/// Validation rules for every user operation.
///
/// Failures are values: callers branch on the `Result` before touching
/// persistence.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UserValidation: Send + Sync {
    /// `{ id }` naming an existing or non-existing user
    fn find_by_id(&self, input: Value) -> Result<ObjectId, ValidationFailure>;

    /// `{ email, fullName }`, both required
    fn create(&self, input: Value) -> Result<CreateUser, ValidationFailure>;

    /// `{ id, fullName?, email? }` with at least one change
    fn update_by_id(&self, input: Value) -> Result<UpdateUser, ValidationFailure>;

    /// `{ id }` of the user to remove
    fn delete_by_id(&self, input: Value) -> Result<ObjectId, ValidationFailure>;
}

/// Schema-driven implementation of [`UserValidation`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator {
    strictness: Strictness,
}

impl SchemaValidator {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    /// Check the JSON shape, then deserialize and run the derived rules.
    ///
    /// Fields that fail the shape check are dropped before deserializing, and
    /// derived rules on those fields are not reported twice. Returns the
    /// request alongside every violation found so far, so operation-specific
    /// checks can add to the same list.
    fn parse<T>(&self, input: Value, known: &[&str]) -> Result<(T, Vec<FieldViolation>), ValidationFailure>
    where
        T: DeserializeOwned + Validate,
    {
        let (fields, mut violations) = self.check_shape(input, known)?;
        let rejected: Vec<String> = violations.iter().map(|v| v.field.clone()).collect();

        let request: T = serde_json::from_value(Value::Object(fields)).map_err(|e| {
            ValidationFailure::single(FieldViolation::new(BODY_FIELD, "type", e.to_string()))
        })?;

        if let Err(errors) = request.validate() {
            violations.extend(
                failure::violations_from(&errors)
                    .into_iter()
                    .filter(|v| !rejected.contains(&v.field)),
            );
        }

        Ok((request, violations))
    }

    /// Split a payload into the known string fields and the shape violations.
    ///
    /// Known fields must be strings; `null` is a type violation, not an
    /// absent field. Unknown fields are dropped, and reported under
    /// [`Strictness::Reject`].
    fn check_shape(
        &self,
        input: Value,
        known: &[&str],
    ) -> Result<(Map<String, Value>, Vec<FieldViolation>), ValidationFailure> {
        let Value::Object(object) = input else {
            return Err(ValidationFailure::single(FieldViolation::new(
                BODY_FIELD,
                "type",
                "payload must be a JSON object",
            )));
        };

        let mut fields = Map::new();
        let mut violations = Vec::new();
        for (key, value) in object {
            if known.contains(&key.as_str()) {
                if value.is_string() {
                    fields.insert(key, value);
                } else {
                    let message = format!("{} must be a string", key);
                    violations.push(FieldViolation::new(key, "type", message));
                }
            } else if self.strictness == Strictness::Reject {
                let message = format!("{} is not allowed", key);
                violations.push(FieldViolation::new(key, "unknown", message));
            }
        }

        Ok((fields, violations))
    }

    fn validate_id(&self, input: Value) -> Result<ObjectId, ValidationFailure> {
        let (request, mut violations) = self.parse::<IdRequest>(input, ID_FIELDS)?;
        let id = parse_object_id(request.id.as_deref(), &mut violations);

        ValidationFailure::check(violations)?;
        id.ok_or_else(|| missing("id"))
    }
}

impl UserValidation for SchemaValidator {
    fn find_by_id(&self, input: Value) -> Result<ObjectId, ValidationFailure> {
        self.validate_id(input)
    }

    fn create(&self, input: Value) -> Result<CreateUser, ValidationFailure> {
        let (request, violations) = self.parse::<CreateUserRequest>(input, CREATE_FIELDS)?;
        ValidationFailure::check(violations)?;

        match (request.email, request.full_name) {
            (Some(email), Some(full_name)) => Ok(CreateUser { email, full_name }),
            (None, _) => Err(missing("email")),
            (_, None) => Err(missing("fullName")),
        }
    }

    fn update_by_id(&self, input: Value) -> Result<UpdateUser, ValidationFailure> {
        let (request, mut violations) = self.parse::<UpdateUserRequest>(input, UPDATE_FIELDS)?;
        let id = parse_object_id(request.id.as_deref(), &mut violations);

        let change_rejected = violations
            .iter()
            .any(|v| v.field == "fullName" || v.field == "email");
        if !request.has_changes() && !change_rejected {
            violations.push(FieldViolation::new(
                BODY_FIELD,
                "min_fields",
                "at least one of fullName or email must be provided",
            ));
        }

        ValidationFailure::check(violations)?;
        let id = id.ok_or_else(|| missing("id"))?;

        Ok(UpdateUser {
            id,
            full_name: request.full_name,
            email: request.email,
        })
    }

    fn delete_by_id(&self, input: Value) -> Result<ObjectId, ValidationFailure> {
        self.validate_id(input)
    }
}

/// Parse a present identifier, recording a violation when it is malformed.
fn parse_object_id(raw: Option<&str>, violations: &mut Vec<FieldViolation>) -> Option<ObjectId> {
    let raw = raw?;
    match ObjectId::parse_str(raw) {
        Ok(id) => Some(id),
        Err(_) => {
            violations.push(FieldViolation::new(
                "id",
                "object_id",
                "id must be a 24 character hex string",
            ));
            None
        }
    }
}

fn missing(field: &str) -> ValidationFailure {
    ValidationFailure::single(FieldViolation::new(
        field,
        "required",
        format!("{} is required", field),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const USER_ID: &str = "61f804df5a558fd34f2543fd";

    fn validator() -> SchemaValidator {
        SchemaValidator::default()
    }

    fn rules(failure: &ValidationFailure) -> Vec<(&str, &str)> {
        failure
            .violations
            .iter()
            .map(|v| (v.field.as_str(), v.rule.as_str()))
            .collect()
    }

    #[test]
    fn find_by_id_accepts_object_id() {
        let id = validator().find_by_id(json!({ "id": USER_ID })).unwrap();
        assert_eq!(id.to_hex(), USER_ID);
    }

    #[test]
    fn find_by_id_rejects_malformed_id() {
        let failure = validator().find_by_id(json!({ "id": "not-an-id" })).unwrap_err();
        assert_eq!(rules(&failure), vec![("id", "object_id")]);
    }

    #[test]
    fn find_by_id_requires_id() {
        let failure = validator().find_by_id(json!({})).unwrap_err();
        assert_eq!(rules(&failure), vec![("id", "required")]);
    }

    #[test]
    fn create_returns_payload_unchanged() {
        let payload = json!({ "email": "jest@gmail.com", "fullName": "Onix-Systems" });

        let value = validator().create(payload.clone()).unwrap();

        assert_eq!(serde_json::to_value(&value).unwrap(), payload);
    }

    #[test]
    fn create_reports_all_missing_fields() {
        let failure = validator().create(json!({})).unwrap_err();
        assert_eq!(
            rules(&failure),
            vec![("email", "required"), ("fullName", "required")]
        );
    }

    #[test]
    fn create_rejects_bad_email_and_empty_name() {
        let failure = validator()
            .create(json!({ "email": "nope", "fullName": "" }))
            .unwrap_err();
        assert_eq!(
            rules(&failure),
            vec![("email", "email"), ("fullName", "length")]
        );
    }

    #[test]
    fn create_rejects_wrong_types() {
        let failure = validator()
            .create(json!({ "email": "jest@gmail.com", "fullName": 42 }))
            .unwrap_err();
        assert_eq!(rules(&failure), vec![("fullName", "type")]);
    }

    #[test]
    fn create_reports_unknown_and_missing_fields_together() {
        let failure = validator().create(json!({ "role": "admin" })).unwrap_err();
        assert_eq!(
            rules(&failure),
            vec![("email", "required"), ("fullName", "required"), ("role", "unknown")]
        );
    }

    #[test]
    fn create_reports_bad_email_alongside_wrong_type() {
        let failure = validator()
            .create(json!({ "email": "bad", "fullName": 42 }))
            .unwrap_err();
        assert_eq!(rules(&failure), vec![("email", "email"), ("fullName", "type")]);
    }

    #[test]
    fn null_fields_are_type_violations() {
        let failure = validator()
            .update_by_id(json!({ "id": USER_ID, "fullName": null, "email": "a@b.co" }))
            .unwrap_err();
        assert_eq!(rules(&failure), vec![("fullName", "type")]);
    }

    #[test]
    fn update_with_only_mistyped_change_skips_min_fields() {
        let failure = validator()
            .update_by_id(json!({ "id": USER_ID, "email": 7 }))
            .unwrap_err();
        assert_eq!(rules(&failure), vec![("email", "type")]);
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let failure = validator().create(json!(["jest@gmail.com"])).unwrap_err();
        assert_eq!(rules(&failure), vec![("body", "type")]);
    }

    #[test]
    fn unknown_fields_rejected_by_default() {
        let failure = validator()
            .create(json!({ "email": "jest@gmail.com", "fullName": "Onix", "role": "admin" }))
            .unwrap_err();
        assert_eq!(rules(&failure), vec![("role", "unknown")]);
    }

    #[test]
    fn unknown_fields_stripped_when_configured() {
        let value = SchemaValidator::new(Strictness::Strip)
            .create(json!({ "email": "jest@gmail.com", "fullName": "Onix", "role": "admin" }))
            .unwrap();

        assert_eq!(
            value,
            CreateUser {
                email: "jest@gmail.com".to_string(),
                full_name: "Onix".to_string(),
            }
        );
    }

    #[test]
    fn update_requires_id_and_a_change() {
        let failure = validator().update_by_id(json!({})).unwrap_err();
        assert_eq!(rules(&failure), vec![("body", "min_fields"), ("id", "required")]);
    }

    #[test]
    fn update_accepts_partial_change() {
        let value = validator()
            .update_by_id(json!({ "id": USER_ID, "fullName": "Onix-Systems" }))
            .unwrap();

        assert_eq!(value.id.to_hex(), USER_ID);
        assert_eq!(value.full_name.as_deref(), Some("Onix-Systems"));
        assert_eq!(value.email, None);
    }

    #[test]
    fn update_applies_create_rules_to_present_fields() {
        let failure = validator()
            .update_by_id(json!({ "id": USER_ID, "email": "broken" }))
            .unwrap_err();
        assert_eq!(rules(&failure), vec![("email", "email")]);
    }

    #[test]
    fn delete_by_id_accepts_object_id() {
        let id = validator().delete_by_id(json!({ "id": USER_ID })).unwrap();
        assert_eq!(id.to_hex(), USER_ID);
    }

    #[test]
    fn strictness_parses_from_config_values() {
        assert_eq!("reject".parse::<Strictness>().unwrap(), Strictness::Reject);
        assert_eq!(" Strip ".parse::<Strictness>().unwrap(), Strictness::Strip);
        assert!("lenient".parse::<Strictness>().is_err());
    }
}
