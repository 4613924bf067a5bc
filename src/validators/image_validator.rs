use crate::dsl::types::{InstancePath, Rule, SchemaViolation, ValueKind};
use serde_json::Value;

/// The top-level key naming the build image. It is the only key of a
/// pipeline document that is not a job.
pub const RESERVED_KEY: &str = "image";

pub struct ImageValidator {}

impl ImageValidator {
    /// Exact equality only: `images` or `base-image` are ordinary job names.
    pub fn is_reserved(key: &str) -> bool {
        key == RESERVED_KEY
    }
}

impl Rule for ImageValidator {
    fn check(&self, document: &Value, path: &InstancePath) -> Result<(), SchemaViolation> {
        let image_path = path.key(RESERVED_KEY);

        match document.get(RESERVED_KEY) {
            None => Err(SchemaViolation::missing(image_path)),
            Some(Value::String(_)) => Ok(()),
            Some(other) => Err(SchemaViolation::wrong_type(
                image_path,
                ValueKind::String,
                other,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::types::Reason;
    use serde_json::json;

    #[test]
    fn only_the_exact_key_is_reserved() {
        assert!(ImageValidator::is_reserved("image"));
        assert!(!ImageValidator::is_reserved("images"));
        assert!(!ImageValidator::is_reserved("imag"));
        assert!(!ImageValidator::is_reserved("Image"));
        assert!(!ImageValidator::is_reserved(""));
    }

    #[test]
    fn missing_image() {
        let violation = ImageValidator {}
            .check(&json!({"build": "build"}), &InstancePath::root())
            .unwrap_err();
        assert_eq!(violation.reason, Reason::MissingRequiredField);
        assert_eq!(violation.path.to_string(), "image");
    }

    #[test]
    fn image_must_be_a_string() {
        let violation = ImageValidator {}
            .check(&json!({"image": {"name": "rust"}}), &InstancePath::root())
            .unwrap_err();
        assert_eq!(violation.to_string(), "image: expected string, got mapping");
    }

    #[test]
    fn accepts_string_image() {
        assert!(ImageValidator {}
            .check(&json!({"image": "rust:1.80"}), &InstancePath::root())
            .is_ok());
    }
}
