use crate::dsl::types::{InstancePath, Rule, SchemaViolation, ValueKind};
use serde_json::Value;

/// One permitted key of a job mapping. Every job field is a sequence of
/// strings; fields only differ in whether they are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
}

pub const SCRIPT: FieldRule = FieldRule {
    name: "script",
    required: true,
};

pub const DEPENDS_ON: FieldRule = FieldRule {
    name: "depends_on",
    required: false,
};

pub const ARTIFACTS: FieldRule = FieldRule {
    name: "artifacts",
    required: false,
};

/// Compiled shape of a job entry.
#[derive(Debug, Clone)]
pub struct JobValidator {
    fields: Vec<FieldRule>,
}

impl Default for JobValidator {
    fn default() -> Self {
        Self {
            fields: vec![SCRIPT, DEPENDS_ON, ARTIFACTS],
        }
    }
}

impl JobValidator {
    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl Rule for JobValidator {
    fn check(&self, job: &Value, path: &InstancePath) -> Result<(), SchemaViolation> {
        let entries = match job {
            Value::Object(entries) => entries,
            other => {
                return Err(SchemaViolation::wrong_type(
                    path.clone(),
                    ValueKind::Mapping,
                    other,
                ))
            }
        };

        // required fields are reported before anything else in the entry
        if let Some(missing) = self
            .fields
            .iter()
            .find(|field| field.required && !entries.contains_key(field.name))
        {
            return Err(SchemaViolation::missing(path.key(missing.name)));
        }

        entries.iter().try_for_each(|(key, value)| {
            let field_path = path.key(key);
            match self.field(key) {
                Some(_) => string_sequence(value, &field_path),
                None => Err(SchemaViolation::unexpected(field_path)),
            }
        })
    }
}

fn string_sequence(value: &Value, path: &InstancePath) -> Result<(), SchemaViolation> {
    let items = value
        .as_array()
        .ok_or_else(|| SchemaViolation::wrong_type(path.clone(), ValueKind::Sequence, value))?;

    match items.iter().enumerate().find(|(_, item)| !item.is_string()) {
        Some((index, item)) => Err(SchemaViolation::wrong_element_type(
            path.index(index),
            ValueKind::String,
            item,
        )),
        None => Ok(()),
    }
}
