use colored::*;
use serde_json::{json, Map, Value};

use crate::dsl::types::{InstancePath, Job, Pipeline, Rule, SchemaViolation, ValueKind};
use crate::validators::image_validator::{ImageValidator, RESERVED_KEY};
use crate::validators::job_validator::{JobValidator, ARTIFACTS, DEPENDS_ON, SCRIPT};

pub fn error_header(head: &str) -> String {
    format!("  {}  ", head).on_red().black().to_string()
}

pub fn ok_header(head: &str) -> String {
    format!("  {}  ", head).on_green().black().to_string()
}

/// Checks decoded documents against the pipeline shape.
///
/// The shape is compiled once on construction and never changes afterwards,
/// so a single validator can be shared between threads and reused for any
/// number of documents.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    jobs: JobValidator,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first violation found, walking the reserved `image` key
    /// before any job and the jobs in document order.
    pub fn validate(&self, document: &Value) -> Result<(), SchemaViolation> {
        let root = InstancePath::root();

        let entries = document
            .as_object()
            .ok_or_else(|| SchemaViolation::wrong_type(root.clone(), ValueKind::Mapping, document))?;

        ImageValidator {}.check(document, &root)?;

        entries
            .iter()
            .filter(|(key, _)| !ImageValidator::is_reserved(key))
            .try_for_each(|(name, job)| self.jobs.check(job, &root.key(name)))
    }

    /// Validates the document and returns its typed view.
    pub fn parse(&self, document: &Value) -> Result<Pipeline, SchemaViolation> {
        self.validate(document)?;

        let image = document
            .get(RESERVED_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let jobs = document
            .as_object()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(key, _)| !ImageValidator::is_reserved(key))
                    .map(|(name, job)| Job {
                        name: name.clone(),
                        script: strings(job, SCRIPT.name),
                        depends_on: strings(job, DEPENDS_ON.name),
                        artifacts: strings(job, ARTIFACTS.name),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Pipeline { image, jobs })
    }

    /// Draft 7 JSON Schema describing the same shape, for editors and other
    /// tooling.
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = vec![];

        self.jobs.fields().iter().for_each(|field| {
            properties.insert(
                field.name.to_string(),
                json!({ "type": "array", "items": { "type": "string" } }),
            );
            if field.required {
                required.push(json!(field.name));
            }
        });

        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "$ref": "#/definitions/Pipeline",
            "definitions": {
                "Pipeline": {
                    "type": "object",
                    "properties": {
                        RESERVED_KEY: { "type": "string" }
                    },
                    "required": [RESERVED_KEY],
                    "additionalProperties": { "$ref": "#/definitions/Job" },
                    "title": "Pipeline"
                },
                "Job": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": properties,
                    "required": required,
                    "title": "Job"
                }
            }
        })
    }
}

fn strings(job: &Value, field: &str) -> Vec<String> {
    job.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
