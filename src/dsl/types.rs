use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// A pipeline that passed validation.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub image: String,
    pub jobs: Vec<Job>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub script: Vec<String>,
    pub depends_on: Vec<String>,
    pub artifacts: Vec<String>,
}

/// The kind of a decoded value, used to describe type mismatches.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Sequence,
    Mapping,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Sequence,
            Value::Object(_) => ValueKind::Mapping,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a document, rendered as `build.script[1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstancePath {
    segments: Vec<PathSegment>,
}

impl InstancePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("(root)");
        }

        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if position == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for InstancePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum Reason {
    MissingRequiredField,
    UnexpectedKey,
    WrongType { expected: ValueKind, actual: ValueKind },
    WrongElementType { expected: ValueKind, actual: ValueKind },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::MissingRequiredField => f.write_str("missing required field"),
            Reason::UnexpectedKey => f.write_str("unexpected key"),
            Reason::WrongType { expected, actual } => {
                write!(f, "expected {}, got {}", expected, actual)
            }
            Reason::WrongElementType { expected, actual } => {
                write!(f, "expected {} element, got {}", expected, actual)
            }
        }
    }
}

/// The first place where a document departs from the pipeline shape.
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
#[error("{path}: {reason}")]
pub struct SchemaViolation {
    pub path: InstancePath,
    #[serde(flatten)]
    pub reason: Reason,
}

impl SchemaViolation {
    pub fn missing(path: InstancePath) -> Self {
        Self {
            path,
            reason: Reason::MissingRequiredField,
        }
    }

    pub fn unexpected(path: InstancePath) -> Self {
        Self {
            path,
            reason: Reason::UnexpectedKey,
        }
    }

    pub fn wrong_type(path: InstancePath, expected: ValueKind, actual: &Value) -> Self {
        Self {
            path,
            reason: Reason::WrongType {
                expected,
                actual: ValueKind::of(actual),
            },
        }
    }

    pub fn wrong_element_type(path: InstancePath, expected: ValueKind, actual: &Value) -> Self {
        Self {
            path,
            reason: Reason::WrongElementType {
                expected,
                actual: ValueKind::of(actual),
            },
        }
    }
}

/// A single structural rule applied to one value of the document.
pub trait Rule {
    fn check(&self, value: &Value, path: &InstancePath) -> Result<(), SchemaViolation>;
}
