use serde_json::Value;
use serde_yaml::Value as Yaml;
use thiserror::Error;

use crate::dsl::types::InstancePath;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Parse error - {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Parse error - mapping key in {path} must be a string, got {kind}")]
    NonStringKey { path: InstancePath, kind: &'static str },
    #[error("Parse error - {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Parse error - {0}")]
    Convert(#[from] serde_json::Error),
}

/// Decodes a YAML (or JSON) payload into the generic document tree the
/// validator works on. Key order of the source is kept.
pub fn decode_document(input: &str) -> Result<Value, DecodeError> {
    let yaml = serde_yaml::from_str::<Yaml>(input)?;
    string_keys(&yaml, &InstancePath::root())?;

    Ok(serde_json::to_value(&yaml)?)
}

/// Same as [`decode_document`] for raw bytes; invalid UTF-8 is a parse error.
pub fn decode_bytes(input: &[u8]) -> Result<Value, DecodeError> {
    decode_document(std::str::from_utf8(input)?)
}

// serde_json would otherwise turn `1:` or `true:` into the keys "1" and "true"
fn string_keys(value: &Yaml, path: &InstancePath) -> Result<(), DecodeError> {
    match value {
        Yaml::Mapping(entries) => entries.iter().try_for_each(|(key, value)| match key {
            Yaml::String(key) => string_keys(value, &path.key(key)),
            other => Err(DecodeError::NonStringKey {
                path: path.clone(),
                kind: kind_of(other),
            }),
        }),
        Yaml::Sequence(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(index, item)| string_keys(item, &path.index(index))),
        Yaml::Tagged(tagged) => string_keys(&tagged.value, path),
        _ => Ok(()),
    }
}

fn kind_of(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "boolean",
        Yaml::Number(_) => "number",
        Yaml::String(_) => "string",
        Yaml::Sequence(_) => "sequence",
        Yaml::Mapping(_) => "mapping",
        Yaml::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod test {
    use super::super::parsing;
    use super::DecodeError;
    use serde_json::json;

    #[test]
    fn decodes_yaml_pipeline() {
        let input = r#"
            image: rust:1.80
            build:
              script:
                - cargo build --release
              artifacts:
                - target/release/app
            test:
              script:
                - cargo test
              depends_on:
                - build
        "#;

        let document = parsing::decode_document(input).unwrap();
        assert_eq!(document["image"], json!("rust:1.80"));
        assert_eq!(document["test"]["depends_on"], json!(["build"]));

        let keys: Vec<&String> = document.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["image", "build", "test"]);
    }

    #[test]
    fn decodes_json_pipeline() {
        let input = r#"{"image": "image", "build": {"script": ["good", "script"]}}"#;
        let document = parsing::decode_document(input).unwrap();
        assert_eq!(document["build"]["script"], json!(["good", "script"]));
    }

    #[test]
    fn reports_malformed_input() {
        let error = parsing::decode_document("image: [unclosed").unwrap_err();
        assert!(error.to_string().starts_with("Parse error - "));
    }

    #[test]
    fn rejects_numeric_job_name() {
        let error = parsing::decode_document("image: a\n1: {script: [x]}\n").unwrap_err();
        assert!(matches!(
            error,
            DecodeError::NonStringKey { kind: "number", .. }
        ));
        assert_eq!(
            error.to_string(),
            "Parse error - mapping key in (root) must be a string, got number"
        );
    }

    #[test]
    fn rejects_boolean_key_inside_job() {
        let error =
            parsing::decode_document("image: a\nbuild:\n  script: [x]\n  true: [y]\n").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Parse error - mapping key in build must be a string, got boolean"
        );
    }

    #[test]
    fn rejects_invalid_utf8() {
        let error = parsing::decode_bytes(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(error, DecodeError::Utf8(_)));
        assert!(error.to_string().starts_with("Parse error - invalid utf-8"));
    }
}
