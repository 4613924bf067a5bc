use pipelint::dsl::parsing;
use pipelint::dsl::validation::Validator;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ValidationResult {
    pub result: bool,
    pub messages: Vec<String>,
}

pub fn lint_content(content: &str) -> ValidationResult {
    let outcome = parsing::decode_document(content)
        .map_err(|error| error.to_string())
        .and_then(|document| {
            Validator::new()
                .validate(&document)
                .map_err(|violation| format!("{} - path: {}", violation.reason, violation.path))
        });

    match outcome {
        Ok(()) => ValidationResult {
            result: true,
            messages: vec![String::from("Ok!")],
        },
        Err(message) => ValidationResult {
            result: false,
            messages: vec![message],
        },
    }
}

#[wasm_bindgen]
pub fn lint(content: String) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&lint_content(&content)).map_err(JsValue::from)
}
