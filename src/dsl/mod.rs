pub mod display;
pub mod parsing;
pub mod types;
pub mod validation;
