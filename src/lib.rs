pub mod dsl;

#[cfg(feature = "server")]
pub mod server;

pub mod validators;
