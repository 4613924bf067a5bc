pub mod image_validator;
pub mod job_validator;
