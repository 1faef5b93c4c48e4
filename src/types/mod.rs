mod api;

pub use api::{ApiErrorBody, ApiErrorEnvelope, ApiMessage, Role};
