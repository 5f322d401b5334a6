//! Validation and message rendering services.

pub mod resolver;
pub mod validator;

pub use resolver::{MessageResolver, MissingTemplatePolicy, RenderedMessage, ResolverConfig};
pub use validator::FieldValidator;
