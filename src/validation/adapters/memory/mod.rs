//! In-memory adapter implementations.

mod templates;

pub use templates::InMemoryTemplateStore;
