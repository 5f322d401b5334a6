//! Adapter implementations for validation ports.

pub mod memory;
