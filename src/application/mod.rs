//! Application layer: services and use cases
//!
//! This layer owns the mutable editing state and enforces the caller-side
//! rules (non-empty names, selection-targeted edits) around the pure engine.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::EditorSession;
