//! Tool-call payload validation for agent pipelines.
//!
//! # Crate Structure
//!
//! - [`schema`] — Field checks, the cross-field rule, and the published JSON Schema
//!
//! The `toolcheck` binary (behind the `cli` feature) wraps the same
//! validator for shell use: `check`, `demo`, `schema` and `version`.

/// Re-export validator types.
pub mod schema {
    pub use toolcheck_schema::*;
}
