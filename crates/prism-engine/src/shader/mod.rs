//! Shader programs.
//!
//! A `ShaderProgram` owns one linked vertex + fragment program. Building one
//! runs read -> compile -> link and records every failure as a `Diagnostic`
//! instead of stopping at the first.

mod diagnostic;
mod program;
mod source;
mod stage;
mod uniform;

pub use diagnostic::{Diagnostic, DiagnosticKind, ShaderError};
pub use program::ShaderProgram;
pub use uniform::UniformValue;
