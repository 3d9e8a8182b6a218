//! Prism engine crate.
//!
//! Owns the GL-facing pieces shared by the exercises: the driver seam and the
//! shader program wrapper. Window and context creation live in the caller.

pub mod device;
pub mod logging;
pub mod shader;

pub use device::{GlDriver, Stage};
pub use shader::{Diagnostic, DiagnosticKind, ShaderError, ShaderProgram, UniformValue};
