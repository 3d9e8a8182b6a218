use std::fmt;

use crate::device::Stage;

/// Which step of program construction failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DiagnosticKind {
    /// Source file could not be read; the stage was compiled from empty text.
    Io,
    /// Stage creation or compilation failed.
    Compile,
    /// Program creation or linking failed.
    Link,
}

/// One failure recorded while building a `ShaderProgram`.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Set for `Io` and `Compile`; link failures are program-wide.
    pub stage: Option<Stage>,
    /// Driver info log or I/O error text.
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn io(stage: Stage, message: impl Into<String>) -> Self {
        Self { kind: DiagnosticKind::Io, stage: Some(stage), message: message.into() }
    }

    pub(crate) fn compile(stage: Stage, message: impl Into<String>) -> Self {
        Self { kind: DiagnosticKind::Compile, stage: Some(stage), message: message.into() }
    }

    pub(crate) fn link(message: impl Into<String>) -> Self {
        Self { kind: DiagnosticKind::Link, stage: None, message: message.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message.trim_end();
        match (self.kind, self.stage) {
            (DiagnosticKind::Io, Some(stage)) => {
                write!(f, "failed to read {stage} shader source: {message}")
            }
            (DiagnosticKind::Compile, Some(stage)) => {
                write!(f, "failed to compile {stage} shader:\n{message}")
            }
            (DiagnosticKind::Io, None) => write!(f, "failed to read shader source: {message}"),
            (DiagnosticKind::Compile, None) => write!(f, "failed to compile shader:\n{message}"),
            (DiagnosticKind::Link, _) => write!(f, "failed to link shader program:\n{message}"),
        }
    }
}

impl std::error::Error for Diagnostic {}

/// Every diagnostic produced by a failed build, in the order they occurred.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderError {
    pub diagnostics: Vec<Diagnostic>,
}

impl ShaderError {
    pub fn first(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shader program build failed with {} diagnostic(s)", self.diagnostics.len())?;
        for d in &self.diagnostics {
            write!(f, "\n- {d}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ShaderError {}
