use std::fmt;
use std::path::Path;
use std::rc::Rc;

use crate::device::{GlDriver, Stage};

use super::source::read_stage_source;
use super::stage::{compile_stage, StageGuard};
use super::{Diagnostic, ShaderError, UniformValue};

/// A linked vertex + fragment program.
///
/// Construction never fails outright: I/O, compile and link problems are
/// logged and kept in `diagnostics()`, and the program degrades to a no-op
/// (`is_valid() == false`). Use `into_result` to treat any diagnostic as fatal.
///
/// The program object is owned exclusively and released on drop. The driver is
/// held through `Rc`, which keeps the value on the thread owning the context.
pub struct ShaderProgram<D: GlDriver> {
    gl: Rc<D>,
    /// Created program object, linked or not. `None` if creation failed.
    program: Option<D::Program>,
    linked: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<D: GlDriver> ShaderProgram<D> {
    /// Reads both stage sources from disk, then compiles and links them.
    pub fn from_files(gl: Rc<D>, vertex_path: impl AsRef<Path>, fragment_path: impl AsRef<Path>) -> Self {
        let mut diagnostics = Vec::new();
        let vertex = read_stage_source(vertex_path.as_ref(), Stage::Vertex, &mut diagnostics);
        let fragment = read_stage_source(fragment_path.as_ref(), Stage::Fragment, &mut diagnostics);
        Self::build(gl, &vertex, &fragment, diagnostics)
    }

    /// Compiles and links in-memory sources.
    pub fn from_sources(gl: Rc<D>, vertex_source: &str, fragment_source: &str) -> Self {
        Self::build(gl, vertex_source, fragment_source, Vec::new())
    }

    fn build(gl: Rc<D>, vertex_source: &str, fragment_source: &str, mut diagnostics: Vec<Diagnostic>) -> Self {
        let vertex = compile_stage(&*gl, Stage::Vertex, vertex_source, &mut diagnostics);
        let fragment = compile_stage(&*gl, Stage::Fragment, fragment_source, &mut diagnostics);
        let (program, linked) = link_stages(&*gl, [vertex.as_ref(), fragment.as_ref()], &mut diagnostics);

        // Stage objects go away here, linked or not.
        drop(fragment);
        drop(vertex);

        Self {
            gl,
            program,
            linked,
            diagnostics,
        }
    }

    /// The linked program handle; `None` when construction failed at any step.
    pub fn handle(&self) -> Option<D::Program> {
        self.program.filter(|_| self.linked)
    }

    pub fn is_valid(&self) -> bool {
        self.handle().is_some()
    }

    /// Everything that went wrong during construction, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the program only if it linked without any diagnostic.
    ///
    /// On failure the program object is released and the diagnostics returned.
    pub fn into_result(mut self) -> Result<Self, ShaderError> {
        if self.linked && self.diagnostics.is_empty() {
            return Ok(self);
        }
        Err(ShaderError {
            diagnostics: std::mem::take(&mut self.diagnostics),
        })
    }

    /// Makes this program current for subsequent draw calls.
    ///
    /// No-op on an invalid program.
    pub fn use_program(&self) {
        if let Some(program) = self.handle() {
            self.gl.bind_program(Some(program));
        }
    }

    /// Assigns `value` to the uniform called `name`.
    ///
    /// Like the underlying API this writes to the *current* program, so call
    /// `use_program` first. Unknown names and invalid programs are silently
    /// ignored.
    pub fn set<V: UniformValue>(&self, name: &str, value: V) {
        let Some(program) = self.handle() else { return };
        let Some(location) = self.gl.find_uniform(program, name) else { return };
        value.upload(&*self.gl, &location);
    }

    /// Reads an integer (or bool) uniform back from the driver.
    pub fn uniform_i32(&self, name: &str) -> Option<i32> {
        let program = self.handle()?;
        let location = self.gl.find_uniform(program, name)?;
        Some(self.gl.read_uniform_i32(program, &location))
    }

    /// Reads a float uniform back from the driver.
    pub fn uniform_f32(&self, name: &str) -> Option<f32> {
        let program = self.handle()?;
        let location = self.gl.find_uniform(program, name)?;
        Some(self.gl.read_uniform_f32(program, &location))
    }

    /// Releases the program now rather than at end of scope.
    pub fn destroy(self) {
        drop(self);
    }
}

fn link_stages<D: GlDriver>(
    gl: &D,
    stages: [Option<&StageGuard<'_, D>>; 2],
    diagnostics: &mut Vec<Diagnostic>,
) -> (Option<D::Program>, bool) {
    let program = match gl.new_program() {
        Ok(program) => program,
        Err(e) => {
            let diagnostic = Diagnostic::link(format!("cannot create program object: {e}"));
            log::error!("{diagnostic}");
            diagnostics.push(diagnostic);
            return (None, false);
        }
    };

    for guard in stages.into_iter().flatten() {
        log::trace!("attaching {} stage {:?} to {program:?}", guard.stage(), guard.shader());
        gl.attach_stage(program, guard.shader());
    }

    gl.link(program);

    let linked = gl.link_status(program);
    if linked {
        log::debug!("linked shader program {program:?}");
    } else {
        let diagnostic = Diagnostic::link(gl.program_info_log(program));
        log::error!("{diagnostic}");
        diagnostics.push(diagnostic);
    }

    (Some(program), linked)
}

impl<D: GlDriver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        if let Some(program) = self.program.take() {
            self.gl.release_program(program);
            log::debug!("released shader program {program:?}");
        }
    }
}

impl<D: GlDriver> fmt::Debug for ShaderProgram<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("program", &self.program)
            .field("linked", &self.linked)
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}
