use crate::device::{GlDriver, Stage};

use super::Diagnostic;

/// A compiled (or failed) stage object, deleted when the guard goes out of scope.
///
/// Deleting a stage that is still attached only flags it; the driver frees it
/// together with the program.
pub(crate) struct StageGuard<'gl, D: GlDriver> {
    gl: &'gl D,
    shader: D::Shader,
    stage: Stage,
}

impl<'gl, D: GlDriver> StageGuard<'gl, D> {
    pub(crate) fn shader(&self) -> D::Shader {
        self.shader
    }

    pub(crate) fn stage(&self) -> Stage {
        self.stage
    }
}

impl<D: GlDriver> Drop for StageGuard<'_, D> {
    fn drop(&mut self) {
        self.gl.delete_stage(self.shader);
    }
}

/// Creates and compiles one stage.
///
/// A compile failure is recorded and the guard is still returned so linking
/// can report its own errors. `None` only when the driver refused to create
/// the stage object at all.
pub(crate) fn compile_stage<'gl, D: GlDriver>(
    gl: &'gl D,
    stage: Stage,
    source: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<StageGuard<'gl, D>> {
    let shader = match gl.create_stage(stage) {
        Ok(shader) => shader,
        Err(e) => {
            let diagnostic = Diagnostic::compile(stage, format!("cannot create stage object: {e}"));
            log::error!("{diagnostic}");
            diagnostics.push(diagnostic);
            return None;
        }
    };

    let guard = StageGuard { gl, shader, stage };

    gl.set_stage_source(shader, source);
    gl.compile_stage(shader);

    if !gl.stage_compile_status(shader) {
        let diagnostic = Diagnostic::compile(stage, gl.stage_info_log(shader));
        log::error!("{diagnostic}");
        diagnostics.push(diagnostic);
    }

    Some(guard)
}
