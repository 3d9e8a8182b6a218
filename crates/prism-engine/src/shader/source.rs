use std::fs;
use std::path::Path;

use crate::device::Stage;

use super::Diagnostic;

/// Reads a stage's source file.
///
/// An unreadable file yields empty source plus an `Io` diagnostic; the caller
/// keeps building so the compile step reports the stage as well.
pub(crate) fn read_stage_source(path: &Path, stage: Stage, diagnostics: &mut Vec<Diagnostic>) -> String {
    match fs::read_to_string(path) {
        Ok(source) => {
            log::debug!("read {stage} shader source from {}", path.display());
            source
        }
        Err(e) => {
            let diagnostic = Diagnostic::io(stage, format!("{}: {e}", path.display()));
            log::error!("{diagnostic}");
            diagnostics.push(diagnostic);
            String::new()
        }
    }
}
