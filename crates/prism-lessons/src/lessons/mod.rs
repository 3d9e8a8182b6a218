//! The exercises, selectable by name on the command line.

mod triangles;
mod uniforms;

pub use triangles::Triangles;
pub use uniforms::Uniforms;

use crate::lesson::Lesson;

pub const DEFAULT: &str = "triangles";

pub const NAMES: &[&str] = &["triangles", "uniforms"];

pub fn by_name(name: &str) -> Option<Box<dyn Lesson>> {
    match name {
        "triangles" => Some(Box::new(Triangles::default())),
        "uniforms" => Some(Box::new(Uniforms::default())),
        _ => None,
    }
}
