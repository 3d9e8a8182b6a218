use std::rc::Rc;

use anyhow::{Context, Result};
use prism_engine::ShaderProgram;

use crate::clock::FrameTime;
use crate::lesson::Lesson;
use crate::mesh::{Mesh, Vertex};

const VERTEX_SOURCE: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
void main() {
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

const FRAGMENT_SOURCE: &str = "#version 330 core
out vec4 FragColor;
void main() {
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
";

/// Two triangles side by side, bottom-left and upper-right.
const VERTICES: [Vertex; 6] = [
    Vertex::new(-1.0, -1.0, 0.0),
    Vertex::new(0.0, -1.0, 0.0),
    Vertex::new(-0.5, 0.0, 0.0),
    Vertex::new(0.0, 0.0, 0.0),
    Vertex::new(1.0, 0.0, 0.0),
    Vertex::new(0.5, 1.0, 0.0),
];

struct Resources {
    program: ShaderProgram<glow::Context>,
    mesh: Mesh,
}

/// Constant-colour program built from inline sources, drawn in two calls.
#[derive(Default)]
pub struct Triangles {
    resources: Option<Resources>,
}

impl Lesson for Triangles {
    fn name(&self) -> &'static str {
        "triangles"
    }

    fn init(&mut self, gl: &Rc<glow::Context>) -> Result<()> {
        // Diagnostics are logged by the program itself; a broken program just draws nothing.
        let program = ShaderProgram::from_sources(gl.clone(), VERTEX_SOURCE, FRAGMENT_SOURCE);
        if !program.is_valid() {
            log::warn!("triangles: program is invalid, frames will be empty");
        }

        let mesh = Mesh::new(gl.clone(), &VERTICES).context("failed to upload triangles")?;

        self.resources = Some(Resources { program, mesh });
        Ok(())
    }

    fn on_frame(&mut self, _time: FrameTime) {
        let Some(res) = self.resources.as_ref() else { return };

        let half = res.mesh.vertex_count() / 2;
        res.program.use_program();
        res.mesh.draw_range(0, half);
        res.mesh.draw_range(half, half);
    }

    fn release(&mut self) {
        self.resources = None;
    }
}
