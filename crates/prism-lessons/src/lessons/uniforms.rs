use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use prism_engine::ShaderProgram;

use crate::clock::FrameTime;
use crate::lesson::Lesson;
use crate::mesh::{Mesh, Vertex};

const VERTICES: [Vertex; 3] = [
    Vertex::new(-0.5, -0.5, 0.0),
    Vertex::new(0.5, -0.5, 0.0),
    Vertex::new(0.0, 0.5, 0.0),
];

/// Seconds each colour mode stays on screen.
const MODE_PERIOD: f32 = 3.0;
const MODE_COUNT: i32 = 3;

fn shader_path(file: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "shaders", file].iter().collect()
}

/// `u_invert` flips once per second.
fn invert_at(elapsed: f32) -> bool {
    elapsed.max(0.0) as u32 % 2 == 1
}

/// `u_mode` cycles through `0..MODE_COUNT`.
fn mode_at(elapsed: f32) -> i32 {
    (elapsed.max(0.0) / MODE_PERIOD) as i32 % MODE_COUNT
}

struct Resources {
    program: ShaderProgram<glow::Context>,
    mesh: Mesh,
}

/// File-based program driven by float, bool and int uniforms.
#[derive(Default)]
pub struct Uniforms {
    resources: Option<Resources>,
}

impl Lesson for Uniforms {
    fn name(&self) -> &'static str {
        "uniforms"
    }

    fn init(&mut self, gl: &Rc<glow::Context>) -> Result<()> {
        let program = ShaderProgram::from_files(
            gl.clone(),
            shader_path("pulse.vert"),
            shader_path("pulse.frag"),
        )
        .into_result()
        .context("failed to build pulse program")?;

        let mesh = Mesh::new(gl.clone(), &VERTICES).context("failed to upload triangle")?;

        self.resources = Some(Resources { program, mesh });
        Ok(())
    }

    fn on_frame(&mut self, time: FrameTime) {
        let Some(res) = self.resources.as_ref() else { return };

        res.program.use_program();
        res.program.set("u_time", time.elapsed);
        res.program.set("u_invert", invert_at(time.elapsed));
        res.program.set("u_mode", mode_at(time.elapsed));
        res.mesh.draw();
    }

    fn release(&mut self) {
        self.resources = None;
    }
}
