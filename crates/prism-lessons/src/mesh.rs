use std::mem::size_of;
use std::rc::Rc;

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use glow::HasContext;

/// Position-only vertex, bound to attribute location 0.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { pos: [x, y, z] }
    }
}

/// A vertex array plus its vertex buffer, released on drop.
pub struct Mesh {
    gl: Rc<glow::Context>,
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
    vertex_count: i32,
}

impl Mesh {
    /// Uploads `vertices` as a static triangle list.
    pub fn new(gl: Rc<glow::Context>, vertices: &[Vertex]) -> Result<Self> {
        let vertex_count = i32::try_from(vertices.len()).context("too many vertices")?;

        // SAFETY: the runtime keeps the context current on this thread for
        // the lifetime of every lesson resource.
        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(anyhow::Error::msg)
                .context("failed to create vertex array")?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(anyhow::Error::msg(e).context("failed to create vertex buffer"));
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );

            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, size_of::<Vertex>() as i32, 0);
            gl.enable_vertex_attrib_array(0);

            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);

            Ok(Self { gl, vao, vbo, vertex_count })
        }
    }

    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    /// Draws `count` vertices starting at `first` with the current program.
    pub fn draw_range(&self, first: i32, count: i32) {
        let count = count.min(self.vertex_count - first);
        if first < 0 || count <= 0 {
            return;
        }
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.draw_arrays(glow::TRIANGLES, first, count);
        }
    }

    pub fn draw(&self) {
        self.draw_range(0, self.vertex_count);
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
        }
    }
}
