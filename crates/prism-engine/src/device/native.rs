use glow::HasContext;

use super::{GlDriver, Stage};

/// Forwards to the loaded GL function pointers.
///
/// Safety contract for every method: the context this `glow::Context` was
/// loaded from is current on the calling thread, and the handles passed in
/// were issued by that context and not yet deleted. `ShaderProgram` upholds
/// the second half through single ownership; the first half belongs to
/// whoever created the context.
impl GlDriver for glow::Context {
    type Shader = glow::NativeShader;
    type Program = glow::NativeProgram;
    type UniformLocation = glow::NativeUniformLocation;

    fn create_stage(&self, stage: Stage) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, stage.gl_enum()) }
    }

    fn set_stage_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_stage(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn stage_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { HasContext::get_shader_compile_status(self, shader) }
    }

    fn stage_info_log(&self, shader: Self::Shader) -> String {
        unsafe { HasContext::get_shader_info_log(self, shader) }
    }

    fn delete_stage(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn new_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_stage(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn link(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn link_status(&self, program: Self::Program) -> bool {
        unsafe { HasContext::get_program_link_status(self, program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { HasContext::get_program_info_log(self, program) }
    }

    fn release_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn bind_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn find_uniform(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        unsafe { HasContext::get_uniform_location(self, program, name) }
    }

    fn set_uniform_i32(&self, location: &Self::UniformLocation, value: i32) {
        unsafe { HasContext::uniform_1_i32(self, Some(location), value) }
    }

    fn set_uniform_f32(&self, location: &Self::UniformLocation, value: f32) {
        unsafe { HasContext::uniform_1_f32(self, Some(location), value) }
    }

    fn read_uniform_i32(&self, program: Self::Program, location: &Self::UniformLocation) -> i32 {
        let mut out = [0i32; 1];
        unsafe { HasContext::get_uniform_i32(self, program, location, &mut out) };
        out[0]
    }

    fn read_uniform_f32(&self, program: Self::Program, location: &Self::UniformLocation) -> f32 {
        let mut out = [0f32; 1];
        unsafe { HasContext::get_uniform_f32(self, program, location, &mut out) };
        out[0]
    }
}
