use std::fmt;

/// Pipeline role of a shader stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    /// Driver enum passed to stage creation.
    pub fn gl_enum(self) -> u32 {
        match self {
            Stage::Vertex => glow::VERTEX_SHADER,
            Stage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The slice of the GL API a shader program needs.
///
/// Every call assumes the context behind `self` is current on the calling
/// thread. Handles are plain driver names; ownership is tracked by the caller.
pub trait GlDriver {
    type Shader: Copy + fmt::Debug;
    type Program: Copy + Eq + fmt::Debug;
    type UniformLocation;

    fn create_stage(&self, stage: Stage) -> Result<Self::Shader, String>;
    fn set_stage_source(&self, shader: Self::Shader, source: &str);
    fn compile_stage(&self, shader: Self::Shader);
    fn stage_compile_status(&self, shader: Self::Shader) -> bool;
    fn stage_info_log(&self, shader: Self::Shader) -> String;
    fn delete_stage(&self, shader: Self::Shader);

    fn new_program(&self) -> Result<Self::Program, String>;
    fn attach_stage(&self, program: Self::Program, shader: Self::Shader);
    fn link(&self, program: Self::Program);
    fn link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn release_program(&self, program: Self::Program);

    /// Makes `program` current; `None` unbinds.
    fn bind_program(&self, program: Option<Self::Program>);

    /// `None` when the linked program has no active uniform called `name`.
    fn find_uniform(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;

    /// Assigns to `location` of the currently bound program.
    fn set_uniform_i32(&self, location: &Self::UniformLocation, value: i32);
    fn set_uniform_f32(&self, location: &Self::UniformLocation, value: f32);

    fn read_uniform_i32(&self, program: Self::Program, location: &Self::UniformLocation) -> i32;
    fn read_uniform_f32(&self, program: Self::Program, location: &Self::UniformLocation) -> f32;
}
