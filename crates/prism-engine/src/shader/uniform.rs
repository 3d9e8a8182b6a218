use crate::device::GlDriver;

/// A scalar that can be assigned to a uniform with `ShaderProgram::set`.
pub trait UniformValue: Copy {
    fn upload<D: GlDriver>(self, gl: &D, location: &D::UniformLocation);
}

impl UniformValue for bool {
    fn upload<D: GlDriver>(self, gl: &D, location: &D::UniformLocation) {
        gl.set_uniform_i32(location, i32::from(self));
    }
}

impl UniformValue for i32 {
    fn upload<D: GlDriver>(self, gl: &D, location: &D::UniformLocation) {
        gl.set_uniform_i32(location, self);
    }
}

impl UniformValue for f32 {
    fn upload<D: GlDriver>(self, gl: &D, location: &D::UniformLocation) {
        gl.set_uniform_f32(location, self);
    }
}
