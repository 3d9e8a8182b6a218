use std::rc::Rc;

use anyhow::Result;

use crate::clock::FrameTime;

/// One exercise run by the runtime.
///
/// GL resources are created in `init`, once the context is current, and must
/// be dropped in `release`; the runtime calls it before tearing the context down.
pub trait Lesson {
    fn name(&self) -> &'static str;

    fn init(&mut self, gl: &Rc<glow::Context>) -> Result<()>;

    /// Called once per frame after the frame has been cleared.
    fn on_frame(&mut self, time: FrameTime);

    fn release(&mut self);
}
