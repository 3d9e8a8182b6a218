use winit::dpi::LogicalSize;

/// Window + GL context configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Requested core-profile version, `(major, minor)`.
    pub gl_version: (u8, u8),

    /// Linear RGBA used to clear the frame before the lesson draws.
    pub clear_color: [f32; 4],

    /// Wait for vblank on swap. Falls back silently when unsupported.
    pub vsync: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Learning OpenGL".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            gl_version: (3, 3),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            vsync: true,
        }
    }
}

impl RuntimeConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
