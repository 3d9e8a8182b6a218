use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use glow::HasContext;
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::clock::FrameClock;
use crate::config::RuntimeConfig;
use crate::lesson::Lesson;

/// Key that closes the window.
const EXIT_KEY: KeyCode = KeyCode::Backquote;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window with a current GL context and drives `lesson` until
    /// the window closes. Errors raised inside the loop are returned here.
    pub fn run(config: RuntimeConfig, lesson: Box<dyn Lesson>) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, lesson);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Window plus the GL objects bound to it.
///
/// Field order is drop order: the loader goes first, the window last.
struct WindowEntry {
    gl: Rc<glow::Context>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
    clock: FrameClock,
}

impl WindowEntry {
    fn create(event_loop: &ActiveEventLoop, config: &RuntimeConfig) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(|e| anyhow!("failed to create GL display: {e}"))?;
        let window = window.context("GL display was created without a window")?;

        let raw_handle = window.window_handle().ok().map(|h| h.as_raw());
        let (major, minor) = config.gl_version;
        let context_attrs = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(raw_handle);

        let display = gl_config.display();

        // SAFETY: `raw_handle` comes from `window`, which outlives the context.
        let not_current = unsafe { display.create_context(&gl_config, &context_attrs) }
            .with_context(|| format!("failed to create GL {major}.{minor} core context"))?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .context("failed to build GL surface attributes")?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create GL window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if config.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
                log::warn!("vsync unavailable: {e}");
            }
        }

        // SAFETY: the context was made current on this thread just above.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };
        log::info!("GL version: {}", unsafe { gl.get_parameter_string(glow::VERSION) });

        let entry = Self {
            gl: Rc::new(gl),
            surface,
            context,
            window,
            clock: FrameClock::default(),
        };
        entry.resize(entry.window.inner_size());
        Ok(entry)
    }

    /// Resizes the surface and matches the viewport to it.
    ///
    /// Zero-sized surfaces (minimized windows) are skipped.
    fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return;
        };
        self.surface.resize(&self.context, w, h);
        unsafe { self.gl.viewport(0, 0, size.width as i32, size.height as i32) };
    }
}

/// Prefers the config with the most MSAA samples.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
        .expect("glutin offered no GL configs for this display")
}

struct AppState {
    config: RuntimeConfig,
    lesson: Box<dyn Lesson>,
    entry: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl AppState {
    fn new(config: RuntimeConfig, lesson: Box<dyn Lesson>) -> Self {
        Self {
            config,
            lesson,
            entry: None,
            failure: None,
            exit_requested: false,
        }
    }

    /// Releases lesson resources while the context is still current, then the context.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.lesson.release();
        self.entry = None;
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        self.shutdown(event_loop);
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut entry = WindowEntry::create(event_loop, &self.config)?;

        let name = self.lesson.name();
        if let Err(e) = self.lesson.init(&entry.gl) {
            self.lesson.release();
            return Err(e.context(format!("failed to initialize lesson {name:?}")));
        }
        log::info!("lesson {name:?} ready");

        // Animated uniforms start from zero on the first frame, not at window creation.
        entry.clock.reset();

        entry.window.request_redraw();
        self.entry = Some(entry);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else { return };

        let time = entry.clock.tick();
        if time.frame_index % 600 == 0 {
            log::debug!("frame {} ({:.2} ms)", time.frame_index, time.dt * 1000.0);
        }
        let [r, g, b, a] = self.config.clear_color;
        unsafe {
            entry.gl.clear_color(r, g, b, a);
            entry.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        self.lesson.on_frame(time);

        let swapped = entry.surface.swap_buffers(&entry.context);
        if let Err(e) = swapped {
            self.fail(event_loop, anyhow::Error::new(e).context("failed to swap buffers"));
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the lessons animate.
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.entry.as_ref().is_none_or(|e| e.window.id() != window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(EXIT_KEY) =>
            {
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(size) => {
                if let Some(entry) = &self.entry {
                    entry.resize(size);
                    entry.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.lesson.release();
        self.entry = None;
    }
}
