use glutin::dpi::LogicalSize;
use glutin::event_loop::EventLoop;
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};
use log::info;

use super::debug;
use super::error::GraphicsError;
use super::utils::gl_string;

#[derive(Debug, Clone)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub samples: u16,
    pub debug: bool,
    pub visible: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: String::from("notes"),
            width: 640,
            height: 480,
            samples: 0,
            debug: false,
            visible: true,
        }
    }
}

/// A window with a current OpenGL 4.4 core context and the event loop that drives it.
pub struct Window {
    event_loop: EventLoop<()>,
    context: WindowedContext<PossiblyCurrent>,
}

impl Window {
    pub fn create(settings: &WindowSettings) -> Result<Self, GraphicsError> {
        let event_loop = EventLoop::new();
        let builder = WindowBuilder::new()
            .with_title(settings.title.as_str())
            .with_inner_size(LogicalSize::new(settings.width as f64, settings.height as f64))
            .with_visible(settings.visible);

        let context = ContextBuilder::new()
            .with_gl(GlRequest::Specific(Api::OpenGl, (4, 4)))
            .with_gl_profile(GlProfile::Core)
            .with_gl_debug_flag(settings.debug)
            .with_vsync(true)
            .with_depth_buffer(24)
            .with_stencil_buffer(8)
            .with_multisampling(settings.samples)
            .build_windowed(builder, &event_loop)
            .map_err(|e| GraphicsError::Context(e.to_string()))?;

        let context = unsafe { context.make_current() }
            .map_err(|(_, e)| GraphicsError::Context(e.to_string()))?;

        gl::load_with(|s| context.get_proc_address(s) as *const _);
        info!("OpenGL version {} loaded", gl_string(gl::VERSION));

        if settings.debug {
            debug::install();
        }

        Ok(Self { event_loop, context })
    }

    /// Size of the drawable area in pixels.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let size = self.context.window().inner_size();
        (size.width, size.height)
    }

    pub fn into_parts(self) -> (EventLoop<()>, WindowedContext<PossiblyCurrent>) {
        (self.event_loop, self.context)
    }
}
