use crate::graphics::framebuffers::{bind_default, blit, save_png, Framebuffer, Renderbuffer};
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};

use super::{clear, DemoContext, Positions, SetupResult};

const VERTICES: [[f32; 3]; 6] = [
    [-0.9, -0.9, 0.1],
    [0.85, -0.9, 0.1],
    [-0.9, 0.85, 0.1],
    [0.9, -0.85, -0.1],
    [0.9, 0.9, -0.1],
    [-0.85, 0.9, -0.1],
];

const SAMPLES: u32 = 8;
const SNAPSHOT: &str = "triangleMultisample.png";

/// A framebuffer backed by colour and depth-stencil renderbuffers.
struct Target {
    framebuffer: Framebuffer,
    _color: Renderbuffer,
    _depth_stencil: Renderbuffer,
}

impl Target {
    fn new(width: u32, height: u32, samples: u32) -> Self {
        let framebuffer = Framebuffer::new();
        framebuffer.set_defaults(width, height, samples);

        let color = Renderbuffer::new(gl::RGBA8, width, height, samples);
        let depth_stencil = Renderbuffer::new(gl::DEPTH24_STENCIL8, width, height, samples);
        framebuffer.attach_renderbuffer(gl::COLOR_ATTACHMENT0, &color);
        framebuffer.attach_renderbuffer(gl::DEPTH_STENCIL_ATTACHMENT, &depth_stencil);

        Self { framebuffer, _color: color, _depth_stencil: depth_stencil }
    }
}

struct FramebufferObjects {
    program: Program,
    triangles: Positions,
    _resolved: Target,
    _multisampled: Target,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let triangles = Positions::upload(&VERTICES, 3);
    let program = context.program(&["triangles.vert", "triangles.frag"])?;
    program.set_used();

    unsafe {
        gl::Enable(gl::DEPTH_TEST);
        gl::Enable(gl::STENCIL_TEST);
    }

    let (width, height) = (context.width, context.height);

    let resolved = Target::new(width, height, 0);
    resolved.framebuffer.check("single-sampled")?;

    let multisampled = Target::new(width, height, SAMPLES);
    multisampled.framebuffer.check("multisampled")?;

    // Render off screen, resolve the samples and keep the result
    multisampled.framebuffer.bind(gl::DRAW_FRAMEBUFFER);
    unsafe { gl::Viewport(0, 0, width as i32, height as i32) };
    clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    triangles.draw(gl::TRIANGLES);

    blit(
        Some(&multisampled.framebuffer),
        Some(&resolved.framebuffer),
        width,
        height,
        gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT,
    );
    resolved.framebuffer.bind(gl::READ_FRAMEBUFFER);
    save_png(SNAPSHOT, width, height)?;
    bind_default();

    Ok(Box::new(FramebufferObjects {
        program,
        triangles,
        _resolved: resolved,
        _multisampled: multisampled,
    }))
}

impl Scene for FramebufferObjects {
    fn draw(&mut self, _: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        self.program.set_used();
        self.triangles.draw(gl::TRIANGLES);
    }
}
