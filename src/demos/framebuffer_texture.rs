use std::mem::size_of_val;

use crate::graphics::buffers::{Buffer, VertexArray};
use crate::graphics::framebuffers::{bind_default, Framebuffer, Renderbuffer};
use crate::graphics::gl_types::{BufferTarget, BufferUsage};
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::textures::Texture;

use super::{clear, DemoContext, SetupResult};

const VERTICES: [[f32; 3]; 6] = [
    [-0.9, -0.9, -1.0],
    [0.85, -0.9, -1.0],
    [-0.9, 0.85, -1.0],
    [0.9, -0.85, -1.0],
    [0.9, 0.9, -1.0],
    [-0.85, 0.9, -1.0],
];

const TEXTURE_COORDS: [[f32; 2]; 6] = [
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, -1.0],
    [-1.0, 1.0],
    [1.0, 1.0],
];

/// The colour the off-screen pass clears to, cycling with time.
fn pulse(seconds: f32) -> [f32; 4] {
    [seconds.sin(), 0.2, seconds.cos(), 1.0]
}

struct FramebufferTexture {
    program: Program,
    vao: VertexArray,
    _buffer: Buffer,
    framebuffer: Framebuffer,
    texture: Texture,
    _depth: Renderbuffer,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let vao = VertexArray::new();
    vao.bind();

    let positions_size = size_of_val(&VERTICES);
    let buffer = Buffer::with_size(
        BufferTarget::Array,
        positions_size + size_of_val(&TEXTURE_COORDS),
        BufferUsage::StaticDraw,
    );
    buffer.sub_data(BufferTarget::Array, 0, &VERTICES);
    buffer.sub_data(BufferTarget::Array, positions_size, &TEXTURE_COORDS);
    vao.float_attribute(0, 3, 0, 0);
    vao.float_attribute(1, 2, 0, positions_size);

    let program = context.program(&["textured.vert", "textured.frag"])?;

    let (width, height) = (context.width, context.height);
    unsafe { gl::ActiveTexture(gl::TEXTURE0) };
    let texture = Texture::empty_2d(gl::RGBA8, width, height, gl::RGBA, gl::UNSIGNED_BYTE);
    texture.parameter(gl::TEXTURE_MIN_FILTER, gl::LINEAR);

    let depth = Renderbuffer::new(gl::DEPTH_COMPONENT24, width, height, 0);
    let framebuffer = Framebuffer::new();
    framebuffer.attach_texture(gl::COLOR_ATTACHMENT0, &texture);
    framebuffer.attach_renderbuffer(gl::DEPTH_ATTACHMENT, &depth);
    framebuffer.check("texture")?;
    bind_default();

    unsafe { gl::Enable(gl::DEPTH_TEST) };

    Ok(Box::new(FramebufferTexture {
        program,
        vao,
        _buffer: buffer,
        framebuffer,
        texture,
        _depth: depth,
    }))
}

impl Scene for FramebufferTexture {
    fn draw(&mut self, frame: &Frame) {
        self.program.set_used();
        self.vao.bind();

        // Whatever the texture held last frame is about to be overwritten
        self.texture.invalidate();

        self.framebuffer.bind(gl::FRAMEBUFFER);
        self.program.set_i32("textureTri", 0);
        clear(pulse(frame.seconds), gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        unsafe { gl::DrawArrays(gl::TRIANGLES, 0, 6) };

        bind_default();
        self.program.set_i32("textureTri", 1);
        self.texture.bind_unit(0);
        clear([1.0, 1.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        unsafe { gl::DrawArrays(gl::TRIANGLES, 0, 6) };

        self.framebuffer.invalidate(&[gl::COLOR_ATTACHMENT0, gl::DEPTH_ATTACHMENT]);
        bind_default();
    }
}

#[cfg(test)]
mod test {
    use super::pulse;

    #[test]
    fn clear_colour_starts_blue_and_cycles() {
        assert_eq!(pulse(0.0), [0.0, 0.2, 1.0, 1.0]);

        let half_turn = pulse(std::f32::consts::PI);
        assert!(half_turn[0].abs() < 1e-6);
        assert!((half_turn[2] + 1.0).abs() < 1e-6);
    }
}
