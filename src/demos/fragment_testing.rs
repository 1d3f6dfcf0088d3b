//! Per-fragment tests: scissor, multisampling, stencil, depth, dithering and logic ops.

use std::mem::size_of_val;

use crate::graphics::buffers::{Buffer, VertexArray};
use crate::graphics::gl_types::{BufferTarget, BufferUsage};
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};

use super::{clear, DemoContext, SetupResult};

const VERTICES: [[f32; 3]; 9] = [
    [-0.9, -0.9, -0.1],
    [0.85, -0.9, -0.1],
    [-0.9, 0.85, -0.1],
    [0.5, -0.85, 0.0],
    [0.9, 0.9, 0.0],
    [-0.85, 0.9, 0.0],
    [1.0, -0.85, -0.1],
    [1.0, 1.0, -0.1],
    [-0.85, 1.0, -0.1],
];

const COLORS: [[f32; 4]; 9] = [
    [0.2, 0.5, 0.6, 1.0],
    [0.2, 0.0, 0.2, 1.0],
    [0.2, 0.1, 0.7, 1.0],
    [0.0, 0.0, 0.0, 1.0],
    [0.0, 0.0, 0.0, 1.0],
    [0.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
];

/// Keeps a 50 pixel border free of drawing.
fn scissor_box(width: u32, height: u32) -> (i32, i32, i32, i32) {
    (50, 50, (width as i32 - 100).max(0), (height as i32 - 100).max(0))
}

struct FragmentTesting {
    program: Program,
    vao: VertexArray,
    _buffer: Buffer,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let vao = VertexArray::new();
    vao.bind();

    let positions_size = size_of_val(&VERTICES);
    let total = positions_size + size_of_val(&COLORS);
    let buffer = Buffer::with_size(BufferTarget::Array, total, BufferUsage::StaticDraw);
    {
        let mut range = buffer.map_write(BufferTarget::Array, 0, total)?;
        range.write_and_flush(0, &VERTICES);
        range.write_and_flush(positions_size, &COLORS);
        unsafe { gl::Finish() };
    }

    vao.float_attribute(0, 3, 0, 0);
    vao.float_attribute(1, 4, 0, positions_size);

    let program = context.program(&["testing.vert", "testing.frag"])?;

    unsafe {
        gl::Enable(gl::SCISSOR_TEST);
        gl::Enable(gl::MULTISAMPLE);
        gl::Enable(gl::DITHER);
        gl::Enable(gl::COLOR_LOGIC_OP);
        gl::Enable(gl::SAMPLE_ALPHA_TO_COVERAGE);
        gl::ClearStencil(0);
        gl::Enable(gl::DEPTH_TEST);
        gl::DepthFunc(gl::LESS);
        gl::Enable(gl::STENCIL_TEST);
        gl::LogicOp(gl::XOR);
    }

    Ok(Box::new(FragmentTesting { program, vao, _buffer: buffer }))
}

impl Scene for FragmentTesting {
    fn draw(&mut self, frame: &Frame) {
        let (x, y, w, h) = scissor_box(frame.width, frame.height);
        unsafe { gl::Scissor(x, y, w, h) };

        clear(
            [1.0, 1.0, 1.0, 1.0],
            gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT,
        );
        self.program.set_used();
        self.vao.bind();

        unsafe {
            // The middle triangle marks the stencil buffer
            gl::StencilFunc(gl::ALWAYS, 1, 0xF);
            gl::StencilOp(gl::KEEP, gl::KEEP, gl::REPLACE);
            gl::DrawArrays(gl::TRIANGLES, 3, 3);

            gl::StencilFunc(gl::EQUAL, 1, 0xF);
            gl::DrawArrays(gl::TRIANGLES, 6, 3);

            gl::StencilFunc(gl::NOTEQUAL, 1, 0xF);
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
        }
    }
}

#[cfg(test)]
mod test {
    use super::scissor_box;

    #[test]
    fn scissor_leaves_a_border() {
        assert_eq!(scissor_box(640, 480), (50, 50, 540, 380));
    }

    #[test]
    fn scissor_never_goes_negative() {
        assert_eq!(scissor_box(80, 60), (50, 50, 0, 0));
    }
}
