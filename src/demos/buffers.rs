use std::mem::size_of_val;

use log::info;

use crate::graphics::buffers::{Buffer, VertexArray};
use crate::graphics::gl_types::{BufferTarget, BufferUsage};
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};

use super::{clear, DemoContext, SetupResult, TRIANGLES};

const COLORS: [[f32; 3]; 6] = [
    [0.10, 0.10, 0.20],
    [0.85, 0.90, 0.90],
    [0.10, 0.85, 0.30],
    [0.20, 0.15, 0.20],
    [0.50, 0.60, 0.80],
    [0.50, 0.20, 0.10],
];

struct Buffers {
    program: Program,
    vao: VertexArray,
    _combined: Buffer,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let vao = VertexArray::new();
    vao.bind();

    let positions = Buffer::with_data(BufferTarget::CopyRead, &TRIANGLES, BufferUsage::StaticDraw);
    let colors = Buffer::with_data(BufferTarget::CopyRead, &COLORS, BufferUsage::StaticDraw);
    let combined = Buffer::with_size(
        BufferTarget::CopyWrite,
        size_of_val(&TRIANGLES) + size_of_val(&COLORS),
        BufferUsage::StaticDraw,
    );

    // Sizes come back from the driver rather than from the arrays
    let position_size = positions.size();
    combined.copy_from(&positions, 0, 0, position_size);
    let color_size = colors.size();
    combined.copy_from(&colors, 0, position_size, color_size);

    let first: Vec<f32> = combined.read(0, 2);
    info!("first position in buffer x: {}, y: {}", first[0], first[1]);

    combined.bind(BufferTarget::Array);
    vao.float_attribute(0, 2, 0, 0);
    vao.float_attribute(1, 3, 0, position_size);

    let program = context.program(&["buffers.vert", "buffers.frag"])?;

    Ok(Box::new(Buffers { program, vao, _combined: combined }))
}

impl Scene for Buffers {
    fn draw(&mut self, _: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.program.set_used();
        self.vao.bind();
        unsafe { gl::DrawArrays(gl::TRIANGLES, 0, 6) };
    }
}
