use crate::graphics::buffers::Buffer;
use crate::graphics::gl_types::{BufferTarget, BufferUsage};
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};

use super::{clear, DemoContext, Positions, SetupResult};

const RECTANGLE: [[f32; 2]; 6] = [
    [-0.9, -0.1],
    [-0.9, 0.1],
    [-0.7, -0.1],
    [-0.7, -0.1],
    [-0.7, 0.1],
    [-0.9, 0.1],
];

const INDICES: [u8; 6] = [0, 1, 2, 2, 3, 1];

const INSTANCES: i32 = 6;

struct DrawCommands {
    program: Program,
    rectangle: Positions,
    _indices: Buffer,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let rectangle = Positions::upload(&RECTANGLE, 2);
    // Recorded in the vertex array for indexed draws
    let indices = Buffer::with_data(BufferTarget::Element, &INDICES, BufferUsage::StaticDraw);

    let program = context.program(&["instances.vert", "instances.frag"])?;

    Ok(Box::new(DrawCommands { program, rectangle, _indices: indices }))
}

impl Scene for DrawCommands {
    fn draw(&mut self, _: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.program.set_used();
        self.rectangle.vao.bind();
        unsafe { gl::DrawArraysInstanced(gl::TRIANGLES, 0, self.rectangle.count as i32, INSTANCES) };
    }
}
