use log::warn;

use crate::graphics::buffers::constant_attribute;
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};

use super::{clear, DemoContext, Positions, SetupResult, TRIANGLES};

struct VertexSpecification {
    program: Program,
    triangles: Positions,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let triangles = Positions::upload(&TRIANGLES, 2);
    let program = context.program(&["triangles.vert", "triangles.frag"])?;

    // Only known once the program is linked
    let location = program.attrib_location("vColor");
    if location < 0 {
        warn!("vColor is not an active attribute");
    } else {
        constant_attribute(location as u32, [0.3, 0.7, 0.2, 1.0]);
    }

    Ok(Box::new(VertexSpecification { program, triangles }))
}

impl Scene for VertexSpecification {
    fn draw(&mut self, _: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.program.set_used();
        self.triangles.draw(gl::TRIANGLES);
    }
}
