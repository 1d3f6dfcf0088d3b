use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};

use super::{clear, DemoContext, Positions, SetupResult, FULLSCREEN_QUAD};

struct Raytracing {
    program: Program,
    quad: Positions,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let quad = Positions::upload(&FULLSCREEN_QUAD, 2);
    let program = context.program(&["raytrace.vert", "raytrace.frag"])?;

    Ok(Box::new(Raytracing { program, quad }))
}

impl Scene for Raytracing {
    fn draw(&mut self, frame: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.program.set_used();
        self.program.set_vec3("resolution", [frame.width as f32, frame.height as f32, 0.0]);
        self.quad.draw(gl::TRIANGLES);
    }
}
