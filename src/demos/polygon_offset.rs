use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};

use super::{bear_mvp, clear, columns, DemoContext, Positions, SetupResult};

const FILL_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const LINE_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

struct PolygonOffset {
    program: Program,
    bear: Positions,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let mesh = context.load_mesh("Bear/bear-obj.obj")?;
    let bear = Positions::from_mesh(&mesh);

    let program = context.program(&["offset.vert", "offset.frag"])?;
    program.set_used();
    program.set_mat4("mvp", &columns(&bear_mvp()));

    unsafe {
        gl::Enable(gl::POLYGON_OFFSET_FILL);
        gl::Enable(gl::DEPTH_TEST);
        // Pushes filled faces back so the lines drawn over them win the depth test
        gl::PolygonOffset(0.75, 1.0);
    }

    Ok(Box::new(PolygonOffset { program, bear }))
}

impl Scene for PolygonOffset {
    fn draw(&mut self, _: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        self.program.set_used();

        self.program.set_vec4("color", FILL_COLOR);
        unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, gl::FILL) };
        self.bear.draw(gl::TRIANGLES);

        self.program.set_vec4("color", LINE_COLOR);
        unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, gl::LINE) };
        self.bear.draw(gl::LINES);
    }
}
