use log::{debug, info};

use crate::graphics::opengl::Program;
use crate::graphics::queries::Query;
use crate::graphics::render_loop::{Frame, Scene};

use super::{bear_mvp, clear, columns, DemoContext, Positions, SetupResult};

struct ConditionalRendering {
    program: Program,
    bear: Positions,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let mesh = context.load_mesh("Bear/bear-obj.obj")?;
    let bear = Positions::from_mesh(&mesh);

    let program = context.program(&["bear.vert", "bear.frag"])?;
    program.set_used();
    program.set_mat4("mvp", &columns(&bear_mvp()));

    unsafe { gl::Viewport(0, 0, context.width as i32, context.height as i32) };
    clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);

    // One draw decides whether the second one happens
    let query = Query::new();
    unsafe { gl::Disable(gl::CULL_FACE) };
    query.measure(gl::ANY_SAMPLES_PASSED, || bear.draw(gl::TRIANGLES));
    unsafe { gl::Enable(gl::CULL_FACE) };

    debug!("occlusion result ready before the conditional draw: {}", query.available());
    query.conditional(gl::QUERY_WAIT, || bear.draw(gl::TRIANGLES));
    info!("any fragments passed: {}", query.result());

    Ok(Box::new(ConditionalRendering { program, bear }))
}

impl Scene for ConditionalRendering {
    fn draw(&mut self, _: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.program.set_used();
        self.bear.draw(gl::TRIANGLES);
    }
}
