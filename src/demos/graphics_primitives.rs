use gl::types::GLenum;
use glutin::event::VirtualKeyCode;
use log::info;

use crate::graphics::gl_types::BufferTarget;
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};

use super::{clear, DemoContext, Positions, SetupResult, TRIANGLES};

/// Draw mode bound to keys 1 to 7.
fn draw_mode(key: VirtualKeyCode) -> Option<(GLenum, &'static str)> {
    use glutin::event::VirtualKeyCode::*;
    match key {
        Key1 => Some((gl::TRIANGLES, "triangles")),
        Key2 => Some((gl::TRIANGLE_FAN, "triangle fan")),
        Key3 => Some((gl::TRIANGLE_STRIP, "triangle strip")),
        Key4 => Some((gl::POINTS, "points")),
        Key5 => Some((gl::LINES, "lines")),
        Key6 => Some((gl::LINE_LOOP, "line loop")),
        Key7 => Some((gl::LINE_STRIP, "line strip")),
        _ => None,
    }
}

fn polygon_mode(key: VirtualKeyCode) -> Option<(GLenum, &'static str)> {
    match key {
        VirtualKeyCode::Q => Some((gl::LINE, "line")),
        VirtualKeyCode::W => Some((gl::POINT, "point")),
        VirtualKeyCode::E => Some((gl::FILL, "fill")),
        _ => None,
    }
}

struct GraphicsPrimitives {
    program: Program,
    triangles: Positions,
    draw_mode: GLenum,
    polygon_mode: GLenum,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let triangles = Positions::upload(&[[0.0f32; 2]; 6], 2);
    triangles.buffer.sub_data(BufferTarget::Array, 0, &TRIANGLES);

    let program = context.program(&["primitives.vert", "primitives.frag"])?;

    unsafe {
        gl::PointSize(10.0);
        gl::LineWidth(3.0);
        gl::CullFace(gl::BACK);
        gl::Enable(gl::CULL_FACE);
    }

    Ok(Box::new(GraphicsPrimitives {
        program,
        triangles,
        draw_mode: gl::TRIANGLES,
        polygon_mode: gl::FILL,
    }))
}

impl Scene for GraphicsPrimitives {
    fn draw(&mut self, _: &Frame) {
        unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, self.polygon_mode) };
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.program.set_used();
        self.triangles.draw(self.draw_mode);
    }

    fn key_pressed(&mut self, key: VirtualKeyCode) {
        if let Some((mode, name)) = draw_mode(key) {
            info!("drawing {}", name);
            self.draw_mode = mode;
        } else if let Some((mode, name)) = polygon_mode(key) {
            info!("polygon mode {}", name);
            self.polygon_mode = mode;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn number_keys_pick_draw_modes() {
        assert_eq!(draw_mode(VirtualKeyCode::Key1).map(|m| m.0), Some(gl::TRIANGLES));
        assert_eq!(draw_mode(VirtualKeyCode::Key6).map(|m| m.0), Some(gl::LINE_LOOP));
        assert_eq!(draw_mode(VirtualKeyCode::Key8), None);
    }

    #[test]
    fn letter_keys_pick_polygon_modes() {
        assert_eq!(polygon_mode(VirtualKeyCode::Q).map(|m| m.0), Some(gl::LINE));
        assert_eq!(polygon_mode(VirtualKeyCode::E).map(|m| m.0), Some(gl::FILL));
        assert_eq!(polygon_mode(VirtualKeyCode::Key1), None);
    }
}
