//! Runs a vertex shader over five floats with rasterization turned off and reads back what
//! transform feedback captured. Everything happens during setup; the scene that comes back is
//! already finished, so no frame is ever drawn.

use std::mem::size_of_val;

use log::info;

use crate::graphics::buffers::{Buffer, VertexArray};
use crate::graphics::gl_types::{BufferTarget, BufferUsage};
use crate::graphics::opengl::ProgramBuilder;
use crate::graphics::queries::Query;
use crate::graphics::render_loop::{Frame, Scene};

use super::{DemoContext, SetupResult};

const INPUT: [f32; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
/// Components of the captured `position` varying.
const CAPTURED_COMPONENTS: usize = 3;

/// Groups the captured floats into one line per vertex.
fn describe(captured: &[f32]) -> Vec<String> {
    captured
        .chunks(CAPTURED_COMPONENTS)
        .map(|v| {
            v.iter()
                .map(|c| format!("{:.6}", c))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

struct TransformFeedback;

pub fn setup(context: &DemoContext) -> SetupResult {
    let vertex = context.shader("feedback.vert")?;
    let program = ProgramBuilder::new()
        .attach(&vertex)
        .feedback_varyings(&["position"])
        .link()?;
    program.set_used();

    let vao = VertexArray::new();
    vao.bind();
    let _input = Buffer::with_data(BufferTarget::Array, &INPUT, BufferUsage::StaticDraw);
    vao.float_attribute(0, 1, 0, 0);

    let captured_count = INPUT.len() * CAPTURED_COMPONENTS;
    let output = Buffer::with_size(
        BufferTarget::Array,
        size_of_val(&INPUT) * CAPTURED_COMPONENTS,
        BufferUsage::StaticRead,
    );
    output.bind_base(BufferTarget::TransformFeedback, 0);

    let query = Query::new();
    unsafe { gl::Enable(gl::RASTERIZER_DISCARD) };
    query.measure(gl::TRANSFORM_FEEDBACK_PRIMITIVES_WRITTEN, || unsafe {
        gl::BeginTransformFeedback(gl::POINTS);
        gl::DrawArrays(gl::POINTS, 0, INPUT.len() as i32);
        gl::EndTransformFeedback();
    });
    unsafe {
        gl::Disable(gl::RASTERIZER_DISCARD);
        gl::Flush();
    }

    info!("{} primitives written", query.result());

    let captured: Vec<f32> = output.read(0, captured_count);
    for line in describe(&captured) {
        info!("{}", line);
    }

    Ok(Box::new(TransformFeedback))
}

impl Scene for TransformFeedback {
    fn draw(&mut self, _frame: &Frame) {}

    fn finished(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn captured_floats_are_listed_per_vertex() {
        let captured: Vec<f32> = (0..15).map(|i| i as f32).collect();
        let lines = describe(&captured);

        assert_eq!(lines.len(), INPUT.len());
        assert_eq!(lines[0], "0.000000 1.000000 2.000000");
        assert_eq!(lines[4], "12.000000 13.000000 14.000000");
    }

    #[test]
    fn finished_before_the_first_frame() {
        assert!(TransformFeedback.finished());
    }
}
