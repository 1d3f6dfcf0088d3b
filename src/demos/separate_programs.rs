use std::fs;

use crate::graphics::gl_types::ShaderKind;
use crate::graphics::opengl::{Program, ProgramBuilder, ProgramPipeline};
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::GraphicsError;

use super::{clear, DemoContext, Positions, SetupResult, TRIANGLES};

struct SeparatePrograms {
    triangles: Positions,
    pipelines: [ProgramPipeline; 2],
    _programs: [Program; 3],
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let triangles = Positions::upload(&TRIANGLES, 2);

    let vertex = context.shader("separate.vert")?;
    let fragment = context.shader("separate.frag")?;
    let vertex_program = ProgramBuilder::new().attach(&vertex).separable().link()?;
    let fragment_program = ProgramBuilder::new().attach(&fragment).separable().link()?;

    let other_path = context.shader_path("other.frag");
    let other_source = fs::read_to_string(&other_path)
        .map_err(|e| GraphicsError::io(&other_path.display().to_string(), e))?;
    let other_program = Program::create_shader_program(ShaderKind::Fragment, &other_source)?;

    let pipelines = [ProgramPipeline::new(), ProgramPipeline::new()];
    pipelines[0].use_stages(ShaderKind::Vertex.stage_bit(), &vertex_program);
    pipelines[0].use_stages(ShaderKind::Fragment.stage_bit(), &fragment_program);
    pipelines[1].use_stages(ShaderKind::Vertex.stage_bit(), &vertex_program);
    pipelines[1].use_stages(ShaderKind::Fragment.stage_bit(), &other_program);

    // A bound program would take precedence over the pipelines
    unsafe { gl::UseProgram(0) };

    Ok(Box::new(SeparatePrograms {
        triangles,
        pipelines,
        _programs: [vertex_program, fragment_program, other_program],
    }))
}

impl Scene for SeparatePrograms {
    fn draw(&mut self, _frame: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.triangles.vao.bind();

        for (i, pipeline) in self.pipelines.iter().enumerate() {
            pipeline.bind();
            unsafe { gl::DrawArrays(gl::TRIANGLES, 3 * i as i32, 3) };
        }
    }
}
