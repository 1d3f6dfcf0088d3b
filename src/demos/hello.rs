use crate::graphics::gl_types::ShaderKind;
use crate::graphics::opengl::{Program, Shader};
use crate::graphics::render_loop::{Frame, Scene};

use super::{clear, DemoContext, Positions, SetupResult, TRIANGLES};

const VERTEX_SHADER: &str = "#version 440 core
layout (location = 0) in vec4 vPosition;

void main() {
    gl_Position = vPosition;
}
";

const FRAGMENT_SHADER: &str = "#version 440 core
out vec4 fColor;

void main() {
    fColor = vec4(0.0, 0.0, 1.0, 1.0);
}
";

struct Hello {
    program: Program,
    triangles: Positions,
}

pub fn setup(_: &DemoContext) -> SetupResult {
    let triangles = Positions::upload(&TRIANGLES, 2);

    let shaders = [
        Shader::from_source("hello vertex shader", VERTEX_SHADER, ShaderKind::Vertex)?,
        Shader::from_source("hello fragment shader", FRAGMENT_SHADER, ShaderKind::Fragment)?,
    ];
    let program = Program::from_shaders(&shaders)?;

    Ok(Box::new(Hello { program, triangles }))
}

impl Scene for Hello {
    fn draw(&mut self, _: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.program.set_used();
        self.triangles.draw(gl::TRIANGLES);
    }
}
