use std::fs;

use log::info;

use crate::graphics::opengl::{Program, ProgramBuilder};
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::GraphicsError;

use super::{clear, DemoContext, Positions, SetupResult, TRIANGLES};

const BINARY_FILE: &str = "shader.bin";

struct ProgramBinaries {
    program: Program,
    triangles: Positions,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let triangles = Positions::upload(&TRIANGLES, 2);

    let vertex = context.shader("binary.vert")?;
    let fragment = context.shader("binary.frag")?;
    let linked = ProgramBuilder::new()
        .attach(&vertex)
        .attach(&fragment)
        .binary_retrievable()
        .link()?;

    let binary = linked.binary();
    info!("program binary: {} bytes, format 0x{:x}", binary.data.len(), binary.format);
    fs::write(BINARY_FILE, &binary.data).map_err(|e| GraphicsError::io(BINARY_FILE, e))?;
    info!("wrote {}", BINARY_FILE);

    let program = Program::from_binary(&binary)?;
    program.set_used();

    Ok(Box::new(ProgramBinaries { program, triangles }))
}

impl Scene for ProgramBinaries {
    fn draw(&mut self, _frame: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.program.set_used();
        self.triangles.draw(gl::TRIANGLES);
    }
}
