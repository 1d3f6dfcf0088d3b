use cgmath::{Matrix4, Vector3};
use log::info;

use geometry::transform::perspective;
use geometry::uniform_block::BlockWriter;

use crate::graphics::buffers::Buffer;
use crate::graphics::gl_types::{BufferTarget, BufferUsage};
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::utils::get_integer;

use super::{bear_model, clear, columns, DemoContext, Positions, SetupResult};

const BLOCK: &str = "TransformBlock";
const BINDING: u32 = 0;

struct UniformBuffers {
    program: Program,
    bear: Positions,
    _transforms: Buffer,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let mesh = context.load_mesh("Bear/bear-obj.obj")?;
    let bear = Positions::from_mesh(&mesh);

    let program = context.program(&["transform.vert", "transform.frag"])?;
    program.set_used();

    info!("max uniform block size: {}", get_integer(gl::MAX_UNIFORM_BLOCK_SIZE));
    info!("max uniform buffer bindings: {}", get_integer(gl::MAX_UNIFORM_BUFFER_BINDINGS));

    let members = program.block_members(&["TransformBlock.view", "TransformBlock.projection"]);
    for member in &members {
        info!("{}", member);
    }

    let view = Matrix4::from_translation(Vector3::new(0.0, 0.0, 0.0));
    let projection = perspective(45.0, 4.0 / 3.0, 0.1, 1000.0);

    let block = program.uniform_block_index(BLOCK);
    let mut writer = BlockWriter::new(program.uniform_block_size(block));
    writer.write_member_mat4(&members[0], columns(&view));
    writer.write_member_mat4(&members[1], columns(&projection));

    let transforms = Buffer::with_size(BufferTarget::Uniform, writer.len(), BufferUsage::StaticDraw);
    {
        let mut range = transforms.map_write(BufferTarget::Uniform, 0, writer.len())?;
        range.write(0, writer.bytes());
        range.flush_all();
        unsafe { gl::Finish() };
    }
    program.bind_uniform_block(block, BINDING);
    transforms.bind_base(BufferTarget::Uniform, BINDING);

    program.set_mat4("model", &columns(&bear_model()));

    Ok(Box::new(UniformBuffers { program, bear, _transforms: transforms }))
}

impl Scene for UniformBuffers {
    fn draw(&mut self, _: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.program.set_used();
        self.bear.draw(gl::TRIANGLES);
    }
}
