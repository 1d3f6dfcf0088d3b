use cgmath::{Matrix4, Vector3};

use geometry::transform::{normal_matrix, perspective, rotation};

use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::textures::Texture;

use super::{clear, columns, columns3, BlockMesh, DemoContext, SetupResult};

struct HemisphereLighting {
    program: Program,
    bear: BlockMesh,
    texture: Texture,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let mesh = context.load_mesh("Bear/bear-obj.obj")?;
    let bear = BlockMesh::upload(&mesh)?;

    let program = context.program(&["hemisphere.vert", "hemisphere.frag"])?;
    program.set_used();

    let model = Matrix4::from_translation(Vector3::new(0.0, -30.0, -70.0))
        * rotation(90f32.to_radians(), Vector3::unit_y());
    let mvp = perspective(45.0, 4.0 / 3.0, 0.1, 1000.0) * model;

    program.set_mat4("model", &columns(&model));
    program.set_mat4("mvp", &columns(&mvp));
    program.set_mat3("normalMatrix", &columns3(&normal_matrix(&model)));
    program.set_i32("diffuseTexture", 0);

    let texture = Texture::from_file(context.model_path("Bear/bear.tga"))?;
    unsafe { gl::Enable(gl::DEPTH_TEST) };

    Ok(Box::new(HemisphereLighting { program, bear, texture }))
}

impl Scene for HemisphereLighting {
    fn draw(&mut self, _: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        self.program.set_used();
        self.texture.bind_unit(0);
        self.bear.draw();
    }
}
