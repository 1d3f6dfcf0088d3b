use cgmath::{Matrix4, Vector3};

use geometry::transform::{perspective, rotation};

use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::textures::Texture;

use super::{clear, columns, BlockMesh, DemoContext, SetupResult};

/// In the order of the cubemap face targets, starting at `TEXTURE_CUBE_MAP_POSITIVE_X`.
const FACES: [&str; 6] = ["posx.jpg", "negx.jpg", "posy.jpg", "negy.jpg", "posz.jpg", "negz.jpg"];

const DEGREES_PER_SECOND: f32 = 20.0;

fn model(seconds: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(0.0, 0.0, -10.0))
        * Matrix4::from_scale(100.0)
        * rotation((seconds * DEGREES_PER_SECOND).to_radians(), Vector3::unit_y())
}

struct Cubemap {
    program: Program,
    cube: BlockMesh,
    texture: Texture,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let mesh = context.load_mesh("Cube/cube.obj")?;
    let cube = BlockMesh::upload(&mesh)?;

    let faces = FACES.map(|face| context.model_path("Cube/City").join(face));
    let texture = Texture::cubemap_from_files(&faces)?;

    let program = context.program(&["skybox.vert", "skybox.frag"])?;
    program.set_used();
    program.set_mat4("viewProjection", &columns(&perspective(45.0, 4.0 / 3.0, 0.1, 1000.0)));

    unsafe { gl::Enable(gl::DEPTH_TEST) };

    Ok(Box::new(Cubemap { program, cube, texture }))
}

impl Scene for Cubemap {
    fn draw(&mut self, frame: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        self.program.set_used();
        self.program.set_mat4("model", &columns(&model(frame.seconds)));
        self.texture.bind_unit(0);
        self.cube.draw();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cube_turns_twenty_degrees_a_second() {
        let start = model(0.0);
        let later = model(4.5);

        // Scaled by 100 and translated, but not yet rotated at t = 0
        assert!((start.x.x - 100.0).abs() < 1e-3);
        assert!((later.x.x - 100.0 * 90f32.to_radians().cos()).abs() < 1e-3);
        assert_eq!(later.w.truncate(), Vector3::new(0.0, 0.0, -10.0));
    }
}
