use cgmath::Vector3;
use log::info;

use geometry::transform::{perspective, spinning_model};

use crate::graphics::gl_types::TextureTarget;
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::textures::Texture;

use super::{clear, columns, BlockMesh, DemoContext, SetupResult};

struct Textures2D {
    program: Program,
    dog: BlockMesh,
    texture: Texture,
    /// Holds the first frame, copied out of the framebuffer.
    _snapshot: Texture,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let mesh = context.load_mesh("Dog/dog.obj")?;
    let dog = BlockMesh::upload(&mesh)?;

    let texture = Texture::from_file(context.model_path("Dog/dogColor.png"))?;
    texture.bind_unit(0);

    let program = context.program(&["textured.vert", "textured.frag"])?;
    program.set_used();
    program.set_mat4("viewProjection", &columns(&perspective(45.0, 4.0 / 3.0, 0.1, 1000.0)));

    unsafe {
        gl::Enable(gl::DEPTH_TEST);
        gl::Viewport(0, 0, context.width as i32, context.height as i32);
    }

    // Render one closer frame and keep a copy of it
    clear([0.2, 0.4, 0.7, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    let model = spinning_model(Vector3::new(0.0, -8.0, -150.0), 0.0);
    program.set_mat4("model", &columns(&model));
    dog.draw();
    unsafe { gl::Finish() };

    let snapshot = Texture::new(TextureTarget::Texture2D);
    unsafe { gl::ActiveTexture(gl::TEXTURE1) };
    snapshot.parameter(gl::TEXTURE_WRAP_S, gl::REPEAT);
    snapshot.parameter(gl::TEXTURE_WRAP_T, gl::REPEAT);
    snapshot.parameter(gl::TEXTURE_MAG_FILTER, gl::LINEAR);
    snapshot.parameter(gl::TEXTURE_MIN_FILTER, gl::LINEAR);
    snapshot.copy_from_framebuffer(gl::RGBA, context.width, context.height);
    info!("copied a {}x{} frame into texture {}", context.width, context.height, snapshot.id());

    Ok(Box::new(Textures2D { program, dog, texture, _snapshot: snapshot }))
}

impl Scene for Textures2D {
    fn draw(&mut self, frame: &Frame) {
        clear([1.0, 1.0, 1.0, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        self.program.set_used();
        self.texture.bind_unit(0);

        let model = spinning_model(Vector3::new(0.0, -8.0, -250.0), frame.seconds);
        self.program.set_mat4("model", &columns(&model));
        self.dog.draw();
    }
}
