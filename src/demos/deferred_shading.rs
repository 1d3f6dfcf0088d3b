//! Two passes: the dog is rendered into a G-buffer of colour, position and normal textures,
//! then a full-screen quad lights every pixel from it.

use cgmath::{Matrix4, SquareMatrix, Vector3};

use geometry::random::spherical_rand;
use geometry::transform::{perspective, spinning_model};

use crate::graphics::framebuffers::{bind_default, Framebuffer};
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::textures::Texture;

use super::{clear, columns, BlockMesh, DemoContext, Positions, SetupResult, FULLSCREEN_QUAD};

const LIGHT_COLORS: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

const ATTACHMENTS: [gl::types::GLenum; 3] =
    [gl::COLOR_ATTACHMENT0, gl::COLOR_ATTACHMENT1, gl::COLOR_ATTACHMENT2];

fn model_position() -> Vector3<f32> {
    Vector3::new(0.0, -8.0, -250.0)
}

struct DeferredShading {
    geometry_pass: Program,
    lighting_pass: Program,
    dog: BlockMesh,
    quad: Positions,
    texture: Texture,
    gbuffer: Framebuffer,
    /// Colour, position and normal, then depth.
    targets: [Texture; 4],
}

fn gbuffer_target(internal_format: gl::types::GLenum, width: u32, height: u32) -> Texture {
    let texture = Texture::storage_2d(internal_format, width, height);
    texture.parameter(gl::TEXTURE_MIN_FILTER, gl::NEAREST);
    texture.parameter(gl::TEXTURE_MAG_FILTER, gl::NEAREST);
    texture
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let mesh = context.load_mesh("Dog/dog.obj")?;
    let dog = BlockMesh::upload(&mesh)?;
    let quad = Positions::upload(&FULLSCREEN_QUAD, 2);
    let texture = Texture::from_file(context.model_path("Dog/dogColor.png"))?;

    let (width, height) = (context.width, context.height);
    let targets = [
        gbuffer_target(gl::RGBA32F, width, height),
        gbuffer_target(gl::RGBA32F, width, height),
        gbuffer_target(gl::RGBA32F, width, height),
        gbuffer_target(gl::DEPTH_COMPONENT32F, width, height),
    ];

    let gbuffer = Framebuffer::new();
    for (attachment, target) in ATTACHMENTS.iter().zip(&targets) {
        gbuffer.attach_texture(*attachment, target);
    }
    gbuffer.attach_texture(gl::DEPTH_ATTACHMENT, &targets[3]);
    gbuffer.check("G-buffer")?;
    bind_default();

    let lighting_pass = context.program(&["lighting.vert", "lighting.frag"])?;
    let geometry_pass = context.program(&["gbuffer.vert", "gbuffer.frag"])?;

    geometry_pass.set_used();
    geometry_pass.set_mat4("view", &columns(&Matrix4::identity()));
    geometry_pass.set_mat4("projection", &columns(&perspective(45.0, context.aspect(), 0.1, 1000.0)));

    let mut rng = rand::thread_rng();
    let lights: Vec<[f32; 3]> = (0..LIGHT_COLORS.len())
        .map(|_| (model_position() + spherical_rand(&mut rng, 10.0)).into())
        .collect();

    lighting_pass.set_used();
    lighting_pass.set_i32("lightCount", LIGHT_COLORS.len() as i32);
    lighting_pass.set_vec3_array("lightPositions", &lights);
    lighting_pass.set_vec3_array("lightColors", &LIGHT_COLORS);

    unsafe { gl::Enable(gl::DEPTH_TEST) };

    Ok(Box::new(DeferredShading {
        geometry_pass,
        lighting_pass,
        dog,
        quad,
        texture,
        gbuffer,
        targets,
    }))
}

impl Scene for DeferredShading {
    fn draw(&mut self, frame: &Frame) {
        self.gbuffer.bind(gl::FRAMEBUFFER);
        self.gbuffer.draw_buffers(&ATTACHMENTS);
        clear([0.0, 0.0, 0.0, 0.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);

        self.geometry_pass.set_used();
        self.texture.bind_unit(0);
        let model = spinning_model(model_position(), frame.seconds);
        self.geometry_pass.set_mat4("model", &columns(&model));
        self.dog.draw();

        bind_default();
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);

        self.lighting_pass.set_used();
        for (unit, target) in self.targets[..3].iter().enumerate() {
            target.bind_unit(unit as u32);
        }
        self.quad.draw(gl::TRIANGLES);
    }
}
