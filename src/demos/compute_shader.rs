use cgmath::Vector3;
use log::info;
use rand::Rng;

use geometry::compute::{dispatch_groups, invocations};
use geometry::random::spherical_rand;

use crate::graphics::buffers::Buffer;
use crate::graphics::gl_types::{BufferTarget, BufferUsage};
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::textures::Texture;
use crate::graphics::utils::{get_integer, get_integer_indexed};

use super::{clear, DemoContext, Positions, SetupResult, FULLSCREEN_QUAD};

const IMAGE_WIDTH: u32 = 1024;
const IMAGE_HEIGHT: u32 = 768;
const SPHERES: usize = 10;
const SPHERE_RADIUS: f32 = 2.0;

/// Sphere centres on a shell of radius 10 around (0, 0, -20), radius in `w`.
fn random_spheres<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<[f32; 4]> {
    let centre = Vector3::new(0.0, 0.0, -20.0);
    (0..count)
        .map(|_| (spherical_rand(rng, 10.0) + centre).extend(SPHERE_RADIUS).into())
        .collect()
}

struct ComputeShader {
    ray_trace: Program,
    quad_program: Program,
    quad: Positions,
    groups: [u32; 3],
    output: Texture,
    _spheres: Buffer,
    _sphere_texture: Texture,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let quad = Positions::upload(&FULLSCREEN_QUAD, 2);

    let ray_trace = context.program(&["raytrace.comp"])?;
    let quad_program = context.program(&["quad.vert", "quad.frag"])?;

    let local_size = ray_trace.work_group_size();
    let max_size: Vec<i32> = (0..3)
        .map(|i| get_integer_indexed(gl::MAX_COMPUTE_WORK_GROUP_SIZE, i))
        .collect();
    info!("work group size: {:?} ({} invocations)", local_size, invocations(local_size));
    info!("max work group size: {:?}", max_size);
    info!("max work group invocations: {}", get_integer(gl::MAX_COMPUTE_WORK_GROUP_INVOCATIONS));

    let groups = dispatch_groups([IMAGE_WIDTH, IMAGE_HEIGHT, 1], local_size)?;

    unsafe { gl::ActiveTexture(gl::TEXTURE0) };
    let output = Texture::empty_2d(gl::RGBA32F, IMAGE_WIDTH, IMAGE_HEIGHT, gl::RGBA, gl::FLOAT);
    output.linear_clamped();
    output.bind_image(0, gl::READ_WRITE, gl::RGBA32F);

    let spheres = random_spheres(&mut rand::thread_rng(), SPHERES);
    let sphere_buffer = Buffer::with_data(BufferTarget::Texture, &spheres, BufferUsage::StaticDraw);
    unsafe { gl::ActiveTexture(gl::TEXTURE1) };
    let sphere_texture = Texture::from_buffer(gl::RGBA32F, &sphere_buffer);
    sphere_texture.bind_image(1, gl::READ_ONLY, gl::RGBA32F);
    unsafe { gl::ActiveTexture(gl::TEXTURE0) };

    Ok(Box::new(ComputeShader {
        ray_trace,
        quad_program,
        quad,
        groups,
        output,
        _spheres: sphere_buffer,
        _sphere_texture: sphere_texture,
    }))
}

impl Scene for ComputeShader {
    fn draw(&mut self, _frame: &Frame) {
        self.ray_trace.set_used();
        let [x, y, z] = self.groups;
        unsafe {
            gl::DispatchCompute(x, y, z);
            gl::MemoryBarrier(gl::SHADER_IMAGE_ACCESS_BARRIER_BIT);
        }

        self.quad_program.set_used();
        self.output.bind_unit(0);
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.quad.draw(gl::TRIANGLES);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::InnerSpace;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spheres_sit_on_a_shell_around_the_scene_centre() {
        let mut rng = StdRng::seed_from_u64(22);
        let centre = Vector3::new(0.0, 0.0, -20.0);

        let spheres = random_spheres(&mut rng, SPHERES);

        assert_eq!(spheres.len(), SPHERES);
        for s in spheres {
            let distance = (Vector3::new(s[0], s[1], s[2]) - centre).magnitude();
            assert!((distance - 10.0).abs() < 1e-3);
            assert_eq!(s[3], SPHERE_RADIUS);
        }
    }
}
