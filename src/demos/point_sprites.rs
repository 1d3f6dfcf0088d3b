use cgmath::Vector3;
use rand::Rng;

use geometry::random::ball_rand;
use geometry::transform::perspective;

use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::textures::Texture;

use super::{clear, columns, DemoContext, Positions, SetupResult};

const POINTS: usize = 1000;
const POINT_SIZE: f32 = 20.0;

/// Scatters `count` points through a ball of radius 200 pushed out in front of the camera.
fn particle_cloud<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<[f32; 3]> {
    let offset = Vector3::new(100.0, 100.0, 400.0);
    (0..count).map(|_| (ball_rand(rng, 200.0) - offset).into()).collect()
}

struct PointSprites {
    program: Program,
    particles: Positions,
    texture: Texture,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let points = particle_cloud(&mut rand::thread_rng(), POINTS);
    let particles = Positions::upload(&points, 3);

    let program = context.program(&["sprites.vert", "sprites.frag"])?;
    program.set_used();
    let projection = perspective(70.0, context.aspect(), 0.1, 1000.0);
    program.set_mat4("proj", &columns(&projection));
    program.set_f32("pointSize", POINT_SIZE);

    let texture = Texture::from_file(context.image_path("light.jpg"))?;
    texture.bind_unit(0);

    unsafe {
        gl::PointSize(POINT_SIZE);
        gl::PolygonMode(gl::FRONT_AND_BACK, gl::FILL);
        gl::Enable(gl::PROGRAM_POINT_SIZE);
    }

    Ok(Box::new(PointSprites { program, particles, texture }))
}

impl Scene for PointSprites {
    fn draw(&mut self, _frame: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.program.set_used();
        self.texture.bind_unit(0);
        self.particles.draw(gl::POINTS);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::InnerSpace;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn particles_fill_a_ball_in_front_of_the_camera() {
        let mut rng = StdRng::seed_from_u64(18);
        let centre = Vector3::new(-100.0, -100.0, -400.0);

        let points = particle_cloud(&mut rng, POINTS);

        assert_eq!(points.len(), POINTS);
        for p in points {
            assert!((Vector3::from(p) - centre).magnitude() <= 200.0 + 1e-3);
            assert!(p[2] < 0.0);
        }
    }
}
