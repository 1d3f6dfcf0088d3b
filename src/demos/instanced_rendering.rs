use std::mem::size_of;

use cgmath::{Matrix4, Vector3};
use rand::Rng;

use geometry::random::linear_rand;
use geometry::transform::{perspective, rotation};

use crate::graphics::buffers::Buffer;
use crate::graphics::gl_types::{BufferTarget, BufferUsage};
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};

use super::{clear, columns, DemoContext, Positions, SetupResult};

const INSTANCES: usize = 1000;
const MATRIX_LOCATION: u32 = 2;

struct InstancedRendering {
    program: Program,
    bear: Positions,
    _colors: Buffer,
    _transforms: Buffer,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let mesh = context.load_mesh("Bear/bear-obj.obj")?;
    let bear = Positions::from_mesh(&mesh);
    let vao = &bear.vao;
    let mut rng = rand::thread_rng();

    let color_size = size_of::<[f32; 3]>();
    let colors = Buffer::with_size(BufferTarget::Array, color_size * INSTANCES, BufferUsage::StaticDraw);
    {
        let mut range = colors.map_write(BufferTarget::Array, 0, color_size * INSTANCES)?;
        for i in 0..INSTANCES {
            let color: [f32; 3] = linear_rand(
                &mut rng,
                Vector3::new(0.2, 0.4, 0.1),
                Vector3::new(1.0, 1.0, 1.0),
            )
            .into();
            range.write_and_flush(color_size * i, &color);
        }
    }
    unsafe { gl::Finish() };
    vao.float_attribute(1, 3, 0, 0);
    vao.divisor(1, 1);

    let view_projection = perspective(90.0, context.aspect(), 0.1, 3000.0);
    let matrix_size = size_of::<[[f32; 4]; 4]>();
    let transforms = Buffer::with_size(BufferTarget::Array, matrix_size * INSTANCES, BufferUsage::StaticDraw);
    {
        let mut range = transforms.map_write(BufferTarget::Array, 0, matrix_size * INSTANCES)?;
        for i in 0..INSTANCES {
            let position = linear_rand(
                &mut rng,
                Vector3::new(-100.0, -40.0, -30.0),
                Vector3::new(100.0, 40.0, -200.0),
            );
            let angle = rng.gen_range(0.0f32..360.0).to_radians();
            let mvp = view_projection
                * Matrix4::from_translation(position)
                * rotation(angle, Vector3::new(1.0, 1.0, 1.0));
            range.write_and_flush(matrix_size * i, &columns(&mvp));
        }
    }
    unsafe { gl::Finish() };

    // A mat4 attribute takes four consecutive vec4 locations
    for column in 0..4 {
        let location = MATRIX_LOCATION + column as u32;
        vao.float_attribute(location, 4, matrix_size, size_of::<[f32; 4]>() * column);
        vao.divisor(location, 1);
    }

    let program = context.program(&["bears.vert", "bears.frag"])?;

    Ok(Box::new(InstancedRendering {
        program,
        bear,
        _colors: colors,
        _transforms: transforms,
    }))
}

impl Scene for InstancedRendering {
    fn draw(&mut self, _: &Frame) {
        clear([1.0, 1.0, 1.0, 1.0], gl::COLOR_BUFFER_BIT);
        self.program.set_used();
        self.bear.vao.bind();
        unsafe {
            gl::DrawArraysInstanced(gl::TRIANGLES, 0, self.bear.count as i32, INSTANCES as i32)
        };
    }
}
