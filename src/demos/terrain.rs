use cgmath::{Matrix4, Vector3};
use log::info;

use geometry::grid::create_grid;
use geometry::layout::InterleavedLayout;
use geometry::noise::height_map;
use geometry::transform::{aspect, perspective, rotation};

use crate::graphics::buffers::{Buffer, VertexArray};
use crate::graphics::gl_types::{BufferTarget, BufferUsage};
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::textures::Texture;
use crate::graphics::utils::get_integer;
use crate::graphics::GraphicsError;

use super::{clear, columns, DemoContext, SetupResult};

const HEIGHT_MAP_FILE: &str = "heightMap.bmp";
const FREQUENCY: f32 = 6.0;
const SCALE: f32 = 1.5;

/// Generates a window-sized noise height map, saves it to the working directory and uploads it
/// as an R8 texture on unit 0.
pub(crate) fn height_map_texture(width: u32, height: u32) -> Result<Texture, GraphicsError> {
    let map = height_map(width, height, FREQUENCY, SCALE);

    image::save_buffer(HEIGHT_MAP_FILE, &map, width, height, image::ExtendedColorType::L8)
        .map_err(|e| GraphicsError::image(HEIGHT_MAP_FILE, e))?;
    info!("saved {} ({}x{})", HEIGHT_MAP_FILE, width, height);

    unsafe { gl::ActiveTexture(gl::TEXTURE0) };
    let texture = Texture::from_r8(width, height, &map);
    texture.linear_clamped();

    Ok(texture)
}

/// The terrain camera: 60 degree lens looking down onto the grid from `distance` units away.
pub(crate) fn terrain_mvp(frame: &Frame, distance: f32) -> Matrix4<f32> {
    perspective(60.0, aspect(frame.width, frame.height), 0.1, 1000.0)
        * Matrix4::from_translation(Vector3::new(0.0, -10.0, -distance))
        * rotation(120.0, Vector3::unit_x())
}

struct Terrain {
    program: Program,
    vao: VertexArray,
    _vertices: Buffer,
    _indices: Buffer,
    index_count: usize,
    height_map: Texture,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let height_map = height_map_texture(context.width, context.height)?;
    info!("max patch vertices: {}", get_integer(gl::MAX_PATCH_VERTICES));

    let grid = create_grid(30.0, 30.0, 60, 60)?;

    let vao = VertexArray::new();
    vao.bind();
    let vertices = Buffer::with_data(BufferTarget::Array, &grid.vertices, BufferUsage::StaticDraw);
    let indices = Buffer::with_data(BufferTarget::Element, &grid.indices, BufferUsage::StaticDraw);
    vao.attributes(&InterleavedLayout::new(&[3, 3, 2]).attributes());

    let program = context.program(&["terrain.vert", "terrain.frag"])?;

    unsafe {
        gl::PolygonMode(gl::FRONT_AND_BACK, gl::LINE);
        gl::Enable(gl::DEPTH_TEST);
    }

    Ok(Box::new(Terrain {
        program,
        vao,
        _vertices: vertices,
        _indices: indices,
        index_count: grid.indices.len(),
        height_map,
    }))
}

impl Scene for Terrain {
    fn draw(&mut self, frame: &Frame) {
        clear([1.0, 1.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        self.program.set_used();
        self.program.set_mat4("mvp", &columns(&terrain_mvp(frame, 50.0)));
        self.height_map.bind_unit(0);

        self.vao.bind();
        unsafe {
            gl::DrawElements(gl::TRIANGLES, self.index_count as i32, gl::UNSIGNED_INT, std::ptr::null())
        };
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn camera_looks_at_the_grid_centre() {
        let frame = Frame { width: 640, height: 480, seconds: 0.0 };
        let centre = terrain_mvp(&frame, 50.0) * Vector4::new(0.0, 0.0, 0.0, 1.0);

        // The grid centre ends up in front of the camera, inside the depth range
        let depth = centre.z / centre.w;
        assert!(centre.w > 0.0);
        assert!(depth > -1.0 && depth < 1.0);
    }
}
