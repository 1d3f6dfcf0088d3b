use log::info;

use crate::graphics::buffers::VertexArray;
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::textures::Texture;
use crate::graphics::utils::get_integer;

use super::terrain::{height_map_texture, terrain_mvp};
use super::{clear, columns, DemoContext, SetupResult};

/// Patches per side of the terrain; the evaluation shader places each instance on this grid.
const PATCHES_PER_SIDE: i32 = 64;

struct TessellationTerrain {
    program: Program,
    vao: VertexArray,
    height_map: Texture,
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let height_map = height_map_texture(context.width, context.height)?;

    // Every vertex is generated from gl_VertexID and gl_InstanceID
    let vao = VertexArray::new();
    vao.bind();

    unsafe { gl::PatchParameteri(gl::PATCH_VERTICES, 4) };
    info!("max patch vertices: {}", get_integer(gl::MAX_PATCH_VERTICES));

    let program = context.program(&[
        "terrain.vert",
        "terrain.tesc",
        "terrain.tese",
        "terrain.frag",
    ])?;
    program.set_used();
    program.set_i32("patchesPerSide", PATCHES_PER_SIDE);

    unsafe {
        gl::PolygonMode(gl::FRONT_AND_BACK, gl::LINE);
        gl::Enable(gl::DEPTH_TEST);
    }

    Ok(Box::new(TessellationTerrain { program, vao, height_map }))
}

impl Scene for TessellationTerrain {
    fn draw(&mut self, frame: &Frame) {
        clear([0.0, 0.0, 0.0, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        self.program.set_used();
        self.program.set_mat4("mvp", &columns(&terrain_mvp(frame, 70.0)));
        self.height_map.bind_unit(0);

        self.vao.bind();
        unsafe {
            gl::DrawArraysInstanced(gl::PATCHES, 0, 4, PATCHES_PER_SIDE * PATCHES_PER_SIDE)
        };
    }
}
