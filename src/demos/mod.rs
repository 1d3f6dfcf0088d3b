//! The demos themselves, one module each, plus the little they share.
//!
//! A demo is a `setup` function that runs with a current context, uploads whatever it needs
//! and returns the [`Scene`] the render loop will drive. Demos never call into each other.

use std::path::PathBuf;

use geometry::mesh::MeshData;

use crate::graphics::buffers::{Buffer, VertexArray};
use crate::graphics::context::WindowSettings;
use crate::graphics::gl_types::{BufferTarget, BufferUsage, ShaderKind};
use crate::graphics::opengl::{Program, Shader};
use crate::graphics::render_loop::Scene;
use crate::graphics::GraphicsError;

pub mod buffers;
pub mod classic_lighting;
pub mod compute_shader;
pub mod conditional_rendering;
pub mod cubemap;
pub mod deferred_shading;
pub mod draw_commands;
pub mod fragment_testing;
pub mod framebuffer_objects;
pub mod framebuffer_texture;
pub mod graphics_primitives;
pub mod hello;
pub mod hemisphere_lighting;
pub mod instanced_rendering;
pub mod point_sprites;
pub mod polygon_offset;
pub mod program_binaries;
pub mod raytracing;
pub mod separate_programs;
pub mod terrain;
pub mod tessellation_terrain;
pub mod textures_2d;
pub mod transform_feedback;
pub mod uniform_buffers;
pub mod vertex_specification;

pub type SetupResult = Result<Box<dyn Scene>, GraphicsError>;

pub struct Demo {
    pub name: &'static str,
    pub title: &'static str,
    pub about: &'static str,
    pub setup: fn(&DemoContext) -> SetupResult,
    pub samples: u16,
    pub visible: bool,
}

impl Demo {
    pub fn window_settings(&self, width: u32, height: u32, debug: bool) -> WindowSettings {
        WindowSettings {
            title: self.title.to_string(),
            width,
            height,
            samples: self.samples,
            debug,
            visible: self.visible,
        }
    }
}

macro_rules! demo {
    ($module:ident, $name:expr, $title:expr, $about:expr) => {
        demo!($module, $name, $title, $about, samples: 0, visible: true)
    };
    ($module:ident, $name:expr, $title:expr, $about:expr, samples: $samples:expr, visible: $visible:expr) => {
        Demo {
            name: $name,
            title: $title,
            about: $about,
            setup: $module::setup,
            samples: $samples,
            visible: $visible,
        }
    };
}

lazy_static! {
    pub static ref DEMOS: Vec<Demo> = vec![
        demo!(hello, "hello", "Hello GLFW", "two blue triangles"),
        demo!(buffers, "buffers", "Buffers", "filling one buffer from two with buffer copies"),
        demo!(vertex_specification, "vertex-specification", "Vertex Specification", "constant generic vertex attributes"),
        demo!(graphics_primitives, "graphics-primitives", "Graphics Primitives", "draw modes (1-7) and polygon modes (Q/W/E)"),
        demo!(draw_commands, "draw-commands", "Draw Commands", "indexed and instanced draws"),
        demo!(fragment_testing, "fragment-testing", "Fragment Testing", "scissor, stencil, depth and friends",
            samples: 4, visible: true),
        demo!(uniform_buffers, "uniform-buffers", "Uniform Buffers", "a uniform block packed at driver offsets"),
        demo!(instanced_rendering, "instanced-rendering", "Instanced Rendering", "a thousand bears"),
        demo!(conditional_rendering, "conditional-rendering", "Conditional Rendering", "occlusion query driving a draw"),
        demo!(polygon_offset, "polygon-offset", "Polygon Offset", "wireframe over a filled model"),
        demo!(hemisphere_lighting, "hemisphere-lighting", "Hemisphere Lighting", "sky and ground lighting"),
        demo!(classic_lighting, "classic-lighting", "Classic Lighting Model", "ambient, diffuse and specular through a subroutine"),
        demo!(textures_2d, "textures-2d", "Textures 2D", "textures and copying from the framebuffer"),
        demo!(cubemap, "cubemap", "Cubemap", "a city skybox"),
        demo!(deferred_shading, "deferred-shading", "Deferred Shading", "G-buffer with three coloured lights"),
        demo!(framebuffer_objects, "framebuffer-objects", "Framebuffer Objects", "multisampled renderbuffers and blits"),
        demo!(framebuffer_texture, "framebuffer-texture", "Framebuffer Texture", "rendering into a texture"),
        demo!(point_sprites, "point-sprites", "Point Sprites", "textured points"),
        demo!(program_binaries, "program-binaries", "Program Binaries", "saving and reloading a linked program"),
        demo!(separate_programs, "separate-programs", "Separate Programs", "program pipelines"),
        demo!(raytracing, "raytracing", "Raytracing", "a fragment shader ray tracer"),
        demo!(compute_shader, "compute-shader", "Compute Shader", "a compute shader ray tracer"),
        demo!(terrain, "terrain", "Terrain", "a Perlin noise height map on a grid"),
        demo!(tessellation_terrain, "tessellation-terrain", "Tessellation Terrain", "a height map displaced by tessellation"),
        demo!(transform_feedback, "transform-feedback", "Transform Feedback", "capturing vertex shader output",
            samples: 0, visible: false),
    ];
}

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|d| d.name == name)
}

/// Where a demo finds its files and how big its window started out.
pub struct DemoContext {
    pub name: &'static str,
    pub assets: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl DemoContext {
    pub fn shader_path(&self, file: &str) -> PathBuf {
        self.assets.join("shaders").join(self.name).join(file)
    }

    pub fn model_path(&self, file: &str) -> PathBuf {
        self.assets.join("models").join(file)
    }

    pub fn image_path(&self, file: &str) -> PathBuf {
        self.assets.join("images").join(file)
    }

    pub fn aspect(&self) -> f32 {
        geometry::transform::aspect(self.width, self.height)
    }

    /// Compiles one of this demo's shader files, taking the stage from its extension.
    pub fn shader(&self, file: &str) -> Result<Shader, GraphicsError> {
        let path = self.shader_path(file);
        let kind = ShaderKind::from_path(&path).ok_or_else(|| GraphicsError::Compile {
            name: path.display().to_string(),
            log: String::from("unknown shader stage"),
        })?;

        Shader::from_file(path, kind)
    }

    pub fn program(&self, files: &[&str]) -> Result<Program, GraphicsError> {
        let shaders = files
            .iter()
            .map(|f| self.shader(f))
            .collect::<Result<Vec<_>, _>>()?;

        Program::from_shaders(&shaders)
    }

    pub fn load_mesh(&self, file: &str) -> Result<MeshData, GraphicsError> {
        Ok(MeshData::load_obj(self.model_path(file))?)
    }
}

/// The two triangles most of the small demos start from.
pub const TRIANGLES: [[f32; 2]; 6] = [
    [-0.90, -0.90],
    [0.85, -0.90],
    [-0.90, 0.85],
    [0.90, -0.85],
    [0.90, 0.90],
    [-0.85, 0.90],
];

/// Two triangles covering the whole viewport.
pub const FULLSCREEN_QUAD: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [-1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [1.0, 1.0],
];

/// A vertex array with one float attribute at location 0, read from its own buffer.
pub struct Positions {
    pub vao: VertexArray,
    pub buffer: Buffer,
    pub count: usize,
}

impl Positions {
    pub fn upload<T: bytemuck::Pod>(data: &[T], components: usize) -> Self {
        let vao = VertexArray::new();
        vao.bind();
        let buffer = Buffer::with_data(BufferTarget::Array, data, BufferUsage::StaticDraw);
        vao.float_attribute(0, components, 0, 0);

        let count = std::mem::size_of_val(data) / (components * std::mem::size_of::<f32>());
        Self { vao, buffer, count }
    }

    /// A model flattened to one position per face corner, ready for `glDrawArrays`.
    pub fn from_mesh(mesh: &MeshData) -> Self {
        Self::upload(&mesh.unindexed_positions(), 3)
    }

    pub fn draw(&self, mode: gl::types::GLenum) {
        self.vao.bind();
        unsafe { gl::DrawArrays(mode, 0, self.count as i32) };
    }
}

/// An indexed model whose positions, normals and texture coordinates sit in consecutive blocks
/// of one buffer, written through a mapped range and flushed block by block.
pub struct BlockMesh {
    pub vao: VertexArray,
    pub vertices: Buffer,
    pub indices: Buffer,
    pub index_count: usize,
}

impl BlockMesh {
    pub fn upload(mesh: &MeshData) -> Result<Self, GraphicsError> {
        let layout = geometry::layout::BlockLayout::new(mesh.vertex_count(), &[3, 3, 2]);

        let vao = VertexArray::new();
        vao.bind();

        let vertices = Buffer::with_size(BufferTarget::Array, layout.total_size(), BufferUsage::StaticDraw);
        {
            let mut range = vertices.map_write(BufferTarget::Array, 0, layout.total_size())?;
            range.write_and_flush(layout.offset(0), &mesh.positions);
            range.write_and_flush(layout.offset(1), &mesh.normals);
            range.write_and_flush(layout.offset(2), &mesh.uvs);
            unsafe { gl::Finish() };
        }
        vao.attributes(&layout.attributes());

        let index_bytes = mesh.index_count() * std::mem::size_of::<u32>();
        let indices = Buffer::with_size(BufferTarget::Element, index_bytes, BufferUsage::StaticDraw);
        {
            let mut range = indices.map_write(BufferTarget::Element, 0, index_bytes)?;
            range.write(0, &mesh.indices);
            range.flush_all();
            unsafe { gl::Finish() };
        }

        Ok(Self { vao, vertices, indices, index_count: mesh.index_count() })
    }

    pub fn draw(&self) {
        self.vao.bind();
        unsafe {
            gl::DrawElements(gl::TRIANGLES, self.index_count as i32, gl::UNSIGNED_INT, std::ptr::null())
        };
    }
}

/// Where the bear model demos place the bear: in front of the camera, turned onto its side.
pub(crate) fn bear_model() -> cgmath::Matrix4<f32> {
    let axis = cgmath::Vector3::new(1.0, 1.0, 0.0);
    cgmath::Matrix4::from_translation(cgmath::Vector3::new(0.0, -8.0, -70.0))
        * geometry::transform::rotation(90f32.to_radians(), axis)
}

/// The bear seen through a 45 degree, 4:3 lens.
pub(crate) fn bear_mvp() -> cgmath::Matrix4<f32> {
    geometry::transform::perspective(45.0, 4.0 / 3.0, 0.1, 1000.0) * bear_model()
}

pub(crate) fn columns(m: &cgmath::Matrix4<f32>) -> [[f32; 4]; 4] {
    (*m).into()
}

pub(crate) fn columns3(m: &cgmath::Matrix3<f32>) -> [[f32; 3]; 3] {
    (*m).into()
}

pub(crate) fn clear(color: [f32; 4], mask: gl::types::GLbitfield) {
    unsafe {
        gl::ClearColor(color[0], color[1], color[2], color[3]);
        gl::Clear(mask);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;
    use std::path::Path;

    #[test]
    fn every_demo_is_registered_once() {
        let names: HashSet<_> = DEMOS.iter().map(|d| d.name).collect();

        assert_eq!(DEMOS.len(), 25);
        assert_eq!(names.len(), DEMOS.len());
    }

    #[test]
    fn demos_are_found_by_name() {
        assert_eq!(find("cubemap").map(|d| d.title), Some("Cubemap"));
        assert!(find("Cubemap").is_none());
        assert!(find("teapot").is_none());
    }

    #[test]
    fn transform_feedback_runs_without_showing_a_window() {
        let demo = find("transform-feedback").unwrap();
        let settings = demo.window_settings(640, 480, false);

        assert!(!settings.visible);
        assert!(find("hello").unwrap().window_settings(640, 480, true).debug);
    }

    #[test]
    fn assets_resolve_per_demo() {
        let context = DemoContext {
            name: "terrain",
            assets: PathBuf::from("assets"),
            width: 640,
            height: 480,
        };

        assert_eq!(
            context.shader_path("terrain.vert"),
            Path::new("assets").join("shaders").join("terrain").join("terrain.vert")
        );
        assert_eq!(context.model_path("Dog/dog.obj"), Path::new("assets/models/Dog/dog.obj"));
        assert_eq!(context.aspect(), 4.0 / 3.0);
    }

    #[test]
    fn shaders_with_unknown_stages_are_rejected_before_reading() {
        let context = DemoContext {
            name: "hello",
            assets: PathBuf::from("assets"),
            width: 640,
            height: 480,
        };

        assert!(matches!(context.shader("hello.glsl"), Err(GraphicsError::Compile { .. })));
    }
}
