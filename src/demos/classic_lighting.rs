//! Ambient, diffuse and specular lighting, with the lighting function picked through a
//! fragment shader subroutine.

use std::mem::size_of;

use cgmath::{InnerSpace, Matrix4, Vector3};

use geometry::layout::BlockLayout;
use geometry::mesh::MeshData;
use geometry::transform::{normal_matrix, perspective, spinning_model};

use crate::graphics::buffers::{Buffer, VertexArray};
use crate::graphics::gl_types::{BufferTarget, BufferUsage, ShaderKind};
use crate::graphics::opengl::Program;
use crate::graphics::render_loop::{Frame, Scene};
use crate::graphics::textures::Texture;
use crate::graphics::GraphicsError;

use super::{clear, columns, columns3, DemoContext, SetupResult};

const LIGHTING: &str = "directionalLighting";

struct ClassicLighting {
    program: Program,
    vao: VertexArray,
    _vertices: Buffer,
    _indices: Buffer,
    index_count: usize,
    texture: Texture,
    view: Matrix4<f32>,
}

/// Positions and normals go in with plain sub-data writes; texture coordinates and indices
/// are written through mapped ranges, flushed one vertex or one face at a time.
fn upload(mesh: &MeshData) -> Result<(VertexArray, Buffer, Buffer), GraphicsError> {
    let layout = BlockLayout::new(mesh.vertex_count(), &[3, 3, 2]);

    let vao = VertexArray::new();
    vao.bind();

    let vertices = Buffer::with_size(BufferTarget::Array, layout.total_size(), BufferUsage::StaticDraw);
    vertices.sub_data(BufferTarget::Array, layout.offset(0), &mesh.positions);
    vertices.sub_data(BufferTarget::Array, layout.offset(1), &mesh.normals);
    {
        let mut uvs = vertices.map_write(BufferTarget::Array, layout.offset(2), layout.size(2))?;
        for (i, uv) in mesh.uvs.iter().enumerate() {
            uvs.write_and_flush(i * size_of::<[f32; 2]>(), uv);
        }
        unsafe { gl::Finish() };
    }
    vao.attributes(&layout.attributes());

    let face_size = 3 * size_of::<u32>();
    let indices = Buffer::with_size(
        BufferTarget::Element,
        face_size * mesh.face_count(),
        BufferUsage::StaticDraw,
    );
    {
        let mut faces = indices.map_write(BufferTarget::Element, 0, face_size * mesh.face_count())?;
        for (i, face) in mesh.faces().enumerate() {
            faces.write_and_flush(i * face_size, &face);
        }
        unsafe { gl::Finish() };
    }

    Ok((vao, vertices, indices))
}

pub fn setup(context: &DemoContext) -> SetupResult {
    let mesh = context.load_mesh("Dog/dog.obj")?;
    let (vao, vertices, indices) = upload(&mesh)?;

    let texture = Texture::from_file(context.model_path("Dog/dogColor.png"))?;

    let program = context.program(&["classic.vert", "classic.frag"])?;
    program.set_used();

    let view = Matrix4::from_translation(Vector3::new(0.0, 0.0, 0.0));
    let view_projection = perspective(45.0, 4.0 / 3.0, 0.1, 1000.0) * view;
    program.set_mat4("viewProjection", &columns(&view_projection));

    let light: [f32; 3] = Vector3::new(0.5, 0.3, -1.0).normalize().into();
    let eye: [f32; 3] = Vector3::new(-0.1, -0.1, -1.0).normalize().into();

    program.set_vec3("ambient", [0.7, 0.7, 0.7]);
    program.set_vec3("diffuse", [1.0, 1.0, 1.0]);
    program.set_vec4("lightDirection", [light[0], light[1], light[2], 1.0]);
    program.set_vec4("specular", [0.8, 0.8, 0.8, 0.5]);
    program.set_vec4("eyeDirection", [eye[0], eye[1], eye[2], 1.0]);
    program.set_f32("specularStrength", 10.0);

    unsafe { gl::Enable(gl::DEPTH_TEST) };

    Ok(Box::new(ClassicLighting {
        program,
        vao,
        _vertices: vertices,
        _indices: indices,
        index_count: mesh.index_count(),
        texture,
        view,
    }))
}

impl Scene for ClassicLighting {
    fn draw(&mut self, frame: &Frame) {
        clear([1.0, 1.0, 1.0, 1.0], gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);

        self.program.set_used();
        // Subroutine selections do not survive glUseProgram
        self.program.select_subroutine(ShaderKind::Fragment, LIGHTING);

        let model = spinning_model(Vector3::new(0.0, -8.0, -250.0), frame.seconds);
        self.program.set_mat4("model", &columns(&model));
        self.program.set_mat3("normalMatrix", &columns3(&normal_matrix(&(self.view * model))));

        self.texture.bind_unit(0);
        self.vao.bind();
        unsafe {
            gl::DrawElements(gl::TRIANGLES, self.index_count as i32, gl::UNSIGNED_INT, std::ptr::null())
        };
    }
}
