use std::ffi::{c_void, CString};
use std::fs;
use std::path::Path;

use gl::types::*;
use log::{debug, warn};

use geometry::uniform_block::BlockMember;

use super::error::GraphicsError;
use super::gl_types::ShaderKind;
use super::utils::*;

pub struct Shader {
    id: GLuint,
    kind: ShaderKind,
}

impl Shader {
    pub fn id(&self) -> GLuint { self.id }

    pub fn kind(&self) -> ShaderKind { self.kind }

    /// Reads the whole file at `path` and compiles it as a `kind` stage.
    pub fn from_file<P: AsRef<Path>>(path: P, kind: ShaderKind) -> Result<Self, GraphicsError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|e| GraphicsError::io(&name, e))?;

        Self::from_source(&name, &source, kind)
    }

    pub fn from_source(name: &str, source: &str, kind: ShaderKind) -> Result<Self, GraphicsError> {
        let source = CString::new(source).map_err(|_| GraphicsError::Compile {
            name: name.to_string(),
            log: "source contains a nul byte".to_string(),
        })?;

        let id = shader_from_source(&source, kind.gl_enum())
            .map_err(|log| GraphicsError::Compile { name: name.to_string(), log })?;
        debug!("compiled {:?} shader {}", kind, name);

        Ok(Self { id, kind })
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) };
    }
}

/// Collects the options a program needs before it is linked.
#[derive(Default)]
pub struct ProgramBuilder<'a> {
    shaders: Vec<&'a Shader>,
    separable: bool,
    retrievable: bool,
    varyings: Vec<String>,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new() -> Self { Self::default() }

    pub fn attach(mut self, shader: &'a Shader) -> Self {
        self.shaders.push(shader);
        self
    }

    pub fn separable(mut self) -> Self {
        self.separable = true;
        self
    }

    pub fn binary_retrievable(mut self) -> Self {
        self.retrievable = true;
        self
    }

    /// Captures the named outputs into one interleaved transform feedback buffer.
    pub fn feedback_varyings(mut self, names: &[&str]) -> Self {
        self.varyings = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn link(self) -> Result<Program, GraphicsError> {
        let program = Program { id: unsafe { gl::CreateProgram() } };

        unsafe {
            for shader in &self.shaders {
                gl::AttachShader(program.id, shader.id());
            }

            if self.separable {
                gl::ProgramParameteri(program.id, gl::PROGRAM_SEPARABLE, gl::TRUE as GLint);
            }
            if self.retrievable {
                gl::ProgramParameteri(
                    program.id,
                    gl::PROGRAM_BINARY_RETRIEVABLE_HINT,
                    gl::TRUE as GLint,
                );
            }

            if !self.varyings.is_empty() {
                let names: Vec<CString> = self.varyings.iter().map(|v| c_name(v)).collect();
                let pointers: Vec<*const GLchar> = names.iter().map(|n| n.as_ptr()).collect();
                gl::TransformFeedbackVaryings(
                    program.id,
                    pointers.len() as GLsizei,
                    pointers.as_ptr(),
                    gl::INTERLEAVED_ATTRIBS,
                );
            }

            gl::LinkProgram(program.id);
        }

        program.check_link()?;

        unsafe {
            for shader in &self.shaders {
                gl::DetachShader(program.id, shader.id());
            }
        }

        Ok(program)
    }
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn id(&self) -> GLuint { self.id }

    /// Shorthand for linking a plain program out of already compiled stages.
    pub fn from_shaders(shaders: &[Shader]) -> Result<Self, GraphicsError> {
        shaders
            .iter()
            .fold(ProgramBuilder::new(), |builder, shader| builder.attach(shader))
            .link()
    }

    /// Compiles and links a separable single-stage program in one call.
    pub fn create_shader_program(kind: ShaderKind, source: &str) -> Result<Self, GraphicsError> {
        let source = CString::new(source)
            .map_err(|_| GraphicsError::Link("source contains a nul byte".to_string()))?;
        let id = unsafe { gl::CreateShaderProgramv(kind.gl_enum(), 1, &source.as_ptr()) };
        let program = Self { id };
        program.check_link()?;

        Ok(program)
    }

    /// Re-creates a program from a binary retrieved earlier with [`Program::binary`].
    pub fn from_binary(binary: &ProgramBinary) -> Result<Self, GraphicsError> {
        let program = Self { id: unsafe { gl::CreateProgram() } };
        unsafe {
            gl::ProgramBinary(
                program.id,
                binary.format,
                binary.data.as_ptr() as *const c_void,
                binary.data.len() as GLsizei,
            );
        }
        program.check_link()?;

        Ok(program)
    }

    fn check_link(&self) -> Result<(), GraphicsError> {
        let mut success = 1;
        unsafe { gl::GetProgramiv(self.id, gl::LINK_STATUS, &mut success) };

        if success == 0 {
            return Err(GraphicsError::Link(program_info_log(self.id)));
        }

        Ok(())
    }

    pub fn set_used(&self) {
        unsafe { gl::UseProgram(self.id) };
    }

    pub fn uniform_location(&self, name: &str) -> GLint {
        let location = unsafe { gl::GetUniformLocation(self.id, c_name(name).as_ptr()) };
        if location == -1 {
            warn!("uniform {} is not active in program {}", name, self.id);
        }
        location
    }

    pub fn attrib_location(&self, name: &str) -> GLint {
        unsafe { gl::GetAttribLocation(self.id, c_name(name).as_ptr()) }
    }

    // The setters below write to the program currently in use

    pub fn set_i32(&self, name: &str, value: i32) {
        unsafe { gl::Uniform1i(self.uniform_location(name), value) };
    }

    pub fn set_f32(&self, name: &str, value: f32) {
        unsafe { gl::Uniform1f(self.uniform_location(name), value) };
    }

    pub fn set_vec3(&self, name: &str, value: [f32; 3]) {
        unsafe { gl::Uniform3fv(self.uniform_location(name), 1, value.as_ptr()) };
    }

    pub fn set_vec3_array(&self, name: &str, values: &[[f32; 3]]) {
        unsafe {
            gl::Uniform3fv(
                self.uniform_location(name),
                values.len() as GLsizei,
                values.as_ptr() as *const GLfloat,
            )
        };
    }

    pub fn set_vec4(&self, name: &str, value: [f32; 4]) {
        unsafe { gl::Uniform4fv(self.uniform_location(name), 1, value.as_ptr()) };
    }

    pub fn set_mat3(&self, name: &str, value: &[[f32; 3]; 3]) {
        unsafe {
            gl::UniformMatrix3fv(self.uniform_location(name), 1, gl::FALSE, value.as_ptr() as *const GLfloat)
        };
    }

    pub fn set_mat4(&self, name: &str, value: &[[f32; 4]; 4]) {
        unsafe {
            gl::UniformMatrix4fv(self.uniform_location(name), 1, gl::FALSE, value.as_ptr() as *const GLfloat)
        };
    }

    /// Points the single subroutine uniform of `stage` at the subroutine called `name`.
    pub fn select_subroutine(&self, stage: ShaderKind, name: &str) {
        let index = unsafe { gl::GetSubroutineIndex(self.id, stage.gl_enum(), c_name(name).as_ptr()) };
        if index == gl::INVALID_INDEX {
            warn!("subroutine {} not found in program {}", name, self.id);
            return;
        }
        unsafe { gl::UniformSubroutinesuiv(stage.gl_enum(), 1, &index) };
    }

    /// The `local_size` a compute program was compiled with.
    pub fn work_group_size(&self) -> [u32; 3] {
        let mut size = [0 as GLint; 3];
        unsafe { gl::GetProgramiv(self.id, gl::COMPUTE_WORK_GROUP_SIZE, size.as_mut_ptr()) };
        [size[0] as u32, size[1] as u32, size[2] as u32]
    }

    pub fn uniform_block_index(&self, name: &str) -> GLuint {
        unsafe { gl::GetUniformBlockIndex(self.id, c_name(name).as_ptr()) }
    }

    pub fn uniform_block_size(&self, block: GLuint) -> usize {
        let mut size = 0;
        unsafe { gl::GetActiveUniformBlockiv(self.id, block, gl::UNIFORM_BLOCK_DATA_SIZE, &mut size) };
        size.max(0) as usize
    }

    pub fn bind_uniform_block(&self, block: GLuint, binding: GLuint) {
        unsafe { gl::UniformBlockBinding(self.id, block, binding) };
    }

    /// Asks the driver where each named member of a uniform block lives.
    pub fn block_members(&self, names: &[&str]) -> Vec<BlockMember> {
        let c_names: Vec<CString> = names.iter().map(|n| c_name(n)).collect();
        let pointers: Vec<*const GLchar> = c_names.iter().map(|n| n.as_ptr()).collect();
        let count = names.len() as GLsizei;

        let mut indices = vec![0 as GLuint; names.len()];
        unsafe { gl::GetUniformIndices(self.id, count, pointers.as_ptr(), indices.as_mut_ptr()) };

        let query = |pname: GLenum| {
            let mut values = vec![0 as GLint; names.len()];
            unsafe {
                gl::GetActiveUniformsiv(self.id, count, indices.as_ptr(), pname, values.as_mut_ptr())
            };
            values
        };

        let offsets = query(gl::UNIFORM_OFFSET);
        let array_strides = query(gl::UNIFORM_ARRAY_STRIDE);
        let matrix_strides = query(gl::UNIFORM_MATRIX_STRIDE);
        let sizes = query(gl::UNIFORM_SIZE);
        let kinds = query(gl::UNIFORM_TYPE);

        names
            .iter()
            .enumerate()
            .map(|(i, name)| BlockMember {
                name: name.to_string(),
                offset: offsets[i].max(0) as usize,
                array_stride: array_strides[i].max(0) as usize,
                matrix_stride: matrix_strides[i].max(0) as usize,
                size: sizes[i].max(0) as usize,
                kind: kinds[i] as u32,
            })
            .collect()
    }

    pub fn binary(&self) -> ProgramBinary {
        let mut len = 0;
        unsafe { gl::GetProgramiv(self.id, gl::PROGRAM_BINARY_LENGTH, &mut len) };

        let mut data = vec![0u8; len.max(0) as usize];
        let mut written = 0;
        let mut format = 0;
        unsafe {
            gl::GetProgramBinary(
                self.id,
                len,
                &mut written,
                &mut format,
                data.as_mut_ptr() as *mut c_void,
            );
        }
        data.truncate(written.max(0) as usize);

        ProgramBinary { format, data }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) };
    }
}

/// A driver-specific program image and the format tag needed to load it again.
pub struct ProgramBinary {
    pub format: GLenum,
    pub data: Vec<u8>,
}

pub struct ProgramPipeline {
    id: GLuint,
}

impl ProgramPipeline {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe { gl::GenProgramPipelines(1, &mut id) };
        Self { id }
    }

    pub fn id(&self) -> GLuint { self.id }

    /// Takes the stages in `stages` (a mask of `*_SHADER_BIT`s) from `program`.
    pub fn use_stages(&self, stages: GLbitfield, program: &Program) {
        unsafe { gl::UseProgramStages(self.id, stages, program.id()) };
    }

    pub fn bind(&self) {
        unsafe { gl::BindProgramPipeline(self.id) };
    }
}

impl Drop for ProgramPipeline {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgramPipelines(1, &self.id) };
    }
}
