//! Typed stand-ins for the handful of `GLenum` families the wrappers take as arguments.

use std::path::Path;

use gl::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex = gl::VERTEX_SHADER as isize,
    TessControl = gl::TESS_CONTROL_SHADER as isize,
    TessEvaluation = gl::TESS_EVALUATION_SHADER as isize,
    Geometry = gl::GEOMETRY_SHADER as isize,
    Fragment = gl::FRAGMENT_SHADER as isize,
    Compute = gl::COMPUTE_SHADER as isize,
}

impl ShaderKind {
    /// Guesses the stage from the usual GLSL file extensions.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        use self::ShaderKind::*;
        match path.as_ref().extension()?.to_str()? {
            "vert" => Some(Vertex),
            "tesc" => Some(TessControl),
            "tese" => Some(TessEvaluation),
            "geom" => Some(Geometry),
            "frag" => Some(Fragment),
            "comp" => Some(Compute),
            _ => None,
        }
    }

    /// The bit used to attach this stage to a program pipeline.
    pub fn stage_bit(self) -> GLbitfield {
        use self::ShaderKind::*;
        match self {
            Vertex => gl::VERTEX_SHADER_BIT,
            TessControl => gl::TESS_CONTROL_SHADER_BIT,
            TessEvaluation => gl::TESS_EVALUATION_SHADER_BIT,
            Geometry => gl::GEOMETRY_SHADER_BIT,
            Fragment => gl::FRAGMENT_SHADER_BIT,
            Compute => gl::COMPUTE_SHADER_BIT,
        }
    }

    pub fn gl_enum(self) -> GLenum { self as GLenum }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array = gl::ARRAY_BUFFER as isize,
    Element = gl::ELEMENT_ARRAY_BUFFER as isize,
    CopyRead = gl::COPY_READ_BUFFER as isize,
    CopyWrite = gl::COPY_WRITE_BUFFER as isize,
    Uniform = gl::UNIFORM_BUFFER as isize,
    Texture = gl::TEXTURE_BUFFER as isize,
    TransformFeedback = gl::TRANSFORM_FEEDBACK_BUFFER as isize,
}

impl BufferTarget {
    pub fn gl_enum(self) -> GLenum { self as GLenum }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    StaticDraw = gl::STATIC_DRAW as isize,
    StaticRead = gl::STATIC_READ as isize,
    DynamicDraw = gl::DYNAMIC_DRAW as isize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureTarget {
    Texture2D = gl::TEXTURE_2D as isize,
    CubeMap = gl::TEXTURE_CUBE_MAP as isize,
    Buffer = gl::TEXTURE_BUFFER as isize,
}

impl TextureTarget {
    pub fn gl_enum(self) -> GLenum { self as GLenum }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shader_kind_follows_extension() {
        assert_eq!(ShaderKind::from_path("shaders/hello/vertexShader.vert"), Some(ShaderKind::Vertex));
        assert_eq!(ShaderKind::from_path("terrain.tesc"), Some(ShaderKind::TessControl));
        assert_eq!(ShaderKind::from_path("terrain.tese"), Some(ShaderKind::TessEvaluation));
        assert_eq!(ShaderKind::from_path("rays.comp"), Some(ShaderKind::Compute));
        assert_eq!(ShaderKind::from_path("notes.txt"), None);
        assert_eq!(ShaderKind::from_path("no_extension"), None);
    }

    #[test]
    fn shader_kind_maps_to_gl_enums() {
        assert_eq!(ShaderKind::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
        assert_eq!(ShaderKind::Vertex.stage_bit(), gl::VERTEX_SHADER_BIT);
        assert_eq!(BufferTarget::Uniform.gl_enum(), gl::UNIFORM_BUFFER);
    }
}
