use std::io;

use thiserror::Error;

use super::framebuffers::FramebufferStatus;

#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("error opening file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("shader error in {name}: {log}")]
    Compile { name: String, log: String },

    #[error("program error: {0}")]
    Link(String),

    #[error("could not create an OpenGL 4.4 context: {0}")]
    Context(String),

    #[error("framebuffer is not complete: {0}")]
    Framebuffer(FramebufferStatus),

    #[error("mapping {len} bytes at offset {offset} of buffer {buffer} failed")]
    Map { buffer: u32, offset: usize, len: usize },

    #[error("image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("{0}")]
    Geometry(#[from] geometry::GeometryError),
}

impl GraphicsError {
    pub fn io(path: &str, source: io::Error) -> Self {
        GraphicsError::Io { path: path.to_string(), source }
    }

    pub fn image(path: &str, source: image::ImageError) -> Self {
        GraphicsError::Image { path: path.to_string(), source }
    }
}
