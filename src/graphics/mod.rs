pub mod buffers;
pub mod context;
pub mod debug;
pub mod error;
pub mod framebuffers;
pub mod gl_types;
pub mod opengl;
pub mod queries;
pub mod render_loop;
pub mod textures;
pub mod utils;

pub use self::error::GraphicsError;
