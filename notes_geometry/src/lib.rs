//! Everything the notes need that can be worked out without a GPU: byte layouts, meshes,
//! procedural terrain, random placement, dispatch sizing and uniform-block packing.

pub mod compute;
pub mod error;
pub mod grid;
pub mod layout;
pub mod mesh;
pub mod noise;
pub mod pixels;
pub mod random;
pub mod transform;
pub mod uniform_block;

pub use error::GeometryError;
