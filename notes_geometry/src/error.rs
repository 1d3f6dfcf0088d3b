use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("failed to load OBJ file {path}: {source}")]
    Obj {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("{0} does not contain any mesh")]
    NoMesh(String),

    #[error("a grid needs at least 2x2 vertices, got {rows}x{cols}")]
    DegenerateGrid { rows: u32, cols: u32 },

    #[error("work group size must be non-zero on every axis, got {0:?}")]
    ZeroWorkGroup([u32; 3]),
}
