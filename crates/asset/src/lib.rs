//! Asset loading: OBJ meshes flattened for triangle-list rendering.

pub mod config;
pub mod error;
pub mod mesh;
pub mod obj;

pub use config::LoaderConfig;
pub use error::{IndexKind, LoadError, LoadResult};
pub use mesh::{Mesh, MeshVertex};
