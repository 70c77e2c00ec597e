mod cache;
pub mod error;
pub mod geometry;
pub mod math;
pub mod mesh;
pub mod transform;

pub use error::{PlanarError, Result};
pub use mesh::Mesh;
pub use transform::TransformSpace;
