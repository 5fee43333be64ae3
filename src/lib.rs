pub mod boundary;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use boundary::{project_rings, HullBoundary, ProjectedRing, Ring};
pub use error::{PrismError, Result};
pub use geometry::PlaneModel;
pub use operations::{HeightLimits, PrismClassifier};
