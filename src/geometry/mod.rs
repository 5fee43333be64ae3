mod plane;

pub use plane::PlaneModel;
