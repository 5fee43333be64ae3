mod prism;

pub use prism::{HeightLimits, PrismClassifier};
