use crate::geometry::PlaneModel;
use crate::math::{Point2, Point3};

/// A closed polygon loop, given as ordered indices into a hull vertex pool.
///
/// The last vertex implicitly connects back to the first. A usable ring has
/// at least 3 vertices; winding direction does not matter, since containment
/// is decided by crossing parity.
#[derive(Debug, Clone)]
pub struct Ring {
    /// Indices into the owning [`HullBoundary`]'s vertex pool.
    pub vertices: Vec<usize>,
}

impl Ring {
    /// Creates a ring from vertex-pool indices.
    #[must_use]
    pub fn new(vertices: Vec<usize>) -> Self {
        Self { vertices }
    }
}

/// The full polygonal boundary of a prism footprint: a 3D vertex pool and
/// one or more rings over it.
///
/// Multiple rings compose by crossing parity, so disjoint islands and holes
/// (a ring nested inside another) need no hierarchy — a flat collection is
/// the whole topology.
#[derive(Debug, Clone)]
pub struct HullBoundary {
    /// Ordered hull vertex pool.
    pub vertices: Vec<Point3>,
    /// Rings indexing into `vertices`.
    pub rings: Vec<Ring>,
}

impl HullBoundary {
    /// Creates a boundary from a vertex pool and explicit rings.
    #[must_use]
    pub fn new(vertices: Vec<Point3>, rings: Vec<Ring>) -> Self {
        Self { vertices, rings }
    }

    /// Creates a boundary treating the entire vertex pool, in order, as one
    /// implicit ring.
    #[must_use]
    pub fn from_vertices(vertices: Vec<Point3>) -> Self {
        let ring = Ring::new((0..vertices.len()).collect());
        Self {
            vertices,
            rings: vec![ring],
        }
    }
}

/// A ring realized as 2D coordinates in a plane's local basis.
#[derive(Debug, Clone)]
pub struct ProjectedRing {
    /// Projected ring vertices, same order as the source ring.
    pub vertices: Vec<Point2>,
}

/// Projects every ring of a boundary into the plane's local frame.
///
/// Rings with fewer than 3 vertices, or referencing an index outside the
/// vertex pool, are malformed: they are skipped with a warning and the
/// remaining rings are still projected. Degenerate geometry (repeated
/// vertices, zero projected area) is retained; the crossing test downstream
/// tolerates it.
#[must_use]
pub fn project_rings(hull: &HullBoundary, plane: &PlaneModel) -> Vec<ProjectedRing> {
    let mut projected = Vec::with_capacity(hull.rings.len());
    for (i, ring) in hull.rings.iter().enumerate() {
        if ring.vertices.len() < 3 {
            log::warn!(
                "skipping ring {i}: {} vertices, need at least 3",
                ring.vertices.len()
            );
            continue;
        }
        if let Some(&bad) = ring.vertices.iter().find(|&&v| v >= hull.vertices.len()) {
            log::warn!(
                "skipping ring {i}: vertex index {bad} out of range ({} hull vertices)",
                hull.vertices.len()
            );
            continue;
        }
        let vertices = ring
            .vertices
            .iter()
            .map(|&v| plane.to_local(&hull.vertices[v]))
            .collect();
        projected.push(ProjectedRing { vertices });
    }
    projected
}
