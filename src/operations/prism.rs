use rayon::prelude::*;

use crate::boundary::{project_rings, HullBoundary, ProjectedRing};
use crate::error::{PrismError, Result};
use crate::geometry::PlaneModel;
use crate::math::{Point2, Point3};

/// A closed signed-distance band along a plane normal.
///
/// Points whose signed distance from the hull plane falls outside
/// `[min, max]` are rejected regardless of their in-polygon status.
#[derive(Debug, Clone, Copy)]
pub struct HeightLimits {
    min: f64,
    max: f64,
}

impl HeightLimits {
    /// Creates a height band.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::InvalidHeightLimits`] if `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min > max {
            return Err(PrismError::InvalidHeightLimits { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound of the band.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the band.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether a signed distance lies within the closed band.
    #[must_use]
    pub fn contains(&self, distance: f64) -> bool {
        distance >= self.min && distance <= self.max
    }
}

/// Classifies candidate points against the prism obtained by extruding a
/// polygonal hull boundary along its plane normal.
///
/// The plane and the projected rings are built once at construction and
/// shared, immutably, by every subsequent [`Self::classify`] call.
#[derive(Debug, Clone)]
pub struct PrismClassifier {
    plane: PlaneModel,
    rings: Vec<ProjectedRing>,
    limits: HeightLimits,
}

impl PrismClassifier {
    /// Builds a classifier, deriving the plane from the hull vertices.
    ///
    /// Malformed rings are skipped with a warning (see
    /// [`project_rings`]); a boundary with no usable rings is accepted and
    /// classifies every point as outside.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::DegenerateHull`] if no plane can be derived
    /// from the hull vertices. No candidate point is examined in that case.
    pub fn new(hull: &HullBoundary, limits: HeightLimits) -> Result<Self> {
        let plane = PlaneModel::derive(&hull.vertices)?;
        Ok(Self::with_plane(hull, plane, limits))
    }

    /// Builds a classifier against a caller-supplied plane.
    ///
    /// Useful when the plane orientation is already known upstream and the
    /// sign of the height band must follow it.
    #[must_use]
    pub fn with_plane(hull: &HullBoundary, plane: PlaneModel, limits: HeightLimits) -> Self {
        let rings = project_rings(hull, &plane);
        Self {
            plane,
            rings,
            limits,
        }
    }

    /// Returns the plane the hull was associated with.
    #[must_use]
    pub fn plane(&self) -> &PlaneModel {
        &self.plane
    }

    /// Returns the height band.
    #[must_use]
    pub fn height_limits(&self) -> HeightLimits {
        self.limits
    }

    /// Returns the indices of the candidate points inside the prism, in
    /// ascending input order.
    ///
    /// Candidates are independent pure reads of shared immutable state, so
    /// they are classified in parallel; the indexed collect re-establishes
    /// input order without locking.
    #[must_use]
    pub fn classify(&self, candidates: &[Point3]) -> Vec<usize> {
        candidates
            .par_iter()
            .enumerate()
            .filter_map(|(i, p)| self.contains(p).then_some(i))
            .collect()
    }

    /// Tests a single point against the height band and the ring set.
    ///
    /// All rings feed one shared crossing counter, so holes and disjoint
    /// islands compose by parity with no ring hierarchy: a hole ring flips
    /// parity a second time for points inside it, excluding them.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        if !self.limits.contains(self.plane.signed_distance(point)) {
            return false;
        }
        let uv = self.plane.to_local(point);
        let crossings: usize = self
            .rings
            .iter()
            .map(|ring| ray_crossings(uv, &ring.vertices))
            .sum();
        crossings % 2 == 1
    }
}

/// Counts the edges of a closed loop crossed by the ray from `from` in the
/// +u direction.
///
/// An edge crosses iff exactly one endpoint has `v >= from.v` (half-open
/// rule, so a vertex exactly on the ray is never counted twice) and the
/// edge's u-intercept at `from.v` lies strictly beyond `from.u`. Horizontal
/// and zero-length edges fail the endpoint test and are never crossed.
fn ray_crossings(from: Point2, verts: &[Point2]) -> usize {
    let n = verts.len();
    let mut count = 0;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        if (a.y >= from.y) == (b.y >= from.y) {
            continue;
        }
        let t = (from.y - a.y) / (b.y - a.y);
        if a.x + t * (b.x - a.x) > from.x {
            count += 1;
        }
    }
    count
}
