use crate::error::{PrismError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

/// An oriented plane in 3D space with a cached orthonormal in-plane basis.
///
/// Defined by an origin point, a unit normal, and two orthogonal unit
/// direction vectors (`u_dir`, `v_dir`) spanning the plane. The basis is
/// fixed at construction, so every projection performed through one
/// `PlaneModel` is mutually consistent.
#[derive(Debug, Clone)]
pub struct PlaneModel {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl PlaneModel {
    /// Derives a plane from the ordered vertices of a hull boundary.
    ///
    /// The first vertex anchors the plane. The second is the vertex
    /// farthest from the anchor, and the third is the vertex maximizing
    /// the cross-product magnitude of the two edge vectors, so a
    /// near-collinear run of leading vertices cannot produce a degenerate
    /// normal when a well-separated vertex exists later in the hull.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::DegenerateHull`] if fewer than 3 vertices are
    /// supplied or all vertices are (nearly) collinear.
    pub fn derive(hull_vertices: &[Point3]) -> Result<Self> {
        if hull_vertices.len() < 3 {
            return Err(PrismError::DegenerateHull(format!(
                "{} hull vertices, need at least 3",
                hull_vertices.len()
            )));
        }

        let anchor = hull_vertices[0];

        let mut edge_a = Vector3::zeros();
        let mut best_len = 0.0;
        for p in &hull_vertices[1..] {
            let d = p - anchor;
            let len = d.norm_squared();
            if len > best_len {
                best_len = len;
                edge_a = d;
            }
        }
        if best_len < TOLERANCE * TOLERANCE {
            return Err(PrismError::DegenerateHull(
                "all hull vertices coincide".into(),
            ));
        }

        let mut normal = Vector3::zeros();
        let mut best_cross = 0.0;
        for p in &hull_vertices[1..] {
            let cross = edge_a.cross(&(p - anchor));
            let len = cross.norm_squared();
            if len > best_cross {
                best_cross = len;
                normal = cross;
            }
        }
        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(PrismError::DegenerateHull(
                "hull vertices are collinear".into(),
            ));
        }

        Self::from_normal(anchor, normal / normal_len)
    }

    /// Creates a plane from an origin and a normal vector.
    ///
    /// The U and V directions are computed automatically from a world axis
    /// not parallel to the normal.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::ZeroVector`] if the normal is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(PrismError::ZeroVector);
        }
        let normal = normal / len;

        // Choose a reference vector not parallel to the normal
        let reference = if normal.x.abs() < 0.9 {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            Vector3::new(0.0, 1.0, 0.0)
        };

        let u_dir = normal.cross(&reference).normalize();
        let v_dir = normal.cross(&u_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Signed distance from the plane to `point`, measured along the normal.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        (point - self.origin).dot(&self.normal)
    }

    /// Projects a 3D point onto the plane's UV coordinate system.
    ///
    /// The component along the normal is discarded; callers needing it use
    /// [`Self::signed_distance`].
    #[must_use]
    pub fn to_local(&self, point: &Point3) -> Point2 {
        let diff = point - self.origin;
        Point2::new(diff.dot(&self.u_dir), diff.dot(&self.v_dir))
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn derive_square_in_xy() {
        let verts = vec![
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
        ];
        let plane = PlaneModel::derive(&verts).unwrap();
        assert!((plane.normal().z.abs() - 1.0).abs() < TOLERANCE);
        assert!(plane.normal().x.abs() < TOLERANCE);
        assert!(plane.normal().y.abs() < TOLERANCE);
    }

    #[test]
    fn derive_too_few_vertices() {
        let verts = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        assert!(matches!(
            PlaneModel::derive(&verts),
            Err(PrismError::DegenerateHull(_))
        ));
    }

    #[test]
    fn derive_collinear_vertices() {
        let verts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ];
        assert!(matches!(
            PlaneModel::derive(&verts),
            Err(PrismError::DegenerateHull(_))
        ));
    }

    #[test]
    fn derive_coincident_vertices() {
        let p = Point3::new(2.0, 3.0, 4.0);
        assert!(matches!(
            PlaneModel::derive(&[p, p, p]),
            Err(PrismError::DegenerateHull(_))
        ));
    }

    #[test]
    fn derive_tolerates_collinear_prefix() {
        // First three vertices are collinear; the fourth breaks the line.
        let verts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let plane = PlaneModel::derive(&verts).unwrap();
        assert!((plane.normal().z.abs() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn from_normal_basis_is_orthonormal() {
        let plane =
            PlaneModel::from_normal(Point3::origin(), Vector3::new(1.0, 2.0, 3.0)).unwrap();
        assert_relative_eq!(plane.u_dir().norm(), 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(plane.v_dir().norm(), 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(plane.normal().norm(), 1.0, epsilon = TOLERANCE);
        assert!(plane.u_dir().dot(plane.v_dir()).abs() < TOLERANCE);
        assert!(plane.u_dir().dot(plane.normal()).abs() < TOLERANCE);
        assert!(plane.v_dir().dot(plane.normal()).abs() < TOLERANCE);
    }

    #[test]
    fn from_normal_zero_vector() {
        assert!(matches!(
            PlaneModel::from_normal(Point3::origin(), Vector3::zeros()),
            Err(PrismError::ZeroVector)
        ));
    }

    #[test]
    fn signed_distance_along_normal() {
        let plane =
            PlaneModel::from_normal(Point3::origin(), Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_relative_eq!(
            plane.signed_distance(&Point3::new(4.0, -7.0, 2.5)),
            2.5,
            epsilon = TOLERANCE
        );
        assert_relative_eq!(
            plane.signed_distance(&Point3::new(0.0, 0.0, -1.25)),
            -1.25,
            epsilon = TOLERANCE
        );
    }

    #[test]
    fn projection_preserves_in_plane_distances() {
        let plane =
            PlaneModel::from_normal(Point3::new(1.0, 1.0, 1.0), Vector3::new(1.0, 1.0, 1.0))
                .unwrap();
        // Two points in the plane x + y + z = 3.
        let a = Point3::new(3.0, -1.0, 1.0);
        let b = Point3::new(0.0, 2.0, 1.0);
        let ua = plane.to_local(&a);
        let ub = plane.to_local(&b);
        assert_relative_eq!((ua - ub).norm(), (a - b).norm(), epsilon = 1e-9);
    }

    #[test]
    fn origin_projects_to_uv_zero() {
        let origin = Point3::new(5.0, 6.0, 7.0);
        let plane = PlaneModel::from_normal(origin, Vector3::new(0.0, 1.0, 0.0)).unwrap();
        let uv = plane.to_local(&origin);
        assert!(uv.x.abs() < TOLERANCE);
        assert!(uv.y.abs() < TOLERANCE);
    }
}
