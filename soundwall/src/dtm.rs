//! Triangulated Irregular Network terrain surface.

use crate::geometry::{Point, Point3};

fn barycentric(p: Point, a: Point3, b: Point3, c: Point3) -> Option<(f64, f64, f64)> {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() < 1e-12 {
        return None;
    }
    let l0 = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denom;
    let l1 = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denom;
    let l2 = 1.0 - l0 - l1;
    Some((l0, l1, l2))
}

/// Triangulated Irregular Network built over scattered 3D points.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Tin {
    pub name: String,
    /// Vertices of the TIN.
    pub vertices: Vec<Point3>,
    /// Indices into `vertices` forming triangles.
    pub triangles: Vec<[usize; 3]>,
}

impl Tin {
    pub fn new(name: &str, vertices: Vec<Point3>, triangles: Vec<[usize; 3]>) -> Self {
        Self {
            name: name.to_string(),
            vertices,
            triangles,
        }
    }

    /// Builds a TIN from the provided points using Delaunay triangulation on
    /// the XY plane.
    pub fn from_points(points: Vec<Point3>) -> Self {
        let coords: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();
        let triangulation = delaunator::triangulate(&coords);
        let triangles = triangulation
            .triangles
            .chunks(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self {
            name: String::new(),
            vertices: points,
            triangles,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Interpolated elevation at `(x, y)` if the point lies within the TIN.
    ///
    /// A linear scan over triangles; the first containing triangle wins.
    /// Degenerate triangles are skipped, and a small negative tolerance on
    /// the barycentric coordinates keeps points on shared edges inside.
    pub fn elevation_at(&self, x: f64, y: f64) -> Option<f64> {
        let p = Point::new(x, y);
        for tri in &self.triangles {
            let a = self.vertices[tri[0]];
            let b = self.vertices[tri[1]];
            let c = self.vertices[tri[2]];
            if let Some((l0, l1, l2)) = barycentric(p, a, b, c) {
                let tol = -1e-6;
                if l0 >= tol && l1 >= tol && l2 >= tol {
                    return Some(l0 * a.z + l1 * b.z + l2 * c.z);
                }
            }
        }
        None
    }

    /// Returns the `(min_e, min_n, max_e, max_n)` bounding box of the
    /// vertices, or zeros for an empty surface.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        if self.vertices.is_empty() {
            return (0.0, 0.0, 0.0, 0.0);
        }
        let mut min_e = f64::INFINITY;
        let mut min_n = f64::INFINITY;
        let mut max_e = f64::NEG_INFINITY;
        let mut max_n = f64::NEG_INFINITY;
        for v in &self.vertices {
            min_e = min_e.min(v.x);
            min_n = min_n.min(v.y);
            max_e = max_e.max(v.x);
            max_n = max_n.max(v.y);
        }
        (min_e, min_n, max_e, max_n)
    }
}
