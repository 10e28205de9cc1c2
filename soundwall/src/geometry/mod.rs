//! Basic geometry primitives shared by the alignment and layout code.
//!
//! Bearings throughout the crate are surveyor's azimuths: radians measured
//! clockwise from grid north (+Y), normalized to `[0, 2*pi)`.

/// Representation of a 2D point (easting, northing).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Representation of a 3D point (easting, northing, elevation).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Normalizes an angle to `[0, 2*pi)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    let mut a = angle % two_pi;
    if a < 0.0 {
        a += two_pi;
    }
    a
}

/// Azimuth from point `a` to point `b` in radians, clockwise from north.
pub fn azimuth(a: Point, b: Point) -> f64 {
    normalize_angle((b.x - a.x).atan2(b.y - a.y))
}

/// Calculates the Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Calculates the Euclidean distance between two 3D points.
pub fn distance3(a: Point3, b: Point3) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2) + (b.z - a.z).powi(2)).sqrt()
}

/// Offsets a point perpendicular to a bearing. Positive offsets fall to the
/// right of the direction of travel.
pub fn offset_point(p: Point, bearing: f64, offset: f64) -> Point {
    let perp = bearing + std::f64::consts::FRAC_PI_2;
    Point::new(p.x + offset * perp.sin(), p.y + offset * perp.cos())
}

/// Advances a point along a bearing by the given distance.
pub fn point_along_bearing(p: Point, bearing: f64, dist: f64) -> Point {
    Point::new(p.x + dist * bearing.sin(), p.y + dist * bearing.cos())
}

/// Linear interpolation of `y` at `x` between `(x1, y1)` and `(x2, y2)`.
pub fn interpolate_linear(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if (x2 - x1).abs() < 1e-12 {
        return (y1 + y2) / 2.0;
    }
    let t = (x - x1) / (x2 - x1);
    y1 + t * (y2 - y1)
}

/// Elevation on a symmetric parabolic vertical curve centered on a PVI.
///
/// `grade_in` and `grade_out` are rise/run decimals; the curve runs from
/// `pvi_station - curve_length / 2` to `pvi_station + curve_length / 2`.
pub fn parabolic_curve_elevation(
    station: f64,
    pvi_station: f64,
    pvi_elevation: f64,
    grade_in: f64,
    grade_out: f64,
    curve_length: f64,
) -> f64 {
    let bvc_station = pvi_station - curve_length / 2.0;
    let bvc_elevation = pvi_elevation - grade_in * (curve_length / 2.0);
    let x = station - bvc_station;
    let r = (grade_out - grade_in) / curve_length;
    bvc_elevation + grade_in * x + (r / 2.0) * x * x
}

/// Clamps `value` to `[min_val, max_val]`.
pub fn clamp(value: f64, min_val: f64, max_val: f64) -> f64 {
    value.max(min_val).min(max_val)
}
