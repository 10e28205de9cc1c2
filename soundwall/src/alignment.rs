//! Horizontal alignment segments and the PVI-based vertical profile.
//!
//! A horizontal alignment is an ordered run of tangents, circular arcs and
//! Euler spirals with contiguous stationing. Stations are arclength in meters
//! from the alignment origin.

use crate::geometry::{azimuth, distance, normalize_angle, parabolic_curve_elevation, Point};

/// Tangent (straight) segment.
#[derive(Debug, Clone)]
pub struct LineSegment {
    pub start_station: f64,
    pub end_station: f64,
    pub start: Point,
    pub end: Point,
    /// Azimuth from start to end, radians clockwise from north.
    pub bearing: f64,
}

impl LineSegment {
    /// Creates a tangent from its endpoints, deriving the end station from
    /// the chord length and the bearing from the endpoint azimuth.
    pub fn from_endpoints(start_station: f64, start: Point, end: Point) -> Self {
        Self {
            start_station,
            end_station: start_station + distance(start, end),
            start,
            end,
            bearing: azimuth(start, end),
        }
    }

    fn point_at_station(&self, station: f64) -> (f64, f64, f64) {
        let dist = station - self.start_station;
        let e = self.start.x + dist * self.bearing.sin();
        let n = self.start.y + dist * self.bearing.cos();
        (e, n, self.bearing)
    }
}

/// Circular arc segment. `is_clockwise` means the curve turns right in the
/// direction of increasing station.
#[derive(Debug, Clone)]
pub struct ArcSegment {
    pub start_station: f64,
    pub end_station: f64,
    pub start: Point,
    pub end: Point,
    pub radius: f64,
    pub center: Point,
    pub is_clockwise: bool,
    pub start_bearing: f64,
    pub end_bearing: f64,
}

impl ArcSegment {
    /// Central angle swept by the arc.
    pub fn delta_angle(&self) -> f64 {
        if self.radius.abs() < 1e-10 {
            return 0.0;
        }
        (self.end_station - self.start_station) / self.radius
    }

    fn point_at_station(&self, station: f64) -> (f64, f64, f64) {
        let dist = station - self.start_station;
        let angle_traveled = dist / self.radius;

        // Radial azimuth from center to the start point.
        let start_radial = (self.start.x - self.center.x).atan2(self.start.y - self.center.y);

        let (radial, bearing) = if self.is_clockwise {
            let r = start_radial + angle_traveled;
            (r, normalize_angle(r + std::f64::consts::FRAC_PI_2))
        } else {
            let r = start_radial - angle_traveled;
            (r, normalize_angle(r - std::f64::consts::FRAC_PI_2))
        };

        let e = self.center.x + self.radius * radial.sin();
        let n = self.center.y + self.radius * radial.cos();
        (e, n, bearing)
    }
}

/// Euler spiral (clothoid) segment: curvature varies linearly with arclength.
/// An infinite radius at either end denotes a tangent connection.
#[derive(Debug, Clone)]
pub struct SpiralSegment {
    pub start_station: f64,
    pub end_station: f64,
    pub start: Point,
    pub end: Point,
    pub start_radius: f64,
    pub end_radius: f64,
    pub start_bearing: f64,
    pub is_clockwise: bool,
}

impl SpiralSegment {
    fn curvatures(&self) -> (f64, f64) {
        let k0 = if self.start_radius.is_infinite() {
            0.0
        } else {
            1.0 / self.start_radius
        };
        let k1 = if self.end_radius.is_infinite() {
            0.0
        } else {
            1.0 / self.end_radius
        };
        (k0, k1)
    }

    fn point_at_station(&self, station: f64) -> (f64, f64, f64) {
        let dist = station - self.start_station;
        let length = self.end_station - self.start_station;
        let t = if length > 0.0 { dist / length } else { 0.0 };
        let (k_start, k_end) = self.curvatures();
        let k = k_start + t * (k_end - k_start);

        // Average-curvature approximation for the returned bearing.
        let avg_k = (k_start + k) / 2.0;
        let mut delta_bearing = avg_k * dist;
        if !self.is_clockwise {
            delta_bearing = -delta_bearing;
        }
        let bearing = normalize_angle(self.start_bearing + delta_bearing);

        // Trapezoidal integration in sub-steps of at most 0.5 m.
        let n_steps = ((dist / 0.5) as usize).max(10);
        let step = dist / n_steps as f64;
        let sign = if self.is_clockwise { 1.0 } else { -1.0 };
        let mut e = self.start.x;
        let mut n = self.start.y;
        let mut b = self.start_bearing;
        for i in 0..n_steps {
            let s = (i as f64 + 0.5) * step;
            let frac = if length > 0.0 { s / length } else { 0.0 };
            let ki = k_start + frac * (k_end - k_start);
            let db = ki * step * sign;
            let b_mid = b + db / 2.0;
            e += step * b_mid.sin();
            n += step * b_mid.cos();
            b += db;
        }

        (e, n, bearing)
    }
}

/// A horizontal alignment segment.
#[derive(Debug, Clone)]
pub enum AlignmentSegment {
    Line(LineSegment),
    Arc(ArcSegment),
    Spiral(SpiralSegment),
}

impl AlignmentSegment {
    pub fn start_station(&self) -> f64 {
        match self {
            AlignmentSegment::Line(s) => s.start_station,
            AlignmentSegment::Arc(s) => s.start_station,
            AlignmentSegment::Spiral(s) => s.start_station,
        }
    }

    pub fn end_station(&self) -> f64 {
        match self {
            AlignmentSegment::Line(s) => s.end_station,
            AlignmentSegment::Arc(s) => s.end_station,
            AlignmentSegment::Spiral(s) => s.end_station,
        }
    }

    pub fn length(&self) -> f64 {
        self.end_station() - self.start_station()
    }

    /// Returns `(easting, northing, bearing)` at a station on this segment.
    pub fn point_at_station(&self, station: f64) -> (f64, f64, f64) {
        match self {
            AlignmentSegment::Line(s) => s.point_at_station(station),
            AlignmentSegment::Arc(s) => s.point_at_station(station),
            AlignmentSegment::Spiral(s) => s.point_at_station(station),
        }
    }

    /// Bearing at the end of the segment.
    pub fn end_bearing(&self) -> f64 {
        let (_, _, bearing) = self.point_at_station(self.end_station());
        bearing
    }
}

/// Complete horizontal alignment made of sequential segments.
///
/// Segment stations are contiguous and endpoints match (C0 continuity);
/// bearing continuity is expected from the source data but not enforced.
#[derive(Debug, Clone, Default)]
pub struct HorizontalAlignment {
    pub name: String,
    pub segments: Vec<AlignmentSegment>,
}

impl HorizontalAlignment {
    pub fn new(name: &str, segments: Vec<AlignmentSegment>) -> Self {
        Self {
            name: name.to_string(),
            segments,
        }
    }

    pub fn start_station(&self) -> f64 {
        self.segments.first().map_or(0.0, |s| s.start_station())
    }

    pub fn end_station(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.end_station())
    }

    pub fn total_length(&self) -> f64 {
        self.end_station() - self.start_station()
    }

    /// Returns `(easting, northing, bearing)` at any station, or `None` for
    /// an empty alignment.
    ///
    /// The first segment whose station range (with a 1e-6 slack at the far
    /// end) brackets the station wins; stations beyond either end of the
    /// alignment clamp to the boundary segment's endpoint.
    pub fn point_at_station(&self, station: f64) -> Option<(f64, f64, f64)> {
        for seg in &self.segments {
            if seg.start_station() <= station && station <= seg.end_station() + 1e-6 {
                return Some(seg.point_at_station(station.min(seg.end_station())));
            }
        }
        if station < self.start_station() {
            let first = self.segments.first()?;
            return Some(first.point_at_station(first.start_station()));
        }
        let last = self.segments.last()?;
        Some(last.point_at_station(last.end_station()))
    }
}

/// Point of Vertical Intersection. A PVI with `curve_length > 0` owns a
/// symmetric parabolic curve centered on it.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Pvi {
    pub station: f64,
    pub elevation: f64,
    pub curve_length: f64,
}

impl Pvi {
    pub fn new(station: f64, elevation: f64, curve_length: f64) -> Self {
        Self {
            station,
            elevation,
            curve_length,
        }
    }

    pub fn has_curve(&self) -> bool {
        self.curve_length > 0.0
    }

    /// Beginning of vertical curve station.
    pub fn bvc_station(&self) -> f64 {
        self.station - self.curve_length / 2.0
    }

    /// End of vertical curve station.
    pub fn evc_station(&self) -> f64 {
        self.station + self.curve_length / 2.0
    }
}

/// Vertical profile defined by a series of PVIs ordered by station.
/// Adjacent curves must not overlap (EVC of one at or before BVC of the next).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct VerticalProfile {
    pub name: String,
    pub pvis: Vec<Pvi>,
}

impl VerticalProfile {
    pub fn new(name: &str, pvis: Vec<Pvi>) -> Self {
        Self {
            name: name.to_string(),
            pvis,
        }
    }

    pub fn start_station(&self) -> f64 {
        self.pvis.first().map_or(0.0, |p| p.station)
    }

    pub fn end_station(&self) -> f64 {
        self.pvis.last().map_or(0.0, |p| p.station)
    }

    fn grade_between(a: &Pvi, b: &Pvi) -> f64 {
        let ds = b.station - a.station;
        if ds.abs() < 1e-10 {
            return 0.0;
        }
        (b.elevation - a.elevation) / ds
    }

    /// Profile elevation at a station, mixing tangent grades and symmetric
    /// parabolic curves. Outside the PVI range the nearest grade extends.
    pub fn elevation_at_station(&self, station: f64) -> f64 {
        if self.pvis.is_empty() {
            return 0.0;
        }
        if self.pvis.len() == 1 {
            return self.pvis[0].elevation;
        }

        // Vertical curves win over tangent interpolation; the first curve
        // covering the station is used.
        for (i, pvi) in self.pvis.iter().enumerate() {
            if pvi.has_curve() && pvi.bvc_station() <= station && station <= pvi.evc_station() {
                let grade_in = if i > 0 {
                    Self::grade_between(&self.pvis[i - 1], pvi)
                } else {
                    0.0
                };
                let grade_out = if i < self.pvis.len() - 1 {
                    Self::grade_between(pvi, &self.pvis[i + 1])
                } else {
                    0.0
                };
                return parabolic_curve_elevation(
                    station,
                    pvi.station,
                    pvi.elevation,
                    grade_in,
                    grade_out,
                    pvi.curve_length,
                );
            }
        }

        // Tangent section between two PVIs, trimmed to the curve limits.
        for pair in self.pvis.windows(2) {
            let a = &pair[0];
            let b = &pair[1];
            let sta1 = if a.has_curve() { a.evc_station() } else { a.station };
            let sta2 = if b.has_curve() { b.bvc_station() } else { b.station };
            if sta1 <= station && station <= sta2 {
                let grade = Self::grade_between(a, b);
                return a.elevation + grade * (station - a.station);
            }
        }

        // Extrapolate with the nearest adjacent grade.
        if station <= self.pvis[0].station {
            let grade = Self::grade_between(&self.pvis[0], &self.pvis[1]);
            return self.pvis[0].elevation + grade * (station - self.pvis[0].station);
        }
        let n = self.pvis.len();
        let grade = Self::grade_between(&self.pvis[n - 2], &self.pvis[n - 1]);
        self.pvis[n - 1].elevation + grade * (station - self.pvis[n - 1].station)
    }
}
