//! Station resolution: map `(station, offset)` to 3D coordinates and bearing,
//! and sample ground elevation along the alignment.

use crate::alignment::{HorizontalAlignment, VerticalProfile};
use crate::dtm::Tin;
use crate::geometry::{offset_point, Point};

/// Resolved 3D point at a station along the alignment.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct StationPoint {
    pub station: f64,
    pub easting: f64,
    pub northing: f64,
    pub elevation: f64,
    /// Alignment bearing, radians clockwise from north.
    pub bearing: f64,
}

/// Resolves stations on a horizontal alignment plus optional vertical profile.
#[derive(Debug, Clone)]
pub struct StationSolver<'a> {
    pub alignment: &'a HorizontalAlignment,
    pub profile: Option<&'a VerticalProfile>,
}

impl<'a> StationSolver<'a> {
    pub fn new(alignment: &'a HorizontalAlignment, profile: Option<&'a VerticalProfile>) -> Self {
        Self { alignment, profile }
    }

    /// Computes coordinates at a station with a perpendicular offset
    /// (positive = right of travel). Returns `None` for an empty alignment;
    /// out-of-range stations clamp to the alignment ends.
    pub fn solve(&self, station: f64, offset: f64) -> Option<StationPoint> {
        let (mut easting, mut northing, bearing) = self.alignment.point_at_station(station)?;

        if offset.abs() > 1e-6 {
            let p = offset_point(Point::new(easting, northing), bearing, offset);
            easting = p.x;
            northing = p.y;
        }

        let elevation = match self.profile {
            Some(profile) if !profile.pvis.is_empty() => profile.elevation_at_station(station),
            _ => 0.0,
        };

        Some(StationPoint {
            station,
            easting,
            northing,
            elevation,
            bearing,
        })
    }

    /// Solves stations at regular intervals, clamping the final sample to
    /// `end_station`.
    pub fn solve_range(
        &self,
        start_station: f64,
        end_station: f64,
        interval: f64,
        offset: f64,
    ) -> Vec<StationPoint> {
        let mut points = Vec::new();
        let mut sta = start_station;
        while sta <= end_station + 1e-6 {
            if let Some(p) = self.solve(sta.min(end_station), offset) {
                points.push(p);
            }
            sta += interval;
        }
        points
    }
}

/// Samples ground elevation from a TIN surface, falling back to the vertical
/// profile elevation when the point is outside the TIN coverage.
#[derive(Debug, Clone, Default)]
pub struct TerrainSampler<'a> {
    pub surface: Option<&'a Tin>,
}

impl<'a> TerrainSampler<'a> {
    pub fn new(surface: Option<&'a Tin>) -> Self {
        Self { surface }
    }

    /// Raw terrain query at a coordinate.
    pub fn sample(&self, easting: f64, northing: f64) -> Option<f64> {
        self.surface?.elevation_at(easting, northing)
    }

    /// Ground elevation at a station, from the TIN when covered, otherwise
    /// the profile elevation. `None` only for an empty alignment.
    pub fn sample_at_station(
        &self,
        solver: &StationSolver,
        station: f64,
        offset: f64,
    ) -> Option<f64> {
        let point = solver.solve(station, offset)?;
        if let Some(surface) = self.surface {
            if let Some(elev) = surface.elevation_at(point.easting, point.northing) {
                return Some(elev);
            }
        }
        Some(point.elevation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::{AlignmentSegment, LineSegment, Pvi};
    use crate::geometry::Point3;

    fn tangent_east(len: f64) -> HorizontalAlignment {
        let seg = LineSegment::from_endpoints(0.0, Point::new(0.0, 0.0), Point::new(len, 0.0));
        HorizontalAlignment::new("CL", vec![AlignmentSegment::Line(seg)])
    }

    #[test]
    fn solve_returns_station_and_position() {
        let align = tangent_east(100.0);
        let solver = StationSolver::new(&align, None);
        let p = solver.solve(40.0, 0.0).unwrap();
        assert!((p.station - 40.0).abs() < 1e-9);
        assert!((p.easting - 40.0).abs() < 1e-9);
        assert!((p.northing - 0.0).abs() < 1e-9);
        assert!((p.elevation - 0.0).abs() < 1e-12);
    }

    #[test]
    fn offset_distance_is_preserved() {
        let align = tangent_east(100.0);
        let solver = StationSolver::new(&align, None);
        let on = solver.solve(50.0, 0.0).unwrap();
        let off = solver.solve(50.0, 7.5).unwrap();
        let d = ((off.easting - on.easting).powi(2) + (off.northing - on.northing).powi(2)).sqrt();
        assert!((d - 7.5).abs() < 1e-6);
        // Heading east, right of travel is south.
        assert!(off.northing < on.northing);
    }

    #[test]
    fn solve_uses_profile_elevation() {
        let align = tangent_east(100.0);
        let profile = VerticalProfile::new(
            "P",
            vec![Pvi::new(0.0, 100.0, 0.0), Pvi::new(100.0, 110.0, 0.0)],
        );
        let solver = StationSolver::new(&align, Some(&profile));
        let p = solver.solve(50.0, 0.0).unwrap();
        assert!((p.elevation - 105.0).abs() < 1e-9);
    }

    #[test]
    fn solve_range_clamps_last_sample() {
        let align = tangent_east(100.0);
        let solver = StationSolver::new(&align, None);
        let pts = solver.solve_range(0.0, 100.0, 30.0, 0.0);
        assert_eq!(pts.len(), 4);
        let pts = solver.solve_range(0.0, 100.0, 10.0, 0.0);
        assert_eq!(pts.len(), 11);
        assert!((pts.last().unwrap().station - 100.0).abs() < 1e-9);
    }

    #[test]
    fn sampler_prefers_tin_and_falls_back() {
        let align = tangent_east(100.0);
        let profile = VerticalProfile::new(
            "P",
            vec![Pvi::new(0.0, 50.0, 0.0), Pvi::new(100.0, 50.0, 0.0)],
        );
        let solver = StationSolver::new(&align, Some(&profile));
        // TIN covering only stations 0..20.
        let tin = Tin::new(
            "EG",
            vec![
                Point3::new(0.0, -5.0, 99.0),
                Point3::new(20.0, -5.0, 99.0),
                Point3::new(20.0, 5.0, 99.0),
                Point3::new(0.0, 5.0, 99.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        );
        let sampler = TerrainSampler::new(Some(&tin));
        let covered = sampler.sample_at_station(&solver, 10.0, 0.0).unwrap();
        assert!((covered - 99.0).abs() < 1e-9);
        let fallback = sampler.sample_at_station(&solver, 60.0, 0.0).unwrap();
        assert!((fallback - 50.0).abs() < 1e-9);
    }

    #[test]
    fn sampler_without_surface_uses_profile() {
        let align = tangent_east(100.0);
        let solver = StationSolver::new(&align, None);
        let sampler = TerrainSampler::new(None);
        assert!(sampler.sample(1.0, 1.0).is_none());
        let elev = sampler.sample_at_station(&solver, 10.0, 0.0).unwrap();
        assert!((elev - 0.0).abs() < 1e-12);
    }
}
