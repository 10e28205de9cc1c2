use std::f64::consts::{FRAC_PI_2, PI};

use soundwall::alignment::{
    AlignmentSegment, ArcSegment, HorizontalAlignment, LineSegment, SpiralSegment,
};
use soundwall::geometry::{azimuth, distance, normalize_angle, point_along_bearing, Point};
use soundwall::stationing::StationSolver;

/// Tangent north, then a clockwise quarter arc to the east.
fn mixed_alignment() -> HorizontalAlignment {
    let line = LineSegment::from_endpoints(0.0, Point::new(0.0, 0.0), Point::new(0.0, 100.0));
    let arc = ArcSegment {
        start_station: 100.0,
        end_station: 100.0 + 50.0 * PI,
        start: Point::new(0.0, 100.0),
        end: Point::new(100.0, 200.0),
        radius: 100.0,
        center: Point::new(100.0, 100.0),
        is_clockwise: true,
        start_bearing: 0.0,
        end_bearing: FRAC_PI_2,
    };
    HorizontalAlignment::new(
        "CL",
        vec![AlignmentSegment::Line(line), AlignmentSegment::Arc(arc)],
    )
}

#[test]
fn solved_station_matches_request() {
    let align = mixed_alignment();
    let solver = StationSolver::new(&align, None);
    for s in [0.0, 12.5, 99.9, 100.0, 150.0, 100.0 + 50.0 * PI] {
        let p = solver.solve(s, 0.0).unwrap();
        assert!((p.station - s).abs() < 1e-9);
    }
}

#[test]
fn offset_preserves_distance_on_curves() {
    let align = mixed_alignment();
    let solver = StationSolver::new(&align, None);
    for s in [10.0, 100.0, 140.0, 220.0] {
        for d in [-3.0, -0.5, 0.5, 6.0] {
            let on = solver.solve(s, 0.0).unwrap();
            let off = solver.solve(s, d).unwrap();
            let dist = distance(
                Point::new(on.easting, on.northing),
                Point::new(off.easting, off.northing),
            );
            assert!((dist - d.abs()).abs() < 1e-6, "s={s} d={d} dist={dist}");
        }
    }
}

#[test]
fn offset_on_curve_is_radial() {
    let align = mixed_alignment();
    let solver = StationSolver::new(&align, None);
    // On a clockwise arc the right offset points away from the center.
    let s = 100.0 + 25.0 * PI; // half the sweep
    let on = solver.solve(s, 0.0).unwrap();
    let off = solver.solve(s, 2.0).unwrap();
    let r_on = distance(Point::new(on.easting, on.northing), Point::new(100.0, 100.0));
    let r_off = distance(Point::new(off.easting, off.northing), Point::new(100.0, 100.0));
    assert!((r_on - 100.0).abs() < 1e-6);
    assert!((r_off - 102.0).abs() < 1e-6);
}

#[test]
fn azimuth_round_trips_through_point_along_bearing() {
    for theta in [0.0, 0.3, FRAC_PI_2, 2.0, PI, 4.5, 6.2] {
        let a = Point::new(-35.0, 18.0);
        let b = point_along_bearing(a, theta, 120.0);
        assert!((azimuth(a, b) - normalize_angle(theta)).abs() < 1e-9);
    }
}

#[test]
fn bearing_is_continuous_across_line_arc_junction() {
    let align = mixed_alignment();
    let solver = StationSolver::new(&align, None);
    let before = solver.solve(99.999, 0.0).unwrap();
    let after = solver.solve(100.001, 0.0).unwrap();
    assert!((before.bearing - 0.0).abs() < 1e-9);
    assert!(normalize_angle(after.bearing) < 1e-3);
}

#[test]
fn spiral_blends_line_into_arc() {
    // Tangent, entry spiral, then the arc the spiral reaches: bearings grow
    // monotonically along the transition.
    let line = LineSegment::from_endpoints(0.0, Point::new(0.0, 0.0), Point::new(0.0, 50.0));
    let spiral = SpiralSegment {
        start_station: 50.0,
        end_station: 110.0,
        start: Point::new(0.0, 50.0),
        end: Point::new(0.0, 0.0), // evaluation integrates from the start
        start_radius: f64::INFINITY,
        end_radius: 150.0,
        start_bearing: 0.0,
        is_clockwise: true,
    };
    let align = HorizontalAlignment::new(
        "CL",
        vec![AlignmentSegment::Line(line), AlignmentSegment::Spiral(spiral)],
    );
    let solver = StationSolver::new(&align, None);

    let mut last_bearing = 0.0;
    for s in [50.0, 65.0, 80.0, 95.0, 110.0] {
        let p = solver.solve(s, 0.0).unwrap();
        assert!(p.bearing >= last_bearing - 1e-12);
        last_bearing = p.bearing;
    }
    // Full deflection of an entry clothoid is L / (2 R).
    let end = solver.solve(110.0, 0.0).unwrap();
    assert!((end.bearing - 60.0 / (2.0 * 150.0)).abs() < 1e-6);
}
