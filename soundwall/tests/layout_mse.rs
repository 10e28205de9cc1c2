use soundwall::alignment::{
    AlignmentSegment, HorizontalAlignment, LineSegment, Pvi, VerticalProfile,
};
use soundwall::config::{WallConfig, WallType};
use soundwall::geometry::Point;
use soundwall::layout::compute_layout;

fn tangent_north(len: f64) -> HorizontalAlignment {
    let seg = LineSegment::from_endpoints(
        0.0,
        Point::new(2000.0, 1000.0),
        Point::new(2000.0, 1000.0 + len),
    );
    HorizontalAlignment::new("CL", vec![AlignmentSegment::Line(seg)])
}

fn flat_profile(len: f64, elev: f64) -> VerticalProfile {
    VerticalProfile::new("P", vec![Pvi::new(0.0, elev, 0.0), Pvi::new(len, elev, 0.0)])
}

fn mse_config() -> WallConfig {
    WallConfig {
        wall_type: WallType::MseComposite,
        ..WallConfig::default()
    }
}

#[test]
fn mse_segments_break_at_expansion_spacing() {
    let align = tangent_north(100.0);
    let profile = flat_profile(100.0, 100.0);
    let layout = compute_layout(&align, Some(&profile), None, &mse_config());

    // 100 m at 24.384 m segment spacing divides into five equal segments.
    assert_eq!(layout.mse_segments.len(), 5);
    for (i, seg) in layout.mse_segments.iter().enumerate() {
        assert_eq!(seg.index, i);
        assert!((seg.length() - 20.0).abs() < 1e-9);
        assert!((seg.station_start - i as f64 * 20.0).abs() < 1e-9);
        assert!((seg.base_elevation - 100.0).abs() < 1e-9);
        // MSE body plus the noise barrier above it.
        assert!((seg.top_elevation - (100.0 + 3.048 + 4.572)).abs() < 1e-9);
        assert!((seg.wall_height - 3.048).abs() < 1e-12);
        assert_eq!(seg.num_facing_rows(), 2);
    }

    // Segments are contiguous along the run.
    for pair in layout.mse_segments.windows(2) {
        assert!((pair[0].station_end - pair[1].station_start).abs() < 1e-9);
    }
}

#[test]
fn mse_composite_also_lays_out_the_barrier() {
    let align = tangent_north(100.0);
    let profile = flat_profile(100.0, 100.0);
    let layout = compute_layout(&align, Some(&profile), None, &mse_config());

    // The noise barrier above the MSE body matches the plain precast run.
    let precast = compute_layout(&align, Some(&profile), None, &WallConfig::default());
    assert_eq!(layout.posts.len(), precast.posts.len());
    assert_eq!(layout.num_bays(), precast.num_bays());
    assert_eq!(layout.panels.len(), precast.panels.len());
    assert_eq!(layout.caps.len(), precast.caps.len());

    // Barrier post grounds come from the terrain sample, not the MSE crest.
    for (a, b) in layout.posts.iter().zip(&precast.posts) {
        assert!((a.ground_elevation - b.ground_elevation).abs() < 1e-12);
        assert!((a.top_elevation - b.top_elevation).abs() < 1e-12);
    }
}

#[test]
fn short_mse_run_is_single_segment() {
    let align = tangent_north(10.0);
    let layout = compute_layout(&align, None, None, &mse_config());
    assert_eq!(layout.mse_segments.len(), 1);
    assert!((layout.mse_segments[0].length() - 10.0).abs() < 1e-9);
}

#[test]
fn precast_layout_has_no_mse_segments() {
    let align = tangent_north(50.0);
    let layout = compute_layout(&align, None, None, &WallConfig::default());
    assert!(layout.mse_segments.is_empty());
}
