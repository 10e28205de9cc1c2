use soundwall::alignment::AlignmentSegment;
use soundwall::io::landxml::{
    read_landxml_alignment, read_landxml_profile, read_landxml_surface, write_landxml_surface,
};

const SAMPLE: &str = r#"<?xml version="1.0"?>
<LandXML xmlns="http://www.landxml.org/schema/LandXML-1.2">
  <Surfaces>
    <Surface name="EG">
      <Definition surfType="TIN">
        <Pnts>
          <P id="1">1000.0 2000.0 100.0</P>
          <P id="2">1000.0 2100.0 102.0</P>
          <P id="3">1100.0 2100.0 104.0</P>
          <P id="4">1100.0 2000.0 102.0</P>
        </Pnts>
        <Faces>
          <F>1 2 3</F>
          <F>1 3 4</F>
        </Faces>
      </Definition>
    </Surface>
  </Surfaces>
  <Alignments>
    <Alignment name="CL" staStart="0.0" length="200.0">
      <CoordGeom>
        <Line length="100.0">
          <Start>1000.0 2000.0</Start>
          <End>1100.0 2000.0</End>
        </Line>
        <Curve rot="cw" radius="200.0" length="100.0">
          <Start>1100.0 2000.0</Start>
          <Center>1100.0 2200.0</Center>
          <End>1195.885 2024.483</End>
        </Curve>
        <Spiral length="60.0" radiusStart="INF" radiusEnd="150.0" rot="cw">
          <Start>1195.885 2024.483</Start>
          <End>1240.0 2060.0</End>
        </Spiral>
      </CoordGeom>
      <Profile>
        <ProfAlign name="PL">
          <PVI>0.0 100.0</PVI>
          <ParaCurve length="20.0">100.0 105.0</ParaCurve>
          <PVI>200.0 100.0</PVI>
        </ProfAlign>
      </Profile>
    </Alignment>
  </Alignments>
</LandXML>
"#;

fn write_sample() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.xml");
    std::fs::write(&path, SAMPLE).unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

#[test]
fn parses_alignment_segments_in_order() {
    let (_dir, path) = write_sample();
    let align = read_landxml_alignment(&path, None).unwrap();
    assert_eq!(align.name, "CL");
    assert_eq!(align.segments.len(), 3);
    assert!((align.start_station() - 0.0).abs() < 1e-12);
    assert!((align.end_station() - 260.0).abs() < 1e-9);

    // LandXML coordinate order is northing easting; the tangent runs +100
    // northing, so the azimuth is 0.
    match &align.segments[0] {
        AlignmentSegment::Line(line) => {
            assert!((line.start.x - 2000.0).abs() < 1e-9);
            assert!((line.start.y - 1000.0).abs() < 1e-9);
            assert!((line.end.y - 1100.0).abs() < 1e-9);
            assert!((line.bearing - 0.0).abs() < 1e-9);
        }
        other => panic!("expected a line segment, got {other:?}"),
    }

    match &align.segments[1] {
        AlignmentSegment::Arc(arc) => {
            assert!(arc.is_clockwise);
            assert!((arc.radius - 200.0).abs() < 1e-12);
            assert!((arc.start_station - 100.0).abs() < 1e-9);
            assert!((arc.end_station - 200.0).abs() < 1e-9);
            assert!((arc.center.x - 2200.0).abs() < 1e-9);
            assert!((arc.center.y - 1100.0).abs() < 1e-9);
            // Tangent to the previous line at the junction.
            assert!((arc.start_bearing - 0.0).abs() < 1e-9);
        }
        other => panic!("expected an arc segment, got {other:?}"),
    }

    match &align.segments[2] {
        AlignmentSegment::Spiral(spiral) => {
            assert!(spiral.start_radius.is_infinite());
            assert!((spiral.end_radius - 150.0).abs() < 1e-12);
            // Start bearing continues the arc's end bearing.
            let expected = align.segments[1].end_bearing();
            assert!((spiral.start_bearing - expected).abs() < 1e-9);
        }
        other => panic!("expected a spiral segment, got {other:?}"),
    }
}

#[test]
fn parses_profile_pvis_and_curves() {
    let (_dir, path) = write_sample();
    let profile = read_landxml_profile(&path, None).unwrap();
    assert_eq!(profile.name, "PL");
    assert_eq!(profile.pvis.len(), 3);
    assert!(!profile.pvis[0].has_curve());
    assert!(profile.pvis[1].has_curve());
    assert!((profile.pvis[1].station - 100.0).abs() < 1e-12);
    assert!((profile.pvis[1].elevation - 105.0).abs() < 1e-12);
    assert!((profile.pvis[1].curve_length - 20.0).abs() < 1e-12);
    assert!((profile.pvis[1].bvc_station() - 90.0).abs() < 1e-12);
}

#[test]
fn parses_surface_with_id_remapping() {
    let (_dir, path) = write_sample();
    let tin = read_landxml_surface(&path, None).unwrap();
    assert_eq!(tin.name, "EG");
    assert_eq!(tin.num_vertices(), 4);
    assert_eq!(tin.num_triangles(), 2);
    // northing easting swapped to (easting, northing).
    assert!((tin.vertices[0].x - 2000.0).abs() < 1e-9);
    assert!((tin.vertices[0].y - 1000.0).abs() < 1e-9);
    assert!((tin.vertices[0].z - 100.0).abs() < 1e-9);
    // Query inside the mesh.
    let z = tin.elevation_at(2050.0, 1050.0).unwrap();
    assert!(z > 100.0 && z < 104.0);
}

#[test]
fn missing_profile_and_surface_are_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.xml");
    std::fs::write(
        &path,
        r#"<?xml version="1.0"?>
<LandXML>
  <Alignments>
    <Alignment name="A" staStart="10.0">
      <CoordGeom>
        <Line><Start>0.0 0.0</Start><End>50.0 0.0</End></Line>
      </CoordGeom>
    </Alignment>
  </Alignments>
</LandXML>
"#,
    )
    .unwrap();
    let path = path.to_str().unwrap();

    let align = read_landxml_alignment(path, None).unwrap();
    assert_eq!(align.segments.len(), 1);
    assert!((align.start_station() - 10.0).abs() < 1e-12);
    assert!((align.end_station() - 60.0).abs() < 1e-9);

    let profile = read_landxml_profile(path, None).unwrap();
    assert!(profile.pvis.is_empty());
    let tin = read_landxml_surface(path, None).unwrap();
    assert_eq!(tin.num_vertices(), 0);
}

#[test]
fn selects_alignment_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two.xml");
    std::fs::write(
        &path,
        r#"<?xml version="1.0"?>
<LandXML>
  <Alignments>
    <Alignment name="A" staStart="0.0">
      <CoordGeom>
        <Line><Start>0.0 0.0</Start><End>10.0 0.0</End></Line>
      </CoordGeom>
    </Alignment>
    <Alignment name="B" staStart="0.0">
      <CoordGeom>
        <Line><Start>0.0 0.0</Start><End>99.0 0.0</End></Line>
      </CoordGeom>
    </Alignment>
  </Alignments>
</LandXML>
"#,
    )
    .unwrap();
    let path = path.to_str().unwrap();

    let b = read_landxml_alignment(path, Some("B")).unwrap();
    assert_eq!(b.name, "B");
    assert!((b.total_length() - 99.0).abs() < 1e-9);
    // Unknown names fall back to the first alignment.
    let first = read_landxml_alignment(path, Some("missing")).unwrap();
    assert_eq!(first.name, "A");
}

#[test]
fn missing_alignment_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xml");
    std::fs::write(&path, "<?xml version=\"1.0\"?><LandXML></LandXML>").unwrap();
    let err = read_landxml_alignment(path.to_str().unwrap(), None).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn surface_survives_a_write_and_read() {
    let (_dir, path) = write_sample();
    let tin = read_landxml_surface(&path, None).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.xml");
    let out = out.to_str().unwrap();
    write_landxml_surface(out, &tin).unwrap();
    let again = read_landxml_surface(out, None).unwrap();
    assert_eq!(again.num_vertices(), tin.num_vertices());
    assert_eq!(again.num_triangles(), tin.num_triangles());
    let a = tin.elevation_at(2050.0, 1050.0).unwrap();
    let b = again.elevation_at(2050.0, 1050.0).unwrap();
    assert!((a - b).abs() < 1e-9);
}
