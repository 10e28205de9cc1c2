//! LandXML ingestion: horizontal alignment, vertical profile and TIN surface.
//!
//! Handles LandXML 1.1/1.2 files with or without a default namespace by
//! matching local element names. Coordinate lists in LandXML are ordered
//! `northing easting [elevation]`; everything returned here is canonical
//! `(easting, northing)` meters. Malformed child elements are skipped with a
//! warning; the layout engine downstream assumes validated data.

use std::fmt::Write as _;
use std::io;

use roxmltree::{Document, Node};

use crate::alignment::{
    AlignmentSegment, ArcSegment, HorizontalAlignment, LineSegment, Pvi, SpiralSegment,
    VerticalProfile,
};
use crate::dtm::Tin;
use crate::geometry::{azimuth, distance, normalize_angle, Point, Point3};

use super::{read_to_string, write_string};

fn invalid_data<E>(err: E) -> io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    io::Error::new(io::ErrorKind::InvalidData, err)
}

fn is_element(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Picks the element with a matching `name` attribute, or the first one.
fn select_named<'a, 'input>(
    nodes: &[Node<'a, 'input>],
    name: Option<&str>,
) -> Option<Node<'a, 'input>> {
    if let Some(wanted) = name {
        if let Some(node) = nodes.iter().find(|n| n.attribute("name") == Some(wanted)) {
            return Some(*node);
        }
    }
    nodes.first().copied()
}

fn attr_f64(node: &Node, name: &str) -> Option<f64> {
    node.attribute(name)?.parse().ok()
}

/// Parses `northing easting [elevation]` text into an `(easting, northing)`
/// point.
fn parse_coords(text: &str) -> Option<Point> {
    let mut parts = text.split_whitespace();
    let northing: f64 = parts.next()?.parse().ok()?;
    let easting: f64 = parts.next()?.parse().ok()?;
    Some(Point::new(easting, northing))
}

fn child_point(node: &Node, name: &str) -> Option<Point> {
    let child = node.children().find(|c| is_element(c, name))?;
    parse_coords(child.text()?)
}

/// A spiral radius attribute of `0` or `INF` denotes a tangent end.
fn parse_spiral_radius(node: &Node, name: &str) -> f64 {
    match node.attribute(name) {
        Some(text) if text.eq_ignore_ascii_case("inf") => f64::INFINITY,
        Some(text) => {
            let r: f64 = text.parse().unwrap_or(0.0);
            if r == 0.0 {
                f64::INFINITY
            } else {
                r
            }
        }
        None => f64::INFINITY,
    }
}

fn alignment_elements<'a, 'input>(doc: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
    doc.descendants()
        .filter(|n| is_element(n, "Alignments"))
        .flat_map(|n| n.children())
        .filter(|n| is_element(n, "Alignment"))
        .collect()
}

/// Reads a horizontal alignment from `CoordGeom` `Line`, `Curve` and
/// `Spiral` elements, accumulating stations from the `staStart` attribute.
pub fn read_landxml_alignment(path: &str, name: Option<&str>) -> io::Result<HorizontalAlignment> {
    let xml = read_to_string(path)?;
    let doc = Document::parse(&xml).map_err(invalid_data)?;

    let alignments = alignment_elements(&doc);
    let align_elem = select_named(&alignments, name)
        .ok_or_else(|| invalid_data("no Alignment element found in LandXML"))?;

    let align_name = align_elem.attribute("name").unwrap_or("Alignment");
    let sta_start = attr_f64(&align_elem, "staStart").unwrap_or(0.0);

    let coord_geom = align_elem
        .children()
        .find(|c| is_element(c, "CoordGeom"))
        .ok_or_else(|| invalid_data("no CoordGeom found in Alignment"))?;

    let mut segments: Vec<AlignmentSegment> = Vec::new();
    let mut current_station = sta_start;

    for elem in coord_geom.children().filter(|c| c.is_element()) {
        match elem.tag_name().name() {
            "Line" => {
                let (Some(start), Some(end)) =
                    (child_point(&elem, "Start"), child_point(&elem, "End"))
                else {
                    log::warn!("skipping Line without Start/End coordinates");
                    continue;
                };
                let length = attr_f64(&elem, "length").unwrap_or_else(|| distance(start, end));
                segments.push(AlignmentSegment::Line(LineSegment {
                    start_station: current_station,
                    end_station: current_station + length,
                    start,
                    end,
                    bearing: azimuth(start, end),
                }));
                current_station += length;
            }
            "Curve" => {
                let (Some(start), Some(end), Some(center)) = (
                    child_point(&elem, "Start"),
                    child_point(&elem, "End"),
                    child_point(&elem, "Center"),
                ) else {
                    log::warn!("skipping Curve without Start/End/Center coordinates");
                    continue;
                };
                let radius = attr_f64(&elem, "radius").unwrap_or(0.0);
                let length = attr_f64(&elem, "length").unwrap_or(0.0);
                let is_clockwise = elem
                    .attribute("rot")
                    .map_or(true, |r| r.eq_ignore_ascii_case("cw"));

                let start_radial = (start.x - center.x).atan2(start.y - center.y);
                let end_radial = (end.x - center.x).atan2(end.y - center.y);
                let half_pi = std::f64::consts::FRAC_PI_2;
                let (start_bearing, end_bearing) = if is_clockwise {
                    (start_radial + half_pi, end_radial + half_pi)
                } else {
                    (start_radial - half_pi, end_radial - half_pi)
                };

                segments.push(AlignmentSegment::Arc(ArcSegment {
                    start_station: current_station,
                    end_station: current_station + length,
                    start,
                    end,
                    radius,
                    center,
                    is_clockwise,
                    start_bearing: normalize_angle(start_bearing),
                    end_bearing: normalize_angle(end_bearing),
                }));
                current_station += length;
            }
            "Spiral" => {
                let (Some(start), Some(end)) =
                    (child_point(&elem, "Start"), child_point(&elem, "End"))
                else {
                    log::warn!("skipping Spiral without Start/End coordinates");
                    continue;
                };
                let length = attr_f64(&elem, "length").unwrap_or(0.0);
                let start_radius = parse_spiral_radius(&elem, "radiusStart");
                let end_radius = parse_spiral_radius(&elem, "radiusEnd");
                let is_clockwise = elem
                    .attribute("rot")
                    .map_or(true, |r| r.eq_ignore_ascii_case("cw"));

                // The spiral tangent continues the previous segment when one
                // exists; a leading spiral falls back to the chord azimuth.
                let start_bearing = segments
                    .last()
                    .map(|prev| prev.end_bearing())
                    .unwrap_or_else(|| azimuth(start, end));

                segments.push(AlignmentSegment::Spiral(SpiralSegment {
                    start_station: current_station,
                    end_station: current_station + length,
                    start,
                    end,
                    start_radius,
                    end_radius,
                    start_bearing,
                    is_clockwise,
                }));
                current_station += length;
            }
            _ => {}
        }
    }

    log::debug!(
        "parsed alignment {:?}: {} segments, stations [{:.3}, {:.3}]",
        align_name,
        segments.len(),
        sta_start,
        current_station
    );
    Ok(HorizontalAlignment::new(align_name, segments))
}

/// Reads the vertical profile (`Profile/ProfAlign`) attached to an
/// alignment. Returns an empty profile when the file carries none.
pub fn read_landxml_profile(path: &str, name: Option<&str>) -> io::Result<VerticalProfile> {
    let xml = read_to_string(path)?;
    let doc = Document::parse(&xml).map_err(invalid_data)?;

    let alignments = alignment_elements(&doc);
    let Some(align_elem) = select_named(&alignments, name) else {
        return Ok(VerticalProfile::default());
    };

    let Some(prof_align) = align_elem
        .children()
        .find(|c| is_element(c, "Profile"))
        .and_then(|p| p.children().find(|c| is_element(c, "ProfAlign")))
    else {
        return Ok(VerticalProfile::default());
    };

    let prof_name = prof_align.attribute("name").unwrap_or("Profile");
    let mut pvis = Vec::new();

    for elem in prof_align.children().filter(|c| c.is_element()) {
        let tag = elem.tag_name().name();
        if tag != "PVI" && tag != "ParaCurve" && tag != "CircCurve" {
            continue;
        }
        let Some((station, elevation)) = elem.text().and_then(|t| {
            let mut parts = t.split_whitespace();
            let s: f64 = parts.next()?.parse().ok()?;
            let e: f64 = parts.next()?.parse().ok()?;
            Some((s, e))
        }) else {
            log::warn!("skipping {} without station/elevation text", tag);
            continue;
        };
        let curve_length = if tag == "PVI" {
            0.0
        } else {
            attr_f64(&elem, "length").unwrap_or(0.0)
        };
        pvis.push(Pvi::new(station, elevation, curve_length));
    }

    Ok(VerticalProfile::new(prof_name, pvis))
}

/// Reads a TIN surface from `Surfaces/Surface/Definition`. Point ids are
/// remapped to a dense zero-based vertex array. Returns an empty surface
/// when the file carries none.
pub fn read_landxml_surface(path: &str, name: Option<&str>) -> io::Result<Tin> {
    let xml = read_to_string(path)?;
    let doc = Document::parse(&xml).map_err(invalid_data)?;

    let surfaces: Vec<Node> = doc
        .descendants()
        .filter(|n| is_element(n, "Surfaces"))
        .flat_map(|n| n.children())
        .filter(|n| is_element(n, "Surface"))
        .collect();
    let Some(surf_elem) = select_named(&surfaces, name) else {
        return Ok(Tin::default());
    };

    let surf_name = surf_elem.attribute("name").unwrap_or("Surface");
    let Some(defn) = surf_elem
        .children()
        .find(|c| is_element(c, "Definition"))
    else {
        return Ok(Tin::default());
    };

    let mut points: Vec<(u64, Point3)> = Vec::new();
    if let Some(pnts) = defn.children().find(|c| is_element(c, "Pnts")) {
        for p in pnts.children().filter(|c| is_element(c, "P")) {
            let id = p.attribute("id").and_then(|v| v.parse::<u64>().ok());
            let coords = p.text().and_then(|t| {
                let nums: Vec<f64> = t
                    .split_whitespace()
                    .filter_map(|s| s.parse().ok())
                    .collect();
                if nums.len() >= 3 {
                    // northing easting elevation
                    Some(Point3::new(nums[1], nums[0], nums[2]))
                } else {
                    None
                }
            });
            match (id, coords) {
                (Some(id), Some(pt)) => points.push((id, pt)),
                _ => log::warn!("skipping surface point without id or coordinates"),
            }
        }
    }

    points.sort_by_key(|(id, _)| *id);
    let id_index: std::collections::HashMap<u64, usize> = points
        .iter()
        .enumerate()
        .map(|(idx, (id, _))| (*id, idx))
        .collect();
    let vertices: Vec<Point3> = points.into_iter().map(|(_, p)| p).collect();

    let mut triangles = Vec::new();
    if let Some(faces) = defn.children().find(|c| is_element(c, "Faces")) {
        for f in faces.children().filter(|c| is_element(c, "F")) {
            let ids: Vec<u64> = f
                .text()
                .unwrap_or("")
                .split_whitespace()
                .filter_map(|s| s.parse().ok())
                .collect();
            if ids.len() < 3 {
                log::warn!("skipping surface face with fewer than three vertices");
                continue;
            }
            match (
                id_index.get(&ids[0]),
                id_index.get(&ids[1]),
                id_index.get(&ids[2]),
            ) {
                (Some(&a), Some(&b), Some(&c)) => triangles.push([a, b, c]),
                _ => log::warn!("skipping surface face with unknown point id"),
            }
        }
    }

    Ok(Tin::new(surf_name, vertices, triangles))
}

/// Writes a [`Tin`] to a LandXML surface file.
pub fn write_landxml_surface(path: &str, tin: &Tin) -> io::Result<()> {
    let mut xml = String::new();
    let name = if tin.name.is_empty() {
        "TIN"
    } else {
        tin.name.as_str()
    };
    let _ = writeln!(&mut xml, "<?xml version=\"1.0\"?>");
    let _ = writeln!(&mut xml, "<LandXML>");
    let _ = writeln!(&mut xml, "  <Surfaces>");
    let _ = writeln!(&mut xml, "    <Surface name=\"{}\">", name);
    let _ = writeln!(&mut xml, "      <Definition surfType=\"TIN\">");
    let _ = writeln!(&mut xml, "        <Pnts>");
    for (i, v) in tin.vertices.iter().enumerate() {
        let _ = writeln!(
            &mut xml,
            "          <P id=\"{}\">{} {} {}</P>",
            i + 1,
            v.y,
            v.x,
            v.z
        );
    }
    let _ = writeln!(&mut xml, "        </Pnts>");
    let _ = writeln!(&mut xml, "        <Faces>");
    for t in &tin.triangles {
        let _ = writeln!(
            &mut xml,
            "          <F>{} {} {}</F>",
            t[0] + 1,
            t[1] + 1,
            t[2] + 1
        );
    }
    let _ = writeln!(&mut xml, "        </Faces>");
    let _ = writeln!(&mut xml, "      </Definition>");
    let _ = writeln!(&mut xml, "    </Surface>");
    let _ = writeln!(&mut xml, "  </Surfaces>");
    let _ = writeln!(&mut xml, "</LandXML>");
    write_string(path, &xml)
}
