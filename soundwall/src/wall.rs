//! Layout data model: posts, panels, footings, caps, joints, drainage slots,
//! bays, MSE segments and the complete wall layout.
//!
//! The `WallLayout` owns all elements in flat arrays. A `Bay` refers to its
//! bordering posts and footings by index into those arrays, never by owning
//! handle, and carries clones of the panels, cap, joints and drainage slots
//! that span it.

use serde::{Deserialize, Serialize};

use crate::config::{self, FoundationType, JointType, WallType};

/// A single steel H-post in the sound wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteelPost {
    pub index: usize,
    /// Station along the alignment in meters.
    pub station: f64,
    pub easting: f64,
    pub northing: f64,
    pub ground_elevation: f64,
    pub top_elevation: f64,
    /// Alignment bearing at the station, radians clockwise from north.
    pub bearing: f64,
    /// Post height above ground.
    pub height: f64,

    pub section: String,
    pub flange_width: f64,
    pub depth: f64,
    pub web_thickness: f64,
    pub flange_thickness: f64,
}

impl SteelPost {
    pub fn new(
        index: usize,
        station: f64,
        easting: f64,
        northing: f64,
        ground_elevation: f64,
        top_elevation: f64,
        bearing: f64,
        height: f64,
    ) -> Self {
        Self {
            index,
            station,
            easting,
            northing,
            ground_elevation,
            top_elevation,
            bearing,
            height,
            section: config::POST_SECTION.to_string(),
            flange_width: config::POST_FLANGE_WIDTH,
            depth: config::POST_DEPTH,
            web_thickness: config::POST_WEB_THICKNESS,
            flange_thickness: config::POST_FLANGE_THICKNESS,
        }
    }

    /// Total length including embedment in the footing.
    pub fn total_length(&self) -> f64 {
        self.height + config::POST_EMBED_FROM_BOTTOM
    }

    /// Bottom of the post, inside the footing.
    pub fn bottom_elevation(&self) -> f64 {
        self.ground_elevation - config::POST_EMBED_FROM_BOTTOM
    }
}

/// A single precast panel. Panels are chord-approximated along a bay; the
/// position is the bay midpoint and `width` is the bay chord.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecastPanel {
    pub bay_index: usize,
    /// Vertical position in the stack, 0 at the bottom.
    pub stack_index: usize,
    pub station_start: f64,
    pub station_end: f64,
    pub easting: f64,
    pub northing: f64,
    pub bottom_elevation: f64,
    pub bearing: f64,
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    pub has_drainage_slot: bool,
}

impl PrecastPanel {
    pub fn top_elevation(&self) -> f64 {
        self.bottom_elevation + self.height
    }

    pub fn center_elevation(&self) -> f64 {
        self.bottom_elevation + self.height / 2.0
    }
}

/// Base footing for a sound wall post. Caissons carry `diameter`/`depth`;
/// spread and continuous footings carry `length`/`width`/`depth`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Footing {
    pub post_index: usize,
    pub foundation_type: FoundationType,
    pub station: f64,
    pub easting: f64,
    pub northing: f64,
    /// Top of footing, at ground level.
    pub top_elevation: f64,
    pub bearing: f64,

    pub width: f64,
    pub length: f64,
    pub depth: f64,
    pub diameter: f64,
}

impl Footing {
    pub fn bottom_elevation(&self) -> f64 {
        self.top_elevation - self.depth
    }
}

/// Creates a caisson (drilled shaft) footing.
pub fn make_caisson(
    post_index: usize,
    station: f64,
    easting: f64,
    northing: f64,
    top_elevation: f64,
    bearing: f64,
    diameter: f64,
    depth: f64,
) -> Footing {
    Footing {
        post_index,
        foundation_type: FoundationType::Caisson,
        station,
        easting,
        northing,
        top_elevation,
        bearing,
        width: 0.0,
        length: 0.0,
        depth,
        diameter,
    }
}

/// Creates a spread (pad) footing.
pub fn make_spread_footing(
    post_index: usize,
    station: f64,
    easting: f64,
    northing: f64,
    top_elevation: f64,
    bearing: f64,
    length: f64,
    width: f64,
    depth: f64,
) -> Footing {
    Footing {
        post_index,
        foundation_type: FoundationType::Spread,
        station,
        easting,
        northing,
        top_elevation,
        bearing,
        width,
        length,
        depth,
        diameter: 0.0,
    }
}

/// Creates a continuous (strip) footing spanning one nominal bay.
pub fn make_continuous_footing(
    post_index: usize,
    station: f64,
    easting: f64,
    northing: f64,
    top_elevation: f64,
    bearing: f64,
    width: f64,
    depth: f64,
) -> Footing {
    Footing {
        post_index,
        foundation_type: FoundationType::Continuous,
        station,
        easting,
        northing,
        top_elevation,
        bearing,
        width,
        length: config::CONTINUOUS_LENGTH,
        depth,
        diameter: 0.0,
    }
}

/// Cap or coping element spanning a bay above the panel stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cap {
    pub bay_index: usize,
    pub station_start: f64,
    pub station_end: f64,
    pub easting: f64,
    pub northing: f64,
    pub bottom_elevation: f64,
    pub bearing: f64,
    /// Along the wall direction (bay chord).
    pub width: f64,
    /// Across the wall: panel thickness plus both overhangs.
    pub depth: f64,
    pub height: f64,
}

impl Cap {
    pub fn top_elevation(&self) -> f64 {
        self.bottom_elevation + self.height
    }
}

/// An expansion or contraction joint at a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Joint {
    pub joint_type: JointType,
    pub station: f64,
    pub easting: f64,
    pub northing: f64,
    pub ground_elevation: f64,
    pub top_elevation: f64,
    pub bearing: f64,
    pub bay_index: usize,
    pub gap_width: f64,
}

impl Joint {
    pub fn height(&self) -> f64 {
        self.top_elevation - self.ground_elevation
    }

    pub fn filler_material(&self) -> &'static str {
        match self.joint_type {
            JointType::Expansion => "Preformed Joint Filler",
            JointType::Contraction => "Sealant",
        }
    }
}

/// A drainage slot cut in a bottom panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrainageSlot {
    pub panel_bay_index: usize,
    pub station: f64,
    pub easting: f64,
    pub northing: f64,
    /// Center of slot.
    pub elevation: f64,
    pub width: f64,
    pub height: f64,
}

/// A single bay (post-to-post span) of the sound wall.
///
/// `post_left`, `post_right`, `footing_left` and `footing_right` index into
/// `WallLayout::posts` and `WallLayout::footings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bay {
    pub index: usize,
    pub post_left: usize,
    pub post_right: usize,
    pub panels: Vec<PrecastPanel>,
    pub cap: Option<Cap>,
    pub footing_left: Option<usize>,
    pub footing_right: Option<usize>,
    pub joints: Vec<Joint>,
    pub drainage_slots: Vec<DrainageSlot>,
}

impl Bay {
    pub fn new(index: usize, post_left: usize, post_right: usize) -> Self {
        Self {
            index,
            post_left,
            post_right,
            panels: Vec::new(),
            cap: None,
            footing_left: None,
            footing_right: None,
            joints: Vec::new(),
            drainage_slots: Vec::new(),
        }
    }
}

/// An MSE (Mechanically Stabilized Earth) wall segment with facing panels,
/// traffic barrier and coping dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MseSegment {
    pub index: usize,
    pub station_start: f64,
    pub station_end: f64,
    pub easting_start: f64,
    pub northing_start: f64,
    pub easting_end: f64,
    pub northing_end: f64,
    pub base_elevation: f64,
    pub top_elevation: f64,
    pub bearing: f64,

    /// Height of the MSE body.
    pub wall_height: f64,
    pub top_width: f64,
    pub base_width: f64,
    pub facing_thickness: f64,
    pub facing_panel_height: f64,
    pub facing_panel_width: f64,
    pub barrier_height: f64,
    pub barrier_base_width: f64,
    pub barrier_top_width: f64,
    pub coping_height: f64,
    pub coping_width: f64,
}

impl MseSegment {
    pub fn length(&self) -> f64 {
        self.station_end - self.station_start
    }

    pub fn total_height(&self) -> f64 {
        self.top_elevation - self.base_elevation
    }

    pub fn num_facing_rows(&self) -> usize {
        ((self.wall_height / self.facing_panel_height).ceil() as usize).max(1)
    }
}

/// Complete computed layout for a sound wall. Flat arrays own every element;
/// bays are views assembled over them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallLayout {
    pub wall_type: WallType,
    pub start_station: f64,
    pub end_station: f64,
    pub wall_height: f64,
    pub foundation_type: FoundationType,

    pub posts: Vec<SteelPost>,
    pub panels: Vec<PrecastPanel>,
    pub footings: Vec<Footing>,
    pub caps: Vec<Cap>,
    pub joints: Vec<Joint>,
    pub drainage_slots: Vec<DrainageSlot>,
    pub bays: Vec<Bay>,

    /// Only populated for MSE-composite walls.
    pub mse_segments: Vec<MseSegment>,
}

impl WallLayout {
    pub fn new(
        wall_type: WallType,
        start_station: f64,
        end_station: f64,
        wall_height: f64,
        foundation_type: FoundationType,
    ) -> Self {
        Self {
            wall_type,
            start_station,
            end_station,
            wall_height,
            foundation_type,
            posts: Vec::new(),
            panels: Vec::new(),
            footings: Vec::new(),
            caps: Vec::new(),
            joints: Vec::new(),
            drainage_slots: Vec::new(),
            bays: Vec::new(),
            mse_segments: Vec::new(),
        }
    }

    pub fn num_bays(&self) -> usize {
        self.bays.len()
    }

    pub fn total_length(&self) -> f64 {
        self.end_station - self.start_station
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.mse_segments.is_empty()
    }
}
