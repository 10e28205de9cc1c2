//! Sound-wall dimensional standards and layout parameters.
//!
//! All values are SI (meters, radians). The constants follow GDOT sound
//! barrier standards (Section 624, Standard Detail N-5 Type C, Standard
//! 4949B); imperial equivalents are noted where the round number lives in
//! feet or inches.

use serde::{Deserialize, Serialize};

/// Sound wall construction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallType {
    /// Post-and-panel precast wall.
    #[default]
    Precast,
    /// MSE wall with a noise barrier on top.
    MseComposite,
}

/// Foundation type for post support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoundationType {
    /// Drilled shaft.
    #[default]
    Caisson,
    /// Pad footing.
    Spread,
    /// Strip footing.
    Continuous,
}

/// Joint type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointType {
    Expansion,
    Contraction,
}

// Post specifications (W6x20 H-section, AASHTO M 270 GR 36).
pub const POST_SPACING_MAX: f64 = 3.048; // 10 ft on center
pub const POST_SECTION: &str = "W6x20";
pub const POST_FLANGE_WIDTH: f64 = 0.1524;
pub const POST_DEPTH: f64 = 0.1572;
pub const POST_WEB_THICKNESS: f64 = 0.00655;
pub const POST_FLANGE_THICKNESS: f64 = 0.00935;
pub const POST_EMBED_FROM_BOTTOM: f64 = 0.3048; // 1 ft into the footing

// Panel specifications (precast PAAC).
pub const PANEL_HEIGHT: f64 = 0.8128; // 32 in
pub const PANEL_WIDTH_MAX: f64 = 3.6576; // 12 ft
pub const PANEL_THICKNESS: f64 = 0.1016; // 4 in

// Cap / coping.
pub const CAP_HEIGHT: f64 = 0.1524; // 6 in
pub const CAP_OVERHANG: f64 = 0.0508; // 2 in each side

// Joints.
pub const EXPANSION_JOINT_SPACING: f64 = 24.384; // 80 ft max
pub const EXPANSION_JOINT_GAP: f64 = 0.0254; // 1 in preformed filler
pub const CONTRACTION_JOINT_SPACING: f64 = 6.096; // 20 ft max

// Footings.
pub const CAISSON_DIAMETER: f64 = 0.762; // 30 in
pub const CAISSON_DEPTH: f64 = 3.048; // 10 ft
pub const SPREAD_LENGTH: f64 = 1.524;
pub const SPREAD_WIDTH: f64 = 1.524;
pub const SPREAD_DEPTH: f64 = 0.762;
pub const CONTINUOUS_WIDTH: f64 = 0.914;
pub const CONTINUOUS_DEPTH: f64 = 0.610;
pub const CONTINUOUS_LENGTH: f64 = 3.048; // one nominal bay

// MSE wall body and facing.
pub const MSE_BODY_HEIGHT: f64 = 3.048; // 10 ft typical
pub const MSE_TOP_WIDTH: f64 = 0.610;
pub const MSE_BASE_WIDTH: f64 = 4.572; // top width + reinforcement length
pub const MSE_PANEL_HEIGHT: f64 = 1.524; // 5 ft facing panel
pub const MSE_PANEL_WIDTH: f64 = 3.048;
pub const MSE_PANEL_THICKNESS: f64 = 0.1397; // 5.5 in facing

// Traffic barrier and coping on the MSE crest.
pub const TRAFFIC_BARRIER_HEIGHT: f64 = 0.813; // 32 in
pub const TRAFFIC_BARRIER_BASE_WIDTH: f64 = 0.381;
pub const TRAFFIC_BARRIER_TOP_WIDTH: f64 = 0.152;
pub const COPING_HEIGHT: f64 = 0.254; // 10 in
pub const COPING_WIDTH: f64 = 0.610; // 24 in

// Drainage slots.
pub const DRAINAGE_SLOT_WIDTH: f64 = 0.1016; // 4 in
pub const DRAINAGE_SLOT_HEIGHT: f64 = 0.0508; // 2 in
pub const DRAINAGE_SLOT_SPACING: f64 = 6.096; // 20 ft typical

// Wall height limits.
pub const DEFAULT_WALL_HEIGHT: f64 = 4.572; // 15 ft typical
pub const MIN_WALL_HEIGHT: f64 = 1.829;
pub const MAX_WALL_HEIGHT: f64 = 7.620;

/// Layout parameters for a wall run. `Default` yields the standard
/// dimensions above; partial JSON parameter files deserialize on top of the
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    pub wall_type: WallType,
    pub wall_height: f64,
    pub foundation_type: FoundationType,
    /// Upper bound on post spacing; actual spacing divides the run evenly.
    pub post_spacing: f64,
    /// Station range; `None` means the alignment bounds.
    pub start_station: Option<f64>,
    pub end_station: Option<f64>,
    /// Perpendicular offset from the centerline, positive right of travel.
    pub offset: f64,

    pub panel_height: f64,
    pub panel_thickness: f64,
    pub panel_width_max: f64,
    pub cap_height: f64,
    pub cap_overhang: f64,
    pub expansion_joint_spacing: f64,
    pub expansion_joint_gap: f64,
    pub contraction_joint_spacing: f64,
    pub drainage_slot_spacing: f64,
    pub drainage_slot_width: f64,
    pub drainage_slot_height: f64,
    pub caisson_diameter: f64,
    pub caisson_depth: f64,
    pub spread_length: f64,
    pub spread_width: f64,
    pub spread_depth: f64,
    pub continuous_width: f64,
    pub continuous_depth: f64,
    pub mse_body_height: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            wall_type: WallType::Precast,
            wall_height: DEFAULT_WALL_HEIGHT,
            foundation_type: FoundationType::Caisson,
            post_spacing: POST_SPACING_MAX,
            start_station: None,
            end_station: None,
            offset: 0.0,
            panel_height: PANEL_HEIGHT,
            panel_thickness: PANEL_THICKNESS,
            panel_width_max: PANEL_WIDTH_MAX,
            cap_height: CAP_HEIGHT,
            cap_overhang: CAP_OVERHANG,
            expansion_joint_spacing: EXPANSION_JOINT_SPACING,
            expansion_joint_gap: EXPANSION_JOINT_GAP,
            contraction_joint_spacing: CONTRACTION_JOINT_SPACING,
            drainage_slot_spacing: DRAINAGE_SLOT_SPACING,
            drainage_slot_width: DRAINAGE_SLOT_WIDTH,
            drainage_slot_height: DRAINAGE_SLOT_HEIGHT,
            caisson_diameter: CAISSON_DIAMETER,
            caisson_depth: CAISSON_DEPTH,
            spread_length: SPREAD_LENGTH,
            spread_width: SPREAD_WIDTH,
            spread_depth: SPREAD_DEPTH,
            continuous_width: CONTINUOUS_WIDTH,
            continuous_depth: CONTINUOUS_DEPTH,
            mse_body_height: MSE_BODY_HEIGHT,
        }
    }
}
