//! Wall layout engine: positions posts, panels, footings, caps, joints,
//! drainage slots and MSE segments along an alignment.
//!
//! The engine is pure and deterministic: it performs no I/O, walks every loop
//! in index order, and given identical inputs produces identical arrays. It
//! assumes the parser has validated its inputs; a degenerate station range
//! yields an empty layout instead of an error.

use crate::alignment::{HorizontalAlignment, VerticalProfile};
use crate::config::{FoundationType, JointType, WallConfig, WallType};
use crate::dtm::Tin;
use crate::stationing::{StationSolver, TerrainSampler};
use crate::wall::{
    make_caisson, make_continuous_footing, make_spread_footing, Bay, Cap, DrainageSlot, Footing,
    Joint, MseSegment, PrecastPanel, SteelPost, WallLayout,
};

/// Computes a complete wall layout. This is the single entry point consumed
/// by emitters; see [`WallLayoutEngine`] for the incremental API.
pub fn compute_layout(
    alignment: &HorizontalAlignment,
    profile: Option<&VerticalProfile>,
    surface: Option<&Tin>,
    config: &WallConfig,
) -> WallLayout {
    WallLayoutEngine::new(alignment, profile, surface, config.clone()).compute()
}

/// Computes complete sound wall layouts from alignment data.
#[derive(Debug)]
pub struct WallLayoutEngine<'a> {
    solver: StationSolver<'a>,
    sampler: TerrainSampler<'a>,
    config: WallConfig,
    start_station: f64,
    end_station: f64,
}

impl<'a> WallLayoutEngine<'a> {
    pub fn new(
        alignment: &'a HorizontalAlignment,
        profile: Option<&'a VerticalProfile>,
        surface: Option<&'a Tin>,
        config: WallConfig,
    ) -> Self {
        let start_station = config.start_station.unwrap_or_else(|| alignment.start_station());
        let end_station = config.end_station.unwrap_or_else(|| alignment.end_station());
        Self {
            solver: StationSolver::new(alignment, profile),
            sampler: TerrainSampler::new(surface),
            config,
            start_station,
            end_station,
        }
    }

    /// Computes the layout for the configured station range. An empty
    /// alignment or a non-increasing range produces an empty layout.
    pub fn compute(&self) -> WallLayout {
        let mut layout = WallLayout::new(
            self.config.wall_type,
            self.start_station,
            self.end_station,
            self.config.wall_height,
            self.config.foundation_type,
        );

        if self.solver.alignment.segments.is_empty()
            || self.end_station - self.start_station <= 0.0
        {
            log::warn!(
                "degenerate wall run [{:.3}, {:.3}]: returning empty layout",
                self.start_station,
                self.end_station
            );
            return layout;
        }

        match self.config.wall_type {
            WallType::Precast => self.compute_precast(&mut layout),
            WallType::MseComposite => self.compute_mse(&mut layout),
        }

        log::debug!(
            "wall layout: {} posts, {} bays, {} panels, {} joints, {} mse segments",
            layout.posts.len(),
            layout.bays.len(),
            layout.panels.len(),
            layout.joints.len(),
            layout.mse_segments.len()
        );
        layout
    }

    /// Post stations at uniform spacing no greater than the configured
    /// maximum: the run is divided into `max(1, ceil(L / spacing))` bays.
    fn post_stations(&self) -> Vec<f64> {
        let total_length = self.end_station - self.start_station;
        let num_bays = ((total_length / self.config.post_spacing).ceil() as usize).max(1);
        let actual_spacing = total_length / num_bays as f64;

        (0..=num_bays)
            .map(|i| self.start_station + i as f64 * actual_spacing)
            .collect()
    }

    fn compute_precast(&self, layout: &mut WallLayout) {
        // Posts at uniform stations, bearing from the alignment, ground from
        // the terrain with profile fallback.
        for (i, station) in self.post_stations().into_iter().enumerate() {
            let Some(point) = self.solver.solve(station, self.config.offset) else {
                continue;
            };
            let ground_elev = self
                .sampler
                .sample_at_station(&self.solver, station, self.config.offset)
                .unwrap_or(point.elevation);

            layout.posts.push(SteelPost::new(
                i,
                station,
                point.easting,
                point.northing,
                ground_elev,
                ground_elev + self.config.wall_height,
                point.bearing,
                self.config.wall_height,
            ));
        }

        // One footing under each post.
        let footings: Vec<Footing> = layout
            .posts
            .iter()
            .map(|post| self.make_footing(post))
            .collect();
        layout.footings.extend(footings);

        // Bays between consecutive posts.
        for i in 0..layout.posts.len().saturating_sub(1) {
            let bay = self.make_bay(i, layout);
            layout.bays.push(bay);
        }

        self.compute_joints(layout);

        // Flatten panels, caps and drainage slots from the bays.
        let mut panels = Vec::new();
        let mut caps = Vec::new();
        let mut slots = Vec::new();
        for bay in &layout.bays {
            panels.extend(bay.panels.iter().cloned());
            if let Some(cap) = &bay.cap {
                caps.push(cap.clone());
            }
            slots.extend(bay.drainage_slots.iter().cloned());
        }
        layout.panels.extend(panels);
        layout.caps.extend(caps);
        layout.drainage_slots.extend(slots);
    }

    fn make_footing(&self, post: &SteelPost) -> Footing {
        match self.config.foundation_type {
            FoundationType::Caisson => make_caisson(
                post.index,
                post.station,
                post.easting,
                post.northing,
                post.ground_elevation,
                post.bearing,
                self.config.caisson_diameter,
                self.config.caisson_depth,
            ),
            FoundationType::Spread => make_spread_footing(
                post.index,
                post.station,
                post.easting,
                post.northing,
                post.ground_elevation,
                post.bearing,
                self.config.spread_length,
                self.config.spread_width,
                self.config.spread_depth,
            ),
            FoundationType::Continuous => make_continuous_footing(
                post.index,
                post.station,
                post.easting,
                post.northing,
                post.ground_elevation,
                post.bearing,
                self.config.continuous_width,
                self.config.continuous_depth,
            ),
        }
    }

    fn make_bay(&self, index: usize, layout: &WallLayout) -> Bay {
        let left = &layout.posts[index];
        let right = &layout.posts[index + 1];
        let mut bay = Bay::new(index, left.index, right.index);

        let mid_e = (left.easting + right.easting) / 2.0;
        let mid_n = (left.northing + right.northing) / 2.0;
        // Chord width: curved alignments accept the chord approximation.
        let bay_width = ((right.easting - left.easting).powi(2)
            + (right.northing - left.northing).powi(2))
        .sqrt();

        let ground_elev = left.ground_elevation.min(right.ground_elevation);
        let top_elev = left.top_elevation.max(right.top_elevation);
        let wall_h = top_elev - ground_elev - self.config.cap_height;

        let num_panels = ((wall_h / self.config.panel_height).ceil() as usize).max(1);
        let bearing = left.bearing;

        for s in 0..num_panels {
            let bottom_elev = ground_elev + s as f64 * self.config.panel_height;

            // Only the bottom panel of a bay can carry a drainage slot, at
            // roughly every drainage-spacing interval along the wall.
            let mut has_drainage = false;
            if s == 0 {
                let bay_station = (left.station + right.station) / 2.0;
                let dist_from_start = bay_station - self.start_station;
                if (dist_from_start % self.config.drainage_slot_spacing).abs()
                    < self.config.post_spacing
                {
                    has_drainage = true;
                }
            }

            bay.panels.push(PrecastPanel {
                bay_index: index,
                stack_index: s,
                station_start: left.station,
                station_end: right.station,
                easting: mid_e,
                northing: mid_n,
                bottom_elevation: bottom_elev,
                bearing,
                width: bay_width,
                height: self.config.panel_height,
                thickness: self.config.panel_thickness,
                has_drainage_slot: has_drainage,
            });

            if has_drainage {
                bay.drainage_slots.push(DrainageSlot {
                    panel_bay_index: index,
                    station: (left.station + right.station) / 2.0,
                    easting: mid_e,
                    northing: mid_n,
                    elevation: bottom_elev + self.config.drainage_slot_height / 2.0,
                    width: self.config.drainage_slot_width,
                    height: self.config.drainage_slot_height,
                });
            }
        }

        bay.cap = Some(Cap {
            bay_index: index,
            station_start: left.station,
            station_end: right.station,
            easting: mid_e,
            northing: mid_n,
            bottom_elevation: ground_elev + num_panels as f64 * self.config.panel_height,
            bearing,
            width: bay_width,
            depth: self.config.panel_thickness + 2.0 * self.config.cap_overhang,
            height: self.config.cap_height,
        });

        if !layout.footings.is_empty() {
            bay.footing_left = Some(left.index);
            if right.index < layout.footings.len() {
                bay.footing_right = Some(right.index);
            }
        }

        bay
    }

    /// Walks bays in order accumulating chord length since the last joint of
    /// each kind. An expansion joint resets both counters; a contraction
    /// joint resets only its own.
    fn compute_joints(&self, layout: &mut WallLayout) {
        let mut dist_since_expansion = 0.0;
        let mut dist_since_contraction = 0.0;
        let mut joints: Vec<Joint> = Vec::new();

        for i in 0..layout.posts.len().saturating_sub(1) {
            let left = &layout.posts[i];
            let right = &layout.posts[i + 1];
            let bay_length = ((right.easting - left.easting).powi(2)
                + (right.northing - left.northing).powi(2))
            .sqrt();

            dist_since_expansion += bay_length;
            dist_since_contraction += bay_length;

            let joint_type = if dist_since_expansion >= self.config.expansion_joint_spacing {
                dist_since_expansion = 0.0;
                dist_since_contraction = 0.0;
                Some(JointType::Expansion)
            } else if dist_since_contraction >= self.config.contraction_joint_spacing {
                dist_since_contraction = 0.0;
                Some(JointType::Contraction)
            } else {
                None
            };

            if let Some(joint_type) = joint_type {
                joints.push(Joint {
                    joint_type,
                    station: right.station,
                    easting: right.easting,
                    northing: right.northing,
                    ground_elevation: right.ground_elevation,
                    top_elevation: right.top_elevation,
                    bearing: right.bearing,
                    bay_index: i,
                    gap_width: self.config.expansion_joint_gap,
                });
            }
        }

        for joint in joints {
            let bay_index = joint.bay_index;
            layout.joints.push(joint.clone());
            if let Some(bay) = layout.bays.get_mut(bay_index) {
                bay.joints.push(joint);
            }
        }
    }

    /// MSE walls are laid out as continuous segments broken at expansion
    /// joint spacing, with the precast noise barrier computed on top. Barrier
    /// post grounds are sampled from the terrain, not the MSE crest.
    fn compute_mse(&self, layout: &mut WallLayout) {
        let total_length = self.end_station - self.start_station;
        let num_segments =
            ((total_length / self.config.expansion_joint_spacing).ceil() as usize).max(1);
        let segment_length = total_length / num_segments as f64;

        for i in 0..num_segments {
            let sta_start = self.start_station + i as f64 * segment_length;
            let sta_end = self.start_station + (i + 1) as f64 * segment_length;

            let (Some(pt_start), Some(pt_end)) = (
                self.solver.solve(sta_start, self.config.offset),
                self.solver.solve(sta_end, self.config.offset),
            ) else {
                continue;
            };

            let ground_start = self
                .sampler
                .sample_at_station(&self.solver, sta_start, self.config.offset)
                .unwrap_or(pt_start.elevation);
            let ground_end = self
                .sampler
                .sample_at_station(&self.solver, sta_end, self.config.offset)
                .unwrap_or(pt_end.elevation);

            let base_elev = ground_start.min(ground_end);

            layout.mse_segments.push(MseSegment {
                index: i,
                station_start: sta_start,
                station_end: sta_end,
                easting_start: pt_start.easting,
                northing_start: pt_start.northing,
                easting_end: pt_end.easting,
                northing_end: pt_end.northing,
                base_elevation: base_elev,
                top_elevation: base_elev + self.config.mse_body_height + self.config.wall_height,
                bearing: pt_start.bearing,
                wall_height: self.config.mse_body_height,
                top_width: crate::config::MSE_TOP_WIDTH,
                base_width: crate::config::MSE_BASE_WIDTH,
                facing_thickness: crate::config::MSE_PANEL_THICKNESS,
                facing_panel_height: crate::config::MSE_PANEL_HEIGHT,
                facing_panel_width: crate::config::MSE_PANEL_WIDTH,
                barrier_height: crate::config::TRAFFIC_BARRIER_HEIGHT,
                barrier_base_width: crate::config::TRAFFIC_BARRIER_BASE_WIDTH,
                barrier_top_width: crate::config::TRAFFIC_BARRIER_TOP_WIDTH,
                coping_height: crate::config::COPING_HEIGHT,
                coping_width: crate::config::COPING_WIDTH,
            });
        }

        // Noise barrier above the MSE body.
        self.compute_precast(layout);
    }
}
