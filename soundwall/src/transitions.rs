//! Height step transitions between bays on sloping ground.
//!
//! When the ground elevation changes enough between adjacent posts that the
//! stacked panel count would change, the wall steps up or down. The result is
//! informational for elevation drawings; the layout engine sizes each bay's
//! stack independently.

/// A height step transition between bays.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct StepTransition {
    pub station: f64,
    pub bay_index: usize,
    /// Positive steps up, negative steps down.
    pub height_change: f64,
    pub num_panels_before: usize,
    pub num_panels_after: usize,
}

/// Determines where the wall needs to step up or down along a run of posts.
///
/// `ground_elevations` and `stations` are parallel per-post arrays. A
/// transition is emitted only where the ground difference between adjacent
/// posts exceeds half a panel height and changes the panel count.
pub fn compute_step_transitions(
    ground_elevations: &[f64],
    stations: &[f64],
    wall_height: f64,
    panel_height: f64,
) -> Vec<StepTransition> {
    if ground_elevations.len() < 2 {
        return Vec::new();
    }

    let base_panels = ((wall_height / panel_height).ceil() as usize).max(1);
    let mut transitions = Vec::new();

    for i in 1..ground_elevations.len() {
        let elev_prev = ground_elevations[i - 1];
        let elev_curr = ground_elevations[i];

        let n_prev = base_panels;
        let mut n_curr = base_panels;

        let ground_diff = elev_curr - elev_prev;
        if ground_diff.abs() > panel_height * 0.5 {
            // Dropping ground needs more panels on the low side; rising
            // ground may need fewer.
            let effective_height = if ground_diff < 0.0 {
                wall_height + ground_diff.abs()
            } else {
                wall_height - ground_diff.abs()
            };
            n_curr = ((effective_height / panel_height).ceil() as usize).max(1);

            if n_curr != n_prev {
                transitions.push(StepTransition {
                    station: stations[i],
                    bay_index: i - 1,
                    height_change: ground_diff,
                    num_panels_before: n_prev,
                    num_panels_after: n_curr,
                });
            }
        }
    }

    transitions
}
