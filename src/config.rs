//! Tunable thresholds and numerical settings for an analysis.
//!
//! Every component takes one of these by reference rather than reading module level constants,
//! so tests can exercise alternate thresholds deterministically. `Default` carries the published
//! values.
use metfor::{HectoPascal, JpKg, Meters, MetersPSec};

/// Thresholds and numerical settings shared by the whole analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Depth of the layer averaged to build the mixed layer parcel.
    pub mixed_layer_depth: HectoPascal,
    /// Depth searched for the most unstable parcel.
    pub most_unstable_depth: HectoPascal,
    /// Pressure step used when integrating a parcel ascent. Halving the default changes CAPE by
    /// less than 1% on full resolution model soundings.
    pub ascent_step: HectoPascal,
    /// Magnitude of the deviation from the 0-6 km mean wind in the Bunkers storm motion.
    pub bunkers_deviation: MetersPSec,
    /// Minimum number of levels in a layer for shear and helicity values to be considered
    /// well resolved.
    pub min_kinematic_levels: usize,
    /// Mixed layer CAPE below this counts as no instability.
    pub cape_floor: JpKg,
    /// Most unstable CAPE below this counts as no instability when the mixed layer is also
    /// below its floor.
    pub mu_cape_floor: JpKg,
    /// Mixed layer CIN at or below this marks the profile as strongly capped.
    pub strong_cap: JpKg,
    /// Mixed layer CIN at or below this is worth a cautionary note.
    pub moderate_cap: JpKg,
    /// Mixed layer LCL heights above this are hostile to tornadoes.
    pub high_lcl: Meters,
    /// Surface relative humidity (0-1) below this is a dry boundary layer.
    pub dry_boundary_layer_rh: f64,
    /// Equivalent potential temperature gradient, K per 100 km, that marks a mesoscale boundary.
    pub boundary_gradient_threshold: f64,
    /// Theta-e departure from the neighborhood mean, K, beyond which the target point is
    /// classified as clearly on the warm or cold side of a boundary.
    pub boundary_side_deadband: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            mixed_layer_depth: HectoPascal(100.0),
            most_unstable_depth: HectoPascal(300.0),
            ascent_step: HectoPascal(5.0),
            bunkers_deviation: MetersPSec(7.5),
            min_kinematic_levels: 3,
            cape_floor: JpKg(100.0),
            mu_cape_floor: JpKg(200.0),
            strong_cap: JpKg(-100.0),
            moderate_cap: JpKg(-25.0),
            high_lcl: Meters(2000.0),
            dry_boundary_layer_rh: 0.40,
            boundary_gradient_threshold: 3.0,
            boundary_side_deadband: 2.0,
        }
    }
}
