//! Turn the numeric ingredient set into a qualitative diagnosis with justification.
//!
//! The convective mode comes from an ordered table of (predicate, outcome) rules evaluated top
//! down, so the tie break order is explicit and testable apart from the numerics. The support
//! tier is a monotone score over the ingredients. The narrative is a list of tagged reasons,
//! rendering them to text is just their `Display` impl and can be swapped out by a
//! presentation layer.
use crate::{
    boundary::{BoundarySide, BoundarySignal},
    composite::{self, CompositeIndexes},
    config::AnalysisConfig,
    wind::StormMotion,
};
use metfor::{CelsiusDiff, IntHelicityM2pS2, JpKg, Meters, MetersPSec, Mm, Quantity};
use optional::Optioned;
use std::fmt;
use strum_macros::EnumIter;

/// Quality caveats attached to an analysis, never silently dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfidenceFlags {
    /// Shear or helicity layers contained fewer native levels than ideal, the values are low
    /// resolution estimates.
    pub low_resolution_kinematics: bool,
    /// One or more mandatory levels (850/700/500 hPa) had to be interpolated.
    pub interpolated_levels: bool,
    /// The profile was too shallow to evaluate a parcel ascent, thermodynamic values were
    /// zeroed.
    pub insufficient_extent: bool,
}

/// The full numeric ingredient set a diagnosis is built from.
///
/// Kinematic values that could not be computed are zero; the confidence flags record why.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredients {
    /// Mixed layer CAPE.
    pub mlcape: JpKg,
    /// Most unstable CAPE.
    pub mucape: JpKg,
    /// Mixed layer CIN.
    pub mlcin: JpKg,
    /// Most unstable parcel CIN.
    pub mucin: JpKg,
    /// Mixed layer parcel LCL height AGL.
    pub ml_lcl_agl: Meters,
    /// Most unstable parcel LCL height AGL.
    pub mu_lcl_agl: Meters,
    /// Lifted index at 500 hPa.
    pub lifted_index: Optioned<CelsiusDiff>,
    /// 700-500 hPa lapse rate, C/km.
    pub lapse_700_500: Optioned<f64>,
    /// Surface to 3 km lapse rate, C/km.
    pub low_level_lapse: Optioned<f64>,
    /// Precipitable water.
    pub precipitable_water: Optioned<Mm>,
    /// Surface relative humidity, 0 to 1.
    pub surface_rh: Optioned<f64>,
    /// Bulk shear magnitude over 0-1 km.
    pub shear_01: MetersPSec,
    /// Bulk shear magnitude over 0-6 km.
    pub shear_06: MetersPSec,
    /// Bulk shear magnitude over 3-6 km.
    pub shear_36: MetersPSec,
    /// Storm relative helicity over 0-1 km, right mover.
    pub srh_01: IntHelicityM2pS2,
    /// Storm relative helicity over 0-3 km, right mover.
    pub srh_03: IntHelicityM2pS2,
    /// Bunkers storm motion estimates.
    pub storm_motion: Option<StormMotion>,
    /// The composite parameters.
    pub composites: CompositeIndexes,
    /// Boundary detection result, when a grid was provided.
    pub boundary: Option<BoundarySignal>,
    /// Quality caveats.
    pub flags: ConfidenceFlags,
}

/// The dominant convective mode expected from this environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ConvectiveMode {
    /// Short lived single cells in weak shear.
    Pulse,
    /// Clusters of cells, some organization.
    Multicell,
    /// Quasi-linear convective systems, lines and bowing segments.
    Qlcs,
    /// Discrete rotating supercells.
    Supercellular,
    /// Supercells in an environment that also supports tornadoes.
    TornadicSupercell,
}

impl fmt::Display for ConvectiveMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ConvectiveMode::*;

        let text = match self {
            Pulse => "pulse / single cell storms",
            Multicell => "multicell clusters",
            Qlcs => "QLCS / linear segments",
            Supercellular => "supercells",
            TornadicSupercell => "tornadic supercells",
        };
        write!(f, "{}", text)
    }
}

/// How well the environment supports organized severe convection, as an ordinal scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter)]
pub enum SupportLevel {
    /// No support, storms are not expected to pose a threat.
    None,
    /// Marginal support.
    Marginal,
    /// Limited support.
    Limited,
    /// Moderate support.
    Moderate,
    /// Enhanced support.
    Enhanced,
    /// The environment is about as favorable as it gets.
    Extreme,
}

impl fmt::Display for SupportLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            SupportLevel::None => "none",
            SupportLevel::Marginal => "marginal",
            SupportLevel::Limited => "limited",
            SupportLevel::Moderate => "moderate",
            SupportLevel::Enhanced => "enhanced",
            SupportLevel::Extreme => "extreme",
        };
        write!(f, "{}", text)
    }
}

/// A reason storms may fail to materialize or to reach their apparent ceiling, with the values
/// that triggered it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailMode {
    /// The profile could not be fully evaluated.
    InsufficientData,
    /// There is no buoyancy to work with.
    NoInstability {
        /// Deep layer shear at the time, to call out shear-only setups.
        shear_06: MetersPSec,
    },
    /// Strong convective inhibition.
    StrongCap {
        /// The mixed layer CIN.
        cin: JpKg,
    },
    /// Dry air near the surface.
    DryBoundaryLayer {
        /// Surface relative humidity, 0 to 1.
        rh: f64,
    },
    /// Not enough deep shear to organize storms.
    WeakShear {
        /// 0-6 km bulk shear.
        shear_06: MetersPSec,
    },
    /// So much CAPE and so little shear that storms undercut themselves.
    OutflowDominant {
        /// Mixed layer CAPE.
        cape: JpKg,
        /// 0-6 km bulk shear.
        shear_06: MetersPSec,
    },
    /// Little buoyancy below cloud base.
    WeakLowLevelLapseRate {
        /// Surface to 3 km lapse rate, C/km.
        lapse: f64,
    },
    /// Cloud bases too high for tornadoes.
    HighLcl {
        /// Mixed layer LCL height AGL.
        lcl_agl: Meters,
    },
    /// A boundary grid was scanned and nothing was found.
    NoBoundary,
}

impl fmt::Display for FailMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use FailMode::*;

        match self {
            InsufficientData => write!(
                f,
                "Insufficient vertical extent or missing data, the parcel ascent could not be \
                 fully evaluated."
            ),
            NoInstability { shear_06 } => {
                if *shear_06 >= MetersPSec(15.0) {
                    write!(
                        f,
                        "No instability despite strong shear ({:.0} m/s over 0-6 km), storms \
                         cannot form without buoyancy.",
                        shear_06.unpack()
                    )
                } else {
                    write!(f, "Insufficient instability for deep convection.")
                }
            }
            StrongCap { cin } => write!(
                f,
                "Capped, storms may not initiate (CIN {:.0} J/kg) without strong forcing or a \
                 mesoscale boundary.",
                cin.unpack()
            ),
            DryBoundaryLayer { rh } => write!(
                f,
                "Very dry boundary layer (RH near {:.0}%), entrainment will erode updrafts.",
                rh * 100.0
            ),
            WeakShear { shear_06 } => write!(
                f,
                "Weak deep layer shear ({:.0} m/s), storms will be disorganized and short lived.",
                shear_06.unpack()
            ),
            OutflowDominant { cape, shear_06 } => write!(
                f,
                "Very high CAPE ({:.0} J/kg) against weak shear ({:.0} m/s), outflow will \
                 undercut updrafts before sustained hazards develop.",
                cape.unpack(),
                shear_06.unpack()
            ),
            WeakLowLevelLapseRate { lapse } => write!(
                f,
                "Weak low level lapse rate ({:.1} C/km), reduced buoyancy below cloud base.",
                lapse
            ),
            HighLcl { lcl_agl } => write!(
                f,
                "High LCL ({:.0} m), sub-cloud evaporation is hostile to tornado potential.",
                lcl_agl.unpack()
            ),
            NoBoundary => write!(
                f,
                "No mesoscale boundary detected nearby to focus initiation."
            ),
        }
    }
}

/// An advisory observation that sharpens the diagnosis without arguing against storms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Note {
    /// A cap that storms can plausibly break.
    ModerateCap {
        /// The mixed layer CIN.
        cin: JpKg,
    },
    /// Low cloud bases.
    VeryLowLcl {
        /// Mixed layer LCL height AGL.
        lcl_agl: Meters,
    },
    /// Steep lapse rates aloft.
    SteepMidLevelLapseRate {
        /// 700-500 hPa lapse rate, C/km.
        lapse: f64,
    },
    /// A very moist column.
    HighPrecipitableWater {
        /// Precipitable water.
        pw: Mm,
    },
    /// The energy helicity index crossed its tornado threshold.
    TornadoSupportingEhi {
        /// EHI over 0-1 km.
        ehi: f64,
    },
    /// The vorticity generation parameter crossed its threshold.
    FavorableVgp {
        /// The VGP value.
        vgp: f64,
    },
    /// The significant hail parameter crossed its threshold.
    SignificantHail {
        /// The SHIP value.
        ship: f64,
    },
    /// The Craven-Brooks product crossed its threshold.
    SignificantSevere {
        /// The Craven-Brooks value, J/kg * m/s.
        craven_brooks: f64,
    },
    /// A mesoscale boundary was detected near the target point.
    BoundaryNearby {
        /// The largest theta-e gradient found, K per 100 km.
        gradient: f64,
        /// Which side of the boundary the point is on.
        side: BoundarySide,
    },
    /// Kinematic values came from sparsely sampled layers.
    LowResolutionKinematics,
    /// Mandatory levels were interpolated.
    InterpolatedLevels,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Note::*;

        match self {
            ModerateCap { cin } => write!(
                f,
                "Moderate cap (CIN {:.0} J/kg), needs surface heating or boundary lift to break.",
                cin.unpack()
            ),
            VeryLowLcl { lcl_agl } => write!(
                f,
                "Very low LCL ({:.0} m), favorable for tornadoes if the kinematics support them.",
                lcl_agl.unpack()
            ),
            SteepMidLevelLapseRate { lapse } => write!(
                f,
                "Steep mid level lapse rate ({:.1} C/km), favorable for hail growth.",
                lapse
            ),
            HighPrecipitableWater { pw } => write!(
                f,
                "Very high precipitable water ({:.0} mm), heavy rain with any storm.",
                pw.unpack()
            ),
            TornadoSupportingEhi { ehi } => write!(
                f,
                "EHI (0-1 km) of {:.2} supports tornadoes.",
                ehi
            ),
            FavorableVgp { vgp } => write!(
                f,
                "VGP of {:.3} favors low level vorticity generation.",
                vgp
            ),
            SignificantHail { ship } => write!(
                f,
                "SHIP of {:.2} supports significant (2 in. or larger) hail.",
                ship
            ),
            SignificantSevere { craven_brooks } => write!(
                f,
                "Craven-Brooks product of {:.0} is past the significant severe threshold.",
                craven_brooks
            ),
            BoundaryNearby { gradient, side } => {
                let side_text = match side {
                    BoundarySide::WarmSector => "the point is in the warm sector",
                    BoundarySide::ColdSide => "the point is on the cool side, initiation risk reduced",
                    BoundarySide::OnBoundary => "the point is on the boundary itself",
                };
                write!(
                    f,
                    "Mesoscale boundary nearby (theta-e gradient {:.1} K/100 km), {}.",
                    gradient, side_text
                )
            }
            LowResolutionKinematics => write!(
                f,
                "Shear and helicity are low resolution estimates, few native levels in the layer."
            ),
            InterpolatedLevels => write!(
                f,
                "One or more mandatory levels were interpolated, derived values carry extra \
                 uncertainty."
            ),
        }
    }
}

/// The complete diagnosis for one sounding and one time.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticResult {
    /// The expected convective mode.
    pub mode: ConvectiveMode,
    /// The support tier.
    pub support: SupportLevel,
    /// Reasons storms may fail, ordered by severity of the limiting factor.
    pub fail_modes: Vec<FailMode>,
    /// Advisory observations.
    pub notes: Vec<Note>,
    /// The ingredient set the classification was built from.
    pub ingredients: Ingredients,
}

/// One row of the convective mode decision table.
struct ModeRule {
    applies: fn(&Ingredients) -> bool,
    outcome: ConvectiveMode,
}

/// The mode decision table, evaluated top down; the first matching rule wins and anything
/// falling through is a pulse storm environment.
const MODE_RULES: &[ModeRule] = &[
    ModeRule {
        applies: |i| {
            i.composites.stp >= composite::STP_SIGNIFICANT
                && i.composites.scp > composite::SCP_SIGNIFICANT
        },
        outcome: ConvectiveMode::TornadicSupercell,
    },
    ModeRule {
        applies: |i| i.composites.scp > composite::SCP_SUPERCELL,
        outcome: ConvectiveMode::Supercellular,
    },
    ModeRule {
        applies: |i| {
            i.shear_06 >= MetersPSec(15.0)
                && i.srh_03 < IntHelicityM2pS2(100.0)
                && i.shear_36 >= MetersPSec(10.0)
        },
        outcome: ConvectiveMode::Qlcs,
    },
    ModeRule {
        applies: |i| i.mlcape >= JpKg(300.0) && i.shear_06 >= MetersPSec(10.0),
        outcome: ConvectiveMode::Multicell,
    },
];

/// Map the ingredient set to a diagnosis.
///
/// This is a pure function: identical ingredients always produce an identical result.
pub fn classify(ingredients: Ingredients, config: &AnalysisConfig) -> DiagnosticResult {
    let mut notes = Vec::new();
    confidence_notes(&ingredients, &mut notes);

    // Strict instability gate: with no buoyancy anywhere, kinematics are irrelevant.
    if ingredients.mlcape < config.cape_floor && ingredients.mucape < config.mu_cape_floor {
        let mut fail_modes = Vec::new();
        if ingredients.flags.insufficient_extent {
            fail_modes.push(FailMode::InsufficientData);
        }
        fail_modes.push(FailMode::NoInstability {
            shear_06: ingredients.shear_06,
        });

        return DiagnosticResult {
            mode: ConvectiveMode::Pulse,
            support: SupportLevel::None,
            fail_modes,
            notes,
            ingredients,
        };
    }

    let mode = MODE_RULES
        .iter()
        .find(|rule| (rule.applies)(&ingredients))
        .map(|rule| rule.outcome)
        .unwrap_or(ConvectiveMode::Pulse);

    let support = support_level(&ingredients);
    let fail_modes = fail_modes(&ingredients, config);
    advisory_notes(&ingredients, config, &mut notes);

    DiagnosticResult {
        mode,
        support,
        fail_modes,
        notes,
        ingredients,
    }
}

/// A monotone score over the ingredients, mapped onto the ordinal support scale.
///
/// Increasing any single favorable ingredient can never lower the tier.
fn support_level(i: &Ingredients) -> SupportLevel {
    let mut score = 0usize;

    if i.mlcape > JpKg(500.0) {
        score += 1;
    }
    if i.mlcape > JpKg(1500.0) {
        score += 1;
    }
    if i.shear_06 > MetersPSec(15.0) {
        score += 1;
    }
    if i.composites.scp > 2.0 || i.composites.stp > 0.5 {
        score += 1;
    }
    if i.srh_01 > IntHelicityM2pS2(200.0) && i.composites.stp >= composite::STP_SIGNIFICANT {
        score += 1;
    }
    if let Some(boundary) = i.boundary {
        if boundary.present && boundary.side == BoundarySide::WarmSector {
            score += 1;
        }
    }

    match score.min(5) {
        0 => SupportLevel::None,
        1 => SupportLevel::Marginal,
        2 => SupportLevel::Limited,
        3 => SupportLevel::Moderate,
        4 => SupportLevel::Enhanced,
        _ => SupportLevel::Extreme,
    }
}

/// Assemble the fail modes in a fixed severity order, most limiting first.
fn fail_modes(i: &Ingredients, config: &AnalysisConfig) -> Vec<FailMode> {
    let mut result = Vec::new();

    if i.flags.insufficient_extent {
        result.push(FailMode::InsufficientData);
    }

    if i.mlcin <= config.strong_cap {
        result.push(FailMode::StrongCap { cin: i.mlcin });
    }

    if let Some(rh) = i.surface_rh.into_option() {
        if rh < config.dry_boundary_layer_rh {
            result.push(FailMode::DryBoundaryLayer { rh });
        }
    }

    if i.shear_06 < MetersPSec(7.5) && i.mlcape > JpKg(1500.0) {
        result.push(FailMode::WeakShear {
            shear_06: i.shear_06,
        });
    }

    if i.mlcape > JpKg(2500.0) && i.shear_06 < MetersPSec(12.5) {
        result.push(FailMode::OutflowDominant {
            cape: i.mlcape,
            shear_06: i.shear_06,
        });
    }

    if let Some(lapse) = i.low_level_lapse.into_option() {
        if lapse < 5.0 && i.mlcape > JpKg(500.0) {
            result.push(FailMode::WeakLowLevelLapseRate { lapse });
        }
    }

    if i.ml_lcl_agl > config.high_lcl {
        result.push(FailMode::HighLcl {
            lcl_agl: i.ml_lcl_agl,
        });
    }

    if let Some(boundary) = i.boundary {
        if !boundary.present {
            result.push(FailMode::NoBoundary);
        }
    }

    result
}

fn confidence_notes(i: &Ingredients, notes: &mut Vec<Note>) {
    if i.flags.low_resolution_kinematics {
        notes.push(Note::LowResolutionKinematics);
    }
    if i.flags.interpolated_levels {
        notes.push(Note::InterpolatedLevels);
    }
}

fn advisory_notes(i: &Ingredients, config: &AnalysisConfig, notes: &mut Vec<Note>) {
    if i.mlcin <= config.moderate_cap && i.mlcin > config.strong_cap {
        notes.push(Note::ModerateCap { cin: i.mlcin });
    }

    if i.ml_lcl_agl < Meters(800.0) && i.mlcape > JpKg(0.0) {
        notes.push(Note::VeryLowLcl {
            lcl_agl: i.ml_lcl_agl,
        });
    }

    if let Some(lapse) = i.lapse_700_500.into_option() {
        if lapse >= 6.5 {
            notes.push(Note::SteepMidLevelLapseRate { lapse });
        }
    }

    if let Some(pw) = i.precipitable_water.into_option() {
        if pw > Mm(40.0) {
            notes.push(Note::HighPrecipitableWater { pw });
        }
    }

    if i.composites.ehi_01 >= composite::EHI_SIGNIFICANT {
        notes.push(Note::TornadoSupportingEhi {
            ehi: i.composites.ehi_01,
        });
    }

    if i.composites.vgp >= composite::VGP_SIGNIFICANT {
        notes.push(Note::FavorableVgp {
            vgp: i.composites.vgp,
        });
    }

    if i.composites.ship >= composite::SHIP_SIGNIFICANT {
        notes.push(Note::SignificantHail {
            ship: i.composites.ship,
        });
    }

    if i.composites.craven_brooks > composite::CRAVEN_BROOKS_SIGNIFICANT {
        notes.push(Note::SignificantSevere {
            craven_brooks: i.composites.craven_brooks,
        });
    }

    if let Some(boundary) = i.boundary {
        if boundary.present {
            notes.push(Note::BoundaryNearby {
                gradient: boundary.max_gradient,
                side: boundary.side,
            });
        }
    }
}
