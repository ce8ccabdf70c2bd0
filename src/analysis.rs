//! Top level orchestration of a full convective analysis.
use crate::{
    boundary::{detect_boundary, ThetaEGrid},
    composite::{self, CompositeIndexes},
    config::AnalysisConfig,
    diagnosis::{classify, ConfidenceFlags, DiagnosticResult, Ingredients},
    error::{AnalysisError, Result},
    indexes, layers, levels,
    parcel::{self, Parcel},
    parcel_profile::{self, ParcelAscentAnalysis},
    sounding::Sounding,
    validate, wind,
};
use metfor::{IntHelicityM2pS2, JpKg, Meters, MetersPSec, Quantity};
use optional::{none, Optioned};

/// Run the full analysis with the default configuration.
///
/// This validates the profile, derives the mixed layer and most unstable parcels, lifts them,
/// computes the kinematic and composite ingredients, scans the optional theta-e grid for a
/// boundary, and classifies the result. The whole call is a pure function of its inputs.
pub fn analyze(snd: &Sounding, boundary_grid: Option<&ThetaEGrid>) -> Result<DiagnosticResult> {
    analyze_with_config(snd, boundary_grid, &AnalysisConfig::default())
}

/// Run the full analysis with an explicit configuration.
pub fn analyze_with_config(
    snd: &Sounding,
    boundary_grid: Option<&ThetaEGrid>,
    config: &AnalysisConfig,
) -> Result<DiagnosticResult> {
    validate::validate(snd)?;
    let confidence = validate::level_confidence(snd);

    let mut flags = ConfidenceFlags {
        interpolated_levels: !confidence.all_native(),
        ..ConfidenceFlags::default()
    };

    // Thermodynamics: lift both parcels, degrading to zeroed values when the profile cannot
    // support the ascent.
    let ml_parcel = parcel::mixed_layer_parcel(snd, config)?;
    let mu_parcel = parcel::most_unstable_parcel(snd, config)?;

    let ml_anal = lift_or_degrade(ml_parcel, snd, config)?;
    let mu_anal = lift_or_degrade(mu_parcel, snd, config)?;

    let (mlcape, mlcin, ml_lcl_agl, lifted_index) = match &ml_anal {
        Some(anal) => {
            if anal.insufficient_extent() {
                flags.insufficient_extent = true;
            }
            (
                anal.cape(),
                anal.cin(),
                anal.lcl_height_agl(),
                anal.lifted_index(),
            )
        }
        None => {
            flags.insufficient_extent = true;
            (JpKg(0.0), JpKg(0.0), Meters(0.0), none())
        }
    };

    let (mucape, mucin, mu_lcl_agl) = match &mu_anal {
        Some(anal) => {
            if anal.insufficient_extent() {
                flags.insufficient_extent = true;
            }
            (anal.cape(), anal.cin(), anal.lcl_height_agl())
        }
        None => {
            flags.insufficient_extent = true;
            (JpKg(0.0), JpKg(0.0), Meters(0.0))
        }
    };

    // Kinematics: bulk shear over the standard layers, storm motion, and storm relative
    // helicity referenced to the right mover.
    let shear_01 = shear_magnitude_or_zero(snd, Meters(0.0), Meters(1000.0), &mut flags);
    let shear_06 = shear_magnitude_or_zero(snd, Meters(0.0), Meters(6000.0), &mut flags);
    let shear_36 = shear_magnitude_or_zero(snd, Meters(3000.0), Meters(6000.0), &mut flags);

    let storm_motion = wind::bunkers_storm_motion(snd, config).ok();

    let (srh_01, srh_03) = match &storm_motion {
        Some(motion) => (
            helicity_or_zero(snd, Meters(1000.0), motion.right_mover_uv(), config, &mut flags),
            helicity_or_zero(snd, Meters(3000.0), motion.right_mover_uv(), config, &mut flags),
        ),
        None => {
            flags.low_resolution_kinematics = true;
            (IntHelicityM2pS2(0.0), IntHelicityM2pS2(0.0))
        }
    };

    // Moisture and lapse rates.
    let precipitable_water = Optioned::from(indexes::precipitable_water(snd).ok());
    let surface_rh = Optioned::from(indexes::surface_rh(snd).ok());
    let lapse_700_500 = Optioned::from(indexes::mid_level_lapse_rate(snd).ok());
    let low_level_lapse = Optioned::from(indexes::low_level_lapse_rate(snd).ok());

    let freezing_level_agl = levels::freezing_level(snd)
        .ok()
        .and_then(|lvl| lvl.height.into_option())
        // With no known freezing level, assume one high enough not to scale SHIP.
        .unwrap_or(Meters(3500.0));

    let mu_mixing_ratio = mu_parcel.mixing_ratio().unwrap_or(0.0);

    let composites = CompositeIndexes {
        scp: composite::supercell_composite(mucape, srh_03, shear_06),
        stp: composite::significant_tornado_parameter(
            mlcape, ml_lcl_agl, srh_01, shear_06, mlcin,
        ),
        ehi_01: composite::energy_helicity_index(mlcape, srh_01),
        ehi_03: composite::energy_helicity_index(mlcape, srh_03),
        ship: composite::significant_hail_parameter(
            mucape,
            mu_mixing_ratio,
            lapse_700_500.into_option().unwrap_or(0.0),
            shear_06,
            freezing_level_agl,
        ),
        vgp: composite::vorticity_generation_parameter(shear_06, mlcape),
        craven_brooks: composite::craven_brooks(mlcape, shear_06),
    };

    let boundary = boundary_grid.map(|grid| detect_boundary(grid, config));

    let ingredients = Ingredients {
        mlcape,
        mucape,
        mlcin,
        mucin,
        ml_lcl_agl,
        mu_lcl_agl,
        lifted_index,
        lapse_700_500,
        low_level_lapse,
        precipitable_water,
        surface_rh,
        shear_01,
        shear_06,
        shear_36,
        srh_01,
        srh_03,
        storm_motion,
        composites,
        boundary,
        flags,
    };

    Ok(classify(ingredients, config))
}

/// Lift a parcel, turning a degenerate profile into a graceful `None` instead of an error.
fn lift_or_degrade(
    parcel: Parcel,
    snd: &Sounding,
    config: &AnalysisConfig,
) -> Result<Option<ParcelAscentAnalysis>> {
    match parcel_profile::lift_parcel(parcel, snd, config) {
        Ok(anal) => Ok(Some(anal)),
        Err(AnalysisError::DegenerateProfile) => Ok(None),
        Err(err) => Err(err),
    }
}

fn shear_magnitude_or_zero(
    snd: &Sounding,
    bottom_agl: Meters,
    top_agl: Meters,
    flags: &mut ConfidenceFlags,
) -> MetersPSec {
    let layer = if bottom_agl.unpack() <= 0.0 {
        layers::layer_agl(snd, top_agl)
    } else {
        layers::height_layer(snd, bottom_agl, top_agl)
    };

    match layer.and_then(|lyr| wind::bulk_shear_magnitude(&lyr)) {
        Ok(shear) => shear,
        Err(_) => {
            flags.low_resolution_kinematics = true;
            MetersPSec(0.0)
        }
    }
}

fn helicity_or_zero(
    snd: &Sounding,
    top_agl: Meters,
    storm_motion: metfor::WindUV<MetersPSec>,
    config: &AnalysisConfig,
    flags: &mut ConfidenceFlags,
) -> IntHelicityM2pS2 {
    match layers::layer_agl(snd, top_agl)
        .and_then(|lyr| wind::sr_helicity(&lyr, storm_motion, snd))
    {
        Ok((srh, levels_used)) => {
            if levels_used < config.min_kinematic_levels {
                flags.low_resolution_kinematics = true;
            }
            srh
        }
        Err(_) => {
            flags.low_resolution_kinematics = true;
            IntHelicityM2pS2(0.0)
        }
    }
}
