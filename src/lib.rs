#![warn(missing_docs)]
//! Functions and data types for diagnosing the severe thunderstorm potential of an
//! atmospheric sounding.
//!
//! The crate takes a vertical profile of the atmosphere ([Sounding]) and, optionally, a local
//! grid of equivalent potential temperature around the point, and produces a
//! [DiagnosticResult]: a convective mode, a support tier, and a list of tagged reasons storms
//! may fail to materialize. The pieces that feed that diagnosis (parcel ascents, bulk shear,
//! Bunkers storm motion, storm relative helicity, the composite parameters, and boundary
//! detection) are all usable on their own.
//!
//! Every analysis call is a pure function of its inputs: no state is kept between calls, and
//! nothing here touches the clock, a random number generator, or any I/O, so calls may be
//! fanned out across threads freely.
//!
//! ```rust
//! use convective_analysis::{analyze, Sounding};
//! use metfor::{Celsius, HectoPascal, Knots, Meters, WindSpdDir};
//! use optional::some;
//!
//! // (pressure, height m AGL, T, Td, wind direction, wind speed kt)
//! let raw = vec![
//!     (1000.0, 0.0, 30.0, 24.0, 150.0, 15.0),
//!     (925.0, 700.0, 24.0, 18.0, 180.0, 25.0),
//!     (850.0, 1400.0, 19.0, 14.0, 200.0, 35.0),
//!     (700.0, 3000.0, 8.0, 2.0, 230.0, 45.0),
//!     (500.0, 5800.0, -16.0, -25.0, 250.0, 55.0),
//!     (300.0, 9200.0, -44.0, -55.0, 260.0, 75.0),
//! ];
//!
//! let snd = Sounding::new()
//!     .with_pressure_profile(raw.iter().map(|r| some(HectoPascal(r.0))).collect())
//!     .with_height_profile(raw.iter().map(|r| some(Meters(r.1))).collect())
//!     .with_temperature_profile(raw.iter().map(|r| some(Celsius(r.2))).collect())
//!     .with_dew_point_profile(raw.iter().map(|r| some(Celsius(r.3))).collect())
//!     .with_wind_profile(
//!         raw.iter()
//!             .map(|r| some(WindSpdDir { direction: r.4, speed: Knots(r.5) }))
//!             .collect(),
//!     );
//!
//! let diagnosis = analyze(&snd, None).unwrap();
//! println!("{} with {} support", diagnosis.mode, diagnosis.support);
//! assert!(diagnosis.ingredients.mlcape > metfor::JpKg(0.0));
//! ```

//
// API
//
pub use crate::{
    analysis::{analyze, analyze_with_config},
    boundary::{detect_boundary, BoundarySide, BoundarySignal, ThetaEGrid, ThetaESample},
    composite::{
        craven_brooks, energy_helicity_index, significant_hail_parameter,
        significant_tornado_parameter, supercell_composite, vorticity_generation_parameter,
        CompositeIndexes, CRAVEN_BROOKS_SIGNIFICANT, EHI_SIGNIFICANT, SCP_SIGNIFICANT,
        SCP_SUPERCELL, SHIP_SIGNIFICANT, STP_SIGNIFICANT, VGP_SIGNIFICANT,
    },
    config::AnalysisConfig,
    diagnosis::{
        classify, ConfidenceFlags, ConvectiveMode, DiagnosticResult, FailMode, Ingredients,
        Note, SupportLevel,
    },
    error::{AnalysisError, Result},
    indexes::{low_level_lapse_rate, mid_level_lapse_rate, precipitable_water, surface_rh},
    interpolation::linear_interpolate_sounding,
    layers::{height_layer, layer_agl, pressure_layer, Layer},
    levels::{freezing_level, height_level, Level},
    parcel::{mixed_layer_parcel, most_unstable_parcel, surface_parcel, Parcel, ParcelKind},
    parcel_profile::{lift_parcel, ParcelAscentAnalysis, ParcelProfile},
    sounding::{DataRow, Sounding, StationInfo},
    validate::{level_confidence, validate, LevelConfidence},
    wind::{
        bulk_shear, bulk_shear_magnitude, bunkers_storm_motion, mean_wind, sr_helicity,
        StormMotion,
    },
};

//
// Modules
//
mod analysis;
mod boundary;
mod composite;
mod config;
mod diagnosis;
mod error;
mod indexes;
mod interpolation;
mod layers;
mod levels;
mod parcel;
mod parcel_profile;
mod sounding;
mod validate;
mod wind;
