//! Create and analyze a profile from lifting a parcel through its environment.
use crate::{
    config::AnalysisConfig,
    error::Result,
    parcel::Parcel,
    sounding::Sounding,
};
use metfor::{Celsius, CelsiusDiff, HectoPascal, JpKg, Meters};
use optional::Optioned;

pub(crate) mod lift;

/// Hold profiles for a parcel and its environment.
///
/// The vectors are parallel and ordered bottom up. Temperatures are virtual temperatures, since
/// the profile exists to measure buoyancy.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelProfile {
    /// Pressure profile
    pub pressure: Vec<HectoPascal>,
    /// Height profile, meters AGL
    pub height: Vec<Meters>,
    /// Parcel virtual temperature profile
    pub parcel_t: Vec<Celsius>,
    /// Environment virtual temperature profile
    pub environment_t: Vec<Celsius>,
}

/// The result of lifting a parcel and comparing it to its environment.
///
/// Invariants: CAPE is never negative, CIN is never positive, and the LCL height is never below
/// ground.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelAscentAnalysis {
    // The original parcel and the profile traced by lifting it.
    parcel: Parcel,
    profile: ParcelProfile,

    // Indexes from the analysis.
    cape: JpKg,
    cin: JpKg,
    lcl_height_agl: Meters,
    lcl_pressure: HectoPascal,
    lcl_temperature: Celsius,
    lfc_pressure: Optioned<HectoPascal>,
    el_pressure: Optioned<HectoPascal>,
    lifted_index: Optioned<CelsiusDiff>,
    insufficient_extent: bool,
}

impl ParcelAscentAnalysis {
    /// Get the CAPE.
    pub fn cape(&self) -> JpKg {
        self.cape
    }

    /// Get the CIN.
    pub fn cin(&self) -> JpKg {
        self.cin
    }

    /// Get the LCL height AGL.
    pub fn lcl_height_agl(&self) -> Meters {
        self.lcl_height_agl
    }

    /// Get the LCL pressure level.
    pub fn lcl_pressure(&self) -> HectoPascal {
        self.lcl_pressure
    }

    /// Get the temperature at the LCL.
    pub fn lcl_temperature(&self) -> Celsius {
        self.lcl_temperature
    }

    /// Get the pressure at the level of free convection.
    pub fn lfc_pressure(&self) -> Optioned<HectoPascal> {
        self.lfc_pressure
    }

    /// Get the pressure at the equilibrium level.
    pub fn el_pressure(&self) -> Optioned<HectoPascal> {
        self.el_pressure
    }

    /// Get the lifted index, environment minus parcel temperature at 500 hPa.
    ///
    /// Negative values mean the parcel is warmer than its environment there.
    pub fn lifted_index(&self) -> Optioned<CelsiusDiff> {
        self.lifted_index
    }

    /// True when the profile top is below the parcel's LCL, so moist ascent could not be
    /// evaluated and the CAPE and CIN were reported as zero.
    pub fn insufficient_extent(&self) -> bool {
        self.insufficient_extent
    }

    /// Retrieve the profile traced out by the parcel.
    #[inline]
    pub fn profile(&self) -> &ParcelProfile {
        &self.profile
    }

    /// Retrieve the original parcel.
    #[inline]
    pub fn parcel(&self) -> &Parcel {
        &self.parcel
    }
}

/// Lift a parcel for a convective parcel analysis.
///
/// The parcel is lifted dry adiabatically from its starting level to its LCL (Bolton 1980) and
/// moist adiabatically from there to the top of the profile, on a fixed pressure grid taken
/// from the configuration. Buoyancy is accumulated with the trapezoid rule: positive area is
/// CAPE, negative area below the level of free convection is CIN. Everything is done with
/// virtual temperatures.
pub fn lift_parcel(
    parcel: Parcel,
    snd: &Sounding,
    config: &AnalysisConfig,
) -> Result<ParcelAscentAnalysis> {
    lift::lift_parcel(parcel, snd, config)
}
