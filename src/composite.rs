//! Composite severe weather parameters.
//!
//! These are pure arithmetic combinations of instability and kinematic ingredients. Every
//! factor that could go negative is clamped to zero before multiplying, so a hostile term can
//! gate a parameter to zero but can never flip the sign of the product. None of these return
//! an error: when the gating ingredients are missing or zero the parameter is defined as zero.
//!
//! Clipping policy: the deep shear term in SCP, STP, and SHIP is capped at 1.5 and zeroed
//! below a low cutoff (5 m/s for SCP, 6 m/s for STP); the STP LCL and CIN terms are clipped
//! to [0, 1]; the SHIP mixing ratio term is capped at 1.5. The CAPE and helicity terms carry
//! generous caps (6 and 10 for SCP, 4 and 4 for STP) that keep a runaway single ingredient
//! from swamping the product while leaving genuinely extreme environments distinguishable.
use metfor::{IntHelicityM2pS2, JpKg, Meters, MetersPSec, Quantity};

/// SCP at or above this supports supercells.
pub const SCP_SUPERCELL: f64 = 1.0;
/// SCP above this marks a significant supercell environment.
pub const SCP_SIGNIFICANT: f64 = 4.0;
/// STP at or above this marks significant tornado potential.
pub const STP_SIGNIFICANT: f64 = 1.0;
/// EHI at or above this supports tornadoes.
pub const EHI_SIGNIFICANT: f64 = 1.0;
/// SHIP at or above this supports significant (2 inch or larger) hail.
pub const SHIP_SIGNIFICANT: f64 = 1.0;
/// VGP at or above this supports tornadoes.
pub const VGP_SIGNIFICANT: f64 = 0.2;
/// Craven-Brooks product above this supports significant severe weather.
pub const CRAVEN_BROOKS_SIGNIFICANT: f64 = 20_000.0;

/// The full set of composite parameters for one analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompositeIndexes {
    /// Supercell composite parameter.
    pub scp: f64,
    /// Significant tornado parameter, fixed layer.
    pub stp: f64,
    /// Energy helicity index over 0-1 km.
    pub ehi_01: f64,
    /// Energy helicity index over 0-3 km.
    pub ehi_03: f64,
    /// Significant hail parameter.
    pub ship: f64,
    /// Vorticity generation parameter.
    pub vgp: f64,
    /// Craven-Brooks significant severe product, J/kg * m/s.
    pub craven_brooks: f64,
}

/// Supercell composite parameter.
///
/// SCP = (MUCAPE / 1000) * (SRH03 / 50) * (shear06 / 20)
pub fn supercell_composite(
    mucape: JpKg,
    srh_03: IntHelicityM2pS2,
    shear_06: MetersPSec,
) -> f64 {
    let cape = mucape.unpack();
    let srh = srh_03.unpack();
    let shear = shear_06.unpack();

    if cape < 100.0 || srh <= 0.0 || shear < 5.0 {
        return 0.0;
    }

    let cape_term = f64::min(cape / 1000.0, 6.0);
    let srh_term = f64::min(srh / 50.0, 10.0);
    let shear_term = f64::min(shear / 20.0, 1.5);

    cape_term * srh_term * shear_term
}

/// Significant tornado parameter, fixed layer formulation.
///
/// STP = (MLCAPE / 1500) * lcl_term * (SRH01 / 150) * (shear06 / 20) * cin_term
///
/// The LCL term falls linearly from 1 at 1000 m to 0 at 2000 m; the CIN term falls linearly
/// from 1 at -50 J/kg to 0 at -200 J/kg.
pub fn significant_tornado_parameter(
    mlcape: JpKg,
    ml_lcl_agl: Meters,
    srh_01: IntHelicityM2pS2,
    shear_06: MetersPSec,
    mlcin: JpKg,
) -> f64 {
    let cape = mlcape.unpack();
    let srh = srh_01.unpack();
    let shear = shear_06.unpack();
    let lcl = ml_lcl_agl.unpack();
    let cin = mlcin.unpack();

    if cape < 100.0 || srh <= 0.0 || shear < 6.0 {
        return 0.0;
    }

    let cape_term = f64::min(cape / 1500.0, 4.0);
    let srh_term = f64::min(srh / 150.0, 4.0);
    let shear_term = f64::min(shear / 20.0, 1.5);
    let lcl_term = f64::min(f64::max((2000.0 - lcl) / 1000.0, 0.0), 1.0);
    let cin_term = f64::min(f64::max((200.0 + cin) / 150.0, 0.0), 1.0);

    cape_term * lcl_term * srh_term * shear_term * cin_term
}

/// Energy helicity index.
///
/// EHI = CAPE * SRH / 160,000. Zero whenever CAPE is below 100 J/kg or the helicity is not
/// positive, so there is never a division hazard and shear alone can never produce a signal.
pub fn energy_helicity_index(cape: JpKg, srh: IntHelicityM2pS2) -> f64 {
    let cape = cape.unpack();
    let srh = srh.unpack();

    if cape < 100.0 || srh <= 0.0 {
        return 0.0;
    }

    cape * srh / 160_000.0
}

/// Significant hail parameter.
///
/// SHIP = (MUCAPE / 1500) * (parcel mixing ratio / 13.6 g/kg) * (lapse 700-500 / 7) *
/// (shear06 / 20), scaled down when the freezing level is below 2400 m AGL.
///
/// `mu_mixing_ratio` is the most unstable parcel mixing ratio in kg/kg.
pub fn significant_hail_parameter(
    mucape: JpKg,
    mu_mixing_ratio: f64,
    lapse_700_500: f64,
    shear_06: MetersPSec,
    freezing_level_agl: Meters,
) -> f64 {
    let cape = mucape.unpack();
    let shear = shear_06.unpack();
    let fzl = freezing_level_agl.unpack();

    if cape < 100.0 {
        return 0.0;
    }

    let mw_term = f64::min(mu_mixing_ratio * 1000.0 / 13.6, 1.5);
    let lapse_term = f64::max(lapse_700_500 / 7.0, 0.0);
    let shear_term = f64::min(f64::max(shear, 0.0) / 20.0, 1.5);

    let mut ship = (cape / 1500.0) * mw_term * lapse_term * shear_term;

    if fzl < 2400.0 {
        ship *= f64::max(fzl, 0.0) / 2400.0;
    }

    ship
}

/// Vorticity generation parameter.
///
/// VGP = S * sqrt(CAPE), where S is the mean 0-6 km shear in 1/s (the bulk shear magnitude
/// divided by the layer depth).
pub fn vorticity_generation_parameter(shear_06: MetersPSec, cape: JpKg) -> f64 {
    const LAYER_DEPTH_M: f64 = 6000.0;

    let cape = cape.unpack();
    let shear = shear_06.unpack();

    if cape <= 0.0 || shear <= 0.0 {
        return 0.0;
    }

    shear / LAYER_DEPTH_M * cape.sqrt()
}

/// Craven-Brooks significant severe parameter, J/kg * m/s.
///
/// The simple product of mixed layer CAPE and the 0-6 km bulk shear.
pub fn craven_brooks(mlcape: JpKg, shear_06: MetersPSec) -> f64 {
    let cape = f64::max(mlcape.unpack(), 0.0);
    let shear = f64::max(shear_06.unpack(), 0.0);

    cape * shear
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_volatile_environment_crosses_thresholds() {
        let scp = supercell_composite(
            JpKg(3000.0),
            IntHelicityM2pS2(400.0),
            MetersPSec(25.0),
        );
        // (3000/1000) * (400/50) * (25/20) = 30
        assert!((scp - 30.0).abs() < 1.0e-9);
        assert!(scp > SCP_SIGNIFICANT);

        let stp = significant_tornado_parameter(
            JpKg(3000.0),
            Meters(700.0),
            IntHelicityM2pS2(300.0),
            MetersPSec(25.0),
            JpKg(-30.0),
        );
        // (3000/1500) * 1.0 * (300/150) * 1.25 * 1.0 = 5
        assert!((stp - 5.0).abs() < 1.0e-9);
        assert!(stp >= STP_SIGNIFICANT);
    }

    #[test]
    fn test_no_instability_gates_everything_to_zero() {
        let cape = JpKg(0.0);
        let big_srh = IntHelicityM2pS2(500.0);
        let big_shear = MetersPSec(30.0);

        assert_eq!(supercell_composite(cape, big_srh, big_shear), 0.0);
        assert_eq!(
            significant_tornado_parameter(cape, Meters(500.0), big_srh, big_shear, JpKg(0.0)),
            0.0
        );
        assert_eq!(energy_helicity_index(cape, big_srh), 0.0);
        assert_eq!(
            significant_hail_parameter(cape, 0.014, 7.5, big_shear, Meters(3500.0)),
            0.0
        );
        assert_eq!(vorticity_generation_parameter(big_shear, cape), 0.0);
        assert_eq!(craven_brooks(cape, big_shear), 0.0);
    }

    #[test]
    fn test_negative_terms_never_flip_the_sign() {
        // A very high LCL and deep CIN zero the STP rather than making it negative.
        let stp = significant_tornado_parameter(
            JpKg(2000.0),
            Meters(3000.0),
            IntHelicityM2pS2(200.0),
            MetersPSec(25.0),
            JpKg(-50.0),
        );
        assert_eq!(stp, 0.0);

        let stp = significant_tornado_parameter(
            JpKg(2000.0),
            Meters(900.0),
            IntHelicityM2pS2(200.0),
            MetersPSec(25.0),
            JpKg(-400.0),
        );
        assert_eq!(stp, 0.0);
    }

    #[test]
    fn test_composites_are_monotone_in_cape() {
        let lo = supercell_composite(JpKg(1000.0), IntHelicityM2pS2(200.0), MetersPSec(20.0));
        let hi = supercell_composite(JpKg(2000.0), IntHelicityM2pS2(200.0), MetersPSec(20.0));
        assert!(hi >= lo);

        let lo = significant_tornado_parameter(
            JpKg(1000.0),
            Meters(800.0),
            IntHelicityM2pS2(150.0),
            MetersPSec(20.0),
            JpKg(-20.0),
        );
        let hi = significant_tornado_parameter(
            JpKg(2500.0),
            Meters(800.0),
            IntHelicityM2pS2(150.0),
            MetersPSec(20.0),
            JpKg(-20.0),
        );
        assert!(hi >= lo);

        let lo = energy_helicity_index(JpKg(1000.0), IntHelicityM2pS2(150.0));
        let hi = energy_helicity_index(JpKg(2000.0), IntHelicityM2pS2(150.0));
        assert!(hi >= lo);
    }

    #[test]
    fn test_vgp_scenario() {
        // 25 m/s over 6 km with 3000 J/kg is comfortably past the 0.2 threshold.
        let vgp = vorticity_generation_parameter(MetersPSec(25.0), JpKg(3000.0));
        assert!(vgp > VGP_SIGNIFICANT);

        let weak = vorticity_generation_parameter(MetersPSec(10.0), JpKg(300.0));
        assert!(weak < VGP_SIGNIFICANT);
    }

    #[test]
    fn test_craven_brooks_scenario() {
        assert!(craven_brooks(JpKg(2500.0), MetersPSec(20.0)) > CRAVEN_BROOKS_SIGNIFICANT);
        assert!(craven_brooks(JpKg(500.0), MetersPSec(10.0)) < CRAVEN_BROOKS_SIGNIFICANT);
    }
}
