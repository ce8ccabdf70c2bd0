//! Indexes of the whole sounding that are not tied to a particular parcel analysis.
use crate::{
    error::{AnalysisError, Result},
    layers,
    sounding::Sounding,
};
use itertools::{izip, Itertools};
use metfor::{mixing_ratio, Meters, Mm, Quantity};

/// Precipitable water (mm)
#[inline]
pub fn precipitable_water(snd: &Sounding) -> Result<Mm> {
    let p_profile = snd.pressure_profile();
    let dp_profile = snd.dew_point_profile();

    if p_profile.is_empty() || dp_profile.is_empty() {
        return Err(AnalysisError::MissingProfile);
    }

    let integrated_mw = izip!(p_profile, dp_profile)
        // Remove levels with missing data
        .filter(|(p, dp)| p.is_some() && dp.is_some())
        // Unpack from the Optioned type
        .map(|(p, dp)| (p.unpack(), dp.unpack()))
        // Convert dew point to mixing ratio, removing failed levels.
        .filter_map(|(p, dp)| mixing_ratio(dp, p).map(|mw| (p, mw)))
        // View them as pairs for integration with the trapezoid method
        .tuple_windows::<(_, _)>()
        // Do the sum for integrating
        .fold(0.0, |mut acc_mw, ((p0, mw0), (p1, mw1))| {
            let dp = p0 - p1;
            acc_mw += (mw0 + mw1) * dp.unpack();

            acc_mw
        });

    Ok(Mm(integrated_mw / 9.81 / 997.0 * 100_000.0 / 2.0))
}

/// Approximate surface relative humidity as a fraction from 0 to 1.
#[inline]
pub fn surface_rh(snd: &Sounding) -> Result<f64> {
    let row = snd
        .surface_as_data_row()
        .ok_or(AnalysisError::NotEnoughData)?;

    let t = row.temperature.ok_or(AnalysisError::MissingValue)?;
    let dp = row.dew_point.ok_or(AnalysisError::MissingValue)?;

    metfor::rh(t, dp).ok_or(AnalysisError::MetForError)
}

/// The 700-500 hPa temperature lapse rate in C/km, positive when temperature falls with
/// height. Steep values favor large hail.
#[inline]
pub fn mid_level_lapse_rate(snd: &Sounding) -> Result<f64> {
    layers::pressure_layer(snd, metfor::HectoPascal(700.0), metfor::HectoPascal(500.0))
        .and_then(|lyr| lyr.lapse_rate())
}

/// The surface to 3 km temperature lapse rate in C/km.
#[inline]
pub fn low_level_lapse_rate(snd: &Sounding) -> Result<f64> {
    layers::layer_agl(snd, Meters(3000.0)).and_then(|lyr| lyr.lapse_rate())
}

#[cfg(test)]
mod test {
    use super::*;
    use metfor::{Celsius, HectoPascal};
    use optional::some;

    fn make_test_sounding() -> Sounding {
        let p = vec![
            some(HectoPascal(1000.0)),
            some(HectoPascal(850.0)),
            some(HectoPascal(700.0)),
            some(HectoPascal(500.0)),
        ];
        let t = vec![
            some(Celsius(25.0)),
            some(Celsius(15.0)),
            some(Celsius(5.0)),
            some(Celsius(-12.0)),
        ];
        let dp = vec![
            some(Celsius(20.0)),
            some(Celsius(12.0)),
            some(Celsius(0.0)),
            some(Celsius(-20.0)),
        ];
        let h = vec![
            some(Meters(0.0)),
            some(Meters(1450.0)),
            some(Meters(3050.0)),
            some(Meters(5750.0)),
        ];

        Sounding::new()
            .with_pressure_profile(p)
            .with_temperature_profile(t)
            .with_dew_point_profile(dp)
            .with_height_profile(h)
    }

    #[test]
    fn test_precipitable_water_is_positive_and_plausible() {
        let snd = make_test_sounding();
        let pw = precipitable_water(&snd).unwrap();
        assert!(pw > Mm(10.0));
        assert!(pw < Mm(80.0));
    }

    #[test]
    fn test_surface_rh() {
        let snd = make_test_sounding();
        let rh = surface_rh(&snd).unwrap();
        // 25 C with a 20 C dew point is about 74% relative humidity.
        assert!(rh > 0.65 && rh < 0.85);
    }

    #[test]
    fn test_mid_level_lapse_rate() {
        let snd = make_test_sounding();
        let lapse = mid_level_lapse_rate(&snd).unwrap();
        // 17 C over 2.7 km.
        assert!((lapse - 6.3).abs() < 0.1);
    }
}
