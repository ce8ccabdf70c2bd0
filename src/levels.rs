//! Find significant levels in a sounding, such as the level at a target altitude or the
//! freezing level. Levels related to parcel analysis live in the `parcel_profile` module.
use crate::{
    error::{AnalysisError, Result},
    interpolation::{linear_interp, linear_interpolate_sounding},
    sounding::{DataRow, Sounding},
};
use itertools::{izip, Itertools};
use metfor::{Meters, FREEZING};

/// A level in the atmosphere is described by a `DataRow` from a sounding.
pub type Level = DataRow;

/// Find the level at a target height above ground level.
pub fn height_level(tgt_height: Meters, snd: &Sounding) -> Result<Level> {
    izip!(snd.pressure_profile(), snd.height_profile())
        // Remove levels with missing data and unpack from the `Optioned` type.
        .filter_map(|(p, h)| {
            if p.is_some() && h.is_some() {
                Some((p.unpack(), h.unpack()))
            } else {
                None
            }
        })
        // Look at the levels two at a time to find a bracket.
        .tuple_windows::<(_, _)>()
        .find(|&((_, h0), (_, h1))| h0 <= tgt_height && tgt_height <= h1)
        .ok_or(AnalysisError::NotEnoughData)
        .and_then(|((p0, h0), (p1, h1))| {
            if h0 == h1 {
                return Err(AnalysisError::InvalidInput);
            }
            let tgt_p = linear_interp(tgt_height, h0, h1, p0, p1);
            linear_interpolate_sounding(snd, tgt_p)
        })
}

/// Find the lowest level where the temperature crosses from above to below freezing.
///
/// If the surface is already below freezing, the surface level is returned.
pub fn freezing_level(snd: &Sounding) -> Result<Level> {
    let p_profile = snd.pressure_profile();
    let t_profile = snd.temperature_profile();

    if p_profile.is_empty() || t_profile.is_empty() {
        return Err(AnalysisError::MissingProfile);
    }

    let mut iter = izip!(p_profile, t_profile).filter_map(|(p, t)| {
        if p.is_some() && t.is_some() {
            Some((p.unpack(), t.unpack()))
        } else {
            None
        }
    });

    let (sfc_p, sfc_t) = iter.next().ok_or(AnalysisError::NotEnoughData)?;

    if sfc_t <= FREEZING {
        return linear_interpolate_sounding(snd, sfc_p);
    }

    std::iter::once((sfc_p, sfc_t))
        .chain(iter)
        .tuple_windows::<(_, _)>()
        .find(|&((_, t0), (_, t1))| t0 > FREEZING && t1 <= FREEZING)
        .map(|((p0, t0), (p1, t1))| linear_interp(FREEZING, t0, t1, p0, p1))
        .ok_or(AnalysisError::NotEnoughData)
        .and_then(|tgt_p| linear_interpolate_sounding(snd, tgt_p))
}

#[cfg(test)]
mod test {
    use super::*;
    use metfor::{Celsius, HectoPascal, Quantity};
    use optional::some;

    fn make_test_sounding() -> Sounding {
        let p = vec![
            some(HectoPascal(1000.0)),
            some(HectoPascal(850.0)),
            some(HectoPascal(700.0)),
            some(HectoPascal(500.0)),
        ];
        let t = vec![
            some(Celsius(20.0)),
            some(Celsius(10.0)),
            some(Celsius(0.0)),
            some(Celsius(-18.0)),
        ];
        let h = vec![
            some(Meters(0.0)),
            some(Meters(1450.0)),
            some(Meters(3000.0)),
            some(Meters(5700.0)),
        ];

        Sounding::new()
            .with_pressure_profile(p)
            .with_temperature_profile(t)
            .with_height_profile(h)
    }

    #[test]
    fn test_height_level() {
        let snd = make_test_sounding();
        let lvl = height_level(Meters(3000.0), &snd).unwrap();
        assert!(
            (lvl.pressure.unwrap() - HectoPascal(700.0))
                .unpack()
                .abs()
                < 1.0e-6
        );

        let lvl = height_level(Meters(1000.0), &snd).unwrap();
        let p = lvl.pressure.unwrap();
        assert!(p < HectoPascal(1000.0) && p > HectoPascal(850.0));
    }

    #[test]
    fn test_height_level_above_profile_top_is_an_error() {
        let snd = make_test_sounding();
        assert!(height_level(Meters(10_000.0), &snd).is_err());
    }

    #[test]
    fn test_freezing_level() {
        let snd = make_test_sounding();
        let lvl = freezing_level(&snd).unwrap();
        assert!(
            (lvl.pressure.unwrap() - HectoPascal(700.0))
                .unpack()
                .abs()
                < 1.0e-6
        );
        assert!((lvl.height.unwrap() - Meters(3000.0)).unpack().abs() < 1.0);
    }
}
