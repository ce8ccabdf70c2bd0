//! Structural checks on a sounding before analysis.
use crate::{
    error::{AnalysisError, Result},
    sounding::Sounding,
};
use itertools::Itertools;
use metfor::{HectoPascal, Quantity};

/// Check the structural invariants of a sounding.
///
/// A valid sounding has at least two levels, strictly decreasing pressure from the bottom up,
/// and a surface level with pressure, temperature, and dew point present.
pub fn validate(snd: &Sounding) -> Result<()> {
    let pressure = snd.pressure_profile();

    if pressure.iter().filter(|p| p.is_some()).count() < 2 {
        return Err(AnalysisError::InvalidProfile("fewer than two levels"));
    }

    let monotonic = pressure
        .iter()
        .filter_map(|p| p.into_option())
        .tuple_windows::<(_, _)>()
        .all(|(p0, p1)| p0 > p1);

    if !monotonic {
        return Err(AnalysisError::InvalidProfile(
            "pressure not strictly decreasing",
        ));
    }

    let surface = snd
        .surface_as_data_row()
        .ok_or(AnalysisError::InvalidProfile("no surface level"))?;

    if surface.pressure.is_none() || surface.temperature.is_none() || surface.dew_point.is_none()
    {
        return Err(AnalysisError::InvalidProfile("surface level incomplete"));
    }

    Ok(())
}

/// Whether the mandatory levels used by the analysis are native to the profile.
///
/// Values computed at interpolated levels are still used, but the narrative hedges when a
/// mandatory level had to be manufactured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfidence {
    /// 850 hPa was a native level.
    pub native_850: bool,
    /// 700 hPa was a native level.
    pub native_700: bool,
    /// 500 hPa was a native level.
    pub native_500: bool,
}

impl LevelConfidence {
    /// True when every mandatory level is native.
    pub fn all_native(&self) -> bool {
        self.native_850 && self.native_700 && self.native_500
    }
}

/// Report which mandatory levels are native to the profile.
pub fn level_confidence(snd: &Sounding) -> LevelConfidence {
    LevelConfidence {
        native_850: has_native_level(snd, HectoPascal(850.0)),
        native_700: has_native_level(snd, HectoPascal(700.0)),
        native_500: has_native_level(snd, HectoPascal(500.0)),
    }
}

fn has_native_level(snd: &Sounding, tgt_p: HectoPascal) -> bool {
    snd.pressure_profile()
        .iter()
        .filter_map(|p| p.into_option())
        .any(|p| (p - tgt_p).unpack().abs() < 0.1)
}

#[cfg(test)]
mod test {
    use super::*;
    use metfor::Celsius;
    use optional::some;

    fn valid_sounding() -> Sounding {
        let p = vec![
            some(HectoPascal(1000.0)),
            some(HectoPascal(850.0)),
            some(HectoPascal(700.0)),
        ];
        let t = vec![
            some(Celsius(20.0)),
            some(Celsius(10.0)),
            some(Celsius(0.0)),
        ];
        let dp = vec![
            some(Celsius(15.0)),
            some(Celsius(5.0)),
            some(Celsius(-5.0)),
        ];

        Sounding::new()
            .with_pressure_profile(p)
            .with_temperature_profile(t)
            .with_dew_point_profile(dp)
    }

    #[test]
    fn test_valid_sounding_passes() {
        assert!(validate(&valid_sounding()).is_ok());
    }

    #[test]
    fn test_non_monotonic_pressure_fails() {
        let p = vec![
            some(HectoPascal(1000.0)),
            some(HectoPascal(700.0)),
            some(HectoPascal(850.0)),
        ];
        let snd = valid_sounding().with_pressure_profile(p);

        match validate(&snd) {
            Err(AnalysisError::InvalidProfile(_)) => {}
            other => panic!("expected InvalidProfile, got {:?}", other),
        }
    }

    #[test]
    fn test_too_few_levels_fails() {
        let snd = valid_sounding().with_pressure_profile(vec![some(HectoPascal(1000.0))]);
        assert!(validate(&snd).is_err());
    }

    #[test]
    fn test_incomplete_surface_fails() {
        let snd = valid_sounding().with_dew_point_profile(vec![
            optional::none(),
            some(Celsius(5.0)),
            some(Celsius(-5.0)),
        ]);
        assert!(validate(&snd).is_err());
    }

    #[test]
    fn test_level_confidence() {
        let confidence = level_confidence(&valid_sounding());
        assert!(confidence.native_850);
        assert!(confidence.native_700);
        assert!(!confidence.native_500);
        assert!(!confidence.all_native());
    }
}
