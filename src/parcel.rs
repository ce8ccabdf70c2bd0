//! Choose the starting properties of an air parcel for convective analysis.
use crate::{
    config::AnalysisConfig,
    error::{AnalysisError, Result},
    sounding::Sounding,
};
use itertools::izip;
use metfor::{self, Celsius, HectoPascal, Kelvin, Quantity};

/// Variables defining a parcel as used in parcel analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parcel {
    /// Temperature in C
    pub temperature: Celsius,
    /// Pressure in hPa
    pub pressure: HectoPascal,
    /// Dew point in C
    pub dew_point: Celsius,
    /// The convention that chose this parcel's starting properties.
    pub kind: ParcelKind,
}

/// The convention used to choose a rising parcel's starting properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParcelKind {
    /// Surface values.
    Surface,
    /// Mean of a layer above the surface, usually the lowest 100 hPa.
    MixedLayer,
    /// The level with the maximum equivalent potential temperature, usually within the lowest
    /// 300 hPa.
    MostUnstable,
}

impl Parcel {
    /// Get the potential temperature of the parcel.
    pub fn theta(&self) -> Kelvin {
        metfor::potential_temperature(self.pressure, self.temperature)
    }

    /// Get the equivalent potential temperature of the parcel.
    pub fn theta_e(&self) -> Result<Kelvin> {
        metfor::equiv_pot_temperature(self.temperature, self.dew_point, self.pressure)
            .ok_or(AnalysisError::MetForError)
    }

    /// Get the mixing ratio of the parcel in kg/kg.
    pub fn mixing_ratio(&self) -> Result<f64> {
        metfor::mixing_ratio(self.dew_point, self.pressure).ok_or(AnalysisError::MetForError)
    }

    /// Get the virtual temperature of the parcel.
    pub fn virtual_temperature(&self) -> Result<Kelvin> {
        metfor::virtual_temperature(self.temperature, self.dew_point, self.pressure)
            .ok_or(AnalysisError::MetForError)
    }
}

/// Get a parcel with the surface values.
pub fn surface_parcel(snd: &Sounding) -> Result<Parcel> {
    let row = snd
        .surface_as_data_row()
        .ok_or(AnalysisError::NotEnoughData)?;

    let pressure = row.pressure.ok_or(AnalysisError::MissingValue)?;
    let temperature = row.temperature.ok_or(AnalysisError::MissingValue)?;
    let dew_point = row.dew_point.ok_or(AnalysisError::MissingValue)?;

    Ok(Parcel {
        temperature,
        pressure,
        dew_point,
        kind: ParcelKind::Surface,
    })
}

/// Create a mixed layer parcel.
///
/// The values in this parcel are the simple mean of the lowest layer of the sounding, with the
/// depth taken from the configuration (100 hPa by default).
pub fn mixed_layer_parcel(snd: &Sounding, config: &AnalysisConfig) -> Result<Parcel> {
    let press = snd.pressure_profile();
    let t = snd.temperature_profile();
    let dp = snd.dew_point_profile();

    if press.is_empty() || t.is_empty() || dp.is_empty() {
        return Err(AnalysisError::MissingProfile);
    }

    let bottom_p = press
        .iter()
        .filter_map(|p| p.into_option())
        .next()
        .ok_or(AnalysisError::NotEnoughData)?;

    let (sum_p, sum_t, sum_dp, count) = izip!(press, t, dp)
        // Remove levels with missing data and unpack the rest.
        .filter_map(|(p, t, dp)| {
            if p.is_some() && t.is_some() && dp.is_some() {
                Some((p.unpack(), t.unpack(), dp.unpack()))
            } else {
                None
            }
        })
        // Only use the layer to be mixed.
        .take_while(|&(p, _, _)| p >= bottom_p - config.mixed_layer_depth)
        // Sum for the mean.
        .fold((0.0f64, 0.0f64, 0.0f64, 0.0f64), |acc, (p, t, dp)| {
            let (sum_p, sum_t, sum_dp, count) = acc;
            (
                sum_p + p.unpack(),
                sum_t + t.unpack(),
                sum_dp + dp.unpack(),
                count + 1.0,
            )
        });

    if count == 0.0 {
        return Err(AnalysisError::NotEnoughData);
    }

    Ok(Parcel {
        temperature: Celsius(sum_t / count),
        pressure: HectoPascal(sum_p / count),
        dew_point: Celsius(sum_dp / count),
        kind: ParcelKind::MixedLayer,
    })
}

/// Get the most unstable parcel.
///
/// This is the parcel with the highest equivalent potential temperature in the lowest portion
/// of the sounding, 300 hPa deep by default. The sounding's theta-e profile is used when
/// present, otherwise theta-e is computed level by level.
pub fn most_unstable_parcel(snd: &Sounding, config: &AnalysisConfig) -> Result<Parcel> {
    let press = snd.pressure_profile();
    let t = snd.temperature_profile();
    let dp = snd.dew_point_profile();
    let theta_e = snd.theta_e_profile();

    if press.is_empty() || t.is_empty() || dp.is_empty() {
        return Err(AnalysisError::MissingProfile);
    }

    let bottom_p = press
        .iter()
        .filter_map(|p| p.into_option())
        .next()
        .ok_or(AnalysisError::NotEnoughData)?;

    let top_p = bottom_p - config.most_unstable_depth;

    let mut best: Option<(Kelvin, Parcel)> = None;
    for (i, (p_opt, t_opt, dp_opt)) in izip!(press, t, dp).enumerate() {
        let (p, t, dp) = if p_opt.is_some() && t_opt.is_some() && dp_opt.is_some() {
            (p_opt.unpack(), t_opt.unpack(), dp_opt.unpack())
        } else {
            continue;
        };

        if p < top_p {
            break;
        }

        let theta_e_val = theta_e
            .get(i)
            .and_then(|opt| opt.into_option())
            .or_else(|| metfor::equiv_pot_temperature(t, dp, p));

        let theta_e_val = match theta_e_val {
            Some(val) => val,
            None => continue,
        };

        match best {
            Some((max_val, _)) if max_val >= theta_e_val => {}
            _ => {
                best = Some((
                    theta_e_val,
                    Parcel {
                        temperature: t,
                        pressure: p,
                        dew_point: dp,
                        kind: ParcelKind::MostUnstable,
                    },
                ));
            }
        }
    }

    best.map(|(_, parcel)| parcel)
        .ok_or(AnalysisError::NotEnoughData)
}

#[cfg(test)]
mod test {
    use super::*;
    use metfor::Meters;
    use optional::some;

    fn make_test_sounding() -> Sounding {
        let p = vec![
            some(HectoPascal(1000.0)),
            some(HectoPascal(950.0)),
            some(HectoPascal(900.0)),
            some(HectoPascal(850.0)),
            some(HectoPascal(700.0)),
        ];
        let t = vec![
            some(Celsius(25.0)),
            some(Celsius(22.0)),
            some(Celsius(19.0)),
            some(Celsius(21.0)),
            some(Celsius(9.0)),
        ];
        let dp = vec![
            some(Celsius(20.0)),
            some(Celsius(19.0)),
            some(Celsius(18.0)),
            some(Celsius(5.0)),
            some(Celsius(0.0)),
        ];
        let h = vec![
            some(Meters(0.0)),
            some(Meters(440.0)),
            some(Meters(900.0)),
            some(Meters(1380.0)),
            some(Meters(3010.0)),
        ];

        Sounding::new()
            .with_pressure_profile(p)
            .with_temperature_profile(t)
            .with_dew_point_profile(dp)
            .with_height_profile(h)
    }

    #[test]
    fn test_mixed_layer_parcel() {
        let snd = make_test_sounding();
        let pcl = mixed_layer_parcel(&snd, &AnalysisConfig::default()).unwrap();

        assert_eq!(pcl.kind, ParcelKind::MixedLayer);
        // Mean of the lowest 100 hPa: 1000, 950, and 900 hPa levels.
        assert!((pcl.pressure.unpack() - 950.0).abs() < 1.0e-9);
        assert!((pcl.temperature.unpack() - 22.0).abs() < 1.0e-9);
        assert!((pcl.dew_point.unpack() - 19.0).abs() < 1.0e-9);
    }

    #[test]
    fn test_most_unstable_parcel() {
        let snd = make_test_sounding();
        let pcl = most_unstable_parcel(&snd, &AnalysisConfig::default()).unwrap();

        assert_eq!(pcl.kind, ParcelKind::MostUnstable);
        // The warm, moist surface level has the highest theta-e; the dry 850 hPa level
        // must not win despite being warm.
        assert_eq!(pcl.pressure, HectoPascal(1000.0));
    }

    #[test]
    fn test_surface_parcel() {
        let snd = make_test_sounding();
        let pcl = surface_parcel(&snd).unwrap();
        assert_eq!(pcl.kind, ParcelKind::Surface);
        assert_eq!(pcl.pressure, HectoPascal(1000.0));
        assert_eq!(pcl.temperature, Celsius(25.0));
    }
}
