//! Interpolate sounding values to levels that are not native to the profile.
use crate::{
    error::{AnalysisError, Result},
    sounding::{DataRow, Sounding},
};
use itertools::Itertools;
use metfor::{HectoPascal, Knots, Quantity, WindSpdDir, WindUV};
use optional::{Noned, Optioned};
use std::ops::Sub;

/// Interpolate a whole row of data values at a target pressure.
///
/// Interpolation is linear in the logarithm of pressure, which is the standard vertical
/// coordinate transform for this kind of data. Wind is interpolated component wise.
pub fn linear_interpolate_sounding(snd: &Sounding, tgt_p: HectoPascal) -> Result<DataRow> {
    snd.pressure_profile()
        .iter()
        .enumerate()
        // Remove levels with missing pressure (there SHOULD be none) and unpack the rest.
        .filter_map(|(i, p)| p.into_option().map(|p| (i, p)))
        // Look at the levels two at a time to find the pair bracketing the target.
        .tuple_windows::<(_, _)>()
        .find_map(|((i0, p0), (i1, p1))| {
            // Pressure is always sorted in descending order.
            debug_assert!(p0 > p1);

            if (p0 - tgt_p).unpack().abs() < std::f64::EPSILON {
                snd.data_row(i0)
            } else if (p1 - tgt_p).unpack().abs() < std::f64::EPSILON {
                snd.data_row(i1)
            } else if p0 > tgt_p && p1 < tgt_p {
                let row0 = snd.data_row(i0)?;
                let row1 = snd.data_row(i1)?;
                Some(interp_data_rows(row0, row1, tgt_p, p0, p1))
            } else {
                None
            }
        })
        .ok_or(AnalysisError::InterpolationError)
}

/// Interpolate a `y` value given a target `x` and two points on a line.
#[inline]
pub(crate) fn linear_interp<X, Y>(x_val: X, x1: X, x2: X, y1: Y, y2: Y) -> Y
where
    X: Sub<X> + Copy + std::fmt::Debug + std::cmp::PartialEq,
    <X as Sub<X>>::Output: Quantity,
    Y: Quantity + Sub<Y>,
    <Y as Sub<Y>>::Output: Quantity,
{
    debug_assert_ne!(x1, x2);

    let run = (x2 - x1).unpack();
    let rise = (y2 - y1).unpack();
    let dx = (x_val - x1).unpack();

    Y::pack(y1.unpack() + dx * (rise / run))
}

fn interp_data_rows(
    row0: DataRow,
    row1: DataRow,
    tgt_p: HectoPascal,
    p0: HectoPascal,
    p1: HectoPascal,
) -> DataRow {
    // Fractional distance of the target level between the bracketing levels in log-pressure.
    let frac = (p0.unpack() / tgt_p.unpack()).ln() / (p0.unpack() / p1.unpack()).ln();

    let mut result = DataRow::default();
    result.pressure = Optioned::from(tgt_p);

    result.temperature = eval_interp(row0.temperature, row1.temperature, frac);
    result.dew_point = eval_interp(row0.dew_point, row1.dew_point, frac);
    result.theta_e = eval_interp(row0.theta_e, row1.theta_e, frac);
    result.height = eval_interp(row0.height, row1.height, frac);

    // Special interpolation for vectors.
    if let (Some(w_below), Some(w_above)) = (row0.wind.into_option(), row1.wind.into_option()) {
        let WindUV::<Knots> {
            u: u_below,
            v: v_below,
        } = WindUV::from(w_below);
        let WindUV::<Knots> {
            u: u_above,
            v: v_above,
        } = WindUV::from(w_above);

        let u = u_below + (u_above - u_below) * frac;
        let v = v_below + (v_above - v_below) * frac;

        result.wind = WindSpdDir::from(WindUV { u, v }).into();
    }

    result
}

#[inline]
fn eval_interp<Y>(below: Optioned<Y>, above: Optioned<Y>, frac: f64) -> Optioned<Y>
where
    Y: Quantity + Noned,
{
    if below.is_some() && above.is_some() {
        let (below, above) = (below.unpack().unpack(), above.unpack().unpack());
        Optioned::from(Y::pack(below + frac * (above - below)))
    } else {
        Optioned::default()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use metfor::{Celsius, Meters};
    use optional::some;

    fn make_test_sounding() -> Sounding {
        let p = vec![some(HectoPascal(1000.0)), some(HectoPascal(800.0))];
        let t = vec![some(Celsius(20.0)), some(Celsius(0.0))];
        let h = vec![some(Meters(0.0)), some(Meters(1949.0))];

        Sounding::new()
            .with_pressure_profile(p)
            .with_temperature_profile(t)
            .with_height_profile(h)
    }

    #[test]
    fn test_interpolate_exact_level() {
        let snd = make_test_sounding();
        let row = linear_interpolate_sounding(&snd, HectoPascal(800.0)).unwrap();
        assert_eq!(row.temperature.unwrap(), Celsius(0.0));
    }

    #[test]
    fn test_interpolate_between_levels() {
        let snd = make_test_sounding();
        let row = linear_interpolate_sounding(&snd, HectoPascal(900.0)).unwrap();

        let t = row.temperature.unwrap();
        // Log-pressure weighting puts 900 hPa slightly less than halfway up the layer.
        assert!(t < Celsius(11.0) && t > Celsius(9.0));

        let h = row.height.unwrap();
        assert!(h > Meters(850.0) && h < Meters(1000.0));
    }

    #[test]
    fn test_interpolate_out_of_bounds_is_an_error() {
        let snd = make_test_sounding();
        assert!(linear_interpolate_sounding(&snd, HectoPascal(700.0)).is_err());
        assert!(linear_interpolate_sounding(&snd, HectoPascal(1050.0)).is_err());
    }

    #[test]
    fn test_linear_interp() {
        let y = linear_interp(
            HectoPascal(850.0),
            HectoPascal(1000.0),
            HectoPascal(700.0),
            Meters(0.0),
            Meters(3000.0),
        );
        assert!((y - Meters(1500.0)).unpack().abs() < 1.0e-9);
    }
}
