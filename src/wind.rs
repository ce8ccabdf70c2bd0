//! Winds, bulk shear, storm motion, and storm relative helicity.
use crate::{
    config::AnalysisConfig,
    error::{AnalysisError, Result},
    layers::{self, Layer},
    sounding::Sounding,
};
use itertools::{izip, Itertools};
use metfor::{IntHelicityM2pS2, Knots, Meters, MetersPSec, Quantity, WindSpdDir, WindUV};
use std::iter::once;

/// Storm motion estimates from the Bunkers internal dynamics method.
///
/// The right and left movers are reflections of each other across the 0-6 km mean wind, so
/// their vector mean recovers the mean wind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormMotion {
    /// Motion of the right moving supercell.
    pub right_mover: WindSpdDir<Knots>,
    /// Motion of the left moving supercell.
    pub left_mover: WindSpdDir<Knots>,
    /// The 0-6 km pressure weighted mean wind.
    pub mean_wind: WindSpdDir<Knots>,
}

impl StormMotion {
    /// The right mover motion in u-v components, m/s.
    pub fn right_mover_uv(&self) -> WindUV<MetersPSec> {
        WindUV::from(self.right_mover)
    }

    /// The left mover motion in u-v components, m/s.
    pub fn left_mover_uv(&self) -> WindUV<MetersPSec> {
        WindUV::from(self.left_mover)
    }

    /// The mean wind in u-v components, m/s.
    pub fn mean_wind_uv(&self) -> WindUV<MetersPSec> {
        WindUV::from(self.mean_wind)
    }
}

/// Calculate the pressure weighted mean wind in a layer.
pub fn mean_wind(layer: &Layer, snd: &Sounding) -> Result<WindUV<MetersPSec>> {
    let pressure = snd.pressure_profile();
    let wind = snd.wind_profile();

    let bottom_p = layer.bottom.pressure.ok_or(AnalysisError::MissingValue)?;
    let top_p = layer.top.pressure.ok_or(AnalysisError::MissingValue)?;

    let bottom_wind = layer.bottom.wind;
    let top_wind = layer.top.wind;

    let intermediate_levels = izip!(pressure, wind)
        .filter_map(|(p, w)| p.into_option().map(|p| (p, *w)))
        // Skip values below the layer
        .skip_while(move |&(p, _)| p >= bottom_p)
        // Only take values below the top of the layer
        .take_while(move |&(p, _)| p > top_p);

    let (iu, iv, dp) =
        // Start at the bottom of the layer
        once((bottom_p, bottom_wind))
        // Add in any native levels
        .chain(intermediate_levels)
        // Finish with the top of the layer
        .chain(once((top_p, top_wind)))
        // Filter out missing winds and convert to u-v space in m/s
        .filter_map(|(p, w)| w.into_option().map(|w| (p, WindUV::<MetersPSec>::from(w))))
        // Make windows to see two levels at a time for the trapezoid rule
        .tuple_windows::<(_, _)>()
        // Weight by the pressure thickness of each sub-layer
        .fold(
            (0.0f64, 0.0f64, 0.0f64),
            |(iu, iv, acc_dp), ((p0, w0), (p1, w1))| {
                let dp = (p0 - p1).unpack();
                (
                    iu + (w0.u + w1.u).unpack() * dp,
                    iv + (w0.v + w1.v).unpack() * dp,
                    acc_dp + dp,
                )
            },
        );

    if dp <= 0.0 {
        // nothing was done, 1 or zero points in the layer
        return Err(AnalysisError::NotEnoughData);
    }

    // divide by the pressure depth and the constant of 2 for the trapezoid rule
    Ok(WindUV {
        u: MetersPSec(iu / (2.0 * dp)),
        v: MetersPSec(iv / (2.0 * dp)),
    })
}

/// Calculate the bulk shear of a layer, the vector difference of the wind at the top and
/// bottom.
pub fn bulk_shear(layer: &Layer) -> Result<WindUV<MetersPSec>> {
    let bottom = layer.bottom.wind.ok_or(AnalysisError::MissingValue)?;
    let top = layer.top.wind.ok_or(AnalysisError::MissingValue)?;

    let WindUV::<MetersPSec> { u: bu, v: bv } = WindUV::from(bottom);
    let WindUV::<MetersPSec> { u: tu, v: tv } = WindUV::from(top);

    Ok(WindUV {
        u: tu - bu,
        v: tv - bv,
    })
}

/// The magnitude of the bulk shear across a layer.
pub fn bulk_shear_magnitude(layer: &Layer) -> Result<MetersPSec> {
    let WindUV { u, v } = bulk_shear(layer)?;
    Ok(MetersPSec(u.unpack().hypot(v.unpack())))
}

/// Calculate the supercell storm motions using the Bunkers "internal dynamics" method.
///
/// The motion is the 0-6 km pressure weighted mean wind plus a fixed magnitude deviation at a
/// right angle to the 0-6 km bulk shear vector, rotated clockwise for the right mover and
/// counter-clockwise for the left mover. With negligible shear both movers collapse onto the
/// mean wind.
pub fn bunkers_storm_motion(snd: &Sounding, config: &AnalysisConfig) -> Result<StormMotion> {
    let layer = layers::layer_agl(snd, Meters(6000.0))?;

    let WindUV {
        u: mean_u,
        v: mean_v,
    } = mean_wind(&layer, snd)?;

    let WindUV {
        u: shear_u,
        v: shear_v,
    } = bulk_shear(&layer)?;

    let shear_mag = shear_u.unpack().hypot(shear_v.unpack());

    let (delta_u, delta_v) = if shear_mag < 0.5 {
        (MetersPSec(0.0), MetersPSec(0.0))
    } else {
        let scale = config.bunkers_deviation.unpack() / shear_mag;
        (shear_v * scale, -shear_u * scale)
    };

    Ok(StormMotion {
        right_mover: WindSpdDir::from(WindUV {
            u: mean_u + delta_u,
            v: mean_v + delta_v,
        }),
        left_mover: WindSpdDir::from(WindUV {
            u: mean_u - delta_u,
            v: mean_v - delta_v,
        }),
        mean_wind: WindSpdDir::from(WindUV {
            u: mean_u,
            v: mean_v,
        }),
    })
}

/// Storm relative helicity for a layer, in m²/s².
///
/// Computed as the discrete sum of the cross product term over consecutive storm relative
/// wind pairs, signed so a hodograph turning clockwise with height (veering) gives positive
/// helicity when referenced to the right mover.
///
/// Also returns the number of levels that went into the sum. Fewer than three makes the value
/// a low resolution estimate.
pub fn sr_helicity<W>(
    layer: &Layer,
    storm_motion_uv_ms: W,
    snd: &Sounding,
) -> Result<(IntHelicityM2pS2, usize)>
where
    WindUV<MetersPSec>: From<W>,
{
    let storm_motion = WindUV::<MetersPSec>::from(storm_motion_uv_ms);

    let bottom_h = layer.bottom.height.ok_or(AnalysisError::MissingValue)?;
    let top_h = layer.top.height.ok_or(AnalysisError::MissingValue)?;

    let native_levels = izip!(snd.height_profile(), snd.wind_profile())
        .filter_map(|(h, w)| h.into_option().map(|h| (h, *w)))
        .skip_while(move |&(h, _)| h <= bottom_h)
        .take_while(move |&(h, _)| h < top_h);

    let storm_relative: Vec<(MetersPSec, MetersPSec)> = once((bottom_h, layer.bottom.wind))
        .chain(native_levels)
        .chain(once((top_h, layer.top.wind)))
        .filter_map(|(_, w)| w.into_option())
        .map(|w| {
            let WindUV::<MetersPSec> { u, v } =
                <WindUV<MetersPSec> as From<WindSpdDir<Knots>>>::from(w);
            (u - storm_motion.u, v - storm_motion.v)
        })
        .collect();

    if storm_relative.len() < 2 {
        return Err(AnalysisError::NotEnoughData);
    }

    let sum = storm_relative
        .iter()
        .tuple_windows::<(_, _)>()
        .fold(0.0, |acc, (&(u0, v0), &(u1, v1))| {
            acc + (u0.unpack() * v1.unpack() - u1.unpack() * v0.unpack())
        });

    Ok((IntHelicityM2pS2(-sum), storm_relative.len()))
}
