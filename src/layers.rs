//! Layers of the atmosphere used by the convective analysis, described by their top and
//! bottom levels.
use crate::{
    error::{
        AnalysisError::{InvalidInput, MissingValue},
        Result,
    },
    interpolation::linear_interpolate_sounding,
    levels::height_level,
    sounding::{DataRow, Sounding},
};
use metfor::{HectoPascal, Meters, Quantity};

/// A layer in the atmosphere described by the values at the top and bottom.
#[derive(Debug, Clone, Copy)]
pub struct Layer {
    /// Values at the bottom of the layer.
    pub bottom: DataRow,
    /// Values at the top of the layer.
    pub top: DataRow,
}

impl Layer {
    /// Get the height thickness in meters.
    pub fn height_thickness(&self) -> Result<Meters> {
        let top = self.top.height.ok_or(MissingValue)?;
        let bottom = self.bottom.height.ok_or(MissingValue)?;
        if top == bottom {
            Err(InvalidInput)
        } else {
            Ok(top - bottom)
        }
    }

    /// Get the pressure thickness.
    pub fn pressure_thickness(&self) -> Result<HectoPascal> {
        let bottom_p = self.bottom.pressure.ok_or(MissingValue)?;
        let top_p = self.top.pressure.ok_or(MissingValue)?;
        if bottom_p == top_p {
            Err(InvalidInput)
        } else {
            Ok(bottom_p - top_p)
        }
    }

    /// Get the average temperature lapse rate in the layer, C/km.
    ///
    /// Positive values mean temperature decreases with height, the convention used by the
    /// instability composites.
    pub fn lapse_rate(&self) -> Result<f64> {
        let top_t = self.top.temperature.ok_or(MissingValue)?;
        let bottom_t = self.bottom.temperature.ok_or(MissingValue)?;

        let dt = (bottom_t - top_t).unpack();
        let dz = self.height_thickness()?;

        Ok(dt / dz.unpack() * 1000.0)
    }
}

/// Get a layer from the surface to a height above ground level.
pub fn layer_agl(snd: &Sounding, meters_agl: Meters) -> Result<Layer> {
    // First row is surface data if present.
    let mut bottom = snd.surface_as_data_row().unwrap_or_default();

    if bottom.pressure.is_none() || bottom.height.is_none() || bottom.wind.is_none() {
        bottom = snd.data_row(1).unwrap_or_default();
    }

    let top = height_level(meters_agl, snd)?;
    Ok(Layer { bottom, top })
}

/// Get a layer between two heights above ground level.
pub fn height_layer(snd: &Sounding, bottom_agl: Meters, top_agl: Meters) -> Result<Layer> {
    debug_assert!(bottom_agl < top_agl);

    let bottom = height_level(bottom_agl, snd)?;
    let top = height_level(top_agl, snd)?;

    Ok(Layer { bottom, top })
}

/// Get a layer defined by two pressure levels. `bottom_p` > `top_p`
pub fn pressure_layer(snd: &Sounding, bottom_p: HectoPascal, top_p: HectoPascal) -> Result<Layer> {
    debug_assert!(bottom_p > top_p);

    let bottom = linear_interpolate_sounding(snd, bottom_p)?;
    let top = linear_interpolate_sounding(snd, top_p)?;

    Ok(Layer { bottom, top })
}
