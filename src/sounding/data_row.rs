use metfor::{Celsius, HectoPascal, Kelvin, Knots, Meters, WindSpdDir};
use optional::Optioned;

/// A copy of a single level of the sounding data.
#[derive(Clone, Default, Copy, Debug, PartialEq)]
pub struct DataRow {
    /// Pressure in hPa
    pub pressure: Optioned<HectoPascal>,
    /// Temperature in C
    pub temperature: Optioned<Celsius>,
    /// Dew point in C
    pub dew_point: Optioned<Celsius>,
    /// Equivalent potential temperature in Kelvin
    pub theta_e: Optioned<Kelvin>,
    /// Wind
    pub wind: Optioned<WindSpdDir<Knots>>,
    /// Height above ground level in meters
    pub height: Optioned<Meters>,
}
