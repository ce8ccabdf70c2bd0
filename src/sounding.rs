//! Data type and methods to store an atmospheric sounding.

use chrono::NaiveDateTime;
use metfor::{Celsius, HectoPascal, Kelvin, Knots, Meters, WindSpdDir};
use optional::Optioned;

pub use self::{data_row::DataRow, station_info::StationInfo};

/// A vertical profile of the atmosphere at one point and time.
///
/// The profile variables are stored in parallel vectors ordered bottom up, strictly decreasing
/// in pressure, with the first element holding the surface values. If a profile lacks a certain
/// variable, e.g. equivalent potential temperature, that whole vector has length 0 instead of
/// being full of missing values. Heights are meters above ground level.
#[derive(Clone, Debug, Default)]
pub struct Sounding {
    // Description of the source of the sounding.
    source: Option<String>,

    // Station info
    station: StationInfo,

    // Valid time of the sounding
    valid_time: Option<NaiveDateTime>,
    // Difference in model initialization time and `valid_time` in hours.
    lead_time: Optioned<i32>,

    // Profiles
    pressure: Vec<Optioned<HectoPascal>>,
    temperature: Vec<Optioned<Celsius>>,
    dew_point: Vec<Optioned<Celsius>>,
    theta_e: Vec<Optioned<Kelvin>>,
    wind: Vec<Optioned<WindSpdDir<Knots>>>,
    height: Vec<Optioned<Meters>>,
}

impl Sounding {
    /// Create a new sounding with default values. This is a proxy for default with a clearer name.
    #[inline]
    pub fn new() -> Self {
        Sounding::default()
    }

    /// Add a source description to this sounding.
    #[inline]
    pub fn with_source_description<S>(mut self, desc: S) -> Self
    where
        Option<String>: From<S>,
    {
        self.source = Option::from(desc);
        self
    }

    /// Retrieve the source description for this sounding.
    #[inline]
    pub fn source_description(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.as_ref())
    }

    /// Builder method for setting the station info.
    #[inline]
    pub fn with_station_info(mut self, new_value: StationInfo) -> Self {
        self.station = new_value;
        self
    }

    /// Get the station info.
    #[inline]
    pub fn station_info(&self) -> &StationInfo {
        &self.station
    }

    /// Builder method to set the valid time of the sounding.
    #[inline]
    pub fn with_valid_time<T>(mut self, valid_time: T) -> Self
    where
        Option<NaiveDateTime>: From<T>,
    {
        self.valid_time = Option::from(valid_time);
        self
    }

    /// Valid time of the sounding.
    #[inline]
    pub fn valid_time(&self) -> Option<NaiveDateTime> {
        self.valid_time
    }

    /// Builder method for the difference in model initialization time and `valid_time` in hours.
    #[inline]
    pub fn with_lead_time<T>(mut self, lt: T) -> Self
    where
        Optioned<i32>: From<T>,
    {
        self.lead_time = Optioned::from(lt);
        self
    }

    /// Difference in model initialization time and `valid_time` in hours.
    #[inline]
    pub fn lead_time(&self) -> Optioned<i32> {
        self.lead_time
    }

    /// Builder method for the pressure profile.
    ///
    /// # Examples
    /// ```rust
    /// use convective_analysis::Sounding;
    /// use metfor::HectoPascal;
    /// use optional::{some, Optioned};
    ///
    /// let data = vec![1000.0, 925.0, 850.0, 700.0, 500.0, 300.0, 250.0, 200.0];
    /// let pressure_data: Vec<Optioned<HectoPascal>> = data.into_iter()
    ///     .map(HectoPascal)
    ///     .map(some)
    ///     .collect();
    ///
    /// let _snd = Sounding::new()
    ///     .with_pressure_profile(pressure_data);
    /// ```
    #[inline]
    pub fn with_pressure_profile(self, profile: Vec<Optioned<HectoPascal>>) -> Self {
        Self {
            pressure: profile,
            ..self
        }
    }

    /// Get the pressure profile.
    #[inline]
    pub fn pressure_profile(&self) -> &[Optioned<HectoPascal>] {
        &self.pressure
    }

    /// Builder method for the temperature profile.
    ///
    /// See `with_pressure_profile` for an example of usage, keeping in mind the units type may
    /// be different.
    #[inline]
    pub fn with_temperature_profile(self, profile: Vec<Optioned<Celsius>>) -> Self {
        Self {
            temperature: profile,
            ..self
        }
    }

    /// Get the temperature profile.
    #[inline]
    pub fn temperature_profile(&self) -> &[Optioned<Celsius>] {
        &self.temperature
    }

    /// Builder method for the dew point profile.
    #[inline]
    pub fn with_dew_point_profile(self, profile: Vec<Optioned<Celsius>>) -> Self {
        Self {
            dew_point: profile,
            ..self
        }
    }

    /// Get the dew point profile.
    #[inline]
    pub fn dew_point_profile(&self) -> &[Optioned<Celsius>] {
        &self.dew_point
    }

    /// Builder method for the equivalent potential temperature profile.
    ///
    /// This profile is optional. When it is absent, analyses that need it compute it from
    /// temperature, dew point, and pressure.
    #[inline]
    pub fn with_theta_e_profile(self, profile: Vec<Optioned<Kelvin>>) -> Self {
        Self {
            theta_e: profile,
            ..self
        }
    }

    /// Get the equivalent potential temperature profile.
    #[inline]
    pub fn theta_e_profile(&self) -> &[Optioned<Kelvin>] {
        &self.theta_e
    }

    /// Builder method for the wind profile.
    #[inline]
    pub fn with_wind_profile(self, profile: Vec<Optioned<WindSpdDir<Knots>>>) -> Self {
        Self {
            wind: profile,
            ..self
        }
    }

    /// Get the wind profile.
    #[inline]
    pub fn wind_profile(&self) -> &[Optioned<WindSpdDir<Knots>>] {
        &self.wind
    }

    /// Builder method for the height profile, meters above ground level.
    #[inline]
    pub fn with_height_profile(self, profile: Vec<Optioned<Meters>>) -> Self {
        Self {
            height: profile,
            ..self
        }
    }

    /// Get the height profile, meters above ground level.
    #[inline]
    pub fn height_profile(&self) -> &[Optioned<Meters>] {
        &self.height
    }

    /// Get a row of data values from this sounding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::{HectoPascal, Celsius};
    /// use optional::some;
    /// use convective_analysis::Sounding;
    ///
    /// let pres: Vec<_> = vec![1000.0, 925.0, 850.0].into_iter()
    ///     .map(HectoPascal).map(some).collect();
    /// let temps: Vec<_> = vec![20.0, 18.0, 17.0].into_iter()
    ///     .map(Celsius).map(some).collect();
    ///
    /// let snd = Sounding::new()
    ///     .with_pressure_profile(pres)
    ///     .with_temperature_profile(temps);
    ///
    /// let row = snd.data_row(1).unwrap();
    /// assert_eq!(row.pressure.unwrap(), HectoPascal(925.0));
    /// assert_eq!(row.temperature.unwrap(), Celsius(18.0));
    /// assert!(row.wind.is_none()); // We never set a wind profile.
    ///
    /// assert!(snd.data_row(3).is_none()); // There weren't that many rows!
    /// ```
    #[inline]
    pub fn data_row(&self, idx: usize) -> Option<DataRow> {
        macro_rules! copy_to_result {
            ($result:ident, $profile:ident, $idx:ident) => {
                match self.$profile.get($idx) {
                    None => {}
                    Some(opt_val) => $result.$profile = *opt_val,
                }
            };
        }

        if idx >= self.pressure.len() {
            return None;
        }

        let mut result = DataRow::default();

        copy_to_result!(result, pressure, idx);
        copy_to_result!(result, temperature, idx);
        copy_to_result!(result, dew_point, idx);
        copy_to_result!(result, theta_e, idx);
        copy_to_result!(result, wind, idx);
        copy_to_result!(result, height, idx);

        Some(result)
    }

    /// Get the surface values in a `DataRow` format.
    #[inline]
    pub fn surface_as_data_row(&self) -> Option<DataRow> {
        self.data_row(0)
    }

    /// Get a bottom up iterator over the data rows. The first value returned from the iterator
    /// is the surface values.
    #[inline]
    pub fn bottom_up<'a>(&'a self) -> impl Iterator<Item = DataRow> + 'a {
        ProfileIterator {
            next_idx: 0,
            direction: 1,
            src: self,
        }
    }

    /// Get a top down iterator over the data rows. The last value returned is the surface values.
    #[inline]
    pub fn top_down<'a>(&'a self) -> impl Iterator<Item = DataRow> + 'a {
        ProfileIterator {
            next_idx: (self.pressure.len() as isize) - 1,
            direction: -1,
            src: self,
        }
    }
}

/// Iterator over the data rows of a sounding. This may be a top down or bottom up iterator where
/// either the last or first row returned is the surface data.
struct ProfileIterator<'a> {
    next_idx: isize,
    direction: isize, // +1 for bottom up, -1 for top down
    src: &'a Sounding,
}

impl<'a> Iterator for ProfileIterator<'a> {
    type Item = DataRow;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next_idx < 0 {
            return None;
        }
        let result = self.src.data_row(self.next_idx as usize);
        self.next_idx += self.direction;
        result
    }
}


mod data_row;
mod station_info;
