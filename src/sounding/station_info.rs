use metfor::Meters;
use optional::Optioned;

/// Location metadata for the point a sounding describes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StationInfo {
    /// Latitude and longitude in decimal degrees.
    location: Option<(f64, f64)>,
    /// Elevation. This may be model terrain, which is not necessarily the real world elevation.
    elevation: Optioned<Meters>,
}

impl StationInfo {
    /// Create a new object with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use convective_analysis::StationInfo;
    ///
    /// assert_eq!(StationInfo::new().with_location((39.3, -76.6)).location().unwrap().0, 39.3);
    /// ```
    #[inline]
    pub fn with_location<T>(mut self, location: T) -> Self
    where
        Option<(f64, f64)>: From<T>,
    {
        self.location = Option::from(location);
        self
    }

    /// Builder method to add an elevation.
    #[inline]
    pub fn with_elevation<T>(mut self, elevation: T) -> Self
    where
        Optioned<Meters>: From<T>,
    {
        self.elevation = Optioned::from(elevation);
        self
    }

    /// Get the location as a (latitude, longitude) pair.
    #[inline]
    pub fn location(&self) -> Option<(f64, f64)> {
        self.location
    }

    /// Get the elevation.
    #[inline]
    pub fn elevation(&self) -> Optioned<Meters> {
        self.elevation
    }
}
