//! Error types for the convective-analysis crate.
use std::fmt;

/// Error type for the crate.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnalysisError {
    /// The sounding violates a structural invariant, no analysis is possible. The payload is a
    /// short description of the violated invariant.
    InvalidProfile(&'static str),
    /// The sounding is structurally sound but too shallow or too dry to evaluate a parcel
    /// ascent. Analyses that hit this degrade to zeroed values rather than failing outright.
    DegenerateProfile,
    /// A profile that is required for this analysis is missing.
    MissingProfile,
    /// A value (surface value, index, location, etc) that is required is not available.
    MissingValue,
    /// Not enough data available for analysis.
    NotEnoughData,
    /// Missing data during interpolation, or it would have been extrapolation.
    InterpolationError,
    /// A routine from the `metfor` crate returned no value.
    MetForError,
    /// Bad or invalid input.
    InvalidInput,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use AnalysisError::*;

        match self {
            InvalidProfile(msg) => write!(f, "invalid profile: {}", msg),
            DegenerateProfile => write!(f, "profile too shallow or dry for parcel analysis"),
            MissingProfile => write!(f, "missing profile required for the analysis"),
            MissingValue => write!(f, "missing value required for analysis"),
            NotEnoughData => write!(f, "not enough data available for analysis"),
            InterpolationError => write!(f, "none value encountered during interpolation"),
            MetForError => write!(f, "error bubbled up from metfor crate"),
            InvalidInput => write!(f, "invalid input"),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Shorthand for results.
pub type Result<T> = std::result::Result<T, AnalysisError>;
