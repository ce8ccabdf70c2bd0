//! Mesoscale boundary detection from a local grid of equivalent potential temperature.
//!
//! Boundaries (fronts, drylines, outflow) show up as strong horizontal theta-e gradients.
//! Storms initiating on the warm, moist side of a boundary are far more likely to organize,
//! so the diagnosis wants to know whether one is nearby and which side of it the target
//! point sits on.
use crate::config::AnalysisConfig;
use metfor::{Kelvin, Quantity};

/// One surface sample of equivalent potential temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThetaESample {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Equivalent potential temperature.
    pub theta_e: Kelvin,
}

/// A local grid of theta-e samples surrounding a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct ThetaEGrid {
    target: ThetaESample,
    samples: Vec<ThetaESample>,
}

impl ThetaEGrid {
    /// Build a grid from the value at the target point and the surrounding samples.
    pub fn new(target: ThetaESample, samples: Vec<ThetaESample>) -> Self {
        ThetaEGrid { target, samples }
    }

    /// The value at the target point.
    pub fn target(&self) -> ThetaESample {
        self.target
    }

    /// The surrounding samples.
    pub fn samples(&self) -> &[ThetaESample] {
        &self.samples
    }
}

/// Which side of a detected boundary the target point sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySide {
    /// The target sits in the high theta-e air, the favored side for storm organization.
    WarmSector,
    /// The target sits in the low theta-e air behind the boundary.
    ColdSide,
    /// The target theta-e is close to the neighborhood mean, right along the boundary.
    OnBoundary,
}

/// The result of scanning a theta-e grid for a mesoscale boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySignal {
    /// The largest gradient found between the target and any sample, K per 100 km.
    pub max_gradient: f64,
    /// True when the largest gradient met the configured threshold.
    pub present: bool,
    /// Which side of the gradient the target point is on.
    pub side: BoundarySide,
}

/// Scan a theta-e grid for a boundary signature near the target point.
///
/// The gradient between the target and every sample is computed over the great circle
/// distance in K per 100 km. Samples closer than one kilometer are skipped since the gradient
/// there is numerically meaningless.
pub fn detect_boundary(grid: &ThetaEGrid, config: &AnalysisConfig) -> BoundarySignal {
    let target = grid.target();

    let mut max_gradient = 0.0f64;
    let mut sum_theta_e = 0.0f64;
    let mut count = 0usize;

    for sample in grid.samples() {
        let distance_km = great_circle_km(target.lat, target.lon, sample.lat, sample.lon);
        if distance_km < 1.0 {
            continue;
        }

        let delta_k = (sample.theta_e - target.theta_e).unpack().abs();
        max_gradient = max_gradient.max(delta_k / distance_km * 100.0);

        sum_theta_e += sample.theta_e.unpack();
        count += 1;
    }

    let present = count > 0 && max_gradient >= config.boundary_gradient_threshold;

    let side = if count == 0 {
        BoundarySide::OnBoundary
    } else {
        let mean = sum_theta_e / count as f64;
        let departure = target.theta_e.unpack() - mean;
        if departure > config.boundary_side_deadband {
            BoundarySide::WarmSector
        } else if departure < -config.boundary_side_deadband {
            BoundarySide::ColdSide
        } else {
            BoundarySide::OnBoundary
        }
    };

    BoundarySignal {
        max_gradient,
        present,
        side,
    }
}

/// Great circle distance between two points in kilometers.
fn great_circle_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod test {
    use super::*;

    fn grid_with_north_south_gradient() -> ThetaEGrid {
        // Roughly 55 km between rows, theta-e falling sharply to the north. The target sits
        // in the high theta-e air.
        let target = ThetaESample {
            lat: 39.0,
            lon: -96.0,
            theta_e: Kelvin(345.0),
        };

        let samples = vec![
            ThetaESample {
                lat: 39.5,
                lon: -96.0,
                theta_e: Kelvin(342.0),
            },
            ThetaESample {
                lat: 40.0,
                lon: -96.0,
                theta_e: Kelvin(336.0),
            },
            ThetaESample {
                lat: 38.5,
                lon: -96.0,
                theta_e: Kelvin(346.0),
            },
            ThetaESample {
                lat: 39.0,
                lon: -95.5,
                theta_e: Kelvin(344.5),
            },
        ];

        ThetaEGrid::new(target, samples)
    }

    fn uniform_grid() -> ThetaEGrid {
        let target = ThetaESample {
            lat: 39.0,
            lon: -96.0,
            theta_e: Kelvin(340.0),
        };

        let samples = (0..4)
            .map(|i| ThetaESample {
                lat: 38.5 + 0.25 * f64::from(i),
                lon: -96.5,
                theta_e: Kelvin(340.1),
            })
            .collect();

        ThetaEGrid::new(target, samples)
    }

    #[test]
    fn test_sharp_gradient_is_detected() {
        let grid = grid_with_north_south_gradient();
        let signal = detect_boundary(&grid, &AnalysisConfig::default());

        assert!(signal.present);
        // 9 K over ~111 km is about 8 K / 100 km.
        assert!(signal.max_gradient > 5.0);
        assert_eq!(signal.side, BoundarySide::WarmSector);
    }

    #[test]
    fn test_uniform_grid_has_no_boundary() {
        let grid = uniform_grid();
        let signal = detect_boundary(&grid, &AnalysisConfig::default());

        assert!(!signal.present);
        assert!(signal.max_gradient < 1.0);
        assert_eq!(signal.side, BoundarySide::OnBoundary);
    }

    #[test]
    fn test_cold_side_classification() {
        let target = ThetaESample {
            lat: 39.0,
            lon: -96.0,
            theta_e: Kelvin(330.0),
        };
        let samples = vec![
            ThetaESample {
                lat: 38.5,
                lon: -96.0,
                theta_e: Kelvin(339.0),
            },
            ThetaESample {
                lat: 38.0,
                lon: -96.0,
                theta_e: Kelvin(341.0),
            },
        ];

        let signal = detect_boundary(&ThetaEGrid::new(target, samples), &AnalysisConfig::default());
        assert!(signal.present);
        assert_eq!(signal.side, BoundarySide::ColdSide);
    }
}
