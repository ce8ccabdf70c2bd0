//! Shared builders for synthetic test soundings.
//!
//! The profiles here are hand built so each scenario has unambiguous ingredients: a volatile
//! supercell environment, a strongly sheared but stable environment, and a capped environment.
use convective_analysis::Sounding;
use metfor::{Celsius, HectoPascal, Knots, Meters, WindSpdDir};
use optional::some;

/// (pressure hPa, height m AGL, temperature C, dew point C, wind direction deg, wind speed kt)
pub type RawLevel = (f64, f64, f64, f64, f64, f64);

pub fn build_sounding(raw: &[RawLevel]) -> Sounding {
    Sounding::new()
        .with_pressure_profile(raw.iter().map(|r| some(HectoPascal(r.0))).collect())
        .with_height_profile(raw.iter().map(|r| some(Meters(r.1))).collect())
        .with_temperature_profile(raw.iter().map(|r| some(Celsius(r.2))).collect())
        .with_dew_point_profile(raw.iter().map(|r| some(Celsius(r.3))).collect())
        .with_wind_profile(
            raw.iter()
                .map(|r| {
                    some(WindSpdDir {
                        direction: r.4,
                        speed: Knots(r.5),
                    })
                })
                .collect(),
        )
}

/// Very unstable and strongly veering, the classic discrete supercell environment.
pub fn supercell_sounding() -> Sounding {
    build_sounding(&[
        (1000.0, 0.0, 30.0, 24.0, 150.0, 15.0),
        (925.0, 700.0, 24.0, 18.0, 180.0, 25.0),
        (850.0, 1400.0, 19.0, 14.0, 200.0, 35.0),
        (700.0, 3000.0, 8.0, 2.0, 230.0, 45.0),
        (500.0, 5800.0, -16.0, -25.0, 250.0, 55.0),
        (400.0, 7300.0, -28.0, -40.0, 255.0, 65.0),
        (300.0, 9200.0, -44.0, -55.0, 260.0, 75.0),
        (250.0, 10400.0, -52.0, -60.0, 260.0, 80.0),
    ])
}

/// A cold, stable column under a powerful jet: lots of shear, nothing to lift.
pub fn high_shear_no_cape_sounding() -> Sounding {
    build_sounding(&[
        (1000.0, 0.0, 10.0, 2.0, 190.0, 30.0),
        (925.0, 650.0, 10.0, 0.0, 210.0, 40.0),
        (850.0, 1300.0, 10.0, -5.0, 230.0, 50.0),
        (700.0, 2900.0, 10.0, -15.0, 240.0, 60.0),
        (500.0, 5600.0, 5.0, -30.0, 250.0, 70.0),
        (400.0, 7100.0, -2.0, -40.0, 250.0, 75.0),
        (300.0, 9000.0, -15.0, -55.0, 250.0, 80.0),
    ])
}

/// Moist and moderately unstable below a sharp warm-and-dry inversion.
pub fn capped_sounding() -> Sounding {
    build_sounding(&[
        (1000.0, 0.0, 24.0, 20.0, 170.0, 12.0),
        (950.0, 450.0, 21.0, 18.0, 185.0, 18.0),
        (900.0, 920.0, 18.0, 16.0, 200.0, 24.0),
        (850.0, 1400.0, 22.0, 8.0, 215.0, 30.0),
        (800.0, 1900.0, 20.0, 6.0, 225.0, 34.0),
        (700.0, 3000.0, 14.0, 2.0, 235.0, 40.0),
        (600.0, 4200.0, 4.0, -6.0, 240.0, 45.0),
        (500.0, 5600.0, -8.0, -18.0, 245.0, 50.0),
        (400.0, 7100.0, -20.0, -32.0, 250.0, 55.0),
        (300.0, 9000.0, -36.0, -48.0, 250.0, 60.0),
    ])
}
