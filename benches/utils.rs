//! Shared sounding builder for the benchmarks.
use convective_analysis::Sounding;
use metfor::{Celsius, HectoPascal, Knots, Meters, WindSpdDir};
use optional::some;

#[allow(dead_code)]
pub fn supercell_sounding() -> Sounding {
    let raw: Vec<(f64, f64, f64, f64, f64, f64)> = vec![
        (1000.0, 0.0, 30.0, 24.0, 150.0, 15.0),
        (975.0, 230.0, 28.0, 22.0, 160.0, 18.0),
        (950.0, 460.0, 26.5, 21.0, 170.0, 21.0),
        (925.0, 700.0, 24.0, 18.0, 180.0, 25.0),
        (900.0, 950.0, 22.5, 17.0, 190.0, 28.0),
        (850.0, 1400.0, 19.0, 14.0, 200.0, 35.0),
        (800.0, 1900.0, 15.5, 10.0, 210.0, 38.0),
        (750.0, 2450.0, 12.0, 6.0, 220.0, 42.0),
        (700.0, 3000.0, 8.0, 2.0, 230.0, 45.0),
        (650.0, 3600.0, 3.5, -3.0, 235.0, 48.0),
        (600.0, 4300.0, -1.5, -9.0, 240.0, 50.0),
        (550.0, 5000.0, -8.0, -16.0, 245.0, 52.0),
        (500.0, 5800.0, -16.0, -25.0, 250.0, 55.0),
        (450.0, 6500.0, -22.0, -33.0, 252.0, 60.0),
        (400.0, 7300.0, -28.0, -40.0, 255.0, 65.0),
        (350.0, 8200.0, -36.0, -48.0, 258.0, 70.0),
        (300.0, 9200.0, -44.0, -55.0, 260.0, 75.0),
        (250.0, 10400.0, -52.0, -60.0, 260.0, 80.0),
    ];

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
