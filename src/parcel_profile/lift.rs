use super::{ParcelAscentAnalysis, ParcelProfile};
use crate::{
    config::AnalysisConfig,
    error::{AnalysisError, Result},
    interpolation::linear_interpolate_sounding,
    parcel::Parcel,
    sounding::Sounding,
};
use itertools::izip;
use metfor::{self, Celsius, CelsiusDiff, HectoPascal, JpKg, Kelvin, Meters, Quantity};
use optional::{none, some, Optioned};

pub(crate) fn lift_parcel(
    parcel: Parcel,
    snd: &Sounding,
    config: &AnalysisConfig,
) -> Result<ParcelAscentAnalysis> {
    // Find the LCL with the Bolton formulas.
    let (lcl_pressure, lcl_t_kelvin) = metfor::pressure_and_temperature_at_lcl(
        parcel.temperature,
        parcel.dew_point,
        parcel.pressure,
    )
    .ok_or(AnalysisError::MetForError)?;
    let lcl_temperature = Celsius::from(lcl_t_kelvin);

    let top_pressure = snd
        .pressure_profile()
        .iter()
        .filter_map(|p| p.into_option())
        .last()
        .ok_or(AnalysisError::NotEnoughData)?;

    if top_pressure > lcl_pressure {
        // The profile ends below the LCL, moist ascent cannot be evaluated. The cloud base
        // height falls back to the Bolton dry ascent estimate since the level is above every
        // height we could interpolate from.
        let lcl_height_agl = Meters(f64::max(
            0.0,
            125.0 * (parcel.temperature - parcel.dew_point).unpack(),
        ));

        return Ok(ParcelAscentAnalysis {
            parcel,
            profile: ParcelProfile {
                pressure: Vec::new(),
                height: Vec::new(),
                parcel_t: Vec::new(),
                environment_t: Vec::new(),
            },
            cape: JpKg(0.0),
            cin: JpKg(0.0),
            lcl_height_agl,
            lcl_pressure,
            lcl_temperature,
            lfc_pressure: none(),
            el_pressure: none(),
            lifted_index: none(),
            insufficient_extent: true,
        });
    }

    // How to calculate a parcel temperature for a given pressure level.
    let theta = parcel.theta();
    let theta_e = parcel.theta_e()?;
    let dry_mw = parcel.mixing_ratio()?;

    let parcel_virt_t = move |tgt_pres: HectoPascal| -> Option<Celsius> {
        if tgt_pres > lcl_pressure {
            // Dry adiabatic lifting
            let t_k = metfor::temperature_from_pot_temp(theta, tgt_pres);
            metfor::virtual_temperature(
                t_k,
                metfor::dew_point_from_p_and_mw(tgt_pres, dry_mw)?,
                tgt_pres,
            )
            .map(Celsius::from)
        } else {
            // Moist adiabatic lifting
            metfor::temperature_from_equiv_pot_temp_saturated_and_pressure(tgt_pres, theta_e)
                .and_then(|t_c| metfor::virtual_temperature(t_c, t_c, tgt_pres))
                .map(Celsius::from)
        }
    };

    let parcel_t = move |tgt_pres: HectoPascal| -> Option<Celsius> {
        if tgt_pres > lcl_pressure {
            Some(Celsius::from(metfor::temperature_from_pot_temp(
                theta, tgt_pres,
            )))
        } else {
            metfor::temperature_from_equiv_pot_temp_saturated_and_pressure(tgt_pres, theta_e)
        }
    };

    let grid = pressure_grid(parcel.pressure, lcl_pressure, top_pressure, config);

    // Walk the grid and build the parallel parcel/environment profiles.
    let mut pressure: Vec<HectoPascal> = Vec::with_capacity(grid.len());
    let mut height: Vec<Meters> = Vec::with_capacity(grid.len());
    let mut parcel_profile_t: Vec<Celsius> = Vec::with_capacity(grid.len());
    let mut environment_t: Vec<Celsius> = Vec::with_capacity(grid.len());

    for &p in &grid {
        let row = match linear_interpolate_sounding(snd, p) {
            Ok(row) => row,
            Err(_) => continue,
        };

        let (h, env_t, env_dp) = match (
            row.height.into_option(),
            row.temperature.into_option(),
            row.dew_point.into_option(),
        ) {
            (Some(h), Some(t), Some(dp)) => (h, t, dp),
            _ => continue,
        };

        let env_virt_t = match metfor::virtual_temperature(env_t, env_dp, p) {
            Some(vt) => Celsius::from(vt),
            None => continue,
        };

        let pcl_virt_t = match parcel_virt_t(p) {
            Some(vt) => vt,
            None => continue,
        };

        pressure.push(p);
        height.push(h);
        parcel_profile_t.push(pcl_virt_t);
        environment_t.push(env_virt_t);
    }

    if pressure.len() < 2 {
        return Err(AnalysisError::DegenerateProfile);
    }

    let profile = ParcelProfile {
        pressure,
        height,
        parcel_t: parcel_profile_t,
        environment_t,
    };

    let (cape, cin, lfc_pressure, el_pressure) = integrate_buoyancy(&profile);

    let lcl_height_agl = linear_interpolate_sounding(snd, lcl_pressure)?
        .height
        .map(|h| Meters(f64::max(0.0, h.unpack())))
        .ok_or(AnalysisError::InterpolationError)?;

    // Lifted index, only when the profile reaches past 500 hPa and the parcel starts below it.
    let lifted_index: Optioned<CelsiusDiff> = if parcel.pressure > HectoPascal(500.0)
        && top_pressure <= HectoPascal(500.0)
    {
        let env_500 = linear_interpolate_sounding(snd, HectoPascal(500.0))
            .ok()
            .and_then(|row| row.temperature.into_option());
        Optioned::from(
            env_500.and_then(|env_t| parcel_t(HectoPascal(500.0)).map(|pcl_t| env_t - pcl_t)),
        )
    } else {
        none()
    };

    Ok(ParcelAscentAnalysis {
        parcel,
        profile,
        cape,
        cin,
        lcl_height_agl,
        lcl_pressure,
        lcl_temperature,
        lfc_pressure,
        el_pressure,
        lifted_index,
        insufficient_extent: false,
    })
}

/// Fixed pressure steps from the parcel level to the profile top, with the LCL inserted as an
/// exact grid point.
fn pressure_grid(
    start: HectoPascal,
    lcl: HectoPascal,
    top: HectoPascal,
    config: &AnalysisConfig,
) -> Vec<HectoPascal> {
    let step = config.ascent_step.unpack();
    debug_assert!(step > 0.0);

    let mut grid: Vec<HectoPascal> =
        Vec::with_capacity(((start - top).unpack() / step) as usize + 2);

    let mut p = start.unpack();
    while p > top.unpack() {
        grid.push(HectoPascal(p));
        p -= step;
    }
    grid.push(top);

    let lcl_p = lcl.unpack();
    let on_grid = grid.iter().any(|p| (p.unpack() - lcl_p).abs() < 1.0e-9);
    if !on_grid && lcl_p < start.unpack() && lcl_p > top.unpack() {
        if let Some(pos) = grid.iter().position(|p| p.unpack() < lcl_p) {
            grid.insert(pos, lcl);
        }
    }

    grid
}

/// Trapezoidal integration of buoyancy over the profile.
///
/// Returns (CAPE, CIN, LFC pressure, EL pressure). CIN only accumulates below the level of
/// free convection; the EL is the top of the highest positively buoyant layer.
fn integrate_buoyancy(
    profile: &ParcelProfile,
) -> (JpKg, JpKg, Optioned<HectoPascal>, Optioned<HectoPascal>) {
    let mut cape_acc = 0.0;
    let mut cin_acc = 0.0;
    let mut lfc: Optioned<HectoPascal> = none();
    let mut el: Optioned<HectoPascal> = none();

    let mut prev: Option<(HectoPascal, Meters, f64)> = None;
    for (&p, &h, &pt, &et) in izip!(
        &profile.pressure,
        &profile.height,
        &profile.parcel_t,
        &profile.environment_t
    ) {
        let (pt_k, et_k) = (Kelvin::from(pt), Kelvin::from(et));
        let buoyancy = (pt_k - et_k).unpack() / et_k.unpack();

        if let Some((p0, h0, b0)) = prev {
            let dz = (h - h0).unpack();
            if dz > 0.0 {
                let area = (b0 + buoyancy) * dz;
                if area > 0.0 {
                    if lfc.is_none() {
                        lfc = some(p0);
                    }
                    cape_acc += area;
                    el = some(p);
                } else if lfc.is_none() {
                    cin_acc += area;
                }
            }
        }

        prev = Some((p, h, buoyancy));
    }

    // 2.0 for the trapezoid rule, -g because metfor's g points down.
    let cape = JpKg(f64::max(0.0, cape_acc / 2.0 * -metfor::g));
    let cin = JpKg(f64::min(0.0, cin_acc / 2.0 * -metfor::g));

    (cape, cin, lfc, el)
}
