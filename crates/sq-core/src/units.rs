// sq-core/src/units.rs

use uom::si::f64::{Energy as UomEnergy, Power as UomPower, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Energy = UomEnergy;
pub type Power = UomPower;
pub type Time = UomTime;

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn kwh(v: f64) -> Energy {
    use uom::si::energy::kilowatt_hour;
    Energy::new::<kilowatt_hour>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

#[inline]
pub fn as_kwh(e: Energy) -> f64 {
    use uom::si::energy::kilowatt_hour;
    e.get::<kilowatt_hour>()
}

/// Energy delivered by a constant power over a time step, in kWh.
#[inline]
pub fn step_energy_kwh(power_kw: f64, dt_hours: f64) -> f64 {
    as_kwh(kw(power_kw) * hours(dt_hours))
}

pub mod constants {
    /// Simulation resolution.
    pub const STEP_MINUTES: u32 = 5;
    pub const STEPS_PER_DAY: usize = 288;
    pub const MINUTES_PER_DAY: u32 = 24 * 60;
    pub const DT_HOURS: f64 = STEP_MINUTES as f64 / 60.0;

    pub const DAYS_PER_MONTH: f64 = 30.0;
    pub const DAYS_PER_YEAR: f64 = 365.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = kw(5.0);
        let _e = kwh(1.2);
        let _dt = hours(constants::DT_HOURS);
    }

    #[test]
    fn step_energy_matches_hand_calc() {
        let e = step_energy_kwh(3.0, constants::DT_HOURS);
        assert!((e - 0.25).abs() < 1e-12);
    }

    #[test]
    fn steps_cover_one_day() {
        assert_eq!(
            constants::STEPS_PER_DAY as u32 * constants::STEP_MINUTES,
            constants::MINUTES_PER_DAY
        );
    }
}
