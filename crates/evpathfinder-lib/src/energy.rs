//! Charging and state-of-charge arithmetic.
//!
//! Pure functions converting between charging duration (minutes), charging
//! power (energy units per hour) and SOC deltas. Every duration and charged
//! amount is rounded to two decimal places so repeated evaluations of the same
//! charging stop reproduce the same numbers.

/// Round to two decimal places, halves away from zero.
///
/// ```
/// use evpathfinder_lib::energy::round2;
///
/// assert_eq!(round2(8.571_428), 8.57);
/// assert_eq!(round2(0.125), 0.13);
/// ```
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Energy gained by charging for `charging_time` minutes at `charging_power`.
///
/// ```
/// use evpathfinder_lib::energy::charged_energy;
///
/// assert_eq!(charged_energy(30.0, 50.0), 25.0);
/// assert_eq!(charged_energy(0.0, 50.0), 0.0);
/// ```
pub fn charged_energy(charging_time: f64, charging_power: f64) -> f64 {
    round2((charging_time / 60.0) * charging_power)
}

/// SOC after charging, clamped to the battery capacity `max_soc`.
///
/// ```
/// use evpathfinder_lib::energy::new_soc;
///
/// assert_eq!(new_soc(10.0, 2.0, 5.0, 60.0), 7.0);
/// // Clamped at capacity.
/// assert_eq!(new_soc(10.0, 8.0, 5.0, 60.0), 10.0);
/// ```
pub fn new_soc(max_soc: f64, soc_before: f64, charging_time: f64, charging_power: f64) -> f64 {
    (soc_before + charged_energy(charging_time, charging_power)).min(max_soc)
}

/// Minutes of charging required to raise `current_soc` to `necessary_soc`.
///
/// Returns zero when the node cannot charge (`charging_power == 0`) or when
/// the current SOC already covers the requirement.
///
/// ```
/// use evpathfinder_lib::energy::additional_charge_time;
///
/// assert_eq!(additional_charge_time(0.0, 5.0, 60.0), 5.0);
/// assert_eq!(additional_charge_time(6.0, 5.0, 60.0), 0.0);
/// assert_eq!(additional_charge_time(0.0, 5.0, 0.0), 0.0);
/// ```
pub fn additional_charge_time(current_soc: f64, necessary_soc: f64, charging_power: f64) -> f64 {
    if charging_power == 0.0 || necessary_soc <= current_soc {
        return 0.0;
    }
    round2(((necessary_soc - current_soc) / charging_power) * 60.0)
}
