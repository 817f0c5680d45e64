//! Vehicle battery parameters used by the route search.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Battery and charging behaviour of the vehicle being routed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Battery capacity, in the same energy units as edge consumption.
    pub max_soc: f64,
    /// State of charge at departure.
    pub initial_charge: f64,
    /// Minimum dwell in minutes whenever a real charging stop is made.
    pub min_charging_time: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            max_soc: 100.0,
            initial_charge: 100.0,
            min_charging_time: 0.0,
        }
    }
}

impl VehicleConfig {
    pub fn new(max_soc: f64, initial_charge: f64, min_charging_time: f64) -> Self {
        Self {
            max_soc,
            initial_charge,
            min_charging_time,
        }
    }

    /// Validate the vehicle parameters.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_soc", self.max_soc),
            ("initial_charge", self.initial_charge),
            ("min_charging_time", self.min_charging_time),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite")));
            }
            if value < 0.0 {
                return Err(invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        if self.max_soc == 0.0 {
            return Err(invalid("max_soc must be greater than zero".to_string()));
        }

        if self.initial_charge > self.max_soc {
            return Err(invalid(format!(
                "initial_charge {} exceeds max_soc {}",
                self.initial_charge, self.max_soc
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidVehicleConfig { message }
}
