// 🚦 Traffic Desk - drivers, violations, fine accumulation
//
// Drivers are keyed by license number. Each accepted violation bumps the
// driver's violation count and fine total; reset zeroes both unconditionally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::console::money;
use crate::repository::{Repository, RepositoryError};
use crate::validation::{self, ValidationError};

// ============================================================================
// TRAFFIC ERROR
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrafficError {
    #[error("Invalid violation type.")]
    InvalidViolationType,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// ============================================================================
// VIOLATION TYPE
// ============================================================================

/// Closed set of recordable violations. Anything outside this set fails
/// at parse time, before a driver record is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    Speeding,
    Parking,
    SignalViolation,
}

impl ViolationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationType::Speeding => "Speeding",
            ViolationType::Parking => "Parking",
            ViolationType::SignalViolation => "Signal Violation",
        }
    }
}

impl FromStr for ViolationType {
    type Err = TrafficError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Speeding" => Ok(ViolationType::Speeding),
            "Parking" => Ok(ViolationType::Parking),
            "Signal Violation" => Ok(ViolationType::SignalViolation),
            _ => Err(TrafficError::InvalidViolationType),
        }
    }
}

// ============================================================================
// VIOLATION
// ============================================================================

/// One recorded offense. Type and fine amount are validated at
/// construction; the record is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub id: String,
    pub violation_type: ViolationType,
    pub fine_amount: f64,
    pub recorded_at: DateTime<Utc>,
}

impl Violation {
    pub fn new(type_name: &str, fine_amount: f64) -> Result<Self, TrafficError> {
        let violation_type = type_name.parse()?;
        validation::positive_amount("Fine amount", fine_amount)?;

        Ok(Violation {
            id: uuid::Uuid::new_v4().to_string(),
            violation_type,
            fine_amount,
            recorded_at: Utc::now(),
        })
    }

    pub fn details(&self) -> String {
        format!(
            "Violation Type: {}, Fine Amount: ${}",
            self.violation_type.as_str(),
            money(self.fine_amount)
        )
    }
}

// ============================================================================
// DRIVER
// ============================================================================

/// Driver record with a running fine total and an append-only violation
/// history. The license number is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    pub license_number: String,
    total_fines: f64,
    violations: Vec<Violation>,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    pub fn new(name: &str, license_number: &str) -> Result<Self, TrafficError> {
        validation::check_license(license_number)?;

        Ok(Driver {
            name: name.to_string(),
            license_number: license_number.to_string(),
            total_fines: 0.0,
            violations: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn total_fines(&self) -> f64 {
        self.total_fines
    }

    pub fn violation_count(&self) -> u32 {
        self.violations.len() as u32
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Accumulates the fine and appends the record.
    pub fn add_violation(&mut self, violation: Violation) {
        self.total_fines += violation.fine_amount;
        self.violations.push(violation);
    }

    /// Zeroes the fine total and clears the history, regardless of state.
    pub fn reset_violations(&mut self) {
        self.total_fines = 0.0;
        self.violations.clear();
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Driver Name: {}", self.name)?;
        writeln!(f, "License Number: {}", self.license_number)?;
        writeln!(f, "Total Fines: ${}", money(self.total_fines))?;
        write!(f, "Violation Count: {}", self.violation_count())
    }
}

// ============================================================================
// TRAFFIC SYSTEM
// ============================================================================

/// Driver repository keyed by license number.
#[derive(Debug, Clone)]
pub struct TrafficSystem {
    drivers: Repository<String, Driver>,
}

impl TrafficSystem {
    pub fn new() -> Self {
        TrafficSystem {
            drivers: Repository::new("Driver"),
        }
    }

    pub fn add_driver(&mut self, name: &str, license_number: &str) -> Result<(), TrafficError> {
        let driver = Driver::new(name, license_number)?;
        self.drivers
            .insert(license_number.to_string(), driver)?;
        Ok(())
    }

    pub fn driver(&self, license_number: &str) -> Result<&Driver, TrafficError> {
        Ok(self.drivers.get(license_number)?)
    }

    /// The violation is constructed (and validated) by the caller, so a
    /// rejected type or amount never reaches the driver record.
    pub fn record_violation(
        &mut self,
        license_number: &str,
        violation: Violation,
    ) -> Result<(), TrafficError> {
        self.drivers.get_mut(license_number)?.add_violation(violation);
        Ok(())
    }

    pub fn reset_violations(&mut self, license_number: &str) -> Result<(), TrafficError> {
        self.drivers.get_mut(license_number)?.reset_violations();
        Ok(())
    }
}

impl Default for TrafficSystem {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
