use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::admin::domain::UserId;
use crate::catalog::domain::FoodTruckId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InspectionId(pub u64);

impl fmt::Display for InspectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outcome of a physical inspection; terminal once PASS or FAIL is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionResult {
    InProgress,
    Pass,
    Fail,
}

impl InspectionResult {
    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

impl FromStr for InspectionResult {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "PASS" => Ok(Self::Pass),
            "FAIL" => Ok(Self::Fail),
            other => Err(format!("unknown inspection result '{other}'")),
        }
    }
}

/// An inspector's evaluation of one food truck. Nothing prevents several
/// inspections per truck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub id: InspectionId,
    pub food_truck_id: FoodTruckId,
    pub inspector_id: UserId,
    pub inspection_date: DateTime<Utc>,
    pub result: InspectionResult,
}

/// Workload counters for a single inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectorStats {
    pub total_inspections: usize,
    pub pending_inspections: usize,
    pub passed_inspections: usize,
    pub failed_inspections: usize,
    pub pass_rate: f64,
}
