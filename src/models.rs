use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{InvalidInputError, Result, TrackerError};

/// Activity types that have a calorie formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Walking,
    Running,
}

impl ActivityKind {
    /// Labels accepted for walking in workout logs
    pub const WALKING_LABELS: &'static [&'static str] = &["Ходьба", "Walking"];
    /// Labels accepted for running in workout logs
    pub const RUNNING_LABELS: &'static [&'static str] = &["Бег", "Running"];

    /// Resolve a workout log label, matching exactly
    pub fn from_label(label: &str) -> Result<Self> {
        if Self::WALKING_LABELS.contains(&label) {
            Ok(ActivityKind::Walking)
        } else if Self::RUNNING_LABELS.contains(&label) {
            Ok(ActivityKind::Running)
        } else {
            Err(TrackerError::unknown_activity(label))
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityKind::Walking => write!(f, "Walking"),
            ActivityKind::Running => write!(f, "Running"),
        }
    }
}

/// A parsed `steps,duration` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRecord {
    pub steps: i64,
    pub duration: TimeDelta,
}

/// A parsed `steps,activity,duration` line
///
/// The activity label is kept verbatim; it is only resolved to an
/// [`ActivityKind`] when calories are computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutRecord {
    pub steps: i64,
    pub activity: String,
    pub duration: TimeDelta,
}

/// Body measurements supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in metres
    pub height_m: f64,
}

impl BodyProfile {
    pub fn new(weight_kg: f64, height_m: f64) -> Self {
        Self {
            weight_kg,
            height_m,
        }
    }

    /// Check both measurements are positive. Realism is not checked.
    pub fn validate(&self) -> Result<()> {
        if !(self.weight_kg > 0.0) {
            return Err(InvalidInputError::new("weight", self.weight_kg).into());
        }
        if !(self.height_m > 0.0) {
            return Err(InvalidInputError::new("height", self.height_m).into());
        }
        Ok(())
    }
}

impl Default for BodyProfile {
    fn default() -> Self {
        Self {
            weight_kg: 84.6,
            height_m: 1.87,
        }
    }
}

/// Derived metrics for one record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub distance_km: f64,
    pub speed_kmh: f64,
    pub calories_kcal: f64,
}
