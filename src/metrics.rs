//! Distance, speed and calorie formulas
//!
//! Distance and speed use a stride derived from body height. The daily
//! step report uses a fixed step length instead, see [`daily_distance`].

use chrono::TimeDelta;

use crate::duration::DurationExt;
use crate::error::{InvalidInputError, Result};
use crate::models::{ActivityKind, BodyProfile, MetricsResult};

/// Stride length as a fraction of body height
pub const STRIDE_COEFFICIENT: f64 = 0.45;
/// Fixed step length for casual daily estimates (m)
pub const DAILY_STEP_LENGTH_M: f64 = 0.65;
pub const METERS_PER_KM: f64 = 1000.0;
pub const MINUTES_PER_HOUR: f64 = 60.0;
/// Walking burns half the energy of running at the same speed
pub const WALKING_CALORIES_COEFFICIENT: f64 = 0.5;

/// Distance covered in kilometres, from height-derived stride length
pub fn distance(steps: i64, height_m: f64) -> f64 {
    let stride_m = height_m * STRIDE_COEFFICIENT;
    steps as f64 * stride_m / METERS_PER_KM
}

/// Distance in kilometres using the fixed daily step length
pub fn daily_distance(steps: i64) -> f64 {
    steps as f64 * DAILY_STEP_LENGTH_M / METERS_PER_KM
}

/// Mean speed in km/h; zero for a non-positive duration
pub fn mean_speed(steps: i64, height_m: f64, duration: TimeDelta) -> f64 {
    if !duration.is_positive() {
        return 0.0;
    }
    distance(steps, height_m) / duration.hours_f64()
}

/// Calories burned walking (kcal)
pub fn walking_calories(steps: i64, weight_kg: f64, height_m: f64, duration: TimeDelta) -> Result<f64> {
    Ok(base_calories(steps, weight_kg, height_m, duration)? * WALKING_CALORIES_COEFFICIENT)
}

/// Calories burned running (kcal)
pub fn running_calories(steps: i64, weight_kg: f64, height_m: f64, duration: TimeDelta) -> Result<f64> {
    base_calories(steps, weight_kg, height_m, duration)
}

/// Calories for the given activity kind
pub fn calories(
    kind: ActivityKind,
    steps: i64,
    weight_kg: f64,
    height_m: f64,
    duration: TimeDelta,
) -> Result<f64> {
    match kind {
        ActivityKind::Walking => walking_calories(steps, weight_kg, height_m, duration),
        ActivityKind::Running => running_calories(steps, weight_kg, height_m, duration),
    }
}

/// Distance, speed and calories for one workout
pub fn workout_metrics(
    kind: ActivityKind,
    steps: i64,
    profile: &BodyProfile,
    duration: TimeDelta,
) -> Result<MetricsResult> {
    let calories_kcal = calories(kind, steps, profile.weight_kg, profile.height_m, duration)?;

    Ok(MetricsResult {
        distance_km: distance(steps, profile.height_m),
        speed_kmh: mean_speed(steps, profile.height_m, duration),
        calories_kcal,
    })
}

fn base_calories(steps: i64, weight_kg: f64, height_m: f64, duration: TimeDelta) -> Result<f64> {
    validate_inputs(steps, weight_kg, height_m, duration)?;

    let speed = mean_speed(steps, height_m, duration);
    Ok(weight_kg * speed * duration.minutes_f64() / MINUTES_PER_HOUR)
}

fn validate_inputs(steps: i64, weight_kg: f64, height_m: f64, duration: TimeDelta) -> Result<()> {
    BodyProfile::new(weight_kg, height_m).validate()?;
    if steps <= 0 {
        return Err(InvalidInputError::new("steps", steps).into());
    }
    if !duration.is_positive() {
        return Err(InvalidInputError::new("duration", duration.to_compact_string()).into());
    }
    Ok(())
}
