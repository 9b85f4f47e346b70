//! Record parsing for daily step logs and workout logs
//!
//! Validation runs in layers: field count first, then the step and
//! duration grammar, then positivity. The first failing layer decides the
//! error.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::duration::{parse_duration, DurationExt};
use crate::error::{FormatError, Result, TrackerError, ValueError};
use crate::models::{DailyRecord, WorkoutRecord};

const FIELD_SEPARATOR: char = ',';

/// How surrounding whitespace in a field is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespacePolicy {
    /// Padded fields are a format error
    #[default]
    Strict,
    /// Fields are trimmed before parsing
    Trim,
}

impl std::str::FromStr for WhitespacePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(WhitespacePolicy::Strict),
            "trim" => Ok(WhitespacePolicy::Trim),
            _ => Err(format!("Invalid whitespace policy: {}", s)),
        }
    }
}

/// Parser for comma-delimited activity records
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordParser {
    policy: WhitespacePolicy,
}

impl RecordParser {
    pub fn new(policy: WhitespacePolicy) -> Self {
        Self { policy }
    }

    /// Strict parser, the canonical behaviour
    pub fn strict() -> Self {
        Self::new(WhitespacePolicy::Strict)
    }

    /// Parser that trims fields instead of rejecting padding
    pub fn trimming() -> Self {
        Self::new(WhitespacePolicy::Trim)
    }

    pub fn policy(&self) -> WhitespacePolicy {
        self.policy
    }

    /// Parse a `steps,duration` line
    pub fn parse_daily(&self, raw: &str) -> Result<DailyRecord> {
        let [steps, duration] = split_fields::<2>(raw)?;

        let steps = self.field("step count", steps)?;
        let duration = self.field("duration", duration)?;

        let steps = parse_steps(steps)?;
        let duration = parse_positive_duration(duration)?;

        Ok(DailyRecord { steps, duration })
    }

    /// Parse a `steps,activity,duration` line
    ///
    /// Any non-empty activity label is accepted here.
    pub fn parse_workout(&self, raw: &str) -> Result<WorkoutRecord> {
        let [steps, activity, duration] = split_fields::<3>(raw)?;

        let steps = self.field("step count", steps)?;
        let activity = self.field("activity type", activity)?;
        let duration = self.field("duration", duration)?;

        let steps = parse_steps(steps)?;
        if activity.trim().is_empty() {
            return Err(FormatError::EmptyActivity.into());
        }
        let duration = parse_positive_duration(duration)?;

        Ok(WorkoutRecord {
            steps,
            activity: activity.to_string(),
            duration,
        })
    }

    /// Apply the whitespace policy to one field
    fn field<'a>(&self, name: &'static str, value: &'a str) -> Result<&'a str> {
        match self.policy {
            WhitespacePolicy::Trim => Ok(value.trim()),
            WhitespacePolicy::Strict => {
                if value != value.trim() {
                    return Err(FormatError::Whitespace {
                        field: name,
                        value: value.to_string(),
                    }
                    .into());
                }
                Ok(value)
            }
        }
    }
}

/// Parse a daily record with the strict parser
pub fn parse_daily_record(raw: &str) -> Result<DailyRecord> {
    RecordParser::strict().parse_daily(raw)
}

/// Parse a workout record with the strict parser
pub fn parse_workout_record(raw: &str) -> Result<WorkoutRecord> {
    RecordParser::strict().parse_workout(raw)
}

fn split_fields<const N: usize>(raw: &str) -> Result<[&str; N]> {
    let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    let actual = fields.len();
    fields.try_into().map_err(|_| {
        TrackerError::from(FormatError::FieldCount {
            expected: N,
            actual,
        })
    })
}

fn parse_steps(value: &str) -> Result<i64> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let steps: i64 = digits.parse().map_err(|e: std::num::ParseIntError| {
        FormatError::InvalidSteps {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;

    if steps <= 0 {
        return Err(ValueError::NonPositiveSteps(steps).into());
    }
    Ok(steps)
}

fn parse_positive_duration(value: &str) -> Result<TimeDelta> {
    let duration = parse_duration(value)?;
    if !duration.is_positive() {
        return Err(ValueError::NonPositiveDuration(duration.to_compact_string()).into());
    }
    Ok(duration)
}
