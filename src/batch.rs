//! Batch processing of raw log lines
//!
//! Daily logs keep one output slot per input line. Workout logs keep only
//! the successful reports and account for every skipped line.

use crate::error::TrackerError;
use crate::logging::FailureSink;
use crate::report::Reporter;

/// A workout line that could not be turned into a report
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// 1-based position in the input
    pub line_number: usize,
    pub raw: String,
    pub error: TrackerError,
}

/// Outcome of processing a workout log
#[derive(Debug, Clone, Default)]
pub struct WorkoutLog {
    pub reports: Vec<String>,
    pub skipped: Vec<SkippedRecord>,
}

impl WorkoutLog {
    /// Lines seen, successful or not
    pub fn processed(&self) -> usize {
        self.reports.len() + self.skipped.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Fraction of lines that produced a report; 1.0 for an empty log
    pub fn success_rate(&self) -> f64 {
        match self.processed() {
            0 => 1.0,
            total => self.reports.len() as f64 / total as f64,
        }
    }
}

/// Run every line through the daily pipeline
///
/// The output has one entry per line; failed lines become empty strings.
pub fn process_daily_log<I, S>(lines: I, reporter: &Reporter, sink: &mut dyn FailureSink) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| reporter.daily_report(line.as_ref(), sink))
        .collect()
}

/// Run every line through the workout pipeline, skipping failures
pub fn process_workout_log<I, S>(lines: I, reporter: &Reporter, sink: &mut dyn FailureSink) -> WorkoutLog
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut log = WorkoutLog::default();

    for (index, line) in lines.into_iter().enumerate() {
        let raw = line.as_ref();
        match reporter.workout_report(raw) {
            Ok(report) => log.reports.push(report),
            Err(error) => {
                sink.record_failure(raw, &error);
                log.skipped.push(SkippedRecord {
                    line_number: index + 1,
                    raw: raw.to_string(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        processed = log.processed(),
        skipped = log.skipped_count(),
        "Workout log processed"
    );

    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::logging::MemorySink;
    use crate::models::BodyProfile;

    fn reporter() -> Reporter {
        Reporter::strict(BodyProfile::new(84.6, 1.87))
    }

    #[test]
    fn test_daily_log_keeps_positions() {
        let input = [
            "678,0h50m",
            "792,1h14m",
            ",3456",
            "12:40:00, 3456",
            "something is wrong",
            "7830,2h40m",
        ];
        let mut sink = MemorySink::new();

        let reports = process_daily_log(input, &reporter(), &mut sink);

        assert_eq!(reports.len(), input.len());
        assert!(reports[0].starts_with("Количество шагов: 678."));
        assert!(reports[1].starts_with("Количество шагов: 792."));
        assert!(reports[2].is_empty());
        assert!(reports[3].is_empty());
        assert!(reports[4].is_empty());
        assert!(reports[5].starts_with("Количество шагов: 7830."));
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_workout_log_skips_and_counts() {
        let input = vec![
            "3456,Ходьба,3h00m".to_string(),
            "something is wrong".to_string(),
            "678,Бег,0h5m".to_string(),
            ",3456 Ходьба".to_string(),
            "1000,Плавание,1h".to_string(),
        ];
        let mut sink = MemorySink::new();

        let log = process_workout_log(&input, &reporter(), &mut sink);

        assert_eq!(log.reports.len(), 2);
        assert_eq!(log.skipped_count(), 3);
        assert_eq!(log.processed(), 5);
        assert!((log.success_rate() - 0.4).abs() < 1e-12);

        assert_eq!(log.skipped[0].line_number, 2);
        assert_eq!(log.skipped[0].error.kind(), ErrorKind::Format);
        assert_eq!(log.skipped[2].line_number, 5);
        assert_eq!(log.skipped[2].error.kind(), ErrorKind::UnknownActivity);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_empty_workout_log() {
        let mut sink = MemorySink::new();
        let log = process_workout_log(Vec::<&str>::new(), &reporter(), &mut sink);
        assert_eq!(log.processed(), 0);
        assert_eq!(log.success_rate(), 1.0);
        assert!(sink.is_empty());
    }
}
