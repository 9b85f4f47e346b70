//! Report templates and the two record-to-report pipelines
//!
//! The daily pipeline is best-effort: failures go to a [`FailureSink`] and
//! the report is empty. The workout pipeline returns every failure.

use crate::duration::DurationExt;
use crate::error::Result;
use crate::logging::FailureSink;
use crate::metrics;
use crate::models::{ActivityKind, BodyProfile};
use crate::parser::RecordParser;

/// Three-line daily summary
pub fn format_daily_report(steps: i64, distance_km: f64, calories_kcal: f64) -> String {
    format!(
        "Количество шагов: {}.\nДистанция составила {:.2} км.\nВы сожгли {:.2} ккал.\n",
        steps, distance_km, calories_kcal
    )
}

/// Five-line workout summary
pub fn format_workout_report(
    activity: &str,
    duration_hours: f64,
    distance_km: f64,
    speed_kmh: f64,
    calories_kcal: f64,
) -> String {
    format!(
        "Тип тренировки: {}\nДлительность: {:.2} ч.\nДистанция: {:.2} км.\nСкорость: {:.2} км/ч\nСожгли калорий: {:.2}\n",
        activity, duration_hours, distance_km, speed_kmh, calories_kcal
    )
}

/// Parses records and renders reports for one body profile
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    parser: RecordParser,
    profile: BodyProfile,
}

impl Reporter {
    pub fn new(parser: RecordParser, profile: BodyProfile) -> Self {
        Self { parser, profile }
    }

    /// Reporter with the strict parser
    pub fn strict(profile: BodyProfile) -> Self {
        Self::new(RecordParser::strict(), profile)
    }

    pub fn profile(&self) -> &BodyProfile {
        &self.profile
    }

    pub fn parser(&self) -> &RecordParser {
        &self.parser
    }

    /// Daily report, or an empty string after reporting the failure
    pub fn daily_report(&self, raw: &str, sink: &mut dyn FailureSink) -> String {
        match self.try_daily_report(raw) {
            Ok(report) => report,
            Err(e) => {
                sink.record_failure(raw, &e);
                String::new()
            }
        }
    }

    /// Daily report with failures returned to the caller
    ///
    /// Daily steps are always counted as walking.
    pub fn try_daily_report(&self, raw: &str) -> Result<String> {
        let record = self.parser.parse_daily(raw)?;
        if record.steps <= 0 {
            return Ok(String::new());
        }

        let distance_km = metrics::daily_distance(record.steps);
        let calories_kcal = metrics::walking_calories(
            record.steps,
            self.profile.weight_kg,
            self.profile.height_m,
            record.duration,
        )?;

        Ok(format_daily_report(record.steps, distance_km, calories_kcal))
    }

    /// Workout report; every failure is returned
    pub fn workout_report(&self, raw: &str) -> Result<String> {
        self.profile.validate()?;

        let record = self.parser.parse_workout(raw)?;
        let kind = ActivityKind::from_label(&record.activity)?;
        let result = metrics::workout_metrics(kind, record.steps, &self.profile, record.duration)?;

        tracing::debug!(
            activity = %kind,
            steps = record.steps,
            distance_km = result.distance_km,
            calories_kcal = result.calories_kcal,
            "Workout processed"
        );

        Ok(format_workout_report(
            &record.activity,
            record.duration.hours_f64(),
            result.distance_km,
            result.speed_kmh,
            result.calories_kcal,
        ))
    }
}

/// Best-effort daily report with the strict parser
///
/// Returns an empty string on any failure after passing it to `sink`.
pub fn daily_activity_report(
    raw: &str,
    weight_kg: f64,
    height_m: f64,
    sink: &mut dyn FailureSink,
) -> String {
    Reporter::strict(BodyProfile::new(weight_kg, height_m)).daily_report(raw, sink)
}

/// Workout report with the strict parser
pub fn workout_report(raw: &str, weight_kg: f64, height_m: f64) -> Result<String> {
    Reporter::strict(BodyProfile::new(weight_kg, height_m)).workout_report(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, TrackerError};
    use crate::logging::MemorySink;

    #[test]
    fn test_format_daily_report() {
        assert_eq!(
            format_daily_report(678, 0.4407, 31.456),
            "Количество шагов: 678.\nДистанция составила 0.44 км.\nВы сожгли 31.46 ккал.\n"
        );
    }

    #[test]
    fn test_format_workout_report() {
        assert_eq!(
            format_workout_report("Бег", 0.5, 2.0, 4.0, 100.0),
            "Тип тренировки: Бег\nДлительность: 0.50 ч.\nДистанция: 2.00 км.\nСкорость: 4.00 км/ч\nСожгли калорий: 100.00\n"
        );
    }

    #[test]
    fn test_daily_report_valid() {
        let cases = [
            (
                "6000,1h00m",
                75.0,
                1.75,
                "Количество шагов: 6000.\nДистанция составила 3.90 км.\nВы сожгли 177.19 ккал.\n",
            ),
            (
                "3000,30m",
                75.0,
                1.75,
                "Количество шагов: 3000.\nДистанция составила 1.95 км.\nВы сожгли 88.59 ккал.\n",
            ),
            (
                "1000,2h00m",
                75.0,
                1.75,
                "Количество шагов: 1000.\nДистанция составила 0.65 км.\nВы сожгли 29.53 ккал.\n",
            ),
            (
                "6000,1h00m",
                60.0,
                1.85,
                "Количество шагов: 6000.\nДистанция составила 3.90 км.\nВы сожгли 149.85 ккал.\n",
            ),
        ];

        for (raw, weight, height, expected) in cases {
            let mut sink = MemorySink::new();
            let got = daily_activity_report(raw, weight, height, &mut sink);
            assert_eq!(got, expected, "input {:?}", raw);
            assert!(sink.is_empty(), "unexpected failure for {:?}: {:?}", raw, sink.entries());
        }
    }

    #[test]
    fn test_daily_report_failures_are_recorded() {
        for raw in [
            "not valid",
            "",
            "-1000,1h00m",
            "0,1h00m",
            "1000,-1h00m",
            "1000,0h00m",
            " 1000,1h",
            "1000,1.5d",
        ] {
            let mut sink = MemorySink::new();
            let got = daily_activity_report(raw, 75.0, 1.75, &mut sink);
            assert_eq!(got, "", "input {:?}", raw);
            assert_eq!(sink.len(), 1, "input {:?}", raw);
            assert_eq!(sink.entries()[0].raw, raw);
        }
    }

    #[test]
    fn test_daily_report_bad_profile() {
        let mut sink = MemorySink::new();
        let got = daily_activity_report("6000,1h00m", 0.0, 1.75, &mut sink);
        assert_eq!(got, "");
        assert_eq!(sink.entries()[0].kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_workout_report_walking() {
        let got = workout_report("6000,Ходьба,1h00m", 75.0, 1.75).unwrap();
        assert_eq!(
            got,
            "Тип тренировки: Ходьба\nДлительность: 1.00 ч.\nДистанция: 4.72 км.\nСкорость: 4.72 км/ч\nСожгли калорий: 177.19\n"
        );
    }

    #[test]
    fn test_workout_report_running() {
        let got = workout_report("6000,Бег,1h00m", 75.0, 1.75).unwrap();
        assert_eq!(
            got,
            "Тип тренировки: Бег\nДлительность: 1.00 ч.\nДистанция: 4.72 км.\nСкорость: 4.72 км/ч\nСожгли калорий: 354.38\n"
        );

        let got = workout_report("3000,Ходьба,30m", 75.0, 1.75).unwrap();
        assert_eq!(
            got,
            "Тип тренировки: Ходьба\nДлительность: 0.50 ч.\nДистанция: 2.36 км.\nСкорость: 4.72 км/ч\nСожгли калорий: 88.59\n"
        );
    }

    #[test]
    fn test_workout_report_english_label_is_echoed() {
        let got = workout_report("6000,Running,1h00m", 75.0, 1.75).unwrap();
        assert!(got.starts_with("Тип тренировки: Running\n"));
        assert!(got.ends_with("Сожгли калорий: 354.38\n"));
    }

    #[test]
    fn test_workout_report_unknown_activity() {
        let err = workout_report("6000,Плавание,1h00m", 75.0, 1.75).unwrap_err();
        assert_eq!(err, TrackerError::unknown_activity("Плавание"));
        assert!(err.to_string().contains("Плавание"));
    }

    #[test]
    fn test_workout_report_errors() {
        let cases = [
            ("6000,Ходьба", 75.0, 1.75, ErrorKind::Format),
            ("0,Ходьба,1h00m", 75.0, 1.75, ErrorKind::Value),
            ("6000,Ходьба,0h00m", 75.0, 1.75, ErrorKind::Value),
            ("6000,Ходьба,1h00m", 0.0, 1.75, ErrorKind::InvalidInput),
            ("6000,Ходьба,1h00m", 75.0, -1.75, ErrorKind::InvalidInput),
        ];

        for (raw, weight, height, kind) in cases {
            let err = workout_report(raw, weight, height).unwrap_err();
            assert_eq!(err.kind(), kind, "input {:?}", raw);
        }
    }

    #[test]
    fn test_profile_checked_before_parsing() {
        let err = workout_report("garbage", -1.0, 1.75).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_trimming_reporter() {
        let reporter = Reporter::new(RecordParser::trimming(), BodyProfile::new(75.0, 1.75));
        let got = reporter.workout_report(" 6000 , Бег , 1h00m ").unwrap();
        assert!(got.starts_with("Тип тренировки: Бег\n"));

        let mut sink = MemorySink::new();
        let got = reporter.daily_report("6000, 1h00m", &mut sink);
        assert!(got.contains("177.19"));
        assert!(sink.is_empty());
    }
}
