// Library interface for stepmetrics modules
// This allows integration tests to access the core functionality

pub mod batch;
pub mod config;
pub mod duration;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod report;

// Re-export commonly used types for convenience
pub use models::*;
pub use batch::{process_daily_log, process_workout_log, SkippedRecord, WorkoutLog};
pub use config::TrackerConfig;
pub use duration::{parse_duration, DurationExt};
pub use error::{ErrorKind, Result, TrackerError};
pub use logging::{FailureSink, LogConfig, LogFormat, LogLevel, MemorySink, TracingSink, WriterSink};
pub use parser::{parse_daily_record, parse_workout_record, RecordParser, WhitespacePolicy};
pub use report::{daily_activity_report, workout_report, Reporter};
