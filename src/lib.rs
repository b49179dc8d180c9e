// Library interface for bmirs
// The engine modules (parser, calculator, classifier, gauge) are pure; the
// session, history and export modules form the shell around them.

pub mod calculator;
pub mod classifier;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod gauge;
pub mod history;
pub mod logging;
pub mod models;
pub mod parser;
pub mod session;

// Re-export commonly used types for convenience
pub use models::*;
pub use calculator::{compute_bmi, evaluate, format_bmi};
pub use classifier::classify;
pub use gauge::{gauge_position, GaugeTransition};
pub use parser::parse_measurement;
pub use history::{History, HistorySummary};
pub use session::{ResultView, Session};
pub use export::{ExportFormat, ExportManager};
pub use config::AppConfig;
pub use error::{BmiRsError, ParseError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
